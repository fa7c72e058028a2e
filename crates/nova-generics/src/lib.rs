//! Runtime resolution of Java generic types.
//!
//! A [`TypeUniverse`] holds class declarations whose supertypes and members are unresolved
//! [`TypeExpr`]s. [`build_hierarchy`] instantiates a root type with concrete arguments and
//! propagates them to every ancestor, producing one [`BindingTable`] per ancestor; a
//! [`TypeResolver`] then turns any expression written inside an ancestor into a
//! [`TypeDescriptor`]. [`GenericsResolver`] wraps both for member lookups.

#![forbid(unsafe_code)]

mod bindings;
mod cache;
mod config;
mod descriptor;
mod error;
mod expr;
mod hierarchy;
mod jdk;
mod loader;
mod lookup;
mod matching;
mod model;
mod resolver;

pub use crate::bindings::{BindingTable, HierarchyMap};
pub use crate::cache::{HierarchyCache, HierarchyKey};
pub use crate::config::{ResolverConfig, UnboundTypeParamPolicy};
pub use crate::descriptor::{DisplayDescriptor, TypeDescriptor};
pub use crate::error::{ConfigError, HierarchyError, LookupError, ResolutionError};
pub use crate::expr::{TypeAnnotation, TypeExpr};
pub use crate::hierarchy::{
    build_hierarchy, build_hierarchy_for, build_hierarchy_for_expr, HierarchyBuilder,
};
pub use crate::jdk::TYPE_LITERAL_CLASS;
pub use crate::loader::{binary_name, SignatureLoader};
pub use crate::lookup::{GenericsResolver, ResolvedMethod};
pub use crate::matching::{boxed, is_assignable, is_types_match};
pub use crate::model::{
    ClassDecl, ClassId, ClassKind, DeclaredType, FieldDecl, MethodDecl, MethodId, PrimitiveType,
    SlotOwner, TypeParamDecl, TypeParamSlot, TypeUniverse,
};
pub use crate::resolver::{ResolverVariant, TypeResolver};
