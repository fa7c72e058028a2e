//! Type-expression resolution.
//!
//! [`TypeResolver::pick`] tests the [`ResolverVariant`]s in [`ResolverVariant::PRIORITY`] order
//! and the first one whose [`ResolverVariant::handles`] accepts the expression resolves it.
//! Nested expressions recurse through [`TypeResolver::resolve`], so every level is dispatched
//! the same way.
//!
//! The order matters: generic arrays are tested before the plain variant, whose own array path
//! only understands arrays of concrete declared types, and the plain variant comes last.

use crate::bindings::BindingTable;
use crate::config::UnboundTypeParamPolicy;
use crate::descriptor::TypeDescriptor;
use crate::error::ResolutionError;
use crate::expr::TypeExpr;
use crate::model::{DeclaredType, SlotOwner, TypeParamSlot, TypeUniverse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverVariant {
    AnnotatedGenericArray,
    AnnotatedParameterized,
    AnnotatedTypeVar,
    AnnotatedWildcard,
    /// Any other annotated shape; re-dispatches on the unwrapped expression.
    Annotated,
    GenericArray,
    Parameterized,
    TypeVar,
    Wildcard,
    Declared,
}

impl ResolverVariant {
    pub const PRIORITY: [ResolverVariant; 10] = [
        ResolverVariant::AnnotatedGenericArray,
        ResolverVariant::AnnotatedParameterized,
        ResolverVariant::AnnotatedTypeVar,
        ResolverVariant::AnnotatedWildcard,
        ResolverVariant::Annotated,
        ResolverVariant::GenericArray,
        ResolverVariant::Parameterized,
        ResolverVariant::TypeVar,
        ResolverVariant::Wildcard,
        ResolverVariant::Declared,
    ];

    pub fn handles(self, expr: &TypeExpr) -> bool {
        let annotated_inner = match expr {
            TypeExpr::Annotated { ty, .. } => Some(&**ty),
            _ => None,
        };
        match self {
            ResolverVariant::AnnotatedGenericArray => {
                matches!(annotated_inner, Some(TypeExpr::GenericArray(_)))
            }
            ResolverVariant::AnnotatedParameterized => {
                matches!(annotated_inner, Some(TypeExpr::Parameterized { .. }))
            }
            ResolverVariant::AnnotatedTypeVar => {
                matches!(annotated_inner, Some(TypeExpr::TypeVar(_)))
            }
            ResolverVariant::AnnotatedWildcard => {
                matches!(annotated_inner, Some(TypeExpr::Wildcard { .. }))
            }
            ResolverVariant::Annotated => annotated_inner.is_some(),
            ResolverVariant::GenericArray => matches!(expr, TypeExpr::GenericArray(_)),
            ResolverVariant::Parameterized => matches!(expr, TypeExpr::Parameterized { .. }),
            ResolverVariant::TypeVar => matches!(expr, TypeExpr::TypeVar(_)),
            ResolverVariant::Wildcard => matches!(expr, TypeExpr::Wildcard { .. }),
            ResolverVariant::Declared => matches!(expr, TypeExpr::Declared(_)),
        }
    }
}

/// Resolves [`TypeExpr`]s against a [`BindingTable`].
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'u> {
    universe: &'u TypeUniverse,
    policy: UnboundTypeParamPolicy,
}

impl<'u> TypeResolver<'u> {
    pub fn new(universe: &'u TypeUniverse) -> Self {
        Self::with_policy(universe, UnboundTypeParamPolicy::default())
    }

    pub fn with_policy(universe: &'u TypeUniverse, policy: UnboundTypeParamPolicy) -> Self {
        Self { universe, policy }
    }

    pub fn universe(&self) -> &'u TypeUniverse {
        self.universe
    }

    pub fn policy(&self) -> UnboundTypeParamPolicy {
        self.policy
    }

    pub fn pick(&self, expr: &TypeExpr) -> Result<ResolverVariant, ResolutionError> {
        ResolverVariant::PRIORITY
            .into_iter()
            .find(|variant| variant.handles(expr))
            .ok_or_else(|| unsupported(expr))
    }

    pub fn resolve(
        &self,
        table: &BindingTable,
        expr: &TypeExpr,
    ) -> Result<TypeDescriptor, ResolutionError> {
        match self.pick(expr)? {
            ResolverVariant::AnnotatedGenericArray => {
                self.resolve_generic_array(table, annotated_inner(expr))
            }
            ResolverVariant::AnnotatedParameterized => {
                self.resolve_parameterized(table, annotated_inner(expr))
            }
            ResolverVariant::AnnotatedTypeVar => {
                self.resolve_type_var(table, annotated_inner(expr))
            }
            ResolverVariant::AnnotatedWildcard => {
                self.resolve_wildcard(table, annotated_inner(expr))
            }
            ResolverVariant::Annotated => self.resolve(table, annotated_inner(expr)),
            ResolverVariant::GenericArray => self.resolve_generic_array(table, expr),
            ResolverVariant::Parameterized => self.resolve_parameterized(table, expr),
            ResolverVariant::TypeVar => self.resolve_type_var(table, expr),
            ResolverVariant::Wildcard => self.resolve_wildcard(table, expr),
            ResolverVariant::Declared => self.resolve_declared_expr(table, expr),
        }
    }

    /// Resolve each expression in order.
    pub fn resolve_all<'e>(
        &self,
        table: &BindingTable,
        exprs: impl IntoIterator<Item = &'e TypeExpr>,
    ) -> Result<Vec<TypeDescriptor>, ResolutionError> {
        exprs
            .into_iter()
            .map(|expr| self.resolve(table, expr))
            .collect()
    }

    fn resolve_declared_expr(
        &self,
        table: &BindingTable,
        expr: &TypeExpr,
    ) -> Result<TypeDescriptor, ResolutionError> {
        let TypeExpr::Declared(declared) = expr else {
            return Err(unsupported(expr));
        };
        self.resolve_declared(table, declared)
    }

    fn resolve_declared(
        &self,
        table: &BindingTable,
        declared: &DeclaredType,
    ) -> Result<TypeDescriptor, ResolutionError> {
        match declared {
            DeclaredType::Primitive(_) | DeclaredType::Void => {
                Ok(TypeDescriptor::new(declared.clone(), Vec::new()))
            }
            DeclaredType::Array(component) => {
                let component = self.resolve_declared(table, component)?;
                Ok(TypeDescriptor::array(component))
            }
            DeclaredType::Class(id) => {
                let decl = self
                    .universe
                    .class(*id)
                    .ok_or(ResolutionError::UnknownClass(*id))?;
                // A raw reference to a generic class: each of its own parameters is resolved as
                // if it had been referenced directly.
                let args = (0..decl.type_params.len())
                    .map(|idx| {
                        let slot = TypeParamSlot::class(*id, slot_index(idx));
                        self.resolve_slot(table, slot)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::class(*id, args))
            }
        }
    }

    fn resolve_generic_array(
        &self,
        table: &BindingTable,
        expr: &TypeExpr,
    ) -> Result<TypeDescriptor, ResolutionError> {
        let TypeExpr::GenericArray(component) = expr else {
            return Err(unsupported(expr));
        };
        let component = self.resolve(table, component)?;
        Ok(TypeDescriptor::array(component))
    }

    fn resolve_parameterized(
        &self,
        table: &BindingTable,
        expr: &TypeExpr,
    ) -> Result<TypeDescriptor, ResolutionError> {
        let TypeExpr::Parameterized { raw, args } = expr else {
            return Err(unsupported(expr));
        };
        let args = self.resolve_all(table, args)?;
        Ok(TypeDescriptor::class(*raw, args))
    }

    fn resolve_type_var(
        &self,
        table: &BindingTable,
        expr: &TypeExpr,
    ) -> Result<TypeDescriptor, ResolutionError> {
        let TypeExpr::TypeVar(slot) = expr else {
            return Err(unsupported(expr));
        };
        self.resolve_slot(table, *slot)
    }

    fn resolve_slot(
        &self,
        table: &BindingTable,
        slot: TypeParamSlot,
    ) -> Result<TypeDescriptor, ResolutionError> {
        if let Some(binding) = table.get(slot) {
            return Ok(binding.clone());
        }

        let name = self.type_var_name(slot);
        match self.policy {
            UnboundTypeParamPolicy::Lenient => {
                tracing::info!(
                    target = "nova.generics",
                    type_var = %name,
                    slot = ?slot,
                    "type variable has no binding; substituting java.lang.Object"
                );
                Ok(TypeDescriptor::OBJECT)
            }
            UnboundTypeParamPolicy::Strict => {
                Err(ResolutionError::UnboundTypeParameter { name, slot })
            }
        }
    }

    fn resolve_wildcard(
        &self,
        table: &BindingTable,
        expr: &TypeExpr,
    ) -> Result<TypeDescriptor, ResolutionError> {
        let TypeExpr::Wildcard { upper, lower } = expr else {
            return Err(unsupported(expr));
        };
        let bound = match lower.first().or_else(|| upper.first()) {
            Some(bound) => self.resolve(table, bound)?,
            None => TypeDescriptor::OBJECT,
        };
        Ok(TypeDescriptor::bounded_unknown(bound))
    }

    /// `Owner.T` style name for diagnostics.
    fn type_var_name(&self, slot: TypeParamSlot) -> String {
        let param = self
            .universe
            .type_param(slot)
            .map(|tp| tp.name.as_str())
            .unwrap_or("?");
        let class = match slot.owner {
            SlotOwner::Class(class) => class,
            SlotOwner::Method(method) => method.class,
        };
        let owner = self.universe.class_name(class).unwrap_or("?");
        match slot.owner {
            SlotOwner::Class(_) => format!("{owner}.{param}"),
            SlotOwner::Method(method) => {
                let method = self
                    .universe
                    .method(method)
                    .map(|m| m.name.as_str())
                    .unwrap_or("?");
                format!("{owner}.{method}.{param}")
            }
        }
    }
}

fn annotated_inner(expr: &TypeExpr) -> &TypeExpr {
    match expr {
        TypeExpr::Annotated { ty, .. } => ty,
        other => other,
    }
}

fn unsupported(expr: &TypeExpr) -> ResolutionError {
    ResolutionError::UnsupportedExpression {
        expression: expr.to_string(),
    }
}

pub(crate) fn slot_index(idx: usize) -> u32 {
    idx.try_into().unwrap_or(u32::MAX)
}
