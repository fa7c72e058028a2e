//! Member-level queries built on hierarchy maps: field types, method signatures and type
//! literal capture, as seen from a concrete instantiation of the owning type.

use std::sync::Arc;

use crate::bindings::{BindingTable, HierarchyMap};
use crate::cache::{HierarchyCache, HierarchyKey};
use crate::config::ResolverConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::{HierarchyError, LookupError};
use crate::expr::TypeExpr;
use crate::hierarchy::HierarchyBuilder;
use crate::jdk::TYPE_LITERAL_CLASS;
use crate::model::{ClassId, DeclaredType, MethodId, TypeUniverse};
use crate::resolver::{slot_index, TypeResolver};

/// A method's types with the owner's bindings substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub parameters: Vec<TypeDescriptor>,
    pub return_type: TypeDescriptor,
    pub exceptions: Vec<TypeDescriptor>,
}

/// Entry point for hosts: a universe, the settings it was configured with, and (optionally)
/// memoised hierarchies.
#[derive(Debug)]
pub struct GenericsResolver<'u> {
    universe: &'u TypeUniverse,
    config: ResolverConfig,
    cache: HierarchyCache,
}

impl<'u> GenericsResolver<'u> {
    pub fn new(universe: &'u TypeUniverse, config: ResolverConfig) -> Self {
        Self {
            universe,
            config,
            cache: HierarchyCache::new(),
        }
    }

    pub fn universe(&self) -> &'u TypeUniverse {
        self.universe
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &HierarchyCache {
        &self.cache
    }

    pub fn type_resolver(&self) -> TypeResolver<'u> {
        TypeResolver::with_policy(self.universe, self.config.unbound_type_params)
    }

    fn builder(&self) -> HierarchyBuilder<'u> {
        HierarchyBuilder::new(self.type_resolver())
    }

    pub fn hierarchy(
        &self,
        root: &DeclaredType,
        arguments: &[TypeDescriptor],
    ) -> Result<Arc<HierarchyMap>, HierarchyError> {
        if !self.config.cache_hierarchies {
            return self.builder().build(root, arguments).map(Arc::new);
        }
        let key = HierarchyKey::new(root.clone(), arguments.to_vec());
        self.cache
            .get_or_build(key, || self.builder().build(root, arguments))
    }

    pub fn hierarchy_of(&self, ty: &TypeDescriptor) -> Result<Arc<HierarchyMap>, HierarchyError> {
        self.hierarchy(ty.declared_type(), ty.generic_arguments())
    }

    /// Type of the field `name` as seen from `owner`. The nearest declaring ancestor wins.
    pub fn field_type(
        &self,
        owner: &TypeDescriptor,
        name: &str,
    ) -> Result<TypeDescriptor, LookupError> {
        let hierarchy = self.hierarchy_of(owner)?;
        let found = find_in_hierarchy(&hierarchy, |class, table| {
            let decl = self.universe.class(class)?;
            let field = decl.fields.iter().find(|f| f.name == name)?;
            Some(self.type_resolver().resolve(table, &field.ty))
        });
        match found {
            Some(resolved) => Ok(resolved?),
            None => Err(LookupError::NoSuchField {
                class: owner.display(self.universe).to_string(),
                field: name.to_string(),
            }),
        }
    }

    /// The first method named `name` with `arity` parameters, searching `owner` and then its
    /// ancestors in hierarchy order. Only declarations are consulted, so this works for raw
    /// owners under either unbound policy.
    pub fn find_method(
        &self,
        owner: ClassId,
        name: &str,
        arity: usize,
    ) -> Result<MethodId, LookupError> {
        if self.universe.class(owner).is_none() {
            return Err(HierarchyError::UnknownClass(owner).into());
        }
        ancestor_classes(self.universe, owner)
            .into_iter()
            .find_map(|class| {
                let decl = self.universe.class(class)?;
                decl.methods
                    .iter()
                    .position(|m| m.name == name && m.params.len() == arity)
                    .map(|idx| MethodId {
                        class,
                        index: slot_index(idx),
                    })
            })
            .ok_or_else(|| LookupError::NoSuchMethod {
                class: self.class_name(owner),
                method: name.to_string(),
                arity,
            })
    }

    /// `method`'s types as seen from `owner`, which must be the declaring class or a subtype
    /// of it. Method type parameters have no bindings and follow the unbound policy.
    pub fn method_signature(
        &self,
        owner: &TypeDescriptor,
        method: MethodId,
    ) -> Result<ResolvedMethod, LookupError> {
        let decl = self
            .universe
            .method(method)
            .ok_or(LookupError::UnknownMethod(method))?;
        let hierarchy = self.hierarchy_of(owner)?;
        let object_table;
        let table = if method.class == ClassId::OBJECT {
            object_table = BindingTable::empty(ClassId::OBJECT);
            &object_table
        } else {
            hierarchy.table_for_class(method.class)?
        };

        let resolver = self.type_resolver();
        Ok(ResolvedMethod {
            parameters: resolver.resolve_all(table, &decl.params)?,
            return_type: resolver.resolve(table, &decl.return_type)?,
            exceptions: resolver.resolve_all(table, &decl.exceptions)?,
        })
    }

    pub fn method_parameter_types(
        &self,
        owner: &TypeDescriptor,
        method: MethodId,
    ) -> Result<Vec<TypeDescriptor>, LookupError> {
        Ok(self.method_signature(owner, method)?.parameters)
    }

    pub fn method_return_type(
        &self,
        owner: &TypeDescriptor,
        method: MethodId,
    ) -> Result<TypeDescriptor, LookupError> {
        Ok(self.method_signature(owner, method)?.return_type)
    }

    pub fn method_exception_types(
        &self,
        owner: &TypeDescriptor,
        method: MethodId,
    ) -> Result<Vec<TypeDescriptor>, LookupError> {
        Ok(self.method_signature(owner, method)?.exceptions)
    }

    /// The type argument a type literal subclass (`new TypeLiteral<List<String>>() {}`) passes
    /// to [`TYPE_LITERAL_CLASS`].
    pub fn capture(&self, literal: ClassId) -> Result<TypeDescriptor, LookupError> {
        let not_a_literal = || LookupError::NotATypeLiteral {
            class: self.class_name(literal),
        };
        let base = self
            .universe
            .class_id(TYPE_LITERAL_CLASS)
            .ok_or_else(not_a_literal)?;
        let decl = self
            .universe
            .class(literal)
            .ok_or(HierarchyError::UnknownClass(literal))?;

        let argument = match decl.super_class.as_ref().map(TypeExpr::unannotated) {
            Some(TypeExpr::Parameterized { raw, args }) if *raw == base && args.len() == 1 => {
                &args[0]
            }
            _ => return Err(not_a_literal()),
        };
        let captured = self
            .type_resolver()
            .resolve(&BindingTable::empty(literal), argument)?;
        tracing::debug!(
            target = "nova.generics",
            literal = %self.class_name(literal),
            captured = %captured.display(self.universe),
            "captured type literal argument"
        );
        Ok(captured)
    }

    fn class_name(&self, id: ClassId) -> String {
        self.universe
            .class_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{id:?}"))
    }
}

/// Visit every class of `hierarchy` in discovery order, then `java.lang.Object` with an empty
/// table, stopping at the first hit.
fn find_in_hierarchy<T>(
    hierarchy: &HierarchyMap,
    mut find: impl FnMut(ClassId, &BindingTable) -> Option<T>,
) -> Option<T> {
    for (declared, table) in hierarchy.iter() {
        if let Some(class) = declared.as_class() {
            if let Some(found) = find(class, table) {
                return Some(found);
            }
        }
    }
    find(ClassId::OBJECT, &BindingTable::empty(ClassId::OBJECT))
}

/// `class` and its ancestors in the order hierarchy maps use, with `java.lang.Object` last.
fn ancestor_classes(universe: &TypeUniverse, class: ClassId) -> Vec<ClassId> {
    fn walk(universe: &TypeUniverse, class: ClassId, out: &mut Vec<ClassId>) {
        if class == ClassId::OBJECT || out.contains(&class) {
            return;
        }
        out.push(class);
        for parent in universe.direct_supertypes(class) {
            walk(universe, parent, out);
        }
    }

    let mut out = Vec::new();
    walk(universe, class, &mut out);
    out.push(ClassId::OBJECT);
    out
}
