//! Hierarchy construction: propagate a root instantiation's bindings to every ancestor.
//!
//! For `class Child<T> extends Parent<List<T>>` built with `T = Character`, the walk installs
//! `Child.T = Character`, resolves the edge argument `List<T>` against that table and recurses
//! into `Parent` with `[List<Character>]`.

use indexmap::IndexMap;

use crate::bindings::{BindingTable, HierarchyMap};
use crate::config::UnboundTypeParamPolicy;
use crate::descriptor::TypeDescriptor;
use crate::error::HierarchyError;
use crate::expr::TypeExpr;
use crate::model::{ClassId, DeclaredType, TypeParamSlot, TypeUniverse};
use crate::resolver::{slot_index, TypeResolver};

/// Supertypes every array type has besides `java.lang.Object`.
const ARRAY_SUPERTYPES: [&str; 2] = ["java.lang.Cloneable", "java.io.Serializable"];

/// Build the hierarchy map of `root` instantiated with `arguments` (lenient policy).
///
/// `arguments` is either empty (root raw or non-generic) or one descriptor per type parameter
/// the root declares. Array roots accept their component descriptor as the single argument.
pub fn build_hierarchy(
    universe: &TypeUniverse,
    root: &DeclaredType,
    arguments: &[TypeDescriptor],
) -> Result<HierarchyMap, HierarchyError> {
    HierarchyBuilder::new(TypeResolver::new(universe)).build(root, arguments)
}

/// Build the hierarchy map of a resolved descriptor (its declared type and arguments).
pub fn build_hierarchy_for(
    universe: &TypeUniverse,
    root: &TypeDescriptor,
) -> Result<HierarchyMap, HierarchyError> {
    HierarchyBuilder::new(TypeResolver::new(universe)).build_for(root)
}

/// Resolve `expr` (written in the context `table` binds) and build the hierarchy of the result.
pub fn build_hierarchy_for_expr(
    universe: &TypeUniverse,
    table: &BindingTable,
    expr: &TypeExpr,
) -> Result<HierarchyMap, HierarchyError> {
    let builder = HierarchyBuilder::new(TypeResolver::new(universe));
    let root = builder.resolver.resolve(table, expr)?;
    builder.build_for(&root)
}

#[derive(Debug, Clone, Copy)]
pub struct HierarchyBuilder<'u> {
    resolver: TypeResolver<'u>,
}

impl<'u> HierarchyBuilder<'u> {
    pub fn new(resolver: TypeResolver<'u>) -> Self {
        Self { resolver }
    }

    pub fn with_policy(universe: &'u TypeUniverse, policy: UnboundTypeParamPolicy) -> Self {
        Self::new(TypeResolver::with_policy(universe, policy))
    }

    pub fn resolver(&self) -> &TypeResolver<'u> {
        &self.resolver
    }

    pub fn build_for(&self, root: &TypeDescriptor) -> Result<HierarchyMap, HierarchyError> {
        self.build(root.declared_type(), root.generic_arguments())
    }

    pub fn build(
        &self,
        root: &DeclaredType,
        arguments: &[TypeDescriptor],
    ) -> Result<HierarchyMap, HierarchyError> {
        let mut tables = IndexMap::new();
        self.visit(root, arguments.to_vec(), &mut tables)?;
        tracing::debug!(
            target = "nova.generics",
            root = ?root,
            ancestors = tables.len(),
            "built generic hierarchy"
        );
        Ok(HierarchyMap::new(root.clone(), arguments.to_vec(), tables))
    }

    fn visit(
        &self,
        node: &DeclaredType,
        arguments: Vec<TypeDescriptor>,
        tables: &mut IndexMap<DeclaredType, BindingTable>,
    ) -> Result<(), HierarchyError> {
        if *node == DeclaredType::OBJECT || tables.contains_key(node) {
            return Ok(());
        }

        match node {
            DeclaredType::Primitive(_) | DeclaredType::Void => {
                if !arguments.is_empty() {
                    return Err(HierarchyError::ArgumentCountMismatch {
                        class: self.display_name(node),
                        expected: 0,
                        found: arguments.len(),
                    });
                }
                tables.insert(node.clone(), BindingTable::empty(node.clone()));
                Ok(())
            }
            DeclaredType::Array(component) => {
                // Array nodes declare no parameters but may carry their component descriptor.
                if arguments.len() > 1 {
                    return Err(HierarchyError::ArgumentCountMismatch {
                        class: self.display_name(node),
                        expected: 1,
                        found: arguments.len(),
                    });
                }
                if let Some(argument) = arguments.first() {
                    if argument.declared_type() != &**component {
                        let universe = self.resolver.universe();
                        return Err(HierarchyError::ArrayComponentMismatch {
                            array: self.display_name(node),
                            argument: argument.display(universe).to_string(),
                        });
                    }
                }
                tables.insert(node.clone(), BindingTable::empty(node.clone()));
                let universe = self.resolver.universe();
                for name in ARRAY_SUPERTYPES {
                    if let Some(id) = universe.class_id(name) {
                        self.visit(&DeclaredType::Class(id), Vec::new(), tables)?;
                    }
                }
                Ok(())
            }
            DeclaredType::Class(id) => self.visit_class(*id, arguments, tables),
        }
    }

    fn visit_class(
        &self,
        id: ClassId,
        arguments: Vec<TypeDescriptor>,
        tables: &mut IndexMap<DeclaredType, BindingTable>,
    ) -> Result<(), HierarchyError> {
        let universe = self.resolver.universe();
        let decl = universe.class(id).ok_or(HierarchyError::UnknownClass(id))?;

        if !arguments.is_empty() && arguments.len() != decl.type_params.len() {
            return Err(HierarchyError::ArgumentCountMismatch {
                class: decl.name.clone(),
                expected: decl.type_params.len(),
                found: arguments.len(),
            });
        }

        let mut table = BindingTable::empty(id);
        for (idx, argument) in arguments.into_iter().enumerate() {
            table.insert(TypeParamSlot::class(id, slot_index(idx)), argument);
        }

        // Edges resolve against this node's table, which is installed before recursing so
        // cycles terminate.
        let mut edges = Vec::new();
        for supertype in decl.supertypes() {
            let (ancestor, edge_args) = supertype_edge(supertype).ok_or_else(|| {
                HierarchyError::InvalidSupertype {
                    class: decl.name.clone(),
                    supertype: supertype.to_string(),
                }
            })?;
            let resolved = self.resolver.resolve_all(&table, edge_args)?;
            edges.push((ancestor, resolved));
        }

        tracing::trace!(
            target = "nova.generics",
            class = %decl.name,
            bindings = table.len(),
            "installed binding table"
        );
        tables.insert(DeclaredType::Class(id), table);

        for (ancestor, resolved) in edges {
            self.visit(&DeclaredType::Class(ancestor), resolved, tables)?;
        }
        Ok(())
    }

    fn display_name(&self, declared: &DeclaredType) -> String {
        let universe = self.resolver.universe();
        match declared.as_class().and_then(|id| universe.class_name(id)) {
            Some(name) => name.to_string(),
            None => format!("{declared:?}"),
        }
    }
}

/// The class and argument expressions of a supertype edge.
fn supertype_edge(expr: &TypeExpr) -> Option<(ClassId, &[TypeExpr])> {
    match expr.unannotated() {
        TypeExpr::Declared(DeclaredType::Class(id)) => Some((*id, &[] as &[TypeExpr])),
        TypeExpr::Parameterized { raw, args } => Some((*raw, args.as_slice())),
        _ => None,
    }
}
