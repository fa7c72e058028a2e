use std::collections::HashMap;

use indexmap::IndexMap;

use crate::descriptor::TypeDescriptor;
use crate::error::HierarchyError;
use crate::model::{ClassId, DeclaredType, TypeParamSlot};

/// Resolved bindings for the generic parameters of one declared type within one hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    owner: DeclaredType,
    bindings: HashMap<TypeParamSlot, TypeDescriptor>,
}

impl BindingTable {
    /// A table that binds nothing; every lookup falls back to the resolver's default.
    pub fn empty(owner: impl Into<DeclaredType>) -> Self {
        Self {
            owner: owner.into(),
            bindings: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &DeclaredType {
        &self.owner
    }

    pub fn get(&self, slot: TypeParamSlot) -> Option<&TypeDescriptor> {
        self.bindings.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeParamSlot, &TypeDescriptor)> {
        self.bindings.iter()
    }

    /// A copy of this table extended with `bindings` (e.g. method type parameters bound by a
    /// caller).
    pub fn with_bindings(
        &self,
        bindings: impl IntoIterator<Item = (TypeParamSlot, TypeDescriptor)>,
    ) -> Self {
        let mut out = self.clone();
        out.bindings.extend(bindings);
        out
    }

    pub(crate) fn insert(&mut self, slot: TypeParamSlot, binding: TypeDescriptor) {
        self.bindings.insert(slot, binding);
    }
}

/// Binding tables for a root type and every ancestor of it, excluding `java.lang.Object`.
///
/// Entries are kept in discovery order: the root first, then a depth-first walk that visits
/// the superclass edge before interface edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyMap {
    root: DeclaredType,
    root_arguments: Vec<TypeDescriptor>,
    tables: IndexMap<DeclaredType, BindingTable>,
}

impl HierarchyMap {
    pub(crate) fn new(
        root: DeclaredType,
        root_arguments: Vec<TypeDescriptor>,
        tables: IndexMap<DeclaredType, BindingTable>,
    ) -> Self {
        Self {
            root,
            root_arguments,
            tables,
        }
    }

    pub fn root(&self) -> &DeclaredType {
        &self.root
    }

    pub fn root_arguments(&self) -> &[TypeDescriptor] {
        &self.root_arguments
    }

    pub fn binding_table_for(
        &self,
        declared: &DeclaredType,
    ) -> Result<&BindingTable, HierarchyError> {
        self.tables
            .get(declared)
            .ok_or_else(|| HierarchyError::NotInHierarchy {
                requested: declared.clone(),
                root: self.root.clone(),
            })
    }

    pub fn table_for_class(&self, class: ClassId) -> Result<&BindingTable, HierarchyError> {
        self.binding_table_for(&DeclaredType::Class(class))
    }

    pub fn contains(&self, declared: &DeclaredType) -> bool {
        self.tables.contains_key(declared)
    }

    /// Declared types in discovery order (root first).
    pub fn ancestors(&self) -> impl Iterator<Item = &DeclaredType> {
        self.tables.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeclaredType, &BindingTable)> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
