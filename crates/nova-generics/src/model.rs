//! Declaration universe: the class metadata generic resolution runs against.
//!
//! A [`TypeUniverse`] plays the role the JVM's reflective class objects play at runtime. Each
//! class declaration keeps its supertypes and member types as *unresolved* [`TypeExpr`]s; the
//! resolver substitutes bindings into them on demand.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::expr::TypeExpr;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// `java.lang.Object`, the universal top type. Always the first class of a universe.
    pub const OBJECT: ClassId = ClassId(0);

    pub fn to_raw(self) -> u32 {
        self.0
    }

    fn from_index(idx: usize) -> Self {
        let raw: u32 = idx.try_into().unwrap_or(u32::MAX);
        ClassId(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn java_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Binary name of the wrapper class (`int` -> `java.lang.Integer`).
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }
}

/// A nominal type, independent of generic arguments.
///
/// Arrays are declared types of their own (`Integer[]`), mirroring the JVM where every array
/// type has its own class object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclaredType {
    Primitive(PrimitiveType),
    Void,
    Class(ClassId),
    Array(Box<DeclaredType>),
}

impl DeclaredType {
    pub const OBJECT: DeclaredType = DeclaredType::Class(ClassId::OBJECT);

    pub fn array_of(component: DeclaredType) -> Self {
        DeclaredType::Array(Box::new(component))
    }

    pub fn component(&self) -> Option<&DeclaredType> {
        match self {
            DeclaredType::Array(component) => Some(component),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            DeclaredType::Class(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DeclaredType::Array(_))
    }

    /// Primitives and `void`: terminal types without supertypes or arguments.
    pub fn is_primitive_like(&self) -> bool {
        matches!(self, DeclaredType::Primitive(_) | DeclaredType::Void)
    }
}

impl From<ClassId> for DeclaredType {
    fn from(id: ClassId) -> Self {
        DeclaredType::Class(id)
    }
}

impl From<PrimitiveType> for DeclaredType {
    fn from(ty: PrimitiveType) -> Self {
        DeclaredType::Primitive(ty)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub class: ClassId,
    /// Position in [`ClassDecl::methods`].
    pub index: u32,
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({}#{})", self.class.0, self.index)
    }
}

/// The declaration that introduces a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotOwner {
    Class(ClassId),
    Method(MethodId),
}

/// Identity of a generic parameter: its declaring class or method plus its position in the
/// declaration's type parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamSlot {
    pub owner: SlotOwner,
    pub index: u32,
}

impl TypeParamSlot {
    pub fn class(class: ClassId, index: u32) -> Self {
        Self {
            owner: SlotOwner::Class(class),
            index,
        }
    }

    pub fn method(method: MethodId, index: u32) -> Self {
        Self {
            owner: SlotOwner::Method(method),
            index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamDecl {
    pub name: String,
    /// Declared bounds in source order. Never consulted for substitution.
    pub bounds: Vec<TypeExpr>,
}

impl TypeParamDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded(name: impl Into<String>, bounds: Vec<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub is_static: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub type_params: Vec<TypeParamDecl>,
    pub params: Vec<TypeExpr>,
    pub return_type: TypeExpr,
    pub exceptions: Vec<TypeExpr>,
    pub is_static: bool,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, params: Vec<TypeExpr>, return_type: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            params,
            return_type,
            exceptions: Vec::new(),
            is_static: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Binary name (`java.util.Map$Entry`).
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParamDecl>,
    /// `None` for interfaces and `java.lang.Object`.
    pub super_class: Option<TypeExpr>,
    pub interfaces: Vec<TypeExpr>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// A class extending `java.lang.Object` with no members.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            type_params: Vec::new(),
            super_class: Some(TypeExpr::class(ClassId::OBJECT)),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Interface,
            super_class: None,
            ..Self::class(name)
        }
    }

    /// All direct supertype edges: superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeExpr> {
        self.super_class.iter().chain(self.interfaces.iter())
    }
}

/// Class declarations addressable by [`ClassId`] and binary name.
///
/// Ids are interned before definition so declarations can reference each other (and
/// themselves) in any order.
#[derive(Debug, Clone)]
pub struct TypeUniverse {
    names: Vec<String>,
    classes: Vec<Option<ClassDecl>>,
    by_name: HashMap<String, ClassId>,
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeUniverse {
    /// A universe containing only `java.lang.Object`.
    pub fn new() -> Self {
        let mut universe = Self {
            names: Vec::new(),
            classes: Vec::new(),
            by_name: HashMap::new(),
        };
        let object = universe.intern_class_id("java.lang.Object");
        debug_assert_eq!(object, ClassId::OBJECT);
        universe.define_class(
            object,
            ClassDecl {
                super_class: None,
                methods: Vec::new(),
                ..ClassDecl::class("java.lang.Object")
            },
        );
        universe
    }

    /// A universe with the handful of JDK declarations most generic code touches.
    pub fn with_minimal_jdk() -> Self {
        let mut universe = Self::new();
        crate::jdk::define_minimal_jdk(&mut universe);
        universe
    }

    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = ClassId::from_index(self.names.len());
        self.names.push(name.to_string());
        self.classes.push(None);
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Install (or replace) the declaration for an interned id.
    pub fn define_class(&mut self, id: ClassId, decl: ClassDecl) {
        if let Some(slot) = self.classes.get_mut(id.index()) {
            *slot = Some(decl);
        }
    }

    pub fn add_class(&mut self, decl: ClassDecl) -> ClassId {
        let id = self.intern_class_id(&decl.name);
        self.define_class(id, decl);
        id
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDecl> {
        self.classes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn class_name(&self, id: ClassId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodDecl> {
        self.class(id.class)?.methods.get(id.index as usize)
    }

    pub fn type_param(&self, slot: TypeParamSlot) -> Option<&TypeParamDecl> {
        let params = match slot.owner {
            SlotOwner::Class(class) => &self.class(class)?.type_params,
            SlotOwner::Method(method) => &self.method(method)?.type_params,
        };
        params.get(slot.index as usize)
    }

    /// Class ids named by the direct supertype edges of `id`.
    pub fn direct_supertypes(&self, id: ClassId) -> Vec<ClassId> {
        let Some(decl) = self.class(id) else {
            return Vec::new();
        };
        decl.supertypes().filter_map(TypeExpr::class_id).collect()
    }

    /// Whether `sub` is `sup` or (transitively) extends or implements it.
    ///
    /// Every class is a subclass of `java.lang.Object`, including interfaces.
    pub fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool {
        if sub == sup || sup == ClassId::OBJECT {
            return true;
        }
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([sub]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            for parent in self.direct_supertypes(current) {
                if parent == sup {
                    return true;
                }
                queue.push_back(parent);
            }
        }
        false
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.names.len()).map(ClassId::from_index)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
