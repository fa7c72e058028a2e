use std::fmt;

use crate::model::{ClassId, DeclaredType, PrimitiveType, TypeParamSlot};

/// Type annotation metadata carried by [`TypeExpr::Annotated`]. Irrelevant to resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeAnnotation {
    /// Binary name of the annotation interface.
    pub type_name: String,
}

impl TypeAnnotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// An unresolved type as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A concrete nominal type, including plain arrays of concrete types (`int[]`, `String[]`).
    Declared(DeclaredType),
    /// An array whose component is itself generic (`T[]`, `List<String>[]`).
    GenericArray(Box<TypeExpr>),
    Parameterized { raw: ClassId, args: Vec<TypeExpr> },
    TypeVar(TypeParamSlot),
    /// `?`, `? extends U` or `? super L`. An empty `upper` list means `Object`.
    Wildcard {
        upper: Vec<TypeExpr>,
        lower: Vec<TypeExpr>,
    },
    Annotated {
        annotations: Vec<TypeAnnotation>,
        ty: Box<TypeExpr>,
    },
    /// A reference to a class the universe does not declare.
    Unresolved(String),
}

impl TypeExpr {
    pub fn class(id: ClassId) -> Self {
        TypeExpr::Declared(DeclaredType::Class(id))
    }

    pub fn primitive(ty: PrimitiveType) -> Self {
        TypeExpr::Declared(DeclaredType::Primitive(ty))
    }

    pub fn void() -> Self {
        TypeExpr::Declared(DeclaredType::Void)
    }

    pub fn parameterized(raw: ClassId, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Parameterized { raw, args }
    }

    pub fn type_var(slot: TypeParamSlot) -> Self {
        TypeExpr::TypeVar(slot)
    }

    /// Array of `component`.
    ///
    /// Arrays of plain declared types stay plain (`String[]`); anything else becomes a generic
    /// array, the same split the JVM's reflection makes.
    pub fn array(component: TypeExpr) -> Self {
        match component {
            TypeExpr::Declared(declared) => TypeExpr::Declared(DeclaredType::array_of(declared)),
            other => TypeExpr::GenericArray(Box::new(other)),
        }
    }

    /// `?`
    pub fn wildcard() -> Self {
        TypeExpr::Wildcard {
            upper: Vec::new(),
            lower: Vec::new(),
        }
    }

    pub fn wildcard_extends(bound: TypeExpr) -> Self {
        TypeExpr::Wildcard {
            upper: vec![bound],
            lower: Vec::new(),
        }
    }

    pub fn wildcard_super(bound: TypeExpr) -> Self {
        TypeExpr::Wildcard {
            upper: Vec::new(),
            lower: vec![bound],
        }
    }

    pub fn annotated(annotations: Vec<TypeAnnotation>, ty: TypeExpr) -> Self {
        TypeExpr::Annotated {
            annotations,
            ty: Box::new(ty),
        }
    }

    /// Strip every annotation wrapper.
    pub fn unannotated(&self) -> &TypeExpr {
        let mut current = self;
        while let TypeExpr::Annotated { ty, .. } = current {
            current = ty;
        }
        current
    }

    /// The class an expression names when used as a supertype edge.
    pub fn class_id(&self) -> Option<ClassId> {
        match self.unannotated() {
            TypeExpr::Declared(DeclaredType::Class(id)) => Some(*id),
            TypeExpr::Parameterized { raw, .. } => Some(*raw),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    /// Structural rendering without class names; see `TypeDescriptor::display` for the
    /// name-aware form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Declared(declared) => write!(f, "{declared:?}"),
            TypeExpr::GenericArray(component) => write!(f, "{component}[]"),
            TypeExpr::Parameterized { raw, args } => {
                write!(f, "{raw:?}<")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeExpr::TypeVar(slot) => write!(f, "{slot:?}"),
            TypeExpr::Wildcard { upper, lower } => match (lower.first(), upper.first()) {
                (Some(lower), _) => write!(f, "? super {lower}"),
                (None, Some(upper)) => write!(f, "? extends {upper}"),
                (None, None) => f.write_str("?"),
            },
            TypeExpr::Annotated { annotations, ty } => {
                for annotation in annotations {
                    write!(f, "@{} ", annotation.type_name)?;
                }
                write!(f, "{ty}")
            }
            TypeExpr::Unresolved(name) => write!(f, "unresolved {name}"),
        }
    }
}
