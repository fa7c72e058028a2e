use std::fmt;

use crate::model::{ClassId, DeclaredType, PrimitiveType, TypeUniverse};

/// A fully resolved type: a declared type plus its resolved generic arguments.
///
/// Descriptors are plain immutable values; equality compares the declared type, every argument
/// (in order) and the bounded-unknown flag. Array descriptors carry their component descriptor
/// as their only generic argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    declared_type: DeclaredType,
    generic_arguments: Vec<TypeDescriptor>,
    bounded_unknown: bool,
}

impl TypeDescriptor {
    /// `java.lang.Object` without arguments; the substitution for every unbound type variable.
    pub const OBJECT: TypeDescriptor = TypeDescriptor {
        declared_type: DeclaredType::OBJECT,
        generic_arguments: Vec::new(),
        bounded_unknown: false,
    };

    pub fn new(declared_type: DeclaredType, generic_arguments: Vec<TypeDescriptor>) -> Self {
        Self {
            declared_type,
            generic_arguments,
            bounded_unknown: false,
        }
    }

    pub fn class(id: ClassId, generic_arguments: Vec<TypeDescriptor>) -> Self {
        Self::new(DeclaredType::Class(id), generic_arguments)
    }

    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::new(DeclaredType::Primitive(ty), Vec::new())
    }

    pub fn void() -> Self {
        Self::new(DeclaredType::Void, Vec::new())
    }

    /// The array whose component is `component`; the array's declared type is derived from the
    /// component's declared type.
    pub fn array(component: TypeDescriptor) -> Self {
        Self::new(
            DeclaredType::array_of(component.declared_type.clone()),
            vec![component],
        )
    }

    /// A wildcard position bounded by `bound`: same declared type and arguments, flag set.
    ///
    /// Whether the bound was an upper or a lower one is not recorded.
    pub fn bounded_unknown(bound: TypeDescriptor) -> Self {
        Self {
            bounded_unknown: true,
            ..bound
        }
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    pub fn generic_arguments(&self) -> &[TypeDescriptor] {
        &self.generic_arguments
    }

    pub fn is_bounded_unknown(&self) -> bool {
        self.bounded_unknown
    }

    /// Whether this is exactly [`TypeDescriptor::OBJECT`].
    pub fn is_top(&self) -> bool {
        *self == Self::OBJECT
    }

    /// The component descriptor of an array descriptor.
    pub fn component(&self) -> Option<&TypeDescriptor> {
        if self.declared_type.is_array() {
            self.generic_arguments.first()
        } else {
            None
        }
    }

    /// Java-like rendering with binary class names, e.g.
    /// `java.util.Map<java.lang.Short, java.lang.Long>`.
    pub fn display<'a>(&'a self, universe: &'a TypeUniverse) -> DisplayDescriptor<'a> {
        DisplayDescriptor {
            descriptor: self,
            universe,
        }
    }
}

pub struct DisplayDescriptor<'a> {
    descriptor: &'a TypeDescriptor,
    universe: &'a TypeUniverse,
}

impl fmt::Display for DisplayDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = self.descriptor;
        if desc.bounded_unknown {
            f.write_str("? ")?;
        }

        if let Some(component) = desc.component() {
            return write!(f, "{}[]", component.display(self.universe));
        }

        fmt_declared(f, self.universe, &desc.declared_type)?;
        if !desc.generic_arguments.is_empty() {
            f.write_str("<")?;
            for (idx, arg) in desc.generic_arguments.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg.display(self.universe))?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

pub(crate) fn fmt_declared(
    f: &mut fmt::Formatter<'_>,
    universe: &TypeUniverse,
    declared: &DeclaredType,
) -> fmt::Result {
    match declared {
        DeclaredType::Primitive(p) => f.write_str(p.java_name()),
        DeclaredType::Void => f.write_str("void"),
        DeclaredType::Class(id) => match universe.class_name(*id) {
            Some(name) => f.write_str(name),
            None => write!(f, "{id:?}"),
        },
        DeclaredType::Array(component) => {
            fmt_declared(f, universe, component)?;
            f.write_str("[]")
        }
    }
}
