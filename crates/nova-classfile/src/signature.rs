//! Generic signature parsing (JVMS 4.7.9.1).
//!
//! Signatures are the only place the class-file format keeps generic type information; the
//! erased descriptors lose type variables, parameterized types and wildcards.

use crate::descriptor::BaseType;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub super_class: ClassTypeSignature,
    pub interfaces: Vec<ClassTypeSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<TypeSignature>,
    /// `None` for `void`.
    pub return_type: Option<TypeSignature>,
    pub throws: Vec<TypeSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    /// The class bound may be omitted (`<T::Ljava/lang/Runnable;>`).
    pub class_bound: Option<TypeSignature>,
    pub interface_bounds: Vec<TypeSignature>,
}

/// Field signatures are reference type signatures; the alias keeps call sites descriptive.
pub type FieldTypeSignature = TypeSignature;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    Base(BaseType),
    Array(Box<TypeSignature>),
    Class(ClassTypeSignature),
    TypeVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeSignature {
    /// Package prefix in internal form, including the trailing `/` (empty for the default
    /// package).
    pub package: String,
    /// Outer-to-inner class segments (`Outer<T>.Inner<U>`).
    pub segments: Vec<SimpleClassTypeSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleClassTypeSignature {
    pub name: String,
    pub type_arguments: Vec<TypeArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    /// `*`
    Any,
    Exact(TypeSignature),
    /// `+Bound`
    Extends(TypeSignature),
    /// `-Bound`
    Super(TypeSignature),
}

impl ClassTypeSignature {
    /// Internal name of the innermost class, e.g. `java/util/Map$Entry`.
    pub fn internal_name(&self) -> String {
        let mut out = self.package.clone();
        for (idx, seg) in self.segments.iter().enumerate() {
            if idx > 0 {
                out.push('$');
            }
            out.push_str(&seg.name);
        }
        out
    }

    /// Type arguments applied to the innermost class.
    pub fn type_arguments(&self) -> &[TypeArgument] {
        self.segments
            .last()
            .map(|seg| seg.type_arguments.as_slice())
            .unwrap_or_default()
    }
}

pub fn parse_class_signature(sig: &str) -> Result<ClassSignature> {
    let mut cursor = Cursor::new(sig);
    let type_parameters = cursor.type_parameters()?;
    let super_class = cursor.class_type_signature()?;
    let mut interfaces = Vec::new();
    while !cursor.at_end() {
        interfaces.push(cursor.class_type_signature()?);
    }
    Ok(ClassSignature {
        type_parameters,
        super_class,
        interfaces,
    })
}

pub fn parse_field_signature(sig: &str) -> Result<FieldTypeSignature> {
    let mut cursor = Cursor::new(sig);
    let ty = cursor.reference_type_signature()?;
    cursor.finish()?;
    Ok(ty)
}

pub fn parse_method_signature(sig: &str) -> Result<MethodSignature> {
    let mut cursor = Cursor::new(sig);
    let type_parameters = cursor.type_parameters()?;
    cursor.expect(b'(')?;
    let mut parameters = Vec::new();
    while cursor.peek() != Some(b')') {
        parameters.push(cursor.java_type_signature()?);
    }
    cursor.expect(b')')?;

    let return_type = if cursor.eat(b'V') {
        None
    } else {
        Some(cursor.java_type_signature()?)
    };

    let mut throws = Vec::new();
    while cursor.eat(b'^') {
        let thrown = match cursor.peek() {
            Some(b'T') => cursor.type_variable_signature()?,
            _ => TypeSignature::Class(cursor.class_type_signature()?),
        };
        throws.push(thrown);
    }
    cursor.finish()?;

    Ok(MethodSignature {
        type_parameters,
        parameters,
        return_type,
        throws,
    })
}

/// Byte cursor shared by the descriptor and signature grammars.
///
/// Both grammars are pure ASCII at the structural level; identifiers may contain any other
/// character, so identifier scanning stops only at the grammar's delimiters.
/// JVMS 4.4.1: an array type may have at most 255 dimensions.
pub(crate) const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Nesting limit for `<...>` type argument lists.
const MAX_TYPE_ARGUMENT_DEPTH: usize = 255;

pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    pub(crate) fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, expected: u8) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    pub(crate) fn finish(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// Consume bytes up to (not including) the first byte in `stops`.
    pub(crate) fn take_until(&mut self, stops: &[u8]) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if stops.contains(&b) {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Consume a run of `[` and return its length, or `None` past [`MAX_ARRAY_DIMENSIONS`].
    pub(crate) fn array_dimensions(&mut self) -> Option<usize> {
        let mut dimensions = 0;
        while self.eat(b'[') {
            dimensions += 1;
        }
        (dimensions <= MAX_ARRAY_DIMENSIONS).then_some(dimensions)
    }

    pub(crate) fn error(&self) -> Error {
        Error::InvalidSignature {
            signature: self.input.to_string(),
            offset: self.pos,
        }
    }

    fn identifier(&mut self, stops: &[u8]) -> Result<&'a str> {
        let ident = self.take_until(stops);
        if ident.is_empty() {
            return Err(self.error());
        }
        Ok(ident)
    }

    fn type_parameters(&mut self) -> Result<Vec<TypeParameter>> {
        let mut out = Vec::new();
        if !self.eat(b'<') {
            return Ok(out);
        }
        while !self.eat(b'>') {
            let name = self.identifier(b":>")?.to_string();
            self.expect(b':')?;
            let class_bound = match self.peek() {
                Some(b'L' | b'T' | b'[') => Some(self.reference_type_signature()?),
                _ => None,
            };
            let mut interface_bounds = Vec::new();
            while self.eat(b':') {
                interface_bounds.push(self.reference_type_signature()?);
            }
            out.push(TypeParameter {
                name,
                class_bound,
                interface_bounds,
            });
        }
        if out.is_empty() {
            return Err(self.error());
        }
        Ok(out)
    }

    fn java_type_signature(&mut self) -> Result<TypeSignature> {
        if let Some(base) = self.peek().and_then(BaseType::from_tag) {
            self.pos += 1;
            return Ok(TypeSignature::Base(base));
        }
        self.reference_type_signature()
    }

    fn reference_type_signature(&mut self) -> Result<TypeSignature> {
        match self.peek() {
            Some(b'L') => Ok(TypeSignature::Class(self.class_type_signature()?)),
            Some(b'T') => self.type_variable_signature(),
            Some(b'[') => {
                let dimensions = self.array_dimensions().ok_or_else(|| self.error())?;
                let mut ty = self.java_type_signature()?;
                for _ in 0..dimensions {
                    ty = TypeSignature::Array(Box::new(ty));
                }
                Ok(ty)
            }
            _ => Err(self.error()),
        }
    }

    fn type_variable_signature(&mut self) -> Result<TypeSignature> {
        self.expect(b'T')?;
        let name = self.identifier(b";")?.to_string();
        self.expect(b';')?;
        Ok(TypeSignature::TypeVariable(name))
    }

    fn class_type_signature(&mut self) -> Result<ClassTypeSignature> {
        self.expect(b'L')?;

        // The package specifier is everything up to the last `/` of the first segment.
        let first = self.identifier(b"<.;")?;
        let (package, first_name) = match first.rfind('/') {
            Some(idx) => (&first[..=idx], &first[idx + 1..]),
            None => ("", first),
        };
        if first_name.is_empty() {
            return Err(self.error());
        }

        let mut segments = vec![SimpleClassTypeSignature {
            name: first_name.to_string(),
            type_arguments: self.type_arguments()?,
        }];
        while self.eat(b'.') {
            let name = self.identifier(b"<.;")?.to_string();
            segments.push(SimpleClassTypeSignature {
                name,
                type_arguments: self.type_arguments()?,
            });
        }
        self.expect(b';')?;

        Ok(ClassTypeSignature {
            package: package.to_string(),
            segments,
        })
    }

    fn type_arguments(&mut self) -> Result<Vec<TypeArgument>> {
        let mut out = Vec::new();
        if !self.eat(b'<') {
            return Ok(out);
        }
        if self.depth == MAX_TYPE_ARGUMENT_DEPTH {
            return Err(self.error());
        }
        self.depth += 1;
        while !self.eat(b'>') {
            let arg = match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    TypeArgument::Any
                }
                Some(b'+') => {
                    self.pos += 1;
                    TypeArgument::Extends(self.reference_type_signature()?)
                }
                Some(b'-') => {
                    self.pos += 1;
                    TypeArgument::Super(self.reference_type_signature()?)
                }
                Some(_) => TypeArgument::Exact(self.reference_type_signature()?),
                None => return Err(self.error()),
            };
            out.push(arg);
        }
        self.depth -= 1;
        if out.is_empty() {
            return Err(self.error());
        }
        Ok(out)
    }
}
