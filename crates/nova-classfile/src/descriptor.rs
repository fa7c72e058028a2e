use crate::error::{Error, Result};
use crate::signature::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            b'B' => BaseType::Byte,
            b'C' => BaseType::Char,
            b'D' => BaseType::Double,
            b'F' => BaseType::Float,
            b'I' => BaseType::Int,
            b'J' => BaseType::Long,
            b'S' => BaseType::Short,
            b'Z' => BaseType::Boolean,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Base(BaseType),
    /// Internal name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let mut cursor = Cursor::new(desc);
    let ty = field_type(&mut cursor, desc)?;
    if !cursor.at_end() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let invalid = || Error::InvalidDescriptor(desc.to_string());
    let mut cursor = Cursor::new(desc);
    if !cursor.eat(b'(') {
        return Err(invalid());
    }

    let mut params = Vec::new();
    loop {
        match cursor.peek() {
            Some(b')') => {
                cursor.bump();
                break;
            }
            Some(_) => params.push(field_type(&mut cursor, desc)?),
            None => return Err(invalid()),
        }
    }

    let return_type = if cursor.eat(b'V') {
        ReturnType::Void
    } else {
        ReturnType::Type(field_type(&mut cursor, desc)?)
    };

    if !cursor.at_end() {
        return Err(invalid());
    }

    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn field_type(cursor: &mut Cursor<'_>, desc: &str) -> Result<FieldType> {
    let invalid = || Error::InvalidDescriptor(desc.to_string());
    let dimensions = cursor.array_dimensions().ok_or_else(invalid)?;
    let tag = cursor.bump().ok_or_else(invalid)?;
    let mut ty = match BaseType::from_tag(tag) {
        Some(base) => FieldType::Base(base),
        None if tag == b'L' => {
            let name = cursor.take_until(b";");
            if name.is_empty() || !cursor.eat(b';') {
                return Err(invalid());
            }
            FieldType::Object(name.to_string())
        }
        None => return Err(invalid()),
    };
    for _ in 0..dimensions {
        ty = FieldType::Array(Box::new(ty));
    }
    Ok(ty)
}
