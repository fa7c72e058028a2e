use crate::descriptor::{
    parse_field_descriptor, parse_method_descriptor, FieldType, MethodDescriptor,
};
use crate::error::{Error, Result};
use crate::signature::{
    parse_class_signature, parse_field_signature, parse_method_signature, ClassSignature,
    FieldTypeSignature, MethodSignature,
};

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

/// Undecoded class metadata: names, descriptors and signatures as they appear in a class file.
#[derive(Debug, Clone, Default)]
pub struct RawClass {
    pub internal_name: String,
    pub access_flags: u16,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub signature: Option<String>,
    pub fields: Vec<RawMember>,
    pub methods: Vec<RawMember>,
}

#[derive(Debug, Clone, Default)]
pub struct RawMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    /// Internal names from the `Exceptions` attribute; used when the method has no signature.
    pub exceptions: Vec<String>,
}

/// Class metadata with every descriptor and signature parsed.
#[derive(Debug, Clone)]
pub struct ClassStub {
    pub internal_name: String,
    pub access_flags: u16,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub signature: Option<ClassSignature>,
    pub fields: Vec<FieldStub>,
    pub methods: Vec<MethodStub>,
}

#[derive(Debug, Clone)]
pub struct FieldStub {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub parsed_descriptor: FieldType,
    pub signature: Option<FieldTypeSignature>,
}

#[derive(Debug, Clone)]
pub struct MethodStub {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub parsed_descriptor: MethodDescriptor,
    pub signature: Option<MethodSignature>,
    pub exceptions: Vec<String>,
}

impl ClassStub {
    pub fn from_raw(class: &RawClass) -> Result<Self> {
        if class.access_flags & ACC_INTERFACE != 0 && class.access_flags & ACC_ABSTRACT == 0 {
            return Err(Error::InvalidAccessFlags {
                name: class.internal_name.clone(),
                flags: class.access_flags,
            });
        }

        let signature = match class.signature.as_deref() {
            Some(sig) => Some(parse_class_signature(sig)?),
            None => None,
        };

        let fields = class
            .fields
            .iter()
            .map(|f| {
                let parsed_descriptor = parse_field_descriptor(&f.descriptor)?;
                let signature = match f.signature.as_deref() {
                    Some(sig) => Some(parse_field_signature(sig)?),
                    None => None,
                };
                Ok(FieldStub {
                    access_flags: f.access_flags,
                    name: f.name.clone(),
                    descriptor: f.descriptor.clone(),
                    parsed_descriptor,
                    signature,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let methods = class
            .methods
            .iter()
            .map(|m| {
                let parsed_descriptor = parse_method_descriptor(&m.descriptor)?;
                let signature = match m.signature.as_deref() {
                    Some(sig) => Some(parse_method_signature(sig)?),
                    None => None,
                };
                Ok(MethodStub {
                    access_flags: m.access_flags,
                    name: m.name.clone(),
                    descriptor: m.descriptor.clone(),
                    parsed_descriptor,
                    signature,
                    exceptions: m.exceptions.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassStub {
            internal_name: class.internal_name.clone(),
            access_flags: class.access_flags,
            super_class: class.super_class.clone(),
            interfaces: class.interfaces.clone(),
            signature,
            fields,
            methods,
        })
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }
}

impl RawClass {
    pub fn stub(&self) -> Result<ClassStub> {
        ClassStub::from_raw(self)
    }
}
