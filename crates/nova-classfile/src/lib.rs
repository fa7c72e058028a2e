#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod signature;
mod stub;

pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
pub use crate::signature::{
    parse_class_signature, parse_field_signature, parse_method_signature, ClassSignature,
    ClassTypeSignature, FieldTypeSignature, MethodSignature, SimpleClassTypeSignature,
    TypeArgument, TypeParameter, TypeSignature,
};
pub use crate::stub::{
    ClassStub, FieldStub, MethodStub, RawClass, RawMember, ACC_ABSTRACT, ACC_INTERFACE,
    ACC_PUBLIC, ACC_STATIC,
};
