pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding descriptors and generic signatures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("invalid signature: {signature} (at offset {offset})")]
    InvalidSignature { signature: String, offset: usize },

    #[error("invalid access flags for {name}: 0x{flags:04x}")]
    InvalidAccessFlags { name: String, flags: u16 },
}
