use crate::model::{ClassId, DeclaredType, MethodId, TypeParamSlot};

/// Failure to resolve a single type expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("no resolver handles type expression `{expression}`")]
    UnsupportedExpression { expression: String },

    #[error("type variable {name} ({slot:?}) has no binding")]
    UnboundTypeParameter { name: String, slot: TypeParamSlot },

    #[error("{0:?} is referenced but never declared")]
    UnknownClass(ClassId),
}

/// Failure to build, or query, a hierarchy map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("{requested:?} is not part of the hierarchy rooted at {root:?}")]
    NotInHierarchy {
        requested: DeclaredType,
        root: DeclaredType,
    },

    #[error("{class} declares {expected} type parameter(s) but {found} argument(s) were supplied")]
    ArgumentCountMismatch {
        class: String,
        expected: usize,
        found: usize,
    },

    #[error("{array} cannot carry `{argument}` as its component")]
    ArrayComponentMismatch { array: String, argument: String },

    #[error("{0:?} is referenced but never declared")]
    UnknownClass(ClassId),

    #[error("{class} has a supertype that is not a class reference: `{supertype}`")]
    InvalidSupertype { class: String, supertype: String },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Failure of a member lookup or type-literal capture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{class} has no field named {field}")]
    NoSuchField { class: String, field: String },

    #[error("{class} has no method {method} taking {arity} parameter(s)")]
    NoSuchMethod {
        class: String,
        method: String,
        arity: usize,
    },

    #[error("{0:?} does not name a declared method")]
    UnknownMethod(MethodId),

    #[error("{class} does not capture a concrete type argument for the type literal base class")]
    NotATypeLiteral { class: String },

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse resolver config: {0}")]
    Toml(#[from] toml::de::Error),
}
