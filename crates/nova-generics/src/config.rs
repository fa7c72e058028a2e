use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What the resolver does with a type variable that has no binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnboundTypeParamPolicy {
    /// Substitute `java.lang.Object` and emit an info event. Matches erasure semantics.
    #[default]
    Lenient,
    /// Fail with `ResolutionError::UnboundTypeParameter`.
    ///
    /// Useful to catch type literals that supply fewer arguments than the class declares.
    Strict,
}

/// Resolver settings supplied by the host at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub unbound_type_params: UnboundTypeParamPolicy,
    /// Memoise hierarchy maps per (root type, root arguments).
    pub cache_hierarchies: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            unbound_type_params: UnboundTypeParamPolicy::Lenient,
            cache_hierarchies: true,
        }
    }
}

impl ResolverConfig {
    pub fn strict() -> Self {
        Self {
            unbound_type_params: UnboundTypeParamPolicy::Strict,
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys keep their defaults; unknown keys are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
