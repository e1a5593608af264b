use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

///
/// FilterConfig
///
/// Build-time switches for the filter layer, usually loaded from a TOML
/// file:
///
/// ```toml
/// computed_columns = false
/// arrays = true
/// allowed_field_types = ["Int", "String"]
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Expose every eligible computed column, not only `@filterable` ones.
    pub computed_columns: bool,

    /// Produce list operators types for array-returning computed columns.
    pub arrays: bool,

    /// Restrict operators types to these scalar names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_field_types: Option<Vec<String>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            computed_columns: true,
            arrays: true,
            allowed_field_types: None,
        }
    }
}

impl FilterConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    #[must_use]
    pub fn allows_field_type(&self, scalar: &str) -> bool {
        self.allowed_field_types
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|name| name == scalar))
    }
}
