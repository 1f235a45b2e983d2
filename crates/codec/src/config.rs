//! Codec configuration via `codec.toml`
//!
//! The only policy knob that changes decode results is
//! `ignore_unknown_properties`; the rest are limits applied when plans are
//! built. Loaded settings are turned into a [`Limits`] for a plan cache and a
//! [`DecodeOptions`] default for a client. Individual decode calls can still
//! pass their own options.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_core::Limits;

use crate::error::{CodecError, CodecResult};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "codec.toml";

/// Per-call decode policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Drop incoming properties that match no field instead of failing
    pub ignore_unknown_properties: bool,
}

impl DecodeOptions {
    /// Fail on any property with no destination field (the default)
    pub const fn strict() -> Self {
        DecodeOptions {
            ignore_unknown_properties: false,
        }
    }

    /// Silently drop properties with no destination field
    pub const fn tolerant() -> Self {
        DecodeOptions {
            ignore_unknown_properties: true,
        }
    }
}

/// Codec configuration loaded from `codec.toml`
///
/// # Example
///
/// ```toml
/// ignore_unknown_properties = false
/// max_nesting_depth = 32
/// max_name_bytes = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Default decode policy for unmatched property names
    #[serde(default)]
    pub ignore_unknown_properties: bool,
    /// Deepest allowed record nesting
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// Longest allowed property name in bytes
    #[serde(default = "default_max_name_bytes")]
    pub max_name_bytes: usize,
    /// Largest indexed text or byte value in bytes
    #[serde(default = "default_max_indexed_bytes")]
    pub max_indexed_bytes: usize,
}

fn default_max_nesting_depth() -> usize {
    Limits::default().max_nesting_depth
}

fn default_max_name_bytes() -> usize {
    Limits::default().max_name_bytes
}

fn default_max_indexed_bytes() -> usize {
    Limits::default().max_indexed_bytes
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            ignore_unknown_properties: false,
            max_nesting_depth: default_max_nesting_depth(),
            max_name_bytes: default_max_name_bytes(),
            max_indexed_bytes: default_max_indexed_bytes(),
        }
    }
}

impl CodecConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Strata codec configuration
#
# Decoding a property with no matching field fails by default.
# Set to true to drop such properties instead.
ignore_unknown_properties = false

# Deepest allowed nesting of records inside records (default: 32)
max_nesting_depth = 32

# Longest allowed property name, dotted prefixes included (default: 500)
max_name_bytes = 500

# Largest indexed short text or short bytes value (default: 1500)
max_indexed_bytes = 1500
"#
    }

    /// Parse config from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] if the text is not valid config.
    pub fn from_toml_str(content: &str) -> CodecResult<Self> {
        toml::from_str(content)
            .map_err(|e| CodecError::Config(format!("Failed to parse codec config: {}", e)))
    }

    /// Read and parse config from a file path
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> CodecResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CodecError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            CodecError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> CodecResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                CodecError::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Limits for plan construction and store-side validation
    pub fn limits(&self) -> Limits {
        Limits {
            max_name_bytes: self.max_name_bytes,
            max_indexed_bytes: self.max_indexed_bytes,
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    /// Default decode policy
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            ignore_unknown_properties: self.ignore_unknown_properties,
        }
    }
}
