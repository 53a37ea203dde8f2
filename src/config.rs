//! Configuration for rendering

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse render configuration TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for HTML output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Doctype emitted by `html5`
    pub doctype: String,

    /// Attributes whose values are URI-escaped
    pub uri_attributes: Vec<String>,

    /// Bytes reserved up front for each rendering's buffer
    pub buffer_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            doctype: "<!DOCTYPE html>".to_string(),
            uri_attributes: vec!["src".to_string(), "href".to_string()],
            buffer_capacity: 256,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the doctype
    pub fn with_doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = doctype.into();
        self
    }

    /// Set the URI-escaped attribute names
    pub fn with_uri_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uri_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial buffer capacity
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn is_uri_attribute(&self, name: &str) -> bool {
        self.uri_attributes.iter().any(|a| a == name)
    }
}
