//! Error types for symbol resolution and rendering

use std::fmt;
use std::panic::Location;

use thiserror::Error;

use crate::value::Value;

/// Source location of a `Rendering::call` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    /// Capture the location of the caller
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Errors that abort a render
#[derive(Debug, Error)]
pub enum RenderError {
    /// A component name resolved to a value that has no rendering
    #[error("cannot render {value:?} (component {name} at {site})")]
    CannotRender {
        name: String,
        value: Value,
        site: CallSite,
    },

    /// A component name is not bound anywhere
    #[error("undefined component {name} at {site}")]
    UndefinedComponent { name: String, site: CallSite },

    /// Failure raised by component or body code
    #[error("{message}")]
    Component { message: String },
}

impl RenderError {
    /// Build an error from component code
    pub fn msg(message: impl Into<String>) -> Self {
        RenderError::Component {
            message: message.into(),
        }
    }

    /// Call site the error was raised at, if it came from resolution
    pub fn site(&self) -> Option<CallSite> {
        match self {
            RenderError::CannotRender { site, .. } | RenderError::UndefinedComponent { site, .. } => {
                Some(*site)
            }
            RenderError::Component { .. } => None,
        }
    }
}
