//! Templates: immutable, reusable deferred HTML fragments
//!
//! A template wraps a body closure that issues emission calls against the
//! `Rendering` it is handed. Rendering a template never mutates it, so one
//! template can be rendered any number of times, from any thread.
//!
//! # Example
//!
//! ```rust
//! use tagsmith::{Args, Template};
//!
//! let page = Template::new(|r| {
//!     r.html5(|r| {
//!         r.call("body", Args::with_block(|r| {
//!             r.call("p", "hi")?;
//!             Ok(())
//!         }))?;
//!         Ok(())
//!     })
//! });
//!
//! assert_eq!(
//!     page.render().unwrap(),
//!     "<!DOCTYPE html><html><body><p>hi</p></body></html>"
//! );
//! ```

mod registry;
mod resolver;

pub use registry::{ComponentRegistry, RegistryError};
pub use resolver::{classify, is_component_name, DispatchCache, Handler, HandlerKind};

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::environment::Environment;
use crate::error::RenderError;
use crate::renderer::Rendering;
use crate::value::Locals;

type BodyFn = dyn Fn(&mut Rendering<'_>) -> Result<(), RenderError> + Send + Sync + 'static;

/// An immutable template
#[derive(Clone)]
pub struct Template {
    body: Arc<BodyFn>,
}

impl Template {
    /// Create a template from a body; the body is not run until render time
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut Rendering<'_>) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        Self { body: Arc::new(body) }
    }

    /// Create a template with bound locals
    ///
    /// The bound locals act as defaults: each time the body runs, they are
    /// pushed as a new frame overlaid by whatever frame is visible at that
    /// point, so values supplied by the caller win.
    pub fn with_locals<F>(locals: impl Into<Locals>, body: F) -> Self
    where
        F: Fn(&mut Rendering<'_>) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        let locals = locals.into();
        if locals.is_empty() {
            return Self::new(body);
        }
        Self::new(move |r| {
            let frame = locals.overlaid_by(r.locals());
            r.with_scope(frame, |r| body(r))
        })
    }

    /// Render with an empty context in the global environment
    pub fn render(&self) -> Result<String, RenderError> {
        self.render_in(Environment::global(), Locals::new())
    }

    /// Render with a starting context in the global environment
    pub fn render_with(&self, context: impl Into<Locals>) -> Result<String, RenderError> {
        self.render_in(Environment::global(), context)
    }

    /// Render in a specific environment
    pub fn render_in(&self, env: &Environment, context: impl Into<Locals>) -> Result<String, RenderError> {
        let mut rendering = Rendering::new(env, context.into());
        trace!("render start");
        self.run(&mut rendering)?;
        trace!(bytes = rendering.as_str().len(), "render finish");
        Ok(rendering.into_string())
    }

    /// Run the body inside an existing rendering, sharing its buffer
    pub(crate) fn run(&self, rendering: &mut Rendering<'_>) -> Result<(), RenderError> {
        (self.body)(rendering)
    }

    pub fn ptr_eq(&self, other: &Template) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<Template>")
    }
}
