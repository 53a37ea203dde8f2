//! Tagsmith - a recursive, string-building HTML template renderer
//!
//! Templates are deferred bodies that, rendered against a context, emit
//! escaped HTML into a single buffer. Any name can be invoked through
//! [`Rendering::call`]: it resolves to a local value, a registered component,
//! or a plain tag, and the classification is cached per environment.
//!
//! # Example
//!
//! ```rust
//! use tagsmith::{Args, Environment, Locals, Template};
//!
//! let env = Environment::new();
//! let greeting = Template::with_locals([("name", "stranger")], |r| {
//!     let name = r.call("name", ())?;
//!     r.call("p", format!("Hello, {}", name))?;
//!     Ok(())
//! });
//! env.register_component("Greeting", greeting).unwrap();
//!
//! let page = Template::new(|r| {
//!     r.call("Greeting", [("name", "Sam")])?;
//!     r.call("Greeting", ())?;
//!     Ok(())
//! });
//!
//! assert_eq!(
//!     page.render_in(&env, Locals::new()).unwrap(),
//!     "<p>Hello, Sam</p><p>Hello, stranger</p>"
//! );
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod escape;
pub mod renderer;
pub mod template;
pub mod value;

pub use config::{ConfigError, RenderConfig};
pub use environment::Environment;
pub use error::{CallSite, RenderError};
pub use escape::{Escaper, StandardEscaper};
pub use renderer::Rendering;
pub use template::{HandlerKind, RegistryError, Template};
pub use value::{Args, Attributes, Block, Locals, Proc, Value};
