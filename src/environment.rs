//! Shared rendering state: configuration, escaper, component registry and
//! dispatch cache
//!
//! Renderings borrow an `Environment`. Everything in it is either immutable
//! or behind a lock, so one environment serves concurrent renders.
//! `Environment::global()` is the process-wide instance used by
//! `Template::render`; tests and embedders can build their own.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::config::RenderConfig;
use crate::error::{CallSite, RenderError};
use crate::escape::{Escaper, StandardEscaper};
use crate::template::{classify, ComponentRegistry, DispatchCache, Handler, RegistryError};
use crate::value::Value;

static GLOBAL: Lazy<Environment> = Lazy::new(Environment::new);

pub struct Environment {
    config: RenderConfig,
    escaper: Arc<dyn Escaper>,
    registry: ComponentRegistry,
    cache: DispatchCache,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment with default configuration and escaping
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            escaper: Arc::new(StandardEscaper),
            registry: ComponentRegistry::new(),
            cache: DispatchCache::new(),
        }
    }

    /// Replace the escaper
    pub fn with_escaper(mut self, escaper: impl Escaper + 'static) -> Self {
        self.escaper = Arc::new(escaper);
        self
    }

    /// The process-wide environment
    pub fn global() -> &'static Environment {
        &GLOBAL
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn escaper(&self) -> &dyn Escaper {
        self.escaper.as_ref()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &DispatchCache {
        &self.cache
    }

    /// Bind a capitalized name for component resolution
    pub fn register_component(
        &self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), RegistryError> {
        self.registry.register(name, value)
    }

    /// Resolve a name that is not bound locally
    pub(crate) fn dispatch(&self, name: &str, site: CallSite) -> Result<Handler, RenderError> {
        self.cache
            .get_or_classify(name, || classify(name, &self.registry, site))
    }

    /// Forget every cached classification
    pub fn clear_cache(&self) {
        trace!("clearing dispatch cache");
        self.cache.clear();
    }

    /// Forget every classification and component binding
    pub fn clear(&self) {
        self.clear_cache();
        self.registry.clear();
    }
}
