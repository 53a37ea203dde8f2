//! Symbol classification and the dispatch cache
//!
//! A name invoked through `Rendering::call` is classified once per cache
//! lifetime: capitalized names become components bound in the registry, any
//! other name becomes a plain tag. Local overrides are checked by the
//! rendering before the cache is consulted and are never cached.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::registry::ComponentRegistry;
use super::Template;
use crate::error::{CallSite, RenderError};
use crate::value::{Proc, Value};

/// What an invoked name turned out to mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Bound in the innermost context frame (never cached)
    Local,
    ComponentProc,
    ComponentTemplate,
    ComponentString,
    Tag,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandlerKind::Local => "local",
            HandlerKind::ComponentProc => "component proc",
            HandlerKind::ComponentTemplate => "component template",
            HandlerKind::ComponentString => "component string",
            HandlerKind::Tag => "tag",
        };
        f.write_str(s)
    }
}

/// A cached classification, holding the resolved component where there is one
#[derive(Debug, Clone)]
pub enum Handler {
    ComponentProc(Proc),
    ComponentTemplate(Template),
    ComponentString(Arc<str>),
    Tag,
}

impl Handler {
    pub fn kind(&self) -> HandlerKind {
        match self {
            Handler::ComponentProc(_) => HandlerKind::ComponentProc,
            Handler::ComponentTemplate(_) => HandlerKind::ComponentTemplate,
            Handler::ComponentString(_) => HandlerKind::ComponentString,
            Handler::Tag => HandlerKind::Tag,
        }
    }
}

/// Names starting with an uppercase letter refer to components
pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Classify a name that is not bound locally
pub fn classify(name: &str, registry: &ComponentRegistry, site: CallSite) -> Result<Handler, RenderError> {
    if !is_component_name(name) {
        return Ok(Handler::Tag);
    }

    let value = registry
        .get(name)
        .ok_or_else(|| RenderError::UndefinedComponent {
            name: name.to_string(),
            site,
        })?;

    match value {
        Value::Proc(p) => Ok(Handler::ComponentProc(p)),
        Value::Template(t) => Ok(Handler::ComponentTemplate(t)),
        Value::Str(s) => Ok(Handler::ComponentString(s.into())),
        other => Err(RenderError::CannotRender {
            name: name.to_string(),
            value: other,
            site,
        }),
    }
}

/// Memoized name -> handler classifications
///
/// Entries are inserted once and never replaced; only `clear` removes them.
#[derive(Debug, Default)]
pub struct DispatchCache {
    entries: RwLock<HashMap<String, Handler>>,
}

impl DispatchCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn kind_of(&self, name: &str) -> Option<HandlerKind> {
        self.get(name).map(|h| h.kind())
    }

    /// Return the cached handler, classifying and caching on first use
    ///
    /// Classification runs outside the lock. When two threads classify the
    /// same name concurrently, the first insert wins and both get that handler.
    /// Failed classifications are not cached.
    pub fn get_or_classify<F>(&self, name: &str, classify: F) -> Result<Handler, RenderError>
    where
        F: FnOnce() -> Result<Handler, RenderError>,
    {
        if let Some(handler) = self.get(name) {
            return Ok(handler);
        }

        let handler = classify()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let handler = entries
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(symbol = name, kind = %handler.kind(), "classified symbol");
                handler
            })
            .clone();
        Ok(handler)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every classification
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn site() -> CallSite {
        CallSite::caller()
    }

    #[test]
    fn test_lowercase_is_tag() {
        let registry = ComponentRegistry::new();
        let handler = classify("section", &registry, site()).unwrap();
        assert_eq!(handler.kind(), HandlerKind::Tag);
    }

    #[test]
    fn test_reserved_word_is_still_a_tag() {
        let registry = ComponentRegistry::new();
        for name in ["text", "with", "emit", "type", "match"] {
            assert_eq!(classify(name, &registry, site()).unwrap().kind(), HandlerKind::Tag);
        }
    }

    #[test]
    fn test_component_kinds() {
        let registry = ComponentRegistry::new();
        registry.register("Str", "raw").unwrap();
        registry.register("Tpl", Template::new(|_| Ok(()))).unwrap();
        registry.register("Fun", Proc::new(|_, _| Ok(Value::Nil))).unwrap();

        assert_eq!(classify("Str", &registry, site()).unwrap().kind(), HandlerKind::ComponentString);
        assert_eq!(classify("Tpl", &registry, site()).unwrap().kind(), HandlerKind::ComponentTemplate);
        assert_eq!(classify("Fun", &registry, site()).unwrap().kind(), HandlerKind::ComponentProc);
    }

    #[test]
    fn test_unrenderable_component() {
        let registry = ComponentRegistry::new();
        registry.register("Answer", 42).unwrap();
        let err = classify("Answer", &registry, site()).unwrap_err();
        assert!(matches!(err, RenderError::CannotRender { value: Value::Int(42), .. }));
    }

    #[test]
    fn test_undefined_component() {
        let registry = ComponentRegistry::new();
        let err = classify("Nowhere", &registry, site()).unwrap_err();
        assert!(matches!(err, RenderError::UndefinedComponent { ref name, .. } if name == "Nowhere"));
    }

    #[test]
    fn test_cache_classifies_once() {
        let cache = DispatchCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let handler = cache
                .get_or_classify("div", || {
                    calls += 1;
                    Ok(Handler::Tag)
                })
                .unwrap();
            assert_eq!(handler.kind(), HandlerKind::Tag);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let cache = DispatchCache::new();
        let result = cache.get_or_classify("Broken", || Err(RenderError::msg("nope")));
        assert!(result.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.kind_of("Broken"), None);
    }

    #[test]
    fn test_cache_first_insert_wins() {
        let cache = DispatchCache::new();
        cache.get_or_classify("X", || Ok(Handler::ComponentString("one".into()))).unwrap();
        let handler = cache.get_or_classify("X", || Ok(Handler::Tag)).unwrap();
        assert_eq!(handler.kind(), HandlerKind::ComponentString);
        cache.clear();
        assert!(cache.is_empty());
    }
}
