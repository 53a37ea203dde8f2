//! A single execution of a template body

use std::fmt;
use std::mem;

use crate::environment::Environment;
use crate::error::{CallSite, RenderError};
use crate::template::{Handler, HandlerKind};
use crate::value::{Args, Locals, Value};

/// Mutable, single-use state of one render
///
/// Owns the output buffer and the visible context frame. Frames shadowed by
/// `with_scope` live on the call stack and come back when the scope returns.
pub struct Rendering<'e> {
    env: &'e Environment,
    pub(super) buffer: String,
    locals: Locals,
}

impl<'e> Rendering<'e> {
    /// Create a rendering whose bottom frame is `context`
    pub fn new(env: &'e Environment, context: Locals) -> Self {
        Self {
            env,
            buffer: String::with_capacity(env.config().buffer_capacity),
            locals: context,
        }
    }

    pub fn environment(&self) -> &'e Environment {
        self.env
    }

    /// The visible context frame
    pub fn locals(&self) -> &Locals {
        &self.locals
    }

    /// Look up a name in the visible frame only
    pub fn local(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    /// Run `body` with `locals` as the visible frame
    ///
    /// The previous frame is restored whether or not `body` succeeds.
    pub fn with_scope<T, F>(&mut self, locals: impl Into<Locals>, body: F) -> Result<T, RenderError>
    where
        F: FnOnce(&mut Self) -> Result<T, RenderError>,
    {
        let previous = mem::replace(&mut self.locals, locals.into());
        let result = body(self);
        self.locals = previous;
        result
    }

    /// Emit a value without escaping
    ///
    /// Procs are evaluated here and templates run against this rendering's
    /// buffer and visible frame. `Nil` emits nothing; anything else emits
    /// its string form verbatim.
    pub fn emit(&mut self, value: impl Into<Value>) -> Result<(), RenderError> {
        match value.into() {
            Value::Proc(p) => {
                p.call(self, Args::new())?;
                Ok(())
            }
            Value::Template(t) => t.run(self),
            Value::Nil => Ok(()),
            Value::Str(s) => {
                self.buffer.push_str(&s);
                Ok(())
            }
            other => {
                self.buffer.push_str(&other.to_string());
                Ok(())
            }
        }
    }

    /// Invoke a name: a local value, a component, or a tag
    ///
    /// Returns the local's value on a local hit and `Value::Nil` after an
    /// emission.
    #[track_caller]
    pub fn call<'a>(&mut self, name: &str, args: impl Into<Args<'a>>) -> Result<Value, RenderError> {
        let site = CallSite::caller();
        if let Some(value) = self.locals.get(name) {
            return Ok(value.clone());
        }

        let handler = self.env.dispatch(name, site)?;
        self.invoke(name, handler, args.into())?;
        Ok(Value::Nil)
    }

    /// How `call` would treat `name` right now, classifying it if needed
    #[track_caller]
    pub fn resolve_kind(&self, name: &str) -> Result<HandlerKind, RenderError> {
        let site = CallSite::caller();
        if self.locals.contains(name) {
            return Ok(HandlerKind::Local);
        }
        Ok(self.env.dispatch(name, site)?.kind())
    }

    fn invoke(&mut self, name: &str, handler: Handler, args: Args<'_>) -> Result<(), RenderError> {
        match handler {
            Handler::Tag => self.tag(name, args),
            Handler::ComponentProc(p) => {
                let value = p.call(self, args)?;
                self.emit(value)
            }
            Handler::ComponentTemplate(t) => {
                if args.attributes.is_empty() {
                    t.run(self)
                } else {
                    self.with_scope(args.attributes.to_locals(), |r| t.run(r))
                }
            }
            Handler::ComponentString(s) => {
                self.buffer.push_str(&s);
                Ok(())
            }
        }
    }

    /// Output so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl fmt::Display for Rendering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

impl fmt::Debug for Rendering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendering")
            .field("buffer", &self.buffer)
            .field("locals", &self.locals)
            .finish()
    }
}
