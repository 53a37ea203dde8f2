//! Values flowing through templates: locals, attributes, component bindings
//! and invocation arguments

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::renderer::Rendering;
use crate::template::Template;

type ProcFn =
    dyn Fn(&mut Rendering<'_>, Args<'_>) -> Result<Value, RenderError> + Send + Sync + 'static;

/// A nested block evaluated inside the current rendering
pub type Block<'a> = Box<dyn FnOnce(&mut Rendering<'_>) -> Result<(), RenderError> + 'a>;

/// A shareable deferred computation
///
/// Used both as a callable component (its return value is emitted) and as
/// a value handed to `Rendering::emit` (evaluated in place).
#[derive(Clone)]
pub struct Proc(Arc<ProcFn>);

impl Proc {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Rendering<'_>, Args<'_>) -> Result<Value, RenderError> + Send + Sync + 'static,
    {
        Proc(Arc::new(f))
    }

    pub fn call(&self, rendering: &mut Rendering<'_>, args: Args<'_>) -> Result<Value, RenderError> {
        (self.0)(rendering, args)
    }

    pub fn ptr_eq(&self, other: &Proc) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Proc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<Proc>")
    }
}

/// Any value a local, attribute, argument or component binding can hold
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Template(Template),
    Proc(Proc),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// String form used for raw emission and attribute interpolation
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Template(_) => f.write_str("#<Template>"),
            Value::Proc(_) => f.write_str("#<Proc>"),
        }
    }
}

/// Inspect form used in diagnostics
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Str(s) => write!(f, "{:?}", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Template(a), Value::Template(b)) => a.ptr_eq(b),
            (Value::Proc(a), Value::Proc(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Template> for Value {
    fn from(t: Template) -> Self {
        Value::Template(t)
    }
}

impl From<Proc> for Value {
    fn from(p: Proc) -> Self {
        Value::Proc(p)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Nil)
    }
}

/// One context frame: name -> value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locals {
    values: HashMap<String, Value>,
}

impl Locals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// These bindings as defaults, with `visible` taking precedence
    pub fn overlaid_by(&self, visible: &Locals) -> Locals {
        let mut merged = self.clone();
        for (name, value) in &visible.values {
            merged.values.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Locals {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Locals {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Attributes of one tag invocation, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute; an existing name keeps its position
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keyword arguments as a context frame
    pub fn to_locals(&self) -> Locals {
        self.entries.iter().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Arguments of a single `Rendering::call`
#[derive(Default)]
pub struct Args<'a> {
    pub positional: Vec<Value>,
    pub attributes: Attributes,
    block: Option<Block<'a>>,
}

impl<'a> Args<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only a nested block
    pub fn with_block<F>(f: F) -> Self
    where
        F: FnOnce(&mut Rendering<'_>) -> Result<(), RenderError> + 'a,
    {
        Self::new().block(f)
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn attrs(mut self, attributes: impl Into<Attributes>) -> Self {
        for (name, value) in attributes.into().entries {
            self.attributes.insert(name, value);
        }
        self
    }

    pub fn block<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Rendering<'_>) -> Result<(), RenderError> + 'a,
    {
        self.block = Some(Box::new(f));
        self
    }

    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn take_block(&mut self) -> Option<Block<'a>> {
        self.block.take()
    }

    /// Text content: the first positional argument, else the `text` keyword
    pub fn text(&self) -> Option<&Value> {
        self.positional
            .first()
            .or_else(|| self.attributes.get("text"))
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("positional", &self.positional)
            .field("attributes", &self.attributes)
            .field("block", &self.block.is_some())
            .finish()
    }
}

impl From<()> for Args<'_> {
    fn from(_: ()) -> Self {
        Args::new()
    }
}

impl From<&str> for Args<'_> {
    fn from(text: &str) -> Self {
        Args::new().arg(text)
    }
}

impl From<String> for Args<'_> {
    fn from(text: String) -> Self {
        Args::new().arg(text)
    }
}

impl From<Value> for Args<'_> {
    fn from(value: Value) -> Self {
        Args::new().arg(value)
    }
}

impl From<Template> for Args<'_> {
    fn from(template: Template) -> Self {
        Args::new().arg(template)
    }
}

impl From<Attributes> for Args<'_> {
    fn from(attributes: Attributes) -> Self {
        Args::new().attrs(attributes)
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Args<'_> {
    fn from(pairs: [(K, V); N]) -> Self {
        Args::new().attrs(Attributes::from(pairs))
    }
}
