//! Tag, attribute and text emission

use std::fmt::Display;

use super::Rendering;
use crate::error::RenderError;
use crate::value::{Args, Attributes, Block, Value};

impl Rendering<'_> {
    /// Emit an element named `name`
    ///
    /// Text is the first positional argument, else the `text` keyword; a
    /// nested block takes precedence over text.
    pub fn tag<'a>(&mut self, name: &str, args: impl Into<Args<'a>>) -> Result<(), RenderError> {
        let mut args = args.into();
        let block = args.take_block();
        self.emit_tag(name, args.text(), &args.attributes, block)
    }

    /// Emit an element from its parts
    ///
    /// With neither a block nor non-nil text the element is self-closing.
    pub fn emit_tag(
        &mut self,
        name: &str,
        text: Option<&Value>,
        attributes: &Attributes,
        block: Option<Block<'_>>,
    ) -> Result<(), RenderError> {
        if let Some(block) = block {
            return self.element(name, attributes, block);
        }
        match text {
            Some(Value::Template(t)) => self.element(name, attributes, |r| t.run(r)),
            Some(value) if !value.is_nil() => {
                let escaped = self.environment().escaper().escape_html(&value.to_string());
                self.element(name, attributes, |r| {
                    r.buffer.push_str(&escaped);
                    Ok(())
                })
            }
            _ => {
                self.buffer.push('<');
                self.buffer.push_str(name);
                self.emit_attributes(attributes);
                self.buffer.push_str("/>");
                Ok(())
            }
        }
    }

    fn element<F>(&mut self, name: &str, attributes: &Attributes, content: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Self) -> Result<(), RenderError>,
    {
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.emit_attributes(attributes);
        self.buffer.push('>');
        content(self)?;
        self.buffer.push_str("</");
        self.buffer.push_str(name);
        self.buffer.push('>');
        Ok(())
    }

    /// Emit attributes in insertion order, each with a leading space
    ///
    /// URI attributes are URI-escaped, `true` emits a bare name, and every
    /// other value is interpolated as-is: attribute values are NOT
    /// HTML-escaped.
    pub fn emit_attributes(&mut self, attributes: &Attributes) {
        let env = self.environment();
        for (name, value) in attributes.iter() {
            if name == "text" {
                continue;
            }
            self.buffer.push(' ');
            self.buffer.push_str(name);
            if env.config().is_uri_attribute(name) {
                let escaped = env.escaper().escape_uri(&value.to_string());
                self.push_quoted(&escaped);
            } else if !matches!(value, Value::Bool(true)) {
                self.push_quoted(&value.to_string());
            }
        }
    }

    fn push_quoted(&mut self, value: &str) {
        self.buffer.push_str("=\"");
        self.buffer.push_str(value);
        self.buffer.push('"');
    }

    /// Emit an HTML-escaped text node
    pub fn text(&mut self, data: impl Display) {
        let escaped = self.environment().escaper().escape_html(&data.to_string());
        self.buffer.push_str(&escaped);
    }

    /// Emit the doctype followed by an `html` element around `body`
    pub fn html5<F>(&mut self, body: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Self) -> Result<(), RenderError>,
    {
        let doctype = &self.environment().config().doctype;
        self.buffer.push_str(doctype);
        self.element("html", &Attributes::new(), body)
    }
}
