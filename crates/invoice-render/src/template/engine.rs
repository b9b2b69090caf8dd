//! Slot substitution engine.
//!
//! [`SlotEngine`] fills `$name` and `${name}` slots from JSON data. It is the
//! whole templating story for the invoice skeleton: no loops, no conditionals,
//! no filters. Anything that is not a slot is copied verbatim, which is what
//! keeps the invoice field placeholders (`{{InvoiceNumber}}`) intact.
//!
//! # Syntax
//!
//! - `$name` - slot, name is `[A-Za-z_][A-Za-z0-9_]*`
//! - `${name}` - same slot, for use directly before identifier characters
//! - `$$` - a literal `$`
//!
//! Any other `$` is a compile error. A slot without a value is a render error;
//! nothing is ever filled with an empty string.
//!
//! # Example
//!
//! ```rust
//! use invoice_render::template::SlotEngine;
//! use serde_json::json;
//!
//! let engine = SlotEngine::new();
//! let output = engine
//!     .render_template("border: 1px solid $line; width: ${w}px", &json!({"line": "#ccc", "w": 4}))
//!     .unwrap();
//! assert_eq!(output, "border: 1px solid #ccc; width: 4px");
//!
//! assert!(engine.render_template("color: $missing", &json!({})).is_err());
//! ```

use std::collections::HashMap;

use crate::error::TemplateError;

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A template parsed into literal text and named slots.
///
/// Compiling up front means syntax errors surface when a template is added,
/// and [`slots`](Self::slots) can be checked against the data before
/// rendering anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// Parses `source` into segments.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();
        let mut line = 1;
        let mut column = 0;

        while let Some(ch) = chars.next() {
            column += 1;
            if ch == '\n' {
                literal.push(ch);
                line += 1;
                column = 0;
                continue;
            }
            if ch != '$' {
                literal.push(ch);
                continue;
            }

            let at = (line, column);
            let invalid = move || TemplateError::InvalidPlaceholder {
                line: at.0,
                column: at.1,
            };

            match chars.peek().copied() {
                Some('$') => {
                    chars.next();
                    column += 1;
                    literal.push('$');
                }
                Some('{') => {
                    chars.next();
                    column += 1;
                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        column += 1;
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed || !is_identifier(&name) {
                        return Err(invalid());
                    }
                    flush_literal(&mut segments, &mut literal);
                    segments.push(Segment::Slot(name));
                }
                Some(c) if is_identifier_start(c) => {
                    let mut name = String::new();
                    while let Some(&c) = chars.peek() {
                        if !is_identifier_char(c) {
                            break;
                        }
                        name.push(c);
                        chars.next();
                        column += 1;
                    }
                    flush_literal(&mut segments, &mut literal);
                    segments.push(Segment::Slot(name));
                }
                _ => return Err(invalid()),
            }
        }

        flush_literal(&mut segments, &mut literal);
        Ok(Self { segments })
    }

    /// Slot names in order of first appearance, without duplicates.
    pub fn slots(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Slot(name) = segment {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    /// Renders with `data`, consulting `context` first for each slot.
    pub fn render(
        &self,
        data: &serde_json::Value,
        context: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let value = context
                        .and_then(|ctx| ctx.get(name))
                        .or_else(|| data.get(name));
                    match value.and_then(format_value) {
                        Some(text) => out.push_str(&text),
                        None => {
                            return Err(TemplateError::MissingSlot { slot: name.clone() });
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

fn flush_literal(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_identifier_start(first) && chars.all(is_identifier_char),
        None => false,
    }
}

/// Formats a JSON value for output. `null` counts as missing.
fn format_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null => None,
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Some(value.to_string()),
    }
}

/// A small registry of compiled slot templates.
///
/// # Example
///
/// ```rust
/// use invoice_render::template::SlotEngine;
/// use serde_json::json;
///
/// let mut engine = SlotEngine::new();
/// engine.add_template("greeting", "Hello, $name!").unwrap();
/// assert_eq!(
///     engine.render_named("greeting", &json!({"name": "World"})).unwrap(),
///     "Hello, World!"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotEngine {
    templates: HashMap<String, CompiledTemplate>,
}

impl SlotEngine {
    /// Creates an engine with no templates.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Compiles and renders a template string in one step.
    pub fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        CompiledTemplate::compile(template)?.render(data, None)
    }

    /// Compiles `source` and stores it under `name`, replacing any previous one.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        let compiled = CompiledTemplate::compile(source)?;
        self.templates.insert(name.to_string(), compiled);
        Ok(())
    }

    /// Returns a previously added template.
    pub fn get(&self, name: &str) -> Result<&CompiledTemplate, TemplateError> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }

    /// Renders a previously added template.
    pub fn render_named(
        &self,
        name: &str,
        data: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        self.get(name)?.render(data, None)
    }

    /// Renders a previously added template with extra values.
    ///
    /// `context` values take precedence over `data` for the same slot.
    pub fn render_named_with_context(
        &self,
        name: &str,
        data: &serde_json::Value,
        context: &HashMap<String, serde_json::Value>,
    ) -> Result<String, TemplateError> {
        self.get(name)?.render(data, Some(context))
    }

    /// Checks whether a template with the given name exists.
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}
