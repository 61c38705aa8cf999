#![forbid(unsafe_code)]

//! Formatters turning [`Value`]s into text in a given syntax.
//!
//! A container is written inline when its inline form fits both the line
//! width and the per-line container limit. Otherwise it is opened on the
//! current line, its entries go on their own indented lines, and it is
//! closed on a line of its own. Scalars are always inline, even when they
//! overflow the width.

use panelkit_core::{SyntaxLanguage, UnsupportedContentError};
use panelkit_text::line_width;

use crate::value::{ContainerKind, Entry, Value};

/// Limits applied while formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    /// Maximum line width in cells.
    pub max_width: Option<usize>,
    /// Maximum width of an inline container.
    pub container_width_per_line_limit: Option<usize>,
    pub indent_size: usize,
}

/// A syntax for writing values.
///
/// Implementors provide the vocabulary; the line layout is shared.
pub trait Formatter: Send + Sync {
    /// Syntax name used in error messages.
    fn name(&self) -> &'static str;

    /// Inline text of a scalar.
    fn scalar(&self, value: &Value) -> Result<String, UnsupportedContentError>;

    /// Inline text of a dict key.
    fn key(&self, key: &Value) -> Result<String, UnsupportedContentError>;

    /// Opening and closing brackets of a container.
    fn brackets(&self, kind: ContainerKind) -> (&'static str, &'static str);

    /// Text of an empty container.
    fn empty(&self, kind: ContainerKind) -> String {
        let (open, close) = self.brackets(kind);
        format!("{open}{close}")
    }

    /// Whether a container with these entries needs a trailing comma.
    fn trailing_comma(&self, _kind: ContainerKind, _len: usize) -> bool {
        false
    }

    /// Format `value` into lines.
    fn format(
        &self,
        value: &Value,
        options: &FormatOptions,
    ) -> Result<Vec<String>, UnsupportedContentError> {
        layout(self, value, 0, 0, 0, options)
    }

    /// Single-line text of `value`.
    fn inline(&self, value: &Value) -> Result<String, UnsupportedContentError> {
        let Some(kind) = value.container_kind() else {
            return self.scalar(value);
        };
        let entries = value.entries();
        if entries.is_empty() {
            return Ok(self.empty(kind));
        }
        let (open, close) = self.brackets(kind);
        let mut parts = Vec::with_capacity(entries.len());
        for entry in &entries {
            parts.push(match entry {
                Entry::Item(v) => self.inline(v)?,
                Entry::Pair(k, v) => format!("{}: {}", self.key(k)?, self.inline(v)?),
            });
        }
        let comma = if self.trailing_comma(kind, entries.len()) {
            ","
        } else {
            ""
        };
        Ok(format!("{open}{}{comma}{close}", parts.join(", ")))
    }
}

/// Lines of `value` placed after `lead` cells on the first line and
/// followed by `trail` cells on the last. Continuation lines carry their
/// own indentation; the first line does not include the lead.
fn layout<F: Formatter + ?Sized>(
    formatter: &F,
    value: &Value,
    indent: usize,
    lead: usize,
    trail: usize,
    options: &FormatOptions,
) -> Result<Vec<String>, UnsupportedContentError> {
    let inline = formatter.inline(value)?;
    let Some(kind) = value.container_kind() else {
        return Ok(vec![inline]);
    };
    let entries = value.entries();
    let width = line_width(&inline, 1);
    let fits_width = options.max_width.is_none_or(|max| lead + width + trail <= max);
    let fits_limit = options
        .container_width_per_line_limit
        .is_none_or(|limit| width <= limit);
    if entries.is_empty() || (fits_width && fits_limit) {
        return Ok(vec![inline]);
    }

    let (open, close) = formatter.brackets(kind);
    let child_indent = indent + options.indent_size;
    let pad = " ".repeat(child_indent);
    let last = entries.len() - 1;
    let force_comma = formatter.trailing_comma(kind, entries.len());

    let mut lines = vec![open.to_string()];
    for (i, entry) in entries.iter().enumerate() {
        let comma = if i < last || force_comma { "," } else { "" };
        let (prefix, item) = match entry {
            Entry::Item(v) => (String::new(), *v),
            Entry::Pair(k, v) => (format!("{}: ", formatter.key(k)?), *v),
        };
        let lead = child_indent + line_width(&prefix, 1);
        let mut sub = layout(formatter, item, child_indent, lead, comma.len(), options)?;
        if let Some(first) = sub.first_mut() {
            *first = format!("{pad}{prefix}{first}");
        }
        if let Some(end) = sub.last_mut() {
            end.push_str(comma);
        }
        lines.extend(sub);
    }
    lines.push(format!("{}{close}", " ".repeat(indent)));
    Ok(lines)
}

/// Python literal syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonFormatter;

impl Formatter for PythonFormatter {
    fn name(&self) -> &'static str {
        "Python"
    }

    fn scalar(&self, value: &Value) -> Result<String, UnsupportedContentError> {
        Ok(match value {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_nan() => "nan".to_string(),
            Value::Float(f) if f.is_infinite() => {
                let sign = if *f < 0.0 { "-" } else { "" };
                format!("{sign}inf")
            }
            Value::Float(f) => format!("{f:?}"),
            Value::Str(s) => python_str(s),
            _ => self.inline(value)?,
        })
    }

    fn key(&self, key: &Value) -> Result<String, UnsupportedContentError> {
        self.inline(key)
    }

    fn brackets(&self, kind: ContainerKind) -> (&'static str, &'static str) {
        match kind {
            ContainerKind::List => ("[", "]"),
            ContainerKind::Tuple => ("(", ")"),
            ContainerKind::Set | ContainerKind::Dict => ("{", "}"),
        }
    }

    fn empty(&self, kind: ContainerKind) -> String {
        match kind {
            ContainerKind::Set => "set()".to_string(),
            _ => {
                let (open, close) = self.brackets(kind);
                format!("{open}{close}")
            }
        }
    }

    /// One-element tuples need a comma to stay tuples.
    fn trailing_comma(&self, kind: ContainerKind, len: usize) -> bool {
        kind == ContainerKind::Tuple && len == 1
    }
}

/// String literal in single quotes, switching to double quotes when
/// that avoids escaping.
fn python_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// JSON syntax. Tuples and sets become arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn scalar(&self, value: &Value) -> Result<String, UnsupportedContentError> {
        Ok(match value {
            Value::None => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if !f.is_finite() => {
                return Err(UnsupportedContentError::new(
                    self.name(),
                    format!("{f} is not a finite number"),
                ));
            }
            Value::Float(f) => format!("{f:?}"),
            Value::Str(s) => json_str(s),
            _ => self.inline(value)?,
        })
    }

    fn key(&self, key: &Value) -> Result<String, UnsupportedContentError> {
        match key {
            Value::Str(s) => Ok(json_str(s)),
            other => Err(UnsupportedContentError::new(
                self.name(),
                format!("object keys must be strings, got {other:?}"),
            )),
        }
    }

    fn brackets(&self, kind: ContainerKind) -> (&'static str, &'static str) {
        match kind {
            ContainerKind::Dict => ("{", "}"),
            _ => ("[", "]"),
        }
    }
}

fn json_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Formatter for a configured syntax language. Plain text falls back to
/// Python literals.
pub fn formatter_for(language: SyntaxLanguage) -> Box<dyn Formatter> {
    match language {
        SyntaxLanguage::Json => Box::new(JsonFormatter),
        SyntaxLanguage::Python | SyntaxLanguage::Text => Box::new(PythonFormatter),
    }
}
