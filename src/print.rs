//! JavaScript rendering of validator expressions
//!
//! Field maps use one field per line with two-space indentation, so a
//! table reads the way a code generator would emit it:
//!
//! ```text
//! {
//!   // The a prop
//!   a: PropTypes.shape({
//!     b: PropTypes.any.isRequired
//!   }).isRequired
//! }
//! ```

use std::fmt::{self, Write};

use crate::ast::{Comment, CommentKind, FieldKey};
use crate::validator::{Field, LiteralValue, ValidatorExpr};

const INDENT: &str = "  ";

impl fmt::Display for ValidatorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, 0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, self, 0)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Undefined => f.write_str("undefined"),
            LiteralValue::Boolean(value) => write!(f, "{}", value),
            LiteralValue::Number(value) => write_number(f, *value),
            LiteralValue::String(value) => write_quoted(f, value),
        }
    }
}

fn write_expr<W: Write>(out: &mut W, expr: &ValidatorExpr, level: usize) -> fmt::Result {
    match expr {
        ValidatorExpr::Identifier(name) => out.write_str(name),
        ValidatorExpr::Member { object, property } => {
            write_expr(out, object, level)?;
            write!(out, ".{}", property)
        }
        ValidatorExpr::Call { callee, arguments } => {
            write_expr(out, callee, level)?;
            out.write_char('(')?;
            write_list(out, arguments, level)?;
            out.write_char(')')
        }
        ValidatorExpr::Array(elements) => {
            out.write_char('[')?;
            write_list(out, elements, level)?;
            out.write_char(']')
        }
        ValidatorExpr::Literal(value) => write!(out, "{}", value),
        ValidatorExpr::Object(fields) => write_object(out, fields, level),
    }
}

fn write_list<W: Write>(out: &mut W, items: &[ValidatorExpr], level: usize) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_expr(out, item, level)?;
    }
    Ok(())
}

fn write_object<W: Write>(out: &mut W, fields: &[Field], level: usize) -> fmt::Result {
    if fields.is_empty() {
        return out.write_str("{}");
    }

    out.write_str("{\n")?;
    for (i, field) in fields.iter().enumerate() {
        for comment in &field.comments.leading {
            write_indent(out, level + 1)?;
            write_comment(out, comment)?;
            out.write_char('\n')?;
        }
        write_indent(out, level + 1)?;
        write_field(out, field, level + 1)?;
        if i + 1 < fields.len() {
            out.write_char(',')?;
        }
        for comment in &field.comments.trailing {
            out.write_char(' ')?;
            write_comment(out, comment)?;
        }
        out.write_char('\n')?;
    }
    write_indent(out, level)?;
    out.write_char('}')
}

/// `key: value` plus the required suffix, without comments
fn write_field<W: Write>(out: &mut W, field: &Field, level: usize) -> fmt::Result {
    match &field.key {
        FieldKey::Identifier(name) => out.write_str(name)?,
        FieldKey::String(name) => write_quoted(out, name)?,
    }
    out.write_str(": ")?;
    write_expr(out, &field.value, level)?;
    if field.required {
        out.write_str(".isRequired")?;
    }
    Ok(())
}

fn write_comment<W: Write>(out: &mut W, comment: &Comment) -> fmt::Result {
    match comment.kind {
        CommentKind::Line => write!(out, "//{}", comment.text),
        CommentKind::Block => write!(out, "/*{}*/", comment.text),
    }
}

fn write_indent<W: Write>(out: &mut W, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_str(INDENT)?;
    }
    Ok(())
}

fn write_quoted<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    let quoted = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    out.write_str(&quoted)
}

/// Number in JavaScript source syntax
fn write_number<W: Write>(out: &mut W, value: f64) -> fmt::Result {
    if value.is_nan() {
        out.write_str("NaN")
    } else if value.is_infinite() {
        out.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value == 0.0 && value.is_sign_negative() {
        out.write_str("-0")
    } else {
        write!(out, "{}", value)
    }
}
