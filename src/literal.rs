//! Literal types to runtime values

use crate::ast::LiteralType;
use crate::validator::LiteralValue;

/// Runtime value a singleton type admits. `void` encodes as `undefined`.
pub fn encode(literal: &LiteralType) -> LiteralValue {
    match literal {
        LiteralType::Null => LiteralValue::Null,
        LiteralType::Void => LiteralValue::Undefined,
        LiteralType::Number(value) => LiteralValue::Number(*value),
        LiteralType::Boolean(value) => LiteralValue::Boolean(*value),
        LiteralType::String(value) => LiteralValue::String(value.clone()),
    }
}
