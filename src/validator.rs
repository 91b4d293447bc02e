//! Output tree: runtime validator expressions

use serde::{Deserialize, Serialize};

use crate::ast::{Comments, FieldKey, Identifier};

/// A runtime literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A validator expression, printable as JavaScript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidatorExpr {
    Identifier(String),
    Member {
        object: Box<ValidatorExpr>,
        property: String,
    },
    Call {
        callee: Box<ValidatorExpr>,
        arguments: Vec<ValidatorExpr>,
    },
    /// Field map literal, the body of a `propTypes` table or `shape({...})`
    Object(Vec<Field>),
    Array(Vec<ValidatorExpr>),
    Literal(LiteralValue),
}

impl ValidatorExpr {
    pub fn identifier(id: &Identifier) -> Self {
        ValidatorExpr::Identifier(id.name.clone())
    }

    /// `ns.name`, e.g. `PropTypes.bool`
    pub fn member(object: ValidatorExpr, property: impl Into<String>) -> Self {
        ValidatorExpr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn call(callee: ValidatorExpr, arguments: Vec<ValidatorExpr>) -> Self {
        ValidatorExpr::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn into_fields(self) -> Result<Vec<Field>, ValidatorExpr> {
        match self {
            ValidatorExpr::Object(fields) => Ok(fields),
            other => Err(other),
        }
    }
}

/// One `key: validator` entry of a field map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: FieldKey,
    pub value: ValidatorExpr,
    /// Printed as the `.isRequired` suffix
    pub required: bool,
    #[serde(default)]
    pub comments: Comments,
}

impl Field {
    pub fn new(key: FieldKey, value: ValidatorExpr, required: bool) -> Self {
        Self {
            key,
            value,
            required,
            comments: Comments::default(),
        }
    }
}

/// Result of converting one type node.
///
/// `Optional` tells the enclosing field not to force required-ness; only
/// nullable types and `HasDefaultProp` in field-value position produce it.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Required(ValidatorExpr),
    Optional(ValidatorExpr),
}

impl Conversion {
    pub fn is_optional(&self) -> bool {
        matches!(self, Conversion::Optional(_))
    }

    pub fn into_expr(self) -> ValidatorExpr {
        match self {
            Conversion::Required(expr) | Conversion::Optional(expr) => expr,
        }
    }
}
