//! Type nodes of the schema's structural type algebra.

use crate::model::Property;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Wire names accepted in a type node's `kind` field.
pub const KINDS: &[&str] = &[
    "base",
    "reference",
    "array",
    "map",
    "literal",
    "stringLiteral",
    "or",
    "and",
    "tuple",
];

/// Scalar names used by `base` type nodes.
///
/// Names the schema may add later decode as [`BaseType::Unknown`] rather
/// than failing; only unrecognized node kinds are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    String,
    Integer,
    UInteger,
    Decimal,
    Boolean,
    Null,
    Uri,
    DocumentUri,
    RegExp,
    LspAny,
    LspObject,
    LspArray,
    Unknown(String),
}

impl BaseType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "uinteger" => Self::UInteger,
            "decimal" => Self::Decimal,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            "URI" => Self::Uri,
            "DocumentUri" => Self::DocumentUri,
            "RegExp" => Self::RegExp,
            "LSPAny" => Self::LspAny,
            "LSPObject" => Self::LspObject,
            "LSPArray" => Self::LspArray,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The name as it appears in the schema.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::UInteger => "uinteger",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Uri => "URI",
            Self::DocumentUri => "DocumentUri",
            Self::RegExp => "RegExp",
            Self::LspAny => "LSPAny",
            Self::LspObject => "LSPObject",
            Self::LspArray => "LSPArray",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node in the schema's type algebra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A scalar such as `string`, `uinteger` or `LSPAny`.
    Base(BaseType),
    /// A named structure, enumeration or alias.
    Reference(String),
    Array(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    /// An anonymous record given inline by its properties.
    Literal(Vec<Property>),
    StringLiteral(String),
    Or(Vec<Type>),
    And(Vec<Type>),
    Tuple(Vec<Type>),
}

impl Type {
    /// Wire name of this node's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Type::Base(_) => "base",
            Type::Reference(_) => "reference",
            Type::Array(_) => "array",
            Type::Map { .. } => "map",
            Type::Literal(_) => "literal",
            Type::StringLiteral(_) => "stringLiteral",
            Type::Or(_) => "or",
            Type::And(_) => "and",
            Type::Tuple(_) => "tuple",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Base(BaseType::Null))
    }

    /// For a two-item union with exactly one `null` item, the other item.
    ///
    /// Item order does not matter. Unions of any other arity are not
    /// optional, even when one of their items is `null`.
    pub fn optional_inner(&self) -> Option<&Type> {
        match self {
            Type::Or(items) if items.len() == 2 => match (items[0].is_null(), items[1].is_null()) {
                (true, false) => Some(&items[1]),
                (false, true) => Some(&items[0]),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional_inner().is_some()
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawType::deserialize(deserializer)?.into_type()
    }
}

/// First pass: the fields whose meaning does not depend on `kind`.
///
/// `value` is kept undecoded because it is a type for `map`, a property
/// list for `literal` and a string for `stringLiteral`.
#[derive(Deserialize)]
struct RawType {
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    element: Option<Box<Type>>,
    #[serde(default)]
    key: Option<Box<Type>>,
    #[serde(default)]
    items: Option<Vec<Type>>,
    #[serde(default)]
    value: Option<Value>,
}

#[derive(Deserialize)]
struct LiteralPayload {
    #[serde(default)]
    properties: Vec<Property>,
}

impl RawType {
    /// Second pass: select the payload schema by kind.
    fn into_type<E: de::Error>(self) -> Result<Type, E> {
        match self.kind.as_str() {
            "base" => Ok(Type::Base(BaseType::from_name(&required(self.name, "name")?))),
            "reference" => Ok(Type::Reference(required(self.name, "name")?)),
            "array" => Ok(Type::Array(required(self.element, "element")?)),
            "map" => {
                let key = required(self.key, "key")?;
                let value: Type = payload(self.value, "map value type")?;
                Ok(Type::Map {
                    key,
                    value: Box::new(value),
                })
            }
            "literal" => {
                let literal: LiteralPayload = payload(self.value, "literal properties")?;
                Ok(Type::Literal(literal.properties))
            }
            "stringLiteral" => Ok(Type::StringLiteral(payload(
                self.value,
                "string literal value",
            )?)),
            "or" => Ok(Type::Or(required(self.items, "items")?)),
            "and" => Ok(Type::And(required(self.items, "items")?)),
            "tuple" => Ok(Type::Tuple(required(self.items, "items")?)),
            other => Err(E::unknown_variant(other, KINDS)),
        }
    }
}

fn required<T, E: de::Error>(field: Option<T>, name: &'static str) -> Result<T, E> {
    field.ok_or_else(|| E::missing_field(name))
}

fn payload<T: DeserializeOwned, E: de::Error>(value: Option<Value>, what: &str) -> Result<T, E> {
    let value = required(value, "value")?;
    serde_json::from_value(value).map_err(|err| E::custom(format!("invalid {what}: {err}")))
}
