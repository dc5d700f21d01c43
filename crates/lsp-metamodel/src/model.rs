//! Definitions of the protocol schema.
//!
//! Field names follow the wire format (camelCase on the wire, snake_case
//! here). Top-level fields the model does not know are ignored, and missing
//! definition arrays decode as empty.

use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete protocol schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaModel {
    #[serde(default)]
    pub meta_data: MetaData,
    #[serde(default)]
    pub requests: Vec<Request>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub enumerations: Vec<Enumeration>,
    #[serde(default)]
    pub type_aliases: Vec<TypeAlias>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetaData {
    /// Protocol version, e.g. "3.17.0".
    #[serde(default)]
    pub version: String,
}

/// Which side of the connection sends a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageDirection {
    ClientToServer,
    ServerToClient,
    Both,
}

impl MessageDirection {
    /// Whether a server implements handlers for this message.
    pub fn to_server(self) -> bool {
        matches!(self, Self::ClientToServer | Self::Both)
    }

    /// Whether a client implements handlers for this message.
    pub fn to_client(self) -> bool {
        matches!(self, Self::ServerToClient | Self::Both)
    }
}

/// A request method (expects a response).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Method name, e.g. "textDocument/hover".
    pub method: String,
    #[serde(rename = "messageDirection")]
    pub direction: MessageDirection,
    #[serde(default)]
    pub params: Option<Type>,
    #[serde(default)]
    pub result: Option<Type>,
    #[serde(default)]
    pub partial_result: Option<Type>,
    #[serde(default)]
    pub error_data: Option<Type>,
    #[serde(default)]
    pub registration_method: Option<String>,
    #[serde(default)]
    pub registration_options: Option<Type>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// A notification method (no response).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub method: String,
    #[serde(rename = "messageDirection")]
    pub direction: MessageDirection,
    #[serde(default)]
    pub params: Option<Type>,
    #[serde(default)]
    pub registration_method: Option<String>,
    #[serde(default)]
    pub registration_options: Option<Type>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// A named record type.
///
/// `extends` and `mixins` name the structures whose properties are folded
/// into this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub extends: Vec<Type>,
    #[serde(default)]
    pub mixins: Vec<Type>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// A field of a structure or of an inline literal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// A named set of constants over a scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enumeration {
    pub name: String,
    /// Underlying scalar: `string`, `integer` or `uinteger`.
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub values: Vec<EnumerationEntry>,
    /// Whether values outside `values` are legal on the wire.
    #[serde(default)]
    pub supports_custom_values: bool,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationEntry {
    pub name: String,
    pub value: EnumValue,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// Literal value of an enumeration entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Integer(i64),
    String(String),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Integer(value) => write!(f, "{value}"),
            EnumValue::String(value) => f.write_str(value),
        }
    }
}

/// A named alias for another type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAlias {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
}

impl MetaModel {
    /// Number of named definitions (structures, enumerations and aliases).
    pub fn definition_count(&self) -> usize {
        self.structures.len() + self.enumerations.len() + self.type_aliases.len()
    }
}
