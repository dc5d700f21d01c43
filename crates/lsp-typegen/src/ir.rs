//! Lowered model: what renderers consume.
//!
//! Everything here is target-representable. Optionality is explicit, unions
//! are named composites, and names are already identifiers. A renderer only
//! decides how to print.

use crate::target::BaseCategory;
use lsp_metamodel::{EnumValue, MessageDirection};
use serde::Serialize;

/// A lowered type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDescriptor {
    Scalar {
        category: BaseCategory,
        spelling: String,
    },
    /// A structure, enumeration or alias from the schema.
    Named { schema_name: String, ident: String },
    Array { element: Box<TypeDescriptor> },
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// `T | null`.
    Optional { inner: Box<TypeDescriptor> },
    /// A synthesized union or wrapper, see [`CompositeDef`].
    Composite { name: String },
    /// A named type replaced by a configured spelling.
    Mapped { spelling: String },
    /// An anonymous record, for targets that can express one inline.
    Record { fields: Vec<RecordField> },
}

impl TypeDescriptor {
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::Optional { .. })
    }

    /// Name of the composite this descriptor points at, if any.
    pub fn composite_name(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Composite { name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub optional: bool,
}

/// A type synthesized during lowering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CompositeDef {
    Union(UnionDescriptor),
    Wrapper(WrapperDescriptor),
}

impl CompositeDef {
    pub fn name(&self) -> &str {
        match self {
            CompositeDef::Union(u) => &u.name,
            CompositeDef::Wrapper(w) => &w.name,
        }
    }
}

/// A tagged union over variants sorted by identifier name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionDescriptor {
    pub name: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// Identifier-safe name, also the discriminator in the union name.
    pub ident_name: String,
    pub target: TypeDescriptor,
}

/// A single-field message boxing a collection the target cannot nest
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrapperDescriptor {
    pub name: String,
    pub field: String,
    pub inner: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredModel {
    /// Protocol version from the schema's `metaData`.
    pub version: String,
    /// Name of the target profile used for lowering.
    pub target: String,
    pub structures: Vec<LoweredStructure>,
    pub enumerations: Vec<LoweredEnumeration>,
    pub aliases: Vec<LoweredAlias>,
    pub methods: Vec<LoweredMethod>,
    /// Synthesized types, sorted by name.
    pub composites: Vec<CompositeDef>,
}

impl LoweredModel {
    pub fn composite(&self, name: &str) -> Option<&CompositeDef> {
        self.composites.iter().find(|c| c.name() == name)
    }

    pub fn structure(&self, schema_name: &str) -> Option<&LoweredStructure> {
        self.structures.iter().find(|s| s.schema_name == schema_name)
    }

    pub fn alias(&self, schema_name: &str) -> Option<&LoweredAlias> {
        self.aliases.iter().find(|a| a.schema_name == schema_name)
    }

    pub fn enumeration(&self, schema_name: &str) -> Option<&LoweredEnumeration> {
        self.enumerations.iter().find(|e| e.schema_name == schema_name)
    }

    /// Schema names of every kept definition, in emission order.
    pub fn definition_names(&self) -> Vec<&str> {
        self.structures
            .iter()
            .map(|s| s.schema_name.as_str())
            .chain(self.enumerations.iter().map(|e| e.schema_name.as_str()))
            .chain(self.aliases.iter().map(|a| a.schema_name.as_str()))
            .collect()
    }
}

/// A structure with inherited and mixed-in properties folded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredStructure {
    pub schema_name: String,
    pub ident: String,
    pub properties: Vec<LoweredProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl LoweredStructure {
    pub fn property(&self, name: &str) -> Option<&LoweredProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredProperty {
    /// Wire name.
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// The property may be absent (distinct from a nullable type).
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredEnumeration {
    pub schema_name: String,
    pub ident: String,
    pub category: BaseCategory,
    pub spelling: String,
    pub values: Vec<LoweredEnumValue>,
    pub supports_custom_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredEnumValue {
    pub name: String,
    pub ident: String,
    pub value: EnumValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredAlias {
    pub schema_name: String,
    pub ident: String,
    pub target: TypeDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Request,
    Notification,
}

/// A typed handler signature for one protocol method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredMethod {
    pub method: String,
    pub ident: String,
    pub kind: MethodKind,
    pub direction: MessageDirection,
    /// Belongs on the server interface.
    pub server: bool,
    /// Belongs on the client interface.
    pub client: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<TypeDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TypeDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_result: Option<TypeDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}
