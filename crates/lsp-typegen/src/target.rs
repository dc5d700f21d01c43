//! Target profiles: what a target language can express and how it spells it.
//!
//! The lowering engine is shared across targets. A [`TargetProfile`]
//! supplies the scalar spellings, the naming rules for synthesized
//! composites, and the capability flags that change lowering decisions.

use crate::naming::{export_name, ident_safe, strip_meta};
use lsp_metamodel::BaseType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Target-independent classification of a schema base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseCategory {
    /// `string`, `URI`, `DocumentUri` and `RegExp`.
    String,
    Integer,
    UInteger,
    Decimal,
    Boolean,
    Null,
    /// `LSPAny`, and anything the target cannot represent more precisely.
    Any,
    /// `LSPObject`.
    Object,
    /// `LSPArray`.
    Array,
}

impl BaseCategory {
    /// Unknown base names degrade to [`BaseCategory::Any`].
    pub fn of(base: &BaseType) -> Self {
        match base {
            BaseType::String | BaseType::Uri | BaseType::DocumentUri | BaseType::RegExp => {
                Self::String
            }
            BaseType::Integer => Self::Integer,
            BaseType::UInteger => Self::UInteger,
            BaseType::Decimal => Self::Decimal,
            BaseType::Boolean => Self::Boolean,
            BaseType::Null => Self::Null,
            BaseType::LspAny | BaseType::Unknown(_) => Self::Any,
            BaseType::LspObject => Self::Object,
            BaseType::LspArray => Self::Array,
        }
    }
}

/// How a target writes one scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scalar {
    /// Spelling in type position, e.g. `Map<String, Any?>`.
    pub spelling: String,
    /// Spelling inside synthesized identifiers, e.g. `MapStringAny`.
    pub ident: String,
}

impl Scalar {
    pub fn new(spelling: &str) -> Self {
        Self {
            spelling: spelling.to_string(),
            ident: ident_safe(spelling),
        }
    }
}

/// Per-category scalar spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTypeTable {
    pub string: Scalar,
    pub integer: Scalar,
    pub uinteger: Scalar,
    pub decimal: Scalar,
    pub boolean: Scalar,
    pub null: Scalar,
    pub any: Scalar,
    pub object: Scalar,
    pub array: Scalar,
}

impl BaseTypeTable {
    pub fn get(&self, category: BaseCategory) -> &Scalar {
        match category {
            BaseCategory::String => &self.string,
            BaseCategory::Integer => &self.integer,
            BaseCategory::UInteger => &self.uinteger,
            BaseCategory::Decimal => &self.decimal,
            BaseCategory::Boolean => &self.boolean,
            BaseCategory::Null => &self.null,
            BaseCategory::Any => &self.any,
            BaseCategory::Object => &self.object,
            BaseCategory::Array => &self.array,
        }
    }

    fn get_mut(&mut self, category: BaseCategory) -> &mut Scalar {
        match category {
            BaseCategory::String => &mut self.string,
            BaseCategory::Integer => &mut self.integer,
            BaseCategory::UInteger => &mut self.uinteger,
            BaseCategory::Decimal => &mut self.decimal,
            BaseCategory::Boolean => &mut self.boolean,
            BaseCategory::Null => &mut self.null,
            BaseCategory::Any => &mut self.any,
            BaseCategory::Object => &mut self.object,
            BaseCategory::Array => &mut self.array,
        }
    }

    /// Override the identifier spelling of one category.
    pub fn with_ident(mut self, category: BaseCategory, ident: &str) -> Self {
        self.get_mut(category).ident = ident.to_string();
        self
    }
}

/// Naming rules for type references and synthesized composites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    /// Prefix of synthesized union names (`Or_`).
    pub union_prefix: String,
    /// Separator between variant identifiers in a union name.
    pub separator: String,
    /// Prefix of wrappers for array map values (`MapArray_`).
    pub wrapper_prefix: String,
    /// Prefix of wrappers for array union variants (`ArrayOf_`).
    pub array_wrapper_prefix: String,
    /// Prefix of wrappers for map union variants (`MapOf_`).
    pub map_wrapper_prefix: String,
    /// Field holding a wrapped array.
    pub wrapper_field: String,
    /// Field holding a wrapped map.
    pub map_wrapper_field: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            union_prefix: "Or_".to_string(),
            separator: "_".to_string(),
            wrapper_prefix: "MapArray_".to_string(),
            array_wrapper_prefix: "ArrayOf_".to_string(),
            map_wrapper_prefix: "MapOf_".to_string(),
            wrapper_field: "items".to_string(),
            map_wrapper_field: "pairs".to_string(),
        }
    }
}

impl NamingConvention {
    /// Target identifier for a named schema type.
    pub fn type_name(&self, schema_name: &str) -> String {
        export_name(strip_meta(schema_name))
    }

    /// Union name from variant identifiers, which must already be sorted.
    pub fn union_name<'a>(&self, idents: impl IntoIterator<Item = &'a str>) -> String {
        let idents: Vec<&str> = idents.into_iter().collect();
        format!("{}{}", self.union_prefix, idents.join(&self.separator))
    }

    pub fn wrapper_name(&self, element_ident: &str) -> String {
        format!("{}{}", self.wrapper_prefix, element_ident)
    }

    pub fn array_wrapper_name(&self, element_ident: &str) -> String {
        format!("{}{}", self.array_wrapper_prefix, element_ident)
    }

    pub fn map_wrapper_name(&self, key_ident: &str, value_ident: &str) -> String {
        format!(
            "{}{}{}{}",
            self.map_wrapper_prefix, key_ident, self.separator, value_ident
        )
    }
}

/// Features that change how types are lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Map values cannot be arrays (`map<K, repeated V>` in protobuf);
    /// such values are boxed in a wrapper composite.
    pub forbids_array_map_values: bool,
    /// Union variants cannot be arrays or maps (`oneof` in protobuf);
    /// such variants are boxed in wrapper composites.
    pub forbids_collection_variants: bool,
    /// Anonymous inline records are expressible.
    pub inline_records: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProfile {
    pub name: String,
    pub base: BaseTypeTable,
    pub naming: NamingConvention,
    pub capabilities: Capabilities,
    /// Schema type name → target spelling, applied before configured
    /// overrides.
    pub default_overrides: BTreeMap<String, String>,
}

/// Names accepted by [`profile`].
pub const PROFILE_NAMES: &[&str] = &["go", "groovy", "kotlin", "proto"];

/// Look up a built-in profile by name.
pub fn profile(name: &str) -> Option<TargetProfile> {
    match name {
        "go" => Some(go()),
        "kotlin" => Some(kotlin()),
        "groovy" => Some(groovy()),
        "proto" => Some(proto()),
        _ => None,
    }
}

pub fn go() -> TargetProfile {
    TargetProfile {
        name: "go".to_string(),
        base: BaseTypeTable {
            string: Scalar::new("string"),
            integer: Scalar::new("int32"),
            uinteger: Scalar::new("uint32"),
            decimal: Scalar::new("float64"),
            boolean: Scalar::new("bool"),
            null: Scalar::new("any"),
            any: Scalar::new("any"),
            object: Scalar::new("map[string]any"),
            array: Scalar::new("[]any"),
        },
        naming: NamingConvention::default(),
        capabilities: Capabilities {
            inline_records: true,
            ..Capabilities::default()
        },
        default_overrides: BTreeMap::new(),
    }
}

pub fn kotlin() -> TargetProfile {
    TargetProfile {
        name: "kotlin".to_string(),
        base: BaseTypeTable {
            string: Scalar::new("String"),
            integer: Scalar::new("Int"),
            uinteger: Scalar::new("UInt"),
            decimal: Scalar::new("Double"),
            boolean: Scalar::new("Boolean"),
            null: Scalar::new("Nothing?"),
            any: Scalar::new("Any?"),
            object: Scalar::new("Map<String, Any?>"),
            array: Scalar::new("List<Any?>"),
        },
        naming: NamingConvention::default(),
        capabilities: Capabilities::default(),
        default_overrides: BTreeMap::new(),
    }
}

pub fn groovy() -> TargetProfile {
    let base = BaseTypeTable {
        string: Scalar::new("String"),
        integer: Scalar::new("int"),
        uinteger: Scalar::new("int"),
        decimal: Scalar::new("double"),
        boolean: Scalar::new("boolean"),
        null: Scalar::new("Void"),
        any: Scalar::new("Object"),
        object: Scalar::new("Map<String, Object>"),
        array: Scalar::new("List<Object>"),
    }
    // Primitive spellings are boxed inside identifiers.
    .with_ident(BaseCategory::Integer, "Integer")
    .with_ident(BaseCategory::UInteger, "Integer")
    .with_ident(BaseCategory::Decimal, "Double")
    .with_ident(BaseCategory::Boolean, "Boolean");

    TargetProfile {
        name: "groovy".to_string(),
        base,
        naming: NamingConvention::default(),
        capabilities: Capabilities::default(),
        default_overrides: BTreeMap::new(),
    }
}

/// Aliases protobuf has no faithful message for.
const PROTO_DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    ("DocumentUri", "string"),
    ("URI", "string"),
    ("ChangeAnnotationIdentifier", "string"),
    ("Pattern", "string"),
    ("GlobPattern", "string"),
    ("RegularExpressionEngineKind", "string"),
    ("ProgressToken", "string"),
    ("DocumentSelector", "string"),
    ("LSPAny", "google.protobuf.Value"),
    ("LSPObject", "google.protobuf.Struct"),
    ("LSPArray", "google.protobuf.ListValue"),
];

pub fn proto() -> TargetProfile {
    TargetProfile {
        name: "proto".to_string(),
        base: BaseTypeTable {
            string: Scalar::new("string"),
            integer: Scalar::new("int32"),
            uinteger: Scalar::new("uint32"),
            decimal: Scalar::new("double"),
            boolean: Scalar::new("bool"),
            null: Scalar::new("google.protobuf.NullValue"),
            any: Scalar::new("google.protobuf.Value"),
            object: Scalar::new("google.protobuf.Struct"),
            array: Scalar::new("google.protobuf.ListValue"),
        },
        naming: NamingConvention::default(),
        capabilities: Capabilities {
            forbids_array_map_values: true,
            forbids_collection_variants: true,
            inline_records: false,
        },
        default_overrides: PROTO_DEFAULT_OVERRIDES
            .iter()
            .map(|(name, spelling)| (name.to_string(), spelling.to_string()))
            .collect(),
    }
}
