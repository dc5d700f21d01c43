//! Type lowering: schema type nodes to target-representable descriptors.
//!
//! A [`TypeLowerer`] lives for one generation run. It owns the table of
//! synthesized composites, so a union that appears in many places is
//! registered once and every occurrence lowers to the same
//! [`TypeDescriptor::Composite`].
//!
//! Lowering never fails. Constructs a target cannot express degrade to the
//! profile's dynamic `Any` scalar.

use crate::ir::{CompositeDef, RecordField, TypeDescriptor, UnionDescriptor, Variant, WrapperDescriptor};
use crate::naming::ident_safe;
use crate::target::{BaseCategory, TargetProfile};
use lsp_metamodel::{ModelIndex, Property, Type};
use std::collections::BTreeMap;

/// Per-run switches for the lowerer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LowerOptions {
    /// Keep references to proposed definitions in unions and proposed
    /// properties in inline records.
    pub include_proposed: bool,
    /// Schema type name → target spelling used in its place.
    pub type_overrides: BTreeMap<String, String>,
}

pub struct TypeLowerer<'a> {
    index: &'a ModelIndex<'a>,
    profile: &'a TargetProfile,
    options: LowerOptions,
    composites: BTreeMap<String, CompositeDef>,
}

impl<'a> TypeLowerer<'a> {
    /// The profile's default overrides apply first; `options.type_overrides`
    /// take precedence over them.
    pub fn new(index: &'a ModelIndex<'a>, profile: &'a TargetProfile, mut options: LowerOptions) -> Self {
        let mut type_overrides = profile.default_overrides.clone();
        type_overrides.append(&mut options.type_overrides);
        options.type_overrides = type_overrides;
        Self {
            index,
            profile,
            options,
            composites: BTreeMap::new(),
        }
    }

    pub fn profile(&self) -> &TargetProfile {
        self.profile
    }

    /// Lower one type node.
    ///
    /// `T | null` is checked first, so a nullable reference is an
    /// [`TypeDescriptor::Optional`] and never a union.
    pub fn lower(&mut self, ty: &Type) -> TypeDescriptor {
        if let Some(inner) = ty.optional_inner() {
            return TypeDescriptor::Optional {
                inner: Box::new(self.lower(inner)),
            };
        }

        match ty {
            Type::Base(base) => self.scalar(BaseCategory::of(base)),
            Type::Reference(name) => self.reference(name),
            Type::Array(element) => TypeDescriptor::Array {
                element: Box::new(self.lower(element)),
            },
            Type::Map { key, value } => self.map(key, value),
            Type::Or(items) => self.union(items),
            Type::And(_) => self.scalar(BaseCategory::Any),
            Type::Tuple(_) => self.scalar(BaseCategory::Array),
            Type::Literal(properties) => self.literal(properties),
            Type::StringLiteral(_) => self.scalar(BaseCategory::String),
        }
    }

    /// Identifier-safe name of a type node, used to build composite names.
    pub fn ident_name(&self, ty: &Type) -> String {
        match ty {
            Type::Base(base) => self.profile.base.get(BaseCategory::of(base)).ident.clone(),
            Type::Reference(name) => match self.options.type_overrides.get(name) {
                Some(spelling) => ident_safe(spelling),
                None => self.profile.naming.type_name(name),
            },
            Type::Array(element) => format!("Arr{}", self.ident_name(element)),
            Type::Map { key, value } => {
                format!("Map{}{}", self.ident_name(key), self.ident_name(value))
            }
            Type::Literal(_) => "Literal".to_string(),
            Type::Or(_) => "Union".to_string(),
            Type::And(_) => "Intersection".to_string(),
            Type::Tuple(_) => "Tuple".to_string(),
            Type::StringLiteral(_) => self.profile.base.string.ident.clone(),
        }
    }

    /// Composites registered so far, keyed and ordered by name.
    pub fn registered_composites(&self) -> &BTreeMap<String, CompositeDef> {
        &self.composites
    }

    /// Consume the lowerer, returning its composites sorted by name.
    pub fn into_composites(self) -> Vec<CompositeDef> {
        self.composites.into_values().collect()
    }

    fn scalar(&self, category: BaseCategory) -> TypeDescriptor {
        TypeDescriptor::Scalar {
            category,
            spelling: self.profile.base.get(category).spelling.clone(),
        }
    }

    fn reference(&self, name: &str) -> TypeDescriptor {
        if let Some(spelling) = self.options.type_overrides.get(name) {
            return TypeDescriptor::Mapped {
                spelling: spelling.clone(),
            };
        }
        TypeDescriptor::Named {
            schema_name: name.to_string(),
            ident: self.profile.naming.type_name(name),
        }
    }

    fn map(&mut self, key: &Type, value: &Type) -> TypeDescriptor {
        let key = Box::new(self.lower(key));
        let value = match value {
            Type::Array(element) if self.profile.capabilities.forbids_array_map_values => {
                let profile = self.profile;
                let name = profile.naming.wrapper_name(&self.ident_name(element));
                self.wrap(name, profile.naming.wrapper_field.clone(), value)
            }
            _ => self.lower(value),
        };
        TypeDescriptor::Map { key, value: Box::new(value) }
    }

    /// Target of one union variant.
    ///
    /// Where a union cannot hold collections directly, array and map
    /// variants are boxed in `ArrayOf_*` / `MapOf_*` wrappers.
    fn variant(&mut self, item: &Type) -> TypeDescriptor {
        if !self.profile.capabilities.forbids_collection_variants {
            return self.lower(item);
        }
        let profile = self.profile;
        let naming = &profile.naming;
        match item {
            Type::Array(element) => {
                let name = naming.array_wrapper_name(&self.ident_name(element));
                self.wrap(name, naming.wrapper_field.clone(), item)
            }
            Type::Map { key, value } => {
                let name = naming.map_wrapper_name(&self.ident_name(key), &self.ident_name(value));
                self.wrap(name, naming.map_wrapper_field.clone(), item)
            }
            _ => self.lower(item),
        }
    }

    /// Register `name` as a single-field wrapper around `ty` unless it
    /// already exists.
    fn wrap(&mut self, name: String, field: String, ty: &Type) -> TypeDescriptor {
        if !self.composites.contains_key(&name) {
            let inner = self.lower(ty);
            tracing::trace!(name = %name, "registered collection wrapper");
            self.composites.insert(
                name.clone(),
                CompositeDef::Wrapper(WrapperDescriptor {
                    name: name.clone(),
                    field,
                    inner,
                }),
            );
        }
        TypeDescriptor::Composite { name }
    }

    fn union(&mut self, items: &[Type]) -> TypeDescriptor {
        let kept: Vec<&Type> = items
            .iter()
            .filter(|item| !item.is_null() && !self.is_excluded_reference(item))
            .collect();

        let mut pairs: Vec<(String, &Type)> = match kept.as_slice() {
            [] => return self.scalar(BaseCategory::Any),
            [only] => return self.lower(only),
            _ => kept.iter().map(|item| (self.ident_name(item), *item)).collect(),
        };

        // Stable sort: among equal identifiers the first in schema order wins.
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|a, b| a.0 == b.0);

        if let [(_, only)] = pairs.as_slice() {
            return self.lower(only);
        }

        let name = self
            .profile
            .naming
            .union_name(pairs.iter().map(|(ident, _)| ident.as_str()));

        if !self.composites.contains_key(&name) {
            let variants = pairs
                .iter()
                .map(|(ident, item)| Variant {
                    ident_name: ident.clone(),
                    target: self.variant(item),
                })
                .collect();
            tracing::trace!(name = %name, variants = pairs.len(), "registered union");
            self.composites.insert(
                name.clone(),
                CompositeDef::Union(UnionDescriptor {
                    name: name.clone(),
                    variants,
                }),
            );
        }
        TypeDescriptor::Composite { name }
    }

    fn literal(&mut self, properties: &[Property]) -> TypeDescriptor {
        if !self.profile.capabilities.inline_records {
            return self.scalar(BaseCategory::Any);
        }
        let include_proposed = self.options.include_proposed;
        let fields = properties
            .iter()
            .filter(|p| include_proposed || !p.proposed)
            .map(|p| RecordField {
                name: p.name.clone(),
                ty: self.lower(&p.ty),
                optional: p.optional,
            })
            .collect();
        TypeDescriptor::Record { fields }
    }

    fn is_excluded_reference(&self, ty: &Type) -> bool {
        match ty {
            Type::Reference(name) => !self.options.include_proposed && self.index.is_proposed(name),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target;
    use lsp_metamodel::{BaseType, MetaModel};

    fn model() -> MetaModel {
        lsp_metamodel::parse_str(
            r#"{
            "structures": [
                { "name": "Location", "properties": [] },
                { "name": "LocationLink", "properties": [] },
                { "name": "InlineCompletionItem", "properties": [], "proposed": true }
            ],
            "enumerations": [],
            "typeAliases": []
        }"#,
        )
        .unwrap()
    }

    fn base(name: &str) -> Type {
        Type::Base(BaseType::from_name(name))
    }

    fn reference(name: &str) -> Type {
        Type::Reference(name.to_string())
    }

    fn array(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    #[test]
    fn test_optional_before_union() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Or(vec![base("null"), reference("Location")]);
        let lowered = lowerer.lower(&ty);

        assert_eq!(
            lowered,
            TypeDescriptor::Optional {
                inner: Box::new(TypeDescriptor::Named {
                    schema_name: "Location".into(),
                    ident: "Location".into(),
                })
            }
        );
        assert!(lowerer.registered_composites().is_empty());
    }

    #[test]
    fn test_three_item_union_with_null_is_a_composite() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Or(vec![base("string"), base("null"), base("integer")]);
        let lowered = lowerer.lower(&ty);

        assert_eq!(lowered.composite_name(), Some("Or_int32_string"));
        assert!(!lowered.is_optional());
    }

    #[test]
    fn test_union_name_ignores_item_order() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let forward = Type::Or(vec![reference("Location"), array(reference("Location"))]);
        let backward = Type::Or(vec![array(reference("Location")), reference("Location")]);

        let a = lowerer.lower(&forward);
        let b = lowerer.lower(&backward);

        assert_eq!(a, b);
        assert_eq!(a.composite_name(), Some("Or_ArrLocation_Location"));
        assert_eq!(lowerer.registered_composites().len(), 1);
    }

    #[test]
    fn test_union_variants_are_sorted_and_deduplicated() {
        let model = model();
        let index = model.index();
        let profile = target::kotlin();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        // URI and string share the String identifier.
        let ty = Type::Or(vec![base("URI"), reference("LocationLink"), base("string")]);
        let name = lowerer.lower(&ty).composite_name().unwrap().to_string();
        assert_eq!(name, "Or_LocationLink_String");

        let composites = lowerer.into_composites();
        let CompositeDef::Union(union) = &composites[0] else {
            panic!("expected a union");
        };
        let idents: Vec<&str> = union.variants.iter().map(|v| v.ident_name.as_str()).collect();
        assert_eq!(idents, ["LocationLink", "String"]);
    }

    #[test]
    fn test_union_collapsing_to_one_identifier_is_not_a_composite() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Or(vec![base("string"), base("DocumentUri")]);
        assert_eq!(
            lowerer.lower(&ty),
            TypeDescriptor::Scalar {
                category: BaseCategory::String,
                spelling: "string".into()
            }
        );
        assert!(lowerer.registered_composites().is_empty());
    }

    #[test]
    fn test_union_of_only_nulls_degrades_to_any() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Or(vec![base("null"), base("null")]);
        assert_eq!(
            lowerer.lower(&ty),
            TypeDescriptor::Scalar {
                category: BaseCategory::Any,
                spelling: "any".into()
            }
        );
    }

    #[test]
    fn test_proposed_variant_dropped_unless_included() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let ty = Type::Or(vec![reference("InlineCompletionItem"), reference("Location")]);

        let mut excluding = TypeLowerer::new(&index, &profile, LowerOptions::default());
        assert_eq!(
            excluding.lower(&ty),
            TypeDescriptor::Named {
                schema_name: "Location".into(),
                ident: "Location".into()
            }
        );

        let options = LowerOptions {
            include_proposed: true,
            ..LowerOptions::default()
        };
        let mut including = TypeLowerer::new(&index, &profile, options);
        assert_eq!(
            including.lower(&ty).composite_name(),
            Some("Or_InlineCompletionItem_Location")
        );
    }

    #[test]
    fn test_proto_wraps_array_map_values() {
        let model = model();
        let index = model.index();
        let profile = target::proto();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Map {
            key: Box::new(base("DocumentUri")),
            value: Box::new(array(reference("Location"))),
        };
        let lowered = lowerer.lower(&ty);
        let TypeDescriptor::Map { value, .. } = &lowered else {
            panic!("expected a map, got {lowered:?}");
        };
        assert_eq!(value.composite_name(), Some("MapArray_Location"));

        lowerer.lower(&ty);
        let composites = lowerer.into_composites();
        assert_eq!(composites.len(), 1);
        let CompositeDef::Wrapper(wrapper) = &composites[0] else {
            panic!("expected a wrapper");
        };
        assert_eq!(wrapper.field, "items");
        assert!(matches!(wrapper.inner, TypeDescriptor::Array { .. }));
    }

    #[test]
    fn test_proto_boxes_collection_variants() {
        let model = model();
        let index = model.index();
        let profile = target::proto();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let map = Type::Map {
            key: Box::new(base("string")),
            value: Box::new(reference("LocationLink")),
        };
        let ty = Type::Or(vec![reference("Location"), array(reference("Location")), map]);
        assert_eq!(
            lowerer.lower(&ty).composite_name(),
            Some("Or_ArrLocation_Location_MapstringLocationLink")
        );

        let composites = lowerer.registered_composites();
        let Some(CompositeDef::Union(union)) = composites.get("Or_ArrLocation_Location_MapstringLocationLink") else {
            panic!("expected a union, got {composites:?}");
        };
        let targets: Vec<Option<&str>> = union.variants.iter().map(|v| v.target.composite_name()).collect();
        assert_eq!(targets, [Some("ArrayOf_Location"), None, Some("MapOf_string_LocationLink")]);

        let Some(CompositeDef::Wrapper(array)) = composites.get("ArrayOf_Location") else {
            panic!("expected an array wrapper");
        };
        assert_eq!(array.field, "items");
        assert!(matches!(array.inner, TypeDescriptor::Array { .. }));

        let Some(CompositeDef::Wrapper(map)) = composites.get("MapOf_string_LocationLink") else {
            panic!("expected a map wrapper");
        };
        assert_eq!(map.field, "pairs");
        assert!(matches!(map.inner, TypeDescriptor::Map { .. }));
    }

    #[test]
    fn test_go_keeps_collection_variants() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Or(vec![reference("Location"), array(reference("Location"))]);
        lowerer.lower(&ty);

        let composites = lowerer.into_composites();
        assert_eq!(composites.len(), 1);
        let CompositeDef::Union(union) = &composites[0] else {
            panic!("expected a union");
        };
        assert!(matches!(union.variants[0].target, TypeDescriptor::Array { .. }));
    }

    #[test]
    fn test_go_keeps_array_map_values() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let ty = Type::Map {
            key: Box::new(base("string")),
            value: Box::new(array(base("string"))),
        };
        let TypeDescriptor::Map { value, .. } = lowerer.lower(&ty) else {
            panic!("expected a map");
        };
        assert!(matches!(*value, TypeDescriptor::Array { .. }));
    }

    #[test]
    fn test_ident_names() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let map = Type::Map {
            key: Box::new(base("string")),
            value: Box::new(array(reference("Location"))),
        };
        assert_eq!(lowerer.ident_name(&map), "MapstringArrLocation");
        assert_eq!(lowerer.ident_name(&Type::Literal(vec![])), "Literal");
        assert_eq!(lowerer.ident_name(&Type::Tuple(vec![])), "Tuple");
        assert_eq!(lowerer.ident_name(&Type::StringLiteral("x".into())), "string");
        assert_eq!(lowerer.ident_name(&reference("_Private")), "XPrivate");
    }

    #[test]
    fn test_unrepresentable_kinds_degrade() {
        let model = model();
        let index = model.index();
        let profile = target::kotlin();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let and = Type::And(vec![reference("Location"), reference("LocationLink")]);
        let tuple = Type::Tuple(vec![base("uinteger"), base("uinteger")]);
        let literal = Type::Literal(vec![]);

        assert!(matches!(
            lowerer.lower(&and),
            TypeDescriptor::Scalar { category: BaseCategory::Any, .. }
        ));
        assert!(matches!(
            lowerer.lower(&tuple),
            TypeDescriptor::Scalar { category: BaseCategory::Array, .. }
        ));
        assert!(matches!(
            lowerer.lower(&literal),
            TypeDescriptor::Scalar { category: BaseCategory::Any, .. }
        ));
    }

    #[test]
    fn test_inline_record_where_supported() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        let literal: Type = serde_json::from_str(
            r#"{ "kind": "literal", "value": { "properties": [
                { "name": "language", "type": { "kind": "base", "name": "string" } },
                { "name": "draft", "type": { "kind": "base", "name": "boolean" }, "proposed": true }
            ]}}"#,
        )
        .unwrap();

        let TypeDescriptor::Record { fields } = lowerer.lower(&literal) else {
            panic!("expected a record");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "language");
    }

    #[test]
    fn test_type_override() {
        let model = model();
        let index = model.index();
        let profile = target::go();
        let options = LowerOptions {
            type_overrides: [("Location".to_string(), "protocol.Location".to_string())].into(),
            ..LowerOptions::default()
        };
        let mut lowerer = TypeLowerer::new(&index, &profile, options);

        assert_eq!(
            lowerer.lower(&reference("Location")),
            TypeDescriptor::Mapped {
                spelling: "protocol.Location".into()
            }
        );
        let union = Type::Or(vec![reference("Location"), base("string")]);
        assert_eq!(
            lowerer.lower(&union).composite_name(),
            Some("Or_protocol_Location_string")
        );
    }

    #[test]
    fn test_proto_default_overrides() {
        let model = model();
        let index = model.index();
        let profile = target::proto();
        let mut lowerer = TypeLowerer::new(&index, &profile, LowerOptions::default());

        assert_eq!(
            lowerer.lower(&reference("LSPAny")),
            TypeDescriptor::Mapped {
                spelling: "google.protobuf.Value".into()
            }
        );

        let options = LowerOptions {
            type_overrides: [("LSPAny".to_string(), "bytes".to_string())].into(),
            ..LowerOptions::default()
        };
        let mut configured = TypeLowerer::new(&index, &profile, options);
        assert_eq!(
            configured.lower(&reference("LSPAny")),
            TypeDescriptor::Mapped {
                spelling: "bytes".into()
            }
        );
        assert_eq!(
            configured.lower(&reference("LSPObject")),
            TypeDescriptor::Mapped {
                spelling: "google.protobuf.Struct".into()
            }
        );
    }
}
