//! Decoding a schema document.

use crate::model::MetaModel;
use std::str::FromStr;

/// The document could not be decoded into a [`MetaModel`].
///
/// Any parse failure is fatal for a generation run; there is no
/// partial-schema mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid metamodel at {path}: {message}")]
pub struct ParseError {
    /// JSON path of the value that failed to decode ("." for the document).
    pub path: String,
    pub message: String,
}

/// Parse a `metaModel.json` document.
pub fn parse(bytes: &[u8]) -> Result<MetaModel, ParseError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    let model: MetaModel = serde_path_to_error::deserialize(&mut *de).map_err(|err| ParseError {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })?;
    de.end().map_err(|err| ParseError {
        path: ".".to_string(),
        message: err.to_string(),
    })?;
    Ok(model)
}

pub fn parse_str(source: &str) -> Result<MetaModel, ParseError> {
    parse(source.as_bytes())
}

impl FromStr for MetaModel {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumValue, MessageDirection};
    use crate::types::{BaseType, Type};

    const DOCUMENT: &str = r#"{
        "metaData": { "version": "3.17.0" },
        "requests": [{
            "method": "textDocument/hover",
            "messageDirection": "clientToServer",
            "params": { "kind": "reference", "name": "HoverParams" },
            "result": { "kind": "or", "items": [
                { "kind": "reference", "name": "Hover" },
                { "kind": "base", "name": "null" }
            ]}
        }],
        "notifications": [{
            "method": "$/cancelRequest",
            "messageDirection": "both",
            "params": { "kind": "reference", "name": "CancelParams" }
        }],
        "structures": [{
            "name": "Position",
            "properties": [
                { "name": "line", "type": { "kind": "base", "name": "uinteger" } },
                { "name": "character", "type": { "kind": "base", "name": "uinteger" } }
            ],
            "documentation": "Position in a text document."
        }],
        "enumerations": [{
            "name": "DiagnosticSeverity",
            "type": { "kind": "base", "name": "uinteger" },
            "values": [
                { "name": "Error", "value": 1 },
                { "name": "Warning", "value": 2 }
            ]
        }, {
            "name": "MarkupKind",
            "type": { "kind": "base", "name": "string" },
            "values": [{ "name": "PlainText", "value": "plaintext" }],
            "supportsCustomValues": true
        }],
        "typeAliases": [{
            "name": "DocumentUri",
            "type": { "kind": "base", "name": "string" }
        }],
        "somethingNew": { "ignored": true }
    }"#;

    #[test]
    fn test_parses_every_section() {
        let model = parse_str(DOCUMENT).unwrap();

        assert_eq!(model.meta_data.version, "3.17.0");
        assert_eq!(model.requests.len(), 1);
        assert_eq!(model.requests[0].direction, MessageDirection::ClientToServer);
        assert!(model.requests[0].result.as_ref().unwrap().is_optional());
        assert_eq!(model.notifications[0].direction, MessageDirection::Both);
        assert_eq!(model.structures[0].properties.len(), 2);
        assert_eq!(
            model.structures[0].properties[0].ty,
            Type::Base(BaseType::UInteger)
        );
        assert_eq!(model.enumerations[0].values[0].value, EnumValue::Integer(1));
        assert_eq!(
            model.enumerations[1].values[0].value,
            EnumValue::String("plaintext".into())
        );
        assert!(model.enumerations[1].supports_custom_values);
        assert_eq!(model.type_aliases[0].name, "DocumentUri");
        assert_eq!(model.definition_count(), 4);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let model: MetaModel = r#"{ "metaData": { "version": "3.18.0" } }"#.parse().unwrap();
        assert!(model.structures.is_empty());
        assert!(model.requests.is_empty());
    }

    #[test]
    fn test_unknown_kind_reports_its_path() {
        let err = parse_str(
            r#"{ "structures": [{
                "name": "Broken",
                "properties": [{ "name": "x", "type": { "kind": "integerLiteral", "value": 3 } }]
            }]}"#,
        )
        .unwrap_err();

        assert_eq!(err.path, "structures[0].properties[0].type");
        assert!(err.message.contains("integerLiteral"), "{err}");
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        assert!(parse_str("{ \"structures\": [ }").is_err());
        assert!(parse_str("\"metaModel\"").is_err());
    }

    #[test]
    fn test_trailing_content_is_rejected() {
        let err = parse_str(r#"{ "structures": [] } {"#).unwrap_err();
        assert_eq!(err.path, ".");
    }
}
