//! Typed model of the LSP `metaModel.json` protocol schema.
//!
//! `lsp-metamodel` parses the published protocol schema (requests,
//! notifications, structures, enumerations and type aliases) into plain Rust
//! data. The model is read-only once parsed; everything downstream
//! (dependency resolution, type lowering, rendering) borrows it.
//!
//! # Type nodes
//!
//! The schema describes every field with a small structural type algebra.
//! On the wire a node is an object tagged by `kind`, and the `value` field
//! means something different per kind (a map's value type, a literal's
//! property list, a string literal's constant). [`Type`] is the decoded sum
//! type; decoding is done in two passes so the kind is known before the
//! payload is interpreted.
//!
//! # Example
//!
//! ```
//! use lsp_metamodel::Type;
//!
//! let model = lsp_metamodel::parse(br#"{
//!     "metaData": { "version": "3.17.0" },
//!     "structures": [{
//!         "name": "Position",
//!         "properties": [
//!             { "name": "line", "type": { "kind": "base", "name": "uinteger" } }
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(model.meta_data.version, "3.17.0");
//! let index = model.index();
//! assert!(index.structure("Position").is_some());
//! assert!(matches!(model.structures[0].properties[0].ty, Type::Base(_)));
//! ```

pub mod index;
pub mod model;
pub mod parse;
pub mod types;

pub use index::{Definition, ModelIndex};
pub use model::{
    EnumValue, Enumeration, EnumerationEntry, MessageDirection, MetaData, MetaModel, Notification,
    Property, Request, Structure, TypeAlias,
};
pub use parse::{ParseError, parse, parse_str};
pub use types::{BaseType, KINDS, Type};
