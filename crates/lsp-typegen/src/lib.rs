//! Type lowering for LSP code generators.
//!
//! `lsp-typegen` turns the protocol schema parsed by [`lsp_metamodel`] into a
//! [`LoweredModel`](ir::LoweredModel): a type model that targets without
//! structural unions, nullable-as-union or anonymous records can print
//! directly.
//!
//! # Architecture
//!
//! ```text
//! metaModel.json     Resolve            Lower              Renderers
//! ──────────────   ────────────     ──────────────     ───────────────
//! MetaModel ──────> closure of  ───> TypeLowerer ─────> json (built in)
//! (lsp-metamodel)   requested        + TargetProfile    custom (registry)
//!                   types            (go, kotlin,
//!                   (resolve.rs)     groovy, proto)
//! ```
//!
//! Lowering makes each decision once per run: `T | null` becomes
//! [`TypeDescriptor::Optional`](ir::TypeDescriptor::Optional), other unions
//! become a named composite registered the first time it is seen, and map
//! values or union variants a target cannot nest become wrapper composites.
//!
//! # Example
//!
//! ```
//! use lsp_typegen::{GenerateConfig, lower_model, target};
//!
//! let model = lsp_metamodel::parse_str(r#"{
//!     "structures": [{
//!         "name": "Location",
//!         "properties": [{ "name": "uri", "type": { "kind": "base", "name": "DocumentUri" } }]
//!     }],
//!     "typeAliases": [{
//!         "name": "Definition",
//!         "type": { "kind": "or", "items": [
//!             { "kind": "reference", "name": "Location" },
//!             { "kind": "array", "element": { "kind": "reference", "name": "Location" } }
//!         ]}
//!     }]
//! }"#).unwrap();
//!
//! let lowered = lower_model(&model, &GenerateConfig::default(), &target::go());
//! assert_eq!(lowered.composites[0].name(), "Or_ArrLocation_Location");
//! ```
//!
//! # Using the Renderer Registry
//!
//! ```ignore
//! use lsp_typegen::{get_renderer, renderer_names, generate};
//!
//! for name in renderer_names() {
//!     println!("Renderer: {}", name);
//! }
//!
//! if let Some(renderer) = get_renderer("json") {
//!     let output = generate(&model, &config, renderer)?;
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `renderer-json` - JSON dump of the lowered model (default)

pub mod config;
pub mod error;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod target;
pub mod traits;

pub use config::GenerateConfig;
pub use error::Error;
pub use ir::{CompositeDef, LoweredModel, TypeDescriptor};
pub use lower::{LowerOptions, TypeLowerer};
pub use output::Output;
pub use pipeline::{flatten_properties, generate, generate_from_slice, lower_model, should_include};
pub use resolve::{DependencyResolver, resolve};
pub use target::{BaseCategory, TargetProfile};

// Re-export traits
pub use traits::{RenderError, Renderer};

// Re-export registry functions
pub use registry::{get_renderer, register_renderer, renderer_names, renderers};

#[cfg(feature = "renderer-json")]
pub use output::json::JsonRenderer;
