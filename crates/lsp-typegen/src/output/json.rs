//! JSON renderer: the lowered model as a pretty-printed document.
//!
//! Mostly useful for inspecting lowering decisions and for golden tests,
//! since the output is byte-identical across runs. The generated-code
//! header lines travel in a top-level `header` array.

use crate::config::GenerateConfig;
use crate::ir::LoweredModel;
use crate::output::Output;
use crate::traits::{RenderError, Renderer};
use serde::Serialize;

/// Name written into the `Code generated by` header line.
pub const GENERATOR: &str = "lsp-typegen";

/// Default output file name.
pub const DEFAULT_FILE: &str = "lowered.json";

/// Static instance of the JSON renderer for registry.
pub static JSON_RENDERER: JsonRenderer = JsonRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Lowered type model as JSON"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn render(&self, model: &LoweredModel, config: &GenerateConfig) -> Result<Output, RenderError> {
        let name = config.output_file.as_deref().unwrap_or(DEFAULT_FILE);
        let header = config.header_lines(GENERATOR);
        Ok(Output::single(name, render_json(model, &header)?))
    }
}

#[derive(Serialize)]
struct Document<'a> {
    header: &'a [String],
    #[serde(flatten)]
    model: &'a LoweredModel,
}

/// Serialize a lowered model under `header`, with a trailing newline.
pub fn render_json(model: &LoweredModel, header: &[String]) -> Result<String, RenderError> {
    let mut json = serde_json::to_string_pretty(&Document { header, model })?;
    json.push('\n');
    Ok(json)
}
