//! Traits for renderers.

use crate::config::GenerateConfig;
use crate::ir::LoweredModel;
use crate::output::Output;
use crate::target::{self, TargetProfile};

/// A renderer failed to produce output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown target profile `{0}`")]
    UnknownTarget(String),

    #[error("failed to serialize lowered model: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Turns a [`LoweredModel`] into files.
///
/// Names in the lowered model are already unique identifiers, so a renderer
/// only chooses layout and syntax.
///
/// # Implementing Custom Renderers
///
/// ```ignore
/// use lsp_typegen::{GenerateConfig, LoweredModel, Output, RenderError, Renderer, register_renderer};
///
/// struct KotlinRenderer;
///
/// impl Renderer for KotlinRenderer {
///     fn name(&self) -> &'static str { "kotlin" }
///     fn description(&self) -> &'static str { "Kotlin data classes" }
///     fn extensions(&self) -> &'static [&'static str] { &["kt"] }
///     fn render(&self, model: &LoweredModel, config: &GenerateConfig) -> Result<Output, RenderError> {
///         /* ... */
///     }
/// }
///
/// // Register before first use
/// register_renderer(&KotlinRenderer);
/// ```
pub trait Renderer: Send + Sync {
    /// Unique renderer identifier (e.g., "json").
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Extensions of the files this renderer writes.
    fn extensions(&self) -> &'static [&'static str];

    /// Profile to lower with. Defaults to the built-in named by
    /// `config.target`.
    fn profile(&self, config: &GenerateConfig) -> Result<TargetProfile, RenderError> {
        target::profile(&config.target).ok_or_else(|| RenderError::UnknownTarget(config.target.clone()))
    }

    fn render(&self, model: &LoweredModel, config: &GenerateConfig) -> Result<Output, RenderError>;
}
