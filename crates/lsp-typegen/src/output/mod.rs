//! Renderer output and built-in renderers.
//!
//! Every renderer implements the [`Renderer`](crate::traits::Renderer)
//! trait for uniform access via the registry.

use std::collections::BTreeMap;

// JSON dump of the lowered model
#[cfg(feature = "renderer-json")]
pub mod json;

#[cfg(feature = "renderer-json")]
pub use json::{JsonRenderer, render_json};

/// Files produced by a renderer, keyed by relative file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output consisting of one file.
    pub fn single(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let mut output = Self::new();
        output.add(name, content);
        output
    }

    /// Add a file, replacing any earlier file with the same name.
    pub fn add(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
