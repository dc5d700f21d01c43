//! Transitive type-dependency closure.
//!
//! Generating a subset of the schema only works if every type the subset
//! mentions is generated too. [`DependencyResolver`] walks from the
//! requested names through structure properties, `extends`/`mixins`, alias
//! targets and every nested type node, collecting the names it reaches.

use lsp_metamodel::{Definition, MetaModel, ModelIndex, Property, Type};
use std::collections::BTreeSet;

/// Depth-first closure over named references.
///
/// A name is marked visited before its dependencies are explored, so
/// cyclic references terminate. Referenced names missing from the model
/// are still part of the result. Enumerations have no dependencies.
pub struct DependencyResolver<'a> {
    index: &'a ModelIndex<'a>,
    include_proposed: bool,
    visited: BTreeSet<String>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(index: &'a ModelIndex<'a>, include_proposed: bool) -> Self {
        Self {
            index,
            include_proposed,
            visited: BTreeSet::new(),
        }
    }

    /// Closure of `requested`, or `None` when there is no filter.
    ///
    /// Proposed definitions are left out entirely unless proposed items are
    /// included, whether they were requested directly or reached.
    pub fn resolve(mut self, requested: Option<&BTreeSet<String>>) -> Option<BTreeSet<String>> {
        let requested = requested?;
        for name in requested {
            self.visit(name);
        }
        tracing::debug!(
            requested = requested.len(),
            resolved = self.visited.len(),
            "resolved type dependencies"
        );
        Some(self.visited)
    }

    fn visit(&mut self, name: &str) {
        if self.visited.contains(name) {
            return;
        }
        if !self.include_proposed && self.index.is_proposed(name) {
            tracing::trace!(name, "skipping proposed type");
            return;
        }
        self.visited.insert(name.to_string());

        match self.index.get(name) {
            Some(Definition::Structure(structure)) => {
                self.visit_properties(&structure.properties);
                for parent in structure.extends.iter().chain(&structure.mixins) {
                    self.visit_type(parent);
                }
            }
            Some(Definition::Alias(alias)) => self.visit_type(&alias.ty),
            Some(Definition::Enumeration(_)) => {}
            None => tracing::trace!(name, "reference to undefined type"),
        }
    }

    fn visit_properties(&mut self, properties: &[Property]) {
        for property in properties {
            if property.proposed && !self.include_proposed {
                continue;
            }
            self.visit_type(&property.ty);
        }
    }

    fn visit_type(&mut self, ty: &Type) {
        match ty {
            Type::Reference(name) => self.visit(name),
            Type::Array(element) => self.visit_type(element),
            Type::Map { key, value } => {
                self.visit_type(key);
                self.visit_type(value);
            }
            Type::Or(items) | Type::And(items) | Type::Tuple(items) => {
                for item in items {
                    self.visit_type(item);
                }
            }
            Type::Literal(properties) => self.visit_properties(properties),
            Type::Base(_) | Type::StringLiteral(_) => {}
        }
    }
}

/// Resolve the dependency closure of `requested` in `model`.
pub fn resolve(
    model: &MetaModel,
    requested: Option<&BTreeSet<String>>,
    include_proposed: bool,
) -> Option<BTreeSet<String>> {
    let index = model.index();
    DependencyResolver::new(&index, include_proposed).resolve(requested)
}
