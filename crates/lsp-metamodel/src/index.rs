//! Name lookup over the named definitions of a [`MetaModel`].

use crate::model::{Enumeration, MetaModel, Structure, TypeAlias};
use std::collections::HashMap;

/// A named definition a `reference` type node can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition<'m> {
    Structure(&'m Structure),
    Enumeration(&'m Enumeration),
    Alias(&'m TypeAlias),
}

impl<'m> Definition<'m> {
    pub fn name(&self) -> &'m str {
        match self {
            Definition::Structure(s) => &s.name,
            Definition::Enumeration(e) => &e.name,
            Definition::Alias(a) => &a.name,
        }
    }

    pub fn is_proposed(&self) -> bool {
        match self {
            Definition::Structure(s) => s.proposed,
            Definition::Enumeration(e) => e.proposed,
            Definition::Alias(a) => a.proposed,
        }
    }
}

/// Borrowed name → definition table.
///
/// Names are unique across the three definition kinds in published schemas.
/// If a name does repeat, the first entry wins, checking structures first,
/// then enumerations, then aliases.
#[derive(Debug, Clone)]
pub struct ModelIndex<'m> {
    model: &'m MetaModel,
    by_name: HashMap<&'m str, Definition<'m>>,
}

impl<'m> ModelIndex<'m> {
    pub fn new(model: &'m MetaModel) -> Self {
        let mut by_name = HashMap::with_capacity(model.definition_count());
        let definitions = model
            .structures
            .iter()
            .map(Definition::Structure)
            .chain(model.enumerations.iter().map(Definition::Enumeration))
            .chain(model.type_aliases.iter().map(Definition::Alias));
        for definition in definitions {
            by_name.entry(definition.name()).or_insert(definition);
        }
        Self { model, by_name }
    }

    pub fn model(&self) -> &'m MetaModel {
        self.model
    }

    pub fn get(&self, name: &str) -> Option<Definition<'m>> {
        self.by_name.get(name).copied()
    }

    pub fn structure(&self, name: &str) -> Option<&'m Structure> {
        match self.get(name)? {
            Definition::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn enumeration(&self, name: &str) -> Option<&'m Enumeration> {
        match self.get(name)? {
            Definition::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    pub fn alias(&self, name: &str) -> Option<&'m TypeAlias> {
        match self.get(name)? {
            Definition::Alias(a) => Some(a),
            _ => None,
        }
    }

    /// Whether `name` is a definition marked proposed. Unknown names are not.
    pub fn is_proposed(&self, name: &str) -> bool {
        self.get(name).is_some_and(|d| d.is_proposed())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl MetaModel {
    pub fn index(&self) -> ModelIndex<'_> {
        ModelIndex::new(self)
    }
}
