// Registry: pattern id -> demo routine, in canonical order.
// Built once at startup from the embedded catalog and the compiled demo table.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::catalog::{Catalog, Family};
use crate::error::CatalogError;
use crate::transcript::DemoFn;
use crate::{behavioral, creational, structural};

/// Every compiled demo routine, keyed by pattern id.
const DEMOS: [(&str, DemoFn); 23] = [
    ("singleton", creational::singleton::run),
    ("factory-method", creational::factory_method::run),
    ("abstract-factory", creational::abstract_factory::run),
    ("builder", creational::builder::run),
    ("prototype", creational::prototype::run),
    ("adapter", structural::adapter::run),
    ("bridge", structural::bridge::run),
    ("composite", structural::composite::run),
    ("decorator", structural::decorator::run),
    ("facade", structural::facade::run),
    ("flyweight", structural::flyweight::run),
    ("proxy", structural::proxy::run),
    ("chain-of-responsibility", behavioral::chain_of_responsibility::run),
    ("command", behavioral::command::run),
    ("interpreter", behavioral::interpreter::run),
    ("iterator", behavioral::iterator::run),
    ("mediator", behavioral::mediator::run),
    ("memento", behavioral::memento::run),
    ("observer", behavioral::observer::run),
    ("state", behavioral::state::run),
    ("strategy", behavioral::strategy::run),
    ("template-method", behavioral::template_method::run),
    ("visitor", behavioral::visitor::run),
];

#[derive(Clone)]
pub struct PatternEntry {
    pub id: String,
    pub family: Family,
    pub name: String,
    pub intent: String,
    pub demo: DemoFn,
}

impl std::fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternEntry")
            .field("id", &self.id)
            .field("family", &self.family)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: IndexMap<String, PatternEntry>,
}

impl Registry {
    /// Registry over the embedded catalog and the built-in demos.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::with_builtin_demos(&Catalog::embedded()?)
    }

    /// Registry over an already loaded catalog and the built-in demos.
    pub fn with_builtin_demos(catalog: &Catalog) -> Result<Self, CatalogError> {
        Self::from_catalog(catalog, &DEMOS)
    }

    /// Pairs each catalog entry with its routine. Every catalog id needs a
    /// routine and every routine needs a catalog entry.
    pub fn from_catalog(catalog: &Catalog, demos: &[(&str, DemoFn)]) -> Result<Self, CatalogError> {
        let mut routines: HashMap<&str, DemoFn> = HashMap::with_capacity(demos.len());
        for &(id, demo) in demos {
            if routines.insert(id, demo).is_some() {
                return Err(CatalogError::Duplicate { id: id.to_string() });
            }
        }

        let mut entries = IndexMap::with_capacity(catalog.patterns.len());
        for pattern in &catalog.patterns {
            let demo = routines
                .remove(pattern.id.as_str())
                .ok_or_else(|| CatalogError::MissingDemo {
                    id: pattern.id.clone(),
                })?;
            entries.insert(
                pattern.id.clone(),
                PatternEntry {
                    id: pattern.id.clone(),
                    family: pattern.family,
                    name: pattern.name.clone(),
                    intent: pattern.intent.clone(),
                    demo,
                },
            );
        }

        // Report leftovers in table order so the error is stable.
        if let Some(&(id, _)) = demos.iter().find(|(id, _)| routines.contains_key(id)) {
            return Err(CatalogError::UnlistedDemo { id: id.to_string() });
        }

        debug!(patterns = entries.len(), "registry built");
        Ok(Self { entries })
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, id: &str) -> Option<&PatternEntry> {
        self.entries.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &PatternEntry> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of patterns per family, in family order.
    pub fn family_counts(&self) -> Vec<(Family, usize)> {
        let mut counts: Vec<(Family, usize)> = Vec::new();
        for entry in self.entries.values() {
            match counts.last_mut() {
                Some((family, count)) if *family == entry.family => *count += 1,
                _ => counts.push((entry.family, 1)),
            }
        }
        counts
    }
}
