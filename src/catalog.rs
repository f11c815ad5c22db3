// Embedded pattern catalog: canonical order, display metadata and the
// logging directive, deserialized from `catalog.toml` at startup.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::error::CatalogError;

const EMBEDDED: &str = include_str!("../catalog.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Creational,
    Structural,
    Behavioral,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Creational => "creational",
            Family::Structural => "structural",
            Family::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub family: Family,
    pub name: String,
    pub intent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(rename = "pattern", default)]
    pub patterns: Vec<CatalogEntry>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks id shape, uniqueness and family grouping. Families may only
    /// move forward (creational, then structural, then behavioral).
    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        let mut current = Family::Creational;

        for entry in &self.patterns {
            if !is_valid_id(&entry.id) {
                return Err(CatalogError::InvalidId {
                    id: entry.id.clone(),
                });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    id: entry.id.clone(),
                });
            }
            if entry.family < current {
                return Err(CatalogError::FamilyOrder {
                    id: entry.id.clone(),
                });
            }
            current = entry.family;
        }
        Ok(())
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
}
