//! Project catalog index.
//!
//! The catalog is the CNCF landscape document: a `landscape:` list of
//! categories, each holding `subcategories`, each holding `items`.  Only the
//! leaf items matter here.  They are flattened into a map keyed by the
//! `org/repo` identifier of their repository URL so that feed URLs can be
//! joined against them.
//!
//! Decoding is done node by node: a category, subcategory or item with the
//! wrong shape is skipped instead of failing the whole document.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml_ng::Value;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::ident::extract_repo_id;

/// Metadata for one catalogued project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub repo_url: String,
    pub homepage_url: String,
    /// Maturity tag (`graduated`, `incubating`, `sandbox`); empty if unknown.
    pub maturity: String,
}

/// Read-only lookup from `org/repo` to project metadata.
///
/// Built once and then shared by reference with every fetch thread.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    projects: HashMap<String, CatalogEntry>,
}

// ---------------------------------------------------------------------------
// Document schema
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    landscape: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct Category {
    #[serde(default)]
    subcategories: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct Subcategory {
    #[serde(default)]
    items: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct Item {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    repo_url: Option<String>,
    #[serde(default)]
    homepage_url: Option<String>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    extra: Option<Extra>,
}

#[derive(Deserialize)]
struct Extra {
    #[serde(default)]
    summary_use_case: Option<String>,
    #[serde(default)]
    summary_business_use_case: Option<String>,
}

/// Decode each node on its own, dropping the ones that don't fit `T`.
fn decode_each<T: DeserializeOwned>(nodes: Option<Vec<Value>>) -> impl Iterator<Item = T> {
    nodes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|node| match serde_yaml_ng::from_value(node) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(error = %e, "skipping malformed catalog node");
                None
            }
        })
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

impl Item {
    /// Normalized identifier and entry, or `None` if the item can't be keyed.
    fn into_entry(self) -> Option<(String, CatalogEntry)> {
        let repo_url = non_empty(self.repo_url)?;
        let id = extract_repo_id(&repo_url);
        if id.is_empty() {
            debug!(%repo_url, "catalog item has no repository identifier");
            return None;
        }

        let (use_case, business_use_case) = match self.extra {
            Some(extra) => (extra.summary_use_case, extra.summary_business_use_case),
            None => (None, None),
        };
        let description = non_empty(self.description)
            .or_else(|| non_empty(use_case))
            .or_else(|| non_empty(business_use_case))
            .unwrap_or_default();

        let entry = CatalogEntry {
            name: self.name.unwrap_or_default(),
            description,
            repo_url,
            homepage_url: self.homepage_url.unwrap_or_default(),
            maturity: self.project.unwrap_or_default(),
        };
        Some((id, entry))
    }
}

// ---------------------------------------------------------------------------
// CatalogIndex
// ---------------------------------------------------------------------------

impl CatalogIndex {
    /// Parse a catalog document and flatten its items into an index.
    ///
    /// Later items win when two share an identifier.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml_ng::from_slice(bytes)?;

        let mut projects = HashMap::new();
        for category in decode_each::<Category>(document.landscape) {
            for subcategory in decode_each::<Subcategory>(category.subcategories) {
                for item in decode_each::<Item>(subcategory.items) {
                    if let Some((id, entry)) = item.into_entry() {
                        projects.insert(id, entry);
                    }
                }
            }
        }

        info!(projects = projects.len(), "built catalog index");
        Ok(Self { projects })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.projects.get(id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl FromIterator<(String, CatalogEntry)> for CatalogIndex {
    fn from_iter<I: IntoIterator<Item = (String, CatalogEntry)>>(iter: I) -> Self {
        Self {
            projects: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
