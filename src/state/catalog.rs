use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::data::{Profile, Project};

/// Errors raised while reading the catalog document
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the catalog document
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    projects: Vec<Project>,
    #[serde(default)]
    profile: Profile,
}

/// The Catalog holds every project, in file order.
///
/// It is loaded once at startup and never mutated; projects are handed
/// out as shared `Arc`s so the UI can keep a selection alive while the
/// modal plays its exit transition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Arc<Project>>,
    profile: Arc<Profile>,
}

impl Catalog {
    /// Read and parse the catalog file at `path`
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            "📁 Catalog loaded from {} ({} projects)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_parts(document.projects, document.profile))
    }

    /// Build a catalog from already-parsed records
    pub fn from_parts(projects: Vec<Project>, profile: Profile) -> Self {
        // Duplicate IDs are a data quality issue; keep every record but say so.
        let mut seen = HashSet::new();
        for project in &projects {
            if !seen.insert(project.id) {
                tracing::warn!(id = project.id, title = %project.title, "duplicate project id in catalog");
            }
        }

        Catalog {
            projects: projects.into_iter().map(Arc::new).collect(),
            profile: Arc::new(profile),
        }
    }

    /// All projects in catalog order
    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    /// Look up a project by ID (first match wins)
    pub fn get(&self, id: u32) -> Option<&Arc<Project>> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
