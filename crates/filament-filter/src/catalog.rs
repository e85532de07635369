//! Read-only lookup lists supplied by the host.
//!
//! The visualizer owns the real registries: which crates, processes, kinds,
//! module paths, node ids, and source locations exist in the loaded
//! snapshot. This crate only matches against them. [`Catalog`] is the
//! serde-friendly bundle the suggestion engine consumes; the CLI loads one
//! from a JSON file, the widget passes one straight from the graph model.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::key::Axis;
use crate::{Error, Result};

/// One registry row: stable id plus optional human label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

impl LabelEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Rich node entry for `focus:` and entity suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Extra haystack: task names, peer addresses, whatever else a user
    /// might type when hunting for this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

/// The lookup lists the suggestion engine ranks against. All lists are
/// optional; missing ones suggest nothing for their axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub node_ids: Vec<String>,
    pub locations: Vec<String>,
    pub crates: Vec<LabelEntry>,
    pub processes: Vec<LabelEntry>,
    pub kinds: Vec<LabelEntry>,
    pub modules: Vec<LabelEntry>,
    pub entities: Vec<EntityRef>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Registry rows for one axis as `(id, label)` pairs. The plain-string
    /// axes have no labels; empty labels count as absent.
    pub(crate) fn axis_rows(&self, axis: Axis) -> Vec<(&str, Option<&str>)> {
        match axis {
            Axis::NodeId => unlabeled(&self.node_ids),
            Axis::Location => unlabeled(&self.locations),
            Axis::Crate => labeled(&self.crates),
            Axis::Process => labeled(&self.processes),
            Axis::Kind => labeled(&self.kinds),
            Axis::Module => labeled(&self.modules),
        }
    }
}

fn unlabeled(ids: &[String]) -> Vec<(&str, Option<&str>)> {
    ids.iter().map(|id| (id.as_str(), None)).collect()
}

fn labeled(entries: &[LabelEntry]) -> Vec<(&str, Option<&str>)> {
    entries
        .iter()
        .map(|entry| {
            let label = (!entry.label.is_empty()).then_some(entry.label.as_str());
            (entry.id.as_str(), label)
        })
        .collect()
}
