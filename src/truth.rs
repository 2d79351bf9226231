//! Ground-truth label management.
//!
//! [`GroundTruthStore`] maps document identifiers to labeled categories and
//! persists the mapping as a self-describing JSON file. Opening a store whose
//! file does not exist yields an empty mapping; every mutation rewrites the
//! full file atomically. Later writes for the same document id overwrite
//! earlier ones.
//!
//! Concurrent writers are not coordinated: two sessions flushing the same
//! file resolve last-writer-wins.
//!
//! # Example
//!
//! ```rust,no_run
//! use scorecard::GroundTruthStore;
//!
//! let mut store = GroundTruthStore::open("ground_truth.json").unwrap();
//! store.add("invoice_001.pdf", "Finance", None).unwrap();
//! assert_eq!(store.get("invoice_001.pdf"), Some("Finance"));
//! assert_eq!(store.get("unknown.pdf"), None);
//! ```

use crate::{persist, Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One labeled document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    /// Correct category for the document.
    pub category: String,
    /// When the label was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Opaque caller-supplied document details.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// On-disk layout: a named wrapper so the file is readable without a schema.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    documents: BTreeMap<String, GroundTruthEntry>,
}

/// Persistent document-id → labeled-category mapping.
///
/// Loaded once at open, held in memory, flushed to storage on every
/// mutation.
#[derive(Debug)]
pub struct GroundTruthStore {
    path: PathBuf,
    documents: BTreeMap<String, GroundTruthEntry>,
}

impl GroundTruthStore {
    /// Open a store backed by `path`, loading existing entries.
    ///
    /// A missing file is an empty store, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::Persistence`] if the file exists but cannot be read or
    /// parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let documents = if path.exists() {
            let file: StoreFile = persist::read_json(&path)?;
            file.documents
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = documents.len(), "ground-truth store opened");
        Ok(Self { path, documents })
    }

    /// File backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of labeled documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Insert or overwrite the label for a document and flush to storage.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for an empty document id or category.
    /// - [`Error::Persistence`] if the flush fails; the in-memory change is
    ///   rolled back so memory and file stay consistent.
    pub fn add(
        &mut self,
        document_id: &str,
        category: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<()> {
        if document_id.is_empty() {
            return Err(Error::invalid_input("document id is empty"));
        }
        if category.is_empty() {
            return Err(Error::invalid_input("category is empty"));
        }

        let entry = GroundTruthEntry {
            category: category.to_string(),
            recorded_at: Utc::now(),
            metadata: metadata.unwrap_or_default(),
        };
        let previous = self.documents.insert(document_id.to_string(), entry);
        if let Err(e) = self.flush() {
            match previous {
                Some(p) => {
                    self.documents.insert(document_id.to_string(), p);
                }
                None => {
                    self.documents.remove(document_id);
                }
            }
            return Err(e);
        }

        if previous.is_some() {
            info!(document_id, category, "ground-truth label overwritten");
        } else {
            info!(document_id, category, "ground-truth label added");
        }
        Ok(())
    }

    /// Category recorded for a document, if any.
    #[must_use]
    pub fn get(&self, document_id: &str) -> Option<&str> {
        self.documents
            .get(document_id)
            .map(|e| e.category.as_str())
    }

    /// Full entry for a document, if any.
    #[must_use]
    pub fn entry(&self, document_id: &str) -> Option<&GroundTruthEntry> {
        self.documents.get(document_id)
    }

    /// All entries, keyed by document id.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, GroundTruthEntry> {
        &self.documents
    }

    /// Produce a denormalized listing for downstream reporting: every entry
    /// plus per-category counts, stamped with the creation time.
    #[must_use]
    pub fn materialize(&self) -> GroundTruthDataset {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        let mut documents = Vec::with_capacity(self.documents.len());
        for (document_id, entry) in &self.documents {
            *categories.entry(entry.category.clone()).or_insert(0) += 1;
            documents.push(DatasetDocument {
                document_id: document_id.clone(),
                true_category: entry.category.clone(),
                recorded_at: entry.recorded_at,
                metadata: entry.metadata.clone(),
            });
        }
        GroundTruthDataset {
            created: Utc::now(),
            total_documents: documents.len(),
            categories,
            documents,
        }
    }

    /// Seed the store with a small labeled example set, for bootstrapping.
    ///
    /// Returns the number of entries written. Existing entries with the same
    /// document ids are overwritten.
    pub fn seed_sample(&mut self) -> Result<usize> {
        let samples = [
            (
                "invoice_001.pdf",
                "Finance",
                serde_json::json!({"type": "invoice", "amount": "$5000"}),
            ),
            (
                "contract_msa.pdf",
                "Legal",
                serde_json::json!({"type": "contract", "parties": "TechCorp, ServiceProvider"}),
            ),
            (
                "employee_handbook.pdf",
                "HR",
                serde_json::json!({"type": "handbook", "pages": 50}),
            ),
            (
                "sales_report_q3.pdf",
                "Sales",
                serde_json::json!({"type": "report", "period": "Q3 2024"}),
            ),
            (
                "product_roadmap.pdf",
                "Product",
                serde_json::json!({"type": "roadmap", "version": "2024"}),
            ),
        ];

        let count = samples.len();
        for (document_id, category, metadata) in samples {
            let metadata = metadata.as_object().cloned().unwrap_or_default();
            self.add(document_id, category, Some(metadata))?;
        }
        Ok(count)
    }

    fn flush(&self) -> Result<()> {
        let file = StoreFile {
            documents: self.documents.clone(),
        };
        persist::write_json_atomic(&self.path, &file)
    }
}

// =============================================================================
// Materialized dataset
// =============================================================================

/// Denormalized export of a [`GroundTruthStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthDataset {
    /// When the listing was produced.
    pub created: DateTime<Utc>,
    /// Number of labeled documents.
    pub total_documents: usize,
    /// Per-category document counts.
    pub categories: BTreeMap<String, usize>,
    /// All entries, in document-id order.
    pub documents: Vec<DatasetDocument>,
}

/// One entry of a materialized dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    /// Document identifier.
    pub document_id: String,
    /// Correct category.
    pub true_category: String,
    /// When the label was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Opaque document details.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

// =============================================================================
// Tests
// =============================================================================
