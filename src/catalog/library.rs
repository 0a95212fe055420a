use std::collections::HashSet;
use std::sync::LazyLock;

use crate::catalog::record::VideoRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate video id in catalog: {0}")]
    DuplicateId(String),
    #[error("video id must not be empty (title: {0:?})")]
    EmptyId(String),
}

/// Ordered, immutable collection of video records.
///
/// Built once and never mutated afterwards. Ids are validated unique at
/// construction so route lookups are unambiguous.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<VideoRecord>,
}

/// The catalog compiled into the binary. Initialised on first access and
/// kept for the process lifetime.
static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    records: builtin_records(),
});

fn builtin_records() -> Vec<VideoRecord> {
    vec![
        VideoRecord::local("1", "Chaozhou", "A beautiful video from Chaozhou", "Chaozhou.mp4", "2025-03-27"),
        VideoRecord::local("2", "Star Wars", "Star Wars themed video", "Star Wars.mp4", "2025-03-30"),
        VideoRecord::local("3", "Causeway Bay", "Exploring Causeway Bay", "Causeway Bay.mp4", "2025-02-18"),
        VideoRecord::local("4", "Robot Memories", "Robot themed video", "Robot Memories.mp4", "2025-03-31"),
        VideoRecord::local("5", "KOL Shanghai", "Shanghai KOL video", "KOL Shanghai.mp4", "2025-04-02"),
    ]
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids.
    pub fn new(records: Vec<VideoRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.id.is_empty() {
                return Err(CatalogError::EmptyId(record.title.clone()));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    /// Look up a record by route id. `None` maps to a not-found response.
    pub fn find(&self, id: &str) -> Option<&VideoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Slice of the catalog starting at `offset`.
    ///
    /// - `offset` beyond the end yields an empty slice
    /// - `limit == 0` returns everything from `offset` onward
    /// - otherwise at most `limit` records
    pub fn page(&self, offset: usize, limit: usize) -> &[VideoRecord] {
        let start = offset.min(self.records.len());
        let rest = &self.records[start..];
        if limit == 0 {
            rest
        } else {
            &rest[..limit.min(rest.len())]
        }
    }
}
