use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    dictionary::{Entry, TagRecord},
    errors::TableError,
};

/// Tag label -> number of hits referencing it, in first-appearance order.
pub type TagCounts = IndexMap<String, usize>;

/// Read-only tag table keyed by tag id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TagRecord>", into = "Vec<TagRecord>")]
pub struct TagTable {
    records: IndexMap<i64, TagRecord>,
}

impl From<Vec<TagRecord>> for TagTable {
    fn from(rows: Vec<TagRecord>) -> Self {
        Self::from_records(rows)
    }
}

impl From<TagTable> for Vec<TagRecord> {
    fn from(table: TagTable) -> Self {
        table.records.into_values().collect()
    }
}

impl TagTable {
    /// Later rows with a duplicate id replace earlier ones.
    pub fn from_records(rows: impl IntoIterator<Item = TagRecord>) -> Self {
        let records = rows.into_iter().map(|r| (r.id, r)).collect();
        Self { records }
    }

    /// Decodes `[{id, tag, description}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        serde_json::from_str(json).map_err(TableError::json("tag"))
    }

    pub fn get(&self, id: i64) -> Option<&TagRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagRecord> {
        self.records.values()
    }
}

/// Parses a raw `"1,5,12"` id list. Pieces that are not integers are skipped.
pub fn parse_tag_ids(raw: &str) -> impl Iterator<Item = i64> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
}

/// Resolves a raw tag id string against `table`.
///
/// Records come back in the order their ids appear, each id at most once.
/// Ids with no row in the table are dropped.
pub fn resolve_tags<'t>(raw: &str, table: &'t TagTable) -> Vec<&'t TagRecord> {
    let mut seen = HashSet::new();
    parse_tag_ids(raw)
        .filter(|id| seen.insert(*id))
        .filter_map(|id| {
            let found = table.get(id);
            if found.is_none() {
                log::trace!("dropping unknown tag id {id}");
            }
            found
        })
        .collect()
}

/// Counts, per resolved tag label, how many hits reference it.
///
/// A hit counts once per label no matter how many of its ids resolve to it.
pub fn count_tag_occurrences(entries: &[Entry], table: &TagTable) -> TagCounts {
    let mut counts = TagCounts::new();
    for entry in entries {
        let mut labels: Vec<&str> = Vec::new();
        for record in resolve_tags(&entry.tags, table) {
            if !labels.contains(&record.tag.as_str()) {
                labels.push(&record.tag);
            }
        }
        for label in labels {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Keeps the hits that carry a tag labelled `selected`.
///
/// With no selection, or an empty label, every hit is kept in the original
/// order.
pub fn filter_by_tag<'e>(
    entries: &'e [Entry],
    table: &TagTable,
    selected: Option<&str>,
) -> Vec<&'e Entry> {
    match selected.filter(|label| !label.is_empty()) {
        None => entries.iter().collect(),
        Some(label) => entries
            .iter()
            .filter(|e| resolve_tags(&e.tags, table).iter().any(|t| t.tag == label))
            .collect(),
    }
}
