use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{
    cjk_utils::is_kanji,
    dictionary::KanjiRecord,
    errors::TableError,
    reading::{tokenize_reading, ReadingToken},
};

/// Read-only kanji table keyed by character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<KanjiRecord>", into = "Vec<KanjiRecord>")]
pub struct KanjiTable {
    records: IndexMap<char, KanjiRecord>,
}

impl From<Vec<KanjiRecord>> for KanjiTable {
    fn from(rows: Vec<KanjiRecord>) -> Self {
        Self::from_records(rows)
    }
}

impl From<KanjiTable> for Vec<KanjiRecord> {
    fn from(table: KanjiTable) -> Self {
        table.records.into_values().collect()
    }
}

impl KanjiTable {
    pub fn from_records(rows: impl IntoIterator<Item = KanjiRecord>) -> Self {
        let records = rows.into_iter().map(|r| (r.kanji, r)).collect();
        Self { records }
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        serde_json::from_str(json).map_err(TableError::json("kanji"))
    }

    pub fn get(&self, kanji: char) -> Option<&KanjiRecord> {
        self.records.get(&kanji)
    }

    pub fn contains(&self, kanji: char) -> bool {
        self.records.contains_key(&kanji)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks `kanji` up and tokenizes its readings.
    pub fn detail(&self, kanji: char) -> Option<KanjiDetail> {
        self.get(kanji).map(KanjiDetail::from_record)
    }
}

/// A kanji record with its kun and on readings split into tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KanjiDetail {
    pub record: KanjiRecord,
    pub kun: Vec<ReadingToken>,
    pub on: Vec<ReadingToken>,
}

impl KanjiDetail {
    pub fn from_record(record: &KanjiRecord) -> Self {
        Self {
            kun: tokenize_reading(Some(&record.kun_reading)),
            on: tokenize_reading(Some(&record.on_reading)),
            record: record.clone(),
        }
    }
}

/// Distinct kanji of `term`, in order, that have a row in `table`.
pub fn kanji_in_term(term: &str, table: &KanjiTable) -> Vec<char> {
    term.chars()
        .filter(|&c| is_kanji(c) && table.contains(c))
        .collect::<IndexSet<char>>()
        .into_iter()
        .collect()
}

/// Which character's detail popup is open, if any.
///
/// When to clear it (click outside, escape, ...) is the caller's call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KanjiSelection {
    selected: Option<char>,
}

impl KanjiSelection {
    pub fn select_kanji(&mut self, kanji: Option<char>) {
        self.selected = kanji;
    }

    /// Selecting the open character again closes it.
    pub fn toggle(&mut self, kanji: char) {
        self.selected = match self.selected {
            Some(current) if current == kanji => None,
            _ => Some(kanji),
        };
    }

    pub fn is_selected(&self, kanji: char) -> bool {
        self.selected == Some(kanji)
    }

    pub fn selected(&self) -> Option<char> {
        self.selected
    }

    pub fn detail(&self, table: &KanjiTable) -> Option<KanjiDetail> {
        self.selected.and_then(|k| table.detail(k))
    }
}
