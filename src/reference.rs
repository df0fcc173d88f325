use std::sync::Arc;

use crate::{errors::TableError, kanji::KanjiTable, tags::TagTable};

/// The tag and kanji tables currently adopted by the engine.
///
/// Tables are replaced wholesale; the last table installed wins. Every tag
/// table install bumps the tag revision so derived state keyed on it can be
/// invalidated. Kanji lookups are made on demand and need no revision.
#[derive(Debug, Default)]
pub struct ReferenceTables {
    tags: Arc<TagTable>,
    kanji: Arc<KanjiTable>,
    tags_revision: u64,
}

/// Cheap copy of the adopted tables, detached from the lock.
#[derive(Clone, Debug, Default)]
pub struct TableSnapshot {
    pub tags: Arc<TagTable>,
    pub kanji: Arc<KanjiTable>,
    pub tags_revision: u64,
}

impl ReferenceTables {
    pub fn new(tags: TagTable, kanji: KanjiTable) -> Self {
        Self {
            tags: Arc::new(tags),
            kanji: Arc::new(kanji),
            tags_revision: 1,
        }
    }

    pub fn install_tags(&mut self, table: TagTable) {
        log::debug!("adopting tag table with {} rows", table.len());
        self.tags = Arc::new(table);
        self.tags_revision += 1;
    }

    pub fn install_kanji(&mut self, table: KanjiTable) {
        log::debug!("adopting kanji table with {} rows", table.len());
        self.kanji = Arc::new(table);
    }

    /// Installs a fetched tag table, or keeps the current one on failure.
    ///
    /// Returns whether the table changed.
    pub fn adopt_tags(&mut self, fetched: Result<TagTable, TableError>) -> bool {
        match fetched {
            Ok(table) => {
                self.install_tags(table);
                true
            }
            Err(e) => {
                log::warn!("keeping previous tag table ({} rows): {e}", self.tags.len());
                false
            }
        }
    }

    pub fn adopt_kanji(&mut self, fetched: Result<KanjiTable, TableError>) -> bool {
        match fetched {
            Ok(table) => {
                self.install_kanji(table);
                true
            }
            Err(e) => {
                log::warn!(
                    "keeping previous kanji table ({} rows): {e}",
                    self.kanji.len()
                );
                false
            }
        }
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn kanji(&self) -> &KanjiTable {
        &self.kanji
    }

    pub fn tags_revision(&self) -> u64 {
        self.tags_revision
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            tags: Arc::clone(&self.tags),
            kanji: Arc::clone(&self.kanji),
            tags_revision: self.tags_revision,
        }
    }
}
