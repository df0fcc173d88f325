//! Post-processing for dictionary search results.
//!
//! Takes a batch of raw hits plus the tag and kanji tables and derives a
//! filtered, grouped, colored and paginated [ViewModel] for a results list.
//! Fetching, routing and rendering belong to the host.
pub mod cjk_utils;
pub mod color;
pub mod dictionary;
pub mod errors;
pub mod grouper;
pub mod kanji;
pub mod paginator;
pub mod processor;
pub mod ptr;
pub mod query;
pub mod reading;
pub mod reference;
pub mod settings;
pub mod tags;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use color::{ColorAssigner, Hsl};
pub use dictionary::{Entry, FuriganaSegment, KanjiRecord, TagRecord};
pub use errors::{JishoError, QueryError, SettingsError, TableError};
pub use grouper::{group_entries, GroupedResult};
pub use kanji::{KanjiDetail, KanjiSelection, KanjiTable};
pub use paginator::{paginate, Page};
pub use processor::{recompute, AnnotatedEntry, ResultProcessor, ViewModel};
pub use ptr::Ptr;
pub use query::{SearchInput, SearchMode, SearchRequest, SearchResponse};
pub use reading::{tokenize_reading, ReadingKind, ReadingToken};
pub use reference::ReferenceTables;
pub use settings::{ColorOptions, ProcessorOptions};
pub use tags::{count_tag_occurrences, filter_by_tag, resolve_tags, TagTable};
