use serde::{Deserialize, Serialize};

/// How a reading is marked in the kanji table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    /// Name-only reading, marked with a leading `*`.
    Nanori,
    /// High-frequency reading, marked with a trailing `!`.
    Common,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingToken {
    pub text: String,
    pub kind: ReadingKind,
}

impl ReadingToken {
    pub fn new(text: impl Into<String>, kind: ReadingKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

const NANORI_MARKER: char = '*';
const COMMON_MARKER: char = '!';

/// Splits a raw `"*あ,い!,う"` reading list into classified tokens.
///
/// `None` or an empty string gives an empty list. Items that are empty once
/// trimmed and stripped of their markers are dropped.
pub fn tokenize_reading(raw: Option<&str>) -> Vec<ReadingToken> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',').filter_map(classify_item).collect()
}

fn classify_item(item: &str) -> Option<ReadingToken> {
    let item = item.trim();
    let kind = if item.starts_with(NANORI_MARKER) {
        ReadingKind::Nanori
    } else if item.ends_with(COMMON_MARKER) {
        ReadingKind::Common
    } else {
        ReadingKind::Other
    };
    let text = item.strip_prefix(NANORI_MARKER).unwrap_or(item);
    let text = text.strip_suffix(COMMON_MARKER).unwrap_or(text);
    let text = text.trim();
    (!text.is_empty()).then(|| ReadingToken::new(text, kind))
}
