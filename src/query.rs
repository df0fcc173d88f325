use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::LazyLock,
};

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    dictionary::Entry,
    errors::{QueryError, TableError},
};

static ENGLISH_QUERY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("Invalid english query pattern"));

/// How the search endpoint matches the query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Exact term or reading match.
    Exact,
    /// Term or reading contains the query.
    #[default]
    Any,
    /// Separate kanji and reading inputs, sent as `"<kanji>,<reading>"`.
    Both,
    /// Exact english meaning.
    EnExact,
    /// English meaning contains the query.
    EnAny,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::Any => "any",
            SearchMode::Both => "both",
            SearchMode::EnExact => "en_exact",
            SearchMode::EnAny => "en_any",
        }
    }
}

impl Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(SearchMode::Exact),
            "any" => Ok(SearchMode::Any),
            "both" => Ok(SearchMode::Both),
            "en_exact" => Ok(SearchMode::EnExact),
            "en_any" => Ok(SearchMode::EnAny),
            _ => Err(QueryError::UnknownMode(s.to_string())),
        }
    }
}

/// Whether `query` is made only of ascii letters and whitespace.
pub fn is_english(query: &str) -> bool {
    ENGLISH_QUERY_PATTERN.is_match(query).unwrap_or(false)
}

/// The raw inputs of the search box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub query: String,
    /// Only read in [SearchMode::Both].
    pub kanji: String,
    /// Only read in [SearchMode::Both].
    pub reading: String,
}

impl SearchInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn kanji_and_reading(kanji: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            kanji: kanji.into(),
            reading: reading.into(),
            ..Default::default()
        }
    }
}

/// Query parameters for the search endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
    /// Whether the user typed an english query; decides the fallback.
    #[serde(skip)]
    english: bool,
}

impl SearchRequest {
    /// Normalizes `input` for `mode`.
    ///
    /// The query is trimmed and, when english, lowercased. In
    /// [SearchMode::Both] the two separate inputs are joined instead.
    pub fn build(input: &SearchInput, mode: SearchMode) -> Result<Self, QueryError> {
        let english = is_english(&input.query);
        let query = match mode {
            SearchMode::Both => format!("{},{}", input.kanji.trim(), input.reading.trim()),
            _ => {
                let trimmed = input.query.trim();
                if english {
                    trimmed.to_lowercase()
                } else {
                    trimmed.to_string()
                }
            }
        };
        if query.is_empty() || query == "," {
            return Err(QueryError::Empty);
        }
        Ok(Self {
            query,
            mode,
            english,
        })
    }

    /// The retry to issue when this request came back empty.
    ///
    /// English queries that found nothing are retried once as
    /// [SearchMode::EnAny].
    pub fn fallback(&self, result_count: usize) -> Option<SearchRequest> {
        if self.english && result_count == 0 && self.mode != SearchMode::EnAny {
            log::debug!("no results for `{}`, retrying with en_any", self.query);
            return Some(Self {
                query: self.query.clone(),
                mode: SearchMode::EnAny,
                english: true,
            });
        }
        None
    }

    pub fn params(&self) -> [(&'static str, &str); 2] {
        [("query", self.query.as_str()), ("mode", self.mode.as_str())]
    }
}

/// Body of a search endpoint response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Entry>,
}

impl SearchResponse {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        serde_json::from_str(json).map_err(TableError::json("search response"))
    }
}
