use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A unit of displayed text with an optional ruby annotation.
///
/// `rt` is absent when the segment is not a kanji run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuriganaSegment {
    #[serde(rename = "ruby")]
    pub text: String,
    #[serde(rename = "rt", default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
}

impl FuriganaSegment {
    pub fn new(text: impl Into<String>, reading: Option<String>) -> Self {
        Self {
            text: text.into(),
            reading,
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.reading.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// One dictionary hit, as received from the search endpoint.
///
/// Entries are never mutated after decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub term: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furigana: Option<Vec<FuriganaSegment>>,
    #[serde(default)]
    pub meanings: Vec<String>,
    /// Comma separated tag ids. Anything that is not a string, number or
    /// list of numbers decodes as "no tags".
    #[serde(default, deserialize_with = "lenient_tag_ids")]
    pub tags: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub frequency: Option<f64>,
    #[serde(default, alias = "group", deserialize_with = "lenient_group_id")]
    pub group_id: Option<i64>,
}

impl Entry {
    pub fn new(term: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            reading: reading.into(),
            furigana: None,
            meanings: Vec::new(),
            tags: String::new(),
            frequency: None,
            group_id: None,
        }
    }

    pub fn with_meanings(mut self, meanings: &[&str]) -> Self {
        self.meanings = meanings.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_furigana(mut self, segments: Vec<FuriganaSegment>) -> Self {
        self.furigana = Some(segments);
        self
    }

    /// Segments to render as ruby text.
    ///
    /// Falls back to a single segment of the whole term annotated with the
    /// reading when the hit carries no furigana.
    pub fn ruby_segments(&self) -> Vec<FuriganaSegment> {
        match &self.furigana {
            Some(segments) if !segments.is_empty() => segments.clone(),
            _ => {
                let reading = (!self.reading.is_empty()).then(|| self.reading.clone());
                vec![FuriganaSegment::new(self.term.clone(), reading)]
            }
        }
    }

    /// Key used for the frequency badge color, `freq-<rank>`.
    pub fn frequency_key(&self) -> Option<String> {
        self.frequency.map(frequency_key)
    }
}

pub fn frequency_key(rank: f64) -> String {
    format!("freq-{rank}")
}

/// A row of the tag table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: i64,
    /// Short label shown on the badge, e.g. `"v1"`.
    pub tag: String,
    #[serde(default)]
    pub description: String,
}

impl TagRecord {
    pub fn new(id: i64, tag: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            description: description.into(),
        }
    }
}

/// A row of the kanji table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KanjiRecord {
    pub kanji: char,
    #[serde(default)]
    pub meaning: String,
    /// Raw, marker annotated kun readings, e.g. `"*あ,い!"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub kun_reading: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub on_reading: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stroke_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub keyread: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub decomposition: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sequence: Option<f64>,
}

impl KanjiRecord {
    pub fn new(kanji: char, meaning: impl Into<String>) -> Self {
        Self {
            kanji,
            meaning: meaning.into(),
            kun_reading: String::new(),
            on_reading: String::new(),
            stroke_count: None,
            level: String::new(),
            subject: String::new(),
            keyread: String::new(),
            decomposition: String::new(),
            sequence: None,
        }
    }

    pub fn with_readings(mut self, kun: impl Into<String>, on: impl Into<String>) -> Self {
        self.kun_reading = kun.into();
        self.on_reading = on.into();
        self
    }
}

fn lenient_tag_ids<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let ids = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Number(n) => Some(n.to_string()),
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    };
    Ok(ids)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

fn lenient_group_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_full_hit() {
        let json = r#"{
            "term": "食べる",
            "reading": "たべる",
            "furigana": [{"ruby": "食", "rt": "た"}, {"ruby": "べる"}],
            "meanings": ["to eat"],
            "tags": "1,2",
            "frequency": 5,
            "group_id": 1
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.term, "食べる");
        assert_eq!(entry.tags, "1,2");
        assert_eq!(entry.frequency, Some(5.0));
        assert_eq!(entry.group_id, Some(1));
        let furigana = entry.furigana.unwrap();
        assert!(furigana[0].is_annotated());
        assert!(!furigana[1].is_annotated());
    }

    #[test]
    fn missing_optionals_do_not_fail() {
        let entry: Entry = serde_json::from_str(r#"{"term": "犬"}"#).unwrap();
        assert_eq!(entry.reading, "");
        assert_eq!(entry.tags, "");
        assert_eq!(entry.frequency, None);
        assert_eq!(entry.group_id, None);
        assert!(entry.meanings.is_empty());
    }

    #[test]
    fn malformed_tags_mean_no_tags() {
        let entry: Entry =
            serde_json::from_str(r#"{"term": "犬", "tags": {"bad": true}, "group": null}"#)
                .unwrap();
        assert_eq!(entry.tags, "");
        let entry: Entry = serde_json::from_str(r#"{"term": "犬", "tags": [3, 4]}"#).unwrap();
        assert_eq!(entry.tags, "3,4");
    }

    #[test]
    fn ruby_segments_fall_back_to_term() {
        let entry = Entry::new("犬", "いぬ");
        assert_eq!(
            entry.ruby_segments(),
            vec![FuriganaSegment::new("犬", Some("いぬ".into()))]
        );
    }

    #[test]
    fn frequency_key_formats_integers_plainly() {
        assert_eq!(frequency_key(5.0), "freq-5");
        assert_eq!(frequency_key(2.5), "freq-2.5");
    }
}
