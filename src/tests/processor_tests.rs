use std::thread;

use pretty_assertions::assert_eq;

use crate::{
    grouper::GroupedResult,
    kanji::KanjiTable,
    processor::{recompute, ResultProcessor},
    ptr::Ptr,
    query::{SearchInput, SearchMode, SearchRequest, SearchResponse},
    reading::ReadingKind,
    reference::ReferenceTables,
    settings::ProcessorOptions,
    tags::TagTable,
    test_utils::{sample_hits, KANJI_TABLE, TAG_TABLE},
    Entry, TagRecord,
};

const RESPONSE: &str = r#"{
    "results": [
        {"term": "食べる", "reading": "たべる", "meanings": ["to eat"], "tags": "1,2", "frequency": 5, "group_id": 1},
        {"term": "食べます", "reading": "たべます", "meanings": ["to eat"], "tags": "1", "frequency": 3, "group_id": 1},
        {"term": "犬", "reading": "いぬ", "meanings": ["dog"], "tags": "3", "frequency": 9, "group_id": null},
        {"term": "猫", "reading": "ねこ", "meanings": ["cat"], "tags": null}
    ]
}"#;

const TAGS: &str = r#"[
    {"id": 1, "tag": "v1", "description": "Ichidan verb"},
    {"id": 2, "tag": "vt", "description": "transitive verb"},
    {"id": 3, "tag": "n", "description": "noun"}
]"#;

const KANJI: &str = r#"[
    {"kanji": "食", "meaning": "eat", "kun_reading": "た!,く", "on_reading": "ショク!,ジキ",
     "stroke_count": 9, "level": "2", "subject": "", "keyread": "", "decomposition": "人良", "sequence": 322}
]"#;

#[test]
fn json_to_view_model() {
    let response = SearchResponse::from_json(RESPONSE).unwrap();
    let tables = Ptr::new(ReferenceTables::default());
    let mut processor = ResultProcessor::with_tables(ProcessorOptions::default(), tables.clone());
    processor.set_hits(response.results);

    // tables arrive after the hits
    let before = processor.view_model();
    assert!(before.tag_counts.is_empty());

    let loader = tables.clone();
    thread::spawn(move || {
        loader.with_ptr_mut(|t| {
            t.adopt_tags(TagTable::from_json(TAGS));
            t.adopt_kanji(KanjiTable::from_json(KANJI));
        })
    })
    .join()
    .unwrap();

    let view = processor.view_model();
    assert_eq!(view.tag_counts.get("v1"), Some(&2));
    assert_eq!(view.tag_counts.get("n"), Some(&1));
    assert_eq!(view.results.len(), 3);
    match &view.results[0] {
        GroupedResult::Single(e) => assert_eq!(e.entry.term, "犬"),
        other => panic!("expected 犬 first, got {other:?}"),
    }
    match &view.results[1] {
        GroupedResult::Group {
            representative,
            others,
            group_id,
        } => {
            assert_eq!(representative.entry.term, "食べる");
            assert_eq!(others[0].entry.term, "食べます");
            assert_eq!(*group_id, 1);
        }
        other => panic!("expected group second, got {other:?}"),
    }

    assert_eq!(processor.selectable_kanji("食べる"), vec!['食']);
    processor.select_kanji(Some('食'));
    assert!(processor.is_selected('食'));
    let detail = processor.selected_kanji().unwrap();
    assert_eq!(detail.record.decomposition, "人良");
    assert_eq!(detail.on[0].kind, ReadingKind::Common);
    processor.select_kanji(None);
    assert!(processor.selected_kanji().is_none());
}

#[test]
fn table_installed_elsewhere_resets_page() {
    let tables = Ptr::new(ReferenceTables::new(TAG_TABLE.clone(), KanjiTable::default()));
    let mut processor = ResultProcessor::with_tables(ProcessorOptions::default(), tables.clone());
    processor.set_hits(sample_hits());
    processor.select_tag(Some("n".into()));
    processor.set_page_size(1);
    processor.set_page(2);
    assert_eq!(processor.view_model().page, 2);

    let nouns = TagTable::from_records((2..=5).map(|id| TagRecord::new(id, "n", "noun")));
    tables.with_ptr_mut(|t| t.install_tags(nouns));

    let view = processor.view_model();
    assert_eq!(view.page, 1);
    assert_eq!(view.total_results, 6);
    assert_eq!(view.results[0].head().entry.term, "犬");
}

#[test]
fn page_size_zero_on_37_results() {
    let hits: Vec<Entry> = (0..37)
        .map(|i| Entry::new(format!("語{i}"), "").with_frequency(f64::from(i)))
        .collect();
    let view = recompute(&hits, &TAG_TABLE, None, 1, 0);
    assert_eq!(view.page_size, 1);
    assert_eq!(view.total_pages, 37);
    assert_eq!(view.results.len(), 1);
    assert_eq!(view.results[0].head().entry.term, "語36");
}

#[test]
fn pages_concatenate_to_full_ordering() {
    let hits = sample_hits();
    let full = recompute(&hits, &TAG_TABLE, None, 1, i64::MAX);
    for size in 1..=4 {
        let total = recompute(&hits, &TAG_TABLE, None, 1, size).total_pages;
        let joined: Vec<_> = (1..=total as i64)
            .flat_map(|k| recompute(&hits, &TAG_TABLE, None, k, size).results)
            .collect();
        assert_eq!(joined, full.results, "page size {size}");
    }
}

#[test]
fn colors_are_stable_across_filters() {
    let hits = sample_hits();
    let all = recompute(&hits, &TAG_TABLE, None, 1, 20);
    let verbs = recompute(&hits, &TAG_TABLE, Some("v1"), 1, 20);
    assert_eq!(all.tag_color("vt"), verbs.tag_color("vt"));
    assert_eq!(all.frequency_color(5.0), verbs.frequency_color(5.0));
}

#[test]
fn kanji_table_fixture_lookups() {
    let detail = KANJI_TABLE.detail('高').unwrap();
    assert_eq!(detail.kun[1].kind, ReadingKind::Nanori);
    assert_eq!(detail.kun[1].text, "たかし");
}

#[test]
fn search_then_fallback_flow() {
    let request = SearchRequest::build(&SearchInput::new("Welcome"), SearchMode::Exact).unwrap();
    let empty = SearchResponse::from_json(r#"{"results": []}"#).unwrap();
    let retry = request.fallback(empty.results.len()).unwrap();
    assert_eq!(retry.params(), [("query", "welcome"), ("mode", "en_any")]);
}
