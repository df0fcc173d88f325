use std::sync::LazyLock;

use crate::{
    dictionary::{Entry, FuriganaSegment, KanjiRecord, TagRecord},
    kanji::KanjiTable,
    tags::TagTable,
};

pub(crate) static TAG_TABLE: LazyLock<TagTable> = LazyLock::new(|| {
    TagTable::from_records([
        TagRecord::new(1, "v1", "Ichidan verb"),
        TagRecord::new(2, "vt", "transitive verb"),
        TagRecord::new(3, "n", "noun (common) (futsuumeishi)"),
        TagRecord::new(4, "uk", "word usually written using kana alone"),
        TagRecord::new(5, "adj-i", "adjective (keiyoushi)"),
    ])
});

pub(crate) static KANJI_TABLE: LazyLock<KanjiTable> = LazyLock::new(|| {
    KanjiTable::from_records([
        KanjiRecord::new('食', "eat, food").with_readings("た!,く,*うけ", "ショク!,ジキ"),
        KanjiRecord::new('犬', "dog").with_readings("いぬ!", "ケン!"),
        KanjiRecord::new('高', "tall, high").with_readings("たか!,*たかし", "コウ!"),
    ])
});

/// Two variant groups, a few singles, one unknown tag id and two hits
/// without a frequency.
pub(crate) fn sample_hits() -> Vec<Entry> {
    vec![
        Entry::new("食べる", "たべる")
            .with_furigana(vec![
                FuriganaSegment::new("食", Some("た".into())),
                FuriganaSegment::new("べる", None),
            ])
            .with_meanings(&["to eat"])
            .with_tags("1,2")
            .with_frequency(5.0)
            .with_group(1),
        Entry::new("食べます", "たべます")
            .with_meanings(&["to eat (polite)"])
            .with_tags("1")
            .with_frequency(3.0)
            .with_group(1),
        Entry::new("犬", "いぬ")
            .with_meanings(&["dog"])
            .with_tags("3")
            .with_frequency(9.0),
        Entry::new("猫", "ねこ")
            .with_meanings(&["cat"])
            .with_tags("3,4"),
        Entry::new("高い", "たかい")
            .with_meanings(&["high", "tall", "expensive"])
            .with_tags("5")
            .with_frequency(7.0)
            .with_group(2),
        Entry::new("高かった", "たかかった")
            .with_meanings(&["was high"])
            .with_tags("5")
            .with_group(2),
        Entry::new("食う", "くう")
            .with_meanings(&["to eat (vulgar)"])
            .with_tags("2,99")
            .with_frequency(5.0),
    ]
}
