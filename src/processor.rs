use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    color::{ColorAssigner, ColorMap, Hsl},
    dictionary::{frequency_key, Entry, TagRecord},
    errors::{JishoError, TableError},
    grouper::{group_entries, FrequencyRanked, GroupedResult},
    kanji::{kanji_in_term, KanjiDetail, KanjiSelection, KanjiTable},
    paginator::paginate,
    ptr::Ptr,
    query::SearchResponse,
    reference::ReferenceTables,
    settings::ProcessorOptions,
    tags::{count_tag_occurrences, filter_by_tag, resolve_tags, TagCounts, TagTable},
};

/// A hit together with its resolved tags, as handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedEntry {
    pub entry: Entry,
    pub tags: Vec<TagRecord>,
}

impl FrequencyRanked for AnnotatedEntry {
    fn frequency(&self) -> Option<f64> {
        self.entry.frequency
    }
    fn group_id(&self) -> Option<i64> {
        self.entry.group_id
    }
}

/// Everything the results area needs to draw the current page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    /// Grouped results of the current page.
    pub results: Vec<GroupedResult<AnnotatedEntry>>,
    /// Hits matching the selected tag, before grouping.
    pub total_results: usize,
    /// Hits before filtering.
    pub total_hits: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Number of grouped results on earlier pages.
    pub offset: usize,
    pub selected_tag: Option<String>,
    /// Counts over the unfiltered hits, for the tag selector.
    pub tag_counts: TagCounts,
    pub tag_colors: ColorMap,
    /// Keyed by `freq-<rank>`.
    pub frequency_colors: ColorMap,
}

impl ViewModel {
    /// 1-based position of the `index`-th result on this page.
    pub fn ordinal(&self, index: usize) -> usize {
        self.offset + index + 1
    }

    pub fn tag_color(&self, label: &str) -> Option<Hsl> {
        self.tag_colors.get(label).copied()
    }

    pub fn frequency_color(&self, rank: f64) -> Option<Hsl> {
        self.frequency_colors.get(&frequency_key(rank)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Resolved<'a> {
    entry: &'a Entry,
    tags: Vec<&'a TagRecord>,
}

impl FrequencyRanked for Resolved<'_> {
    fn frequency(&self) -> Option<f64> {
        self.entry.frequency
    }
    fn group_id(&self) -> Option<i64> {
        self.entry.group_id
    }
}

impl Resolved<'_> {
    fn annotate(&self) -> AnnotatedEntry {
        AnnotatedEntry {
            entry: self.entry.clone(),
            tags: self.tags.iter().map(|&t| t.clone()).collect(),
        }
    }
}

/// Derives the view model from scratch with the default colors.
///
/// Pure: identical inputs always give an identical [ViewModel].
pub fn recompute(
    hits: &[Entry],
    tags: &TagTable,
    selected_tag: Option<&str>,
    page: i64,
    page_size: i64,
) -> ViewModel {
    recompute_with(
        hits,
        tags,
        selected_tag,
        page,
        page_size,
        &ColorAssigner::default(),
    )
}

pub fn recompute_with(
    hits: &[Entry],
    tags: &TagTable,
    selected_tag: Option<&str>,
    page: i64,
    page_size: i64,
    colors: &ColorAssigner,
) -> ViewModel {
    let tag_counts = count_tag_occurrences(hits, tags);
    build_view(
        hits,
        tags,
        tag_counts,
        ViewRequest {
            selected_tag,
            page,
            page_size,
        },
        colors,
    )
}

struct ViewRequest<'a> {
    selected_tag: Option<&'a str>,
    page: i64,
    page_size: i64,
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, fields(hits = hits.len(), tag = ?req.selected_tag))
)]
fn build_view(
    hits: &[Entry],
    tags: &TagTable,
    tag_counts: TagCounts,
    req: ViewRequest<'_>,
    colors: &ColorAssigner,
) -> ViewModel {
    let selected_tag = req.selected_tag.filter(|t| !t.is_empty());
    let resolved: Vec<Resolved<'_>> = filter_by_tag(hits, tags, selected_tag)
        .into_iter()
        .map(|entry| Resolved {
            entry,
            tags: resolve_tags(&entry.tags, tags),
        })
        .collect();
    let total_results = resolved.len();

    let tag_colors =
        colors.color_map(resolved.iter().flat_map(|r| r.tags.iter().map(|t| t.tag.as_str())));
    let frequency_colors = colors.color_map(resolved.iter().filter_map(|r| r.entry.frequency_key()));

    let grouped = group_entries(resolved);
    let page = paginate(&grouped, req.page_size, req.page);
    let results = page
        .items
        .iter()
        .map(|g| g.clone().map(|r| r.annotate()))
        .collect();

    log::debug!(
        "recomputed view: {} hits, {} matching {:?}, {} groups, page {}/{}",
        hits.len(),
        total_results,
        selected_tag,
        grouped.len(),
        page.page,
        page.total_pages
    );

    ViewModel {
        results,
        total_results,
        total_hits: hits.len(),
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        offset: page.offset(),
        selected_tag: selected_tag.map(str::to_string),
        tag_counts,
        tag_colors,
        frequency_colors,
    }
}

#[derive(Clone, Debug)]
struct CachedCounts {
    hits_revision: u64,
    tags_revision: u64,
    counts: TagCounts,
}

/// Holds the current inputs for the results area and derives its
/// [ViewModel] on demand.
///
/// New hits, a new tag selection or a new tag table send the user back to
/// page 1. Tag counts are reused until the hits or the tag table change.
#[derive(Debug)]
pub struct ResultProcessor {
    options: ProcessorOptions,
    colors: ColorAssigner,
    tables: Ptr<ReferenceTables>,
    hits: Arc<Vec<Entry>>,
    hits_revision: u64,
    /// Tag table revision the current page was chosen under.
    seen_tags_revision: u64,
    selected_tag: Option<String>,
    page: i64,
    page_size: i64,
    kanji: KanjiSelection,
    counts: Option<CachedCounts>,
}

impl Default for ResultProcessor {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

impl ResultProcessor {
    pub fn new(options: ProcessorOptions) -> Self {
        Self::with_tables(options, Ptr::default())
    }

    /// Reads reference tables from `tables`, which a loader may keep a
    /// clone of and install into later.
    pub fn with_tables(options: ProcessorOptions, tables: Ptr<ReferenceTables>) -> Self {
        let seen_tags_revision = tables.with_ptr(ReferenceTables::tags_revision);
        Self {
            colors: ColorAssigner::new(options.color()),
            page_size: *options.page_size(),
            options,
            tables,
            hits: Arc::default(),
            hits_revision: 0,
            seen_tags_revision,
            selected_tag: None,
            page: 1,
            kanji: KanjiSelection::default(),
            counts: None,
        }
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Shared handle to the reference tables.
    pub fn tables(&self) -> Ptr<ReferenceTables> {
        self.tables.clone()
    }

    pub fn hits(&self) -> &[Entry] {
        &self.hits
    }

    /// Replaces the hit set. Clears the tag selection and goes to page 1.
    pub fn set_hits(&mut self, hits: Vec<Entry>) {
        self.hits = Arc::new(hits);
        self.hits_revision += 1;
        self.selected_tag = None;
        self.page = 1;
    }

    /// Decodes a search response and adopts its hits.
    ///
    /// Returns the number of hits. A malformed response leaves the current
    /// hits in place.
    pub fn set_hits_from_json(&mut self, json: &str) -> Result<usize, JishoError> {
        let response = SearchResponse::from_json(json)?;
        let count = response.results.len();
        self.set_hits(response.results);
        Ok(count)
    }

    pub fn select_tag(&mut self, tag: Option<String>) {
        self.selected_tag = tag.filter(|t| !t.is_empty());
        self.page = 1;
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    /// Clamped against the page count on the next [Self::view_model].
    pub fn set_page(&mut self, page: i64) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: i64) {
        self.page_size = page_size;
    }

    pub fn adopt_tag_table(&mut self, fetched: Result<TagTable, TableError>) -> bool {
        let changed = self.tables.with_ptr_mut(|t| t.adopt_tags(fetched));
        if changed {
            self.seen_tags_revision = self.tables.with_ptr(ReferenceTables::tags_revision);
            self.page = 1;
        }
        changed
    }

    pub fn adopt_kanji_table(&mut self, fetched: Result<KanjiTable, TableError>) -> bool {
        self.tables.with_ptr_mut(|t| t.adopt_kanji(fetched))
    }

    /// Derives the view for the current inputs.
    ///
    /// The clamped page is kept, so paging forward from the last page stays
    /// on the last page. A tag table installed since the last call, through
    /// this processor or any other handle, sends the user back to page 1.
    pub fn view_model(&mut self) -> ViewModel {
        let snapshot = self.tables.with_ptr(ReferenceTables::snapshot);
        if snapshot.tags_revision != self.seen_tags_revision {
            self.seen_tags_revision = snapshot.tags_revision;
            self.page = 1;
        }
        let counts = match &self.counts {
            Some(cached)
                if cached.hits_revision == self.hits_revision
                    && cached.tags_revision == snapshot.tags_revision =>
            {
                cached.counts.clone()
            }
            _ => {
                let counts = count_tag_occurrences(&self.hits, &snapshot.tags);
                self.counts = Some(CachedCounts {
                    hits_revision: self.hits_revision,
                    tags_revision: snapshot.tags_revision,
                    counts: counts.clone(),
                });
                counts
            }
        };
        let view = build_view(
            &self.hits,
            &snapshot.tags,
            counts,
            ViewRequest {
                selected_tag: self.selected_tag.as_deref(),
                page: self.page,
                page_size: self.page_size,
            },
            &self.colors,
        );
        self.page = view.page as i64;
        view
    }

    pub fn select_kanji(&mut self, kanji: Option<char>) {
        self.kanji.select_kanji(kanji);
    }

    pub fn is_selected(&self, kanji: char) -> bool {
        self.kanji.is_selected(kanji)
    }

    /// Detail record of the selected kanji, if it is in the kanji table.
    pub fn selected_kanji(&self) -> Option<KanjiDetail> {
        self.tables.with_ptr(|t| self.kanji.detail(t.kanji()))
    }

    /// Characters of `term` that can be opened in the kanji popup.
    pub fn selectable_kanji(&self, term: &str) -> Vec<char> {
        self.tables.with_ptr(|t| kanji_in_term(term, t.kanji()))
    }
}
