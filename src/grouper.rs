use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dictionary::Entry;

/// Anything that can be clustered by group id and ordered by frequency.
pub trait FrequencyRanked {
    fn frequency(&self) -> Option<f64>;
    fn group_id(&self) -> Option<i64>;
}

impl FrequencyRanked for Entry {
    fn frequency(&self) -> Option<f64> {
        self.frequency
    }
    fn group_id(&self) -> Option<i64> {
        self.group_id
    }
}

impl<T: FrequencyRanked + ?Sized> FrequencyRanked for &T {
    fn frequency(&self) -> Option<f64> {
        (**self).frequency()
    }
    fn group_id(&self) -> Option<i64> {
        (**self).group_id()
    }
}

/// Either a lone hit or a cluster of variants sharing a group id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GroupedResult<T> {
    Single(T),
    Group {
        /// Member with the highest frequency rank.
        representative: T,
        /// Remaining members, frequency descending.
        others: Vec<T>,
        group_id: i64,
    },
}

impl<T> GroupedResult<T> {
    /// The entry shown on the card: the single hit or the representative.
    pub fn head(&self) -> &T {
        match self {
            GroupedResult::Single(entry) => entry,
            GroupedResult::Group { representative, .. } => representative,
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            GroupedResult::Single(_) => 1,
            GroupedResult::Group { others, .. } => others.len() + 1,
        }
    }

    pub fn group_id(&self) -> Option<i64> {
        match self {
            GroupedResult::Single(_) => None,
            GroupedResult::Group { group_id, .. } => Some(*group_id),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &T> {
        let others: &[T] = match self {
            GroupedResult::Single(_) => &[],
            GroupedResult::Group { others, .. } => others,
        };
        std::iter::once(self.head()).chain(others)
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> GroupedResult<U> {
        match self {
            GroupedResult::Single(entry) => GroupedResult::Single(f(entry)),
            GroupedResult::Group {
                representative,
                others,
                group_id,
            } => GroupedResult::Group {
                representative: f(representative),
                others: others.into_iter().map(f).collect(),
                group_id,
            },
        }
    }
}

/// Descending by rank; a missing rank sorts after every present one,
/// including zero.
pub fn compare_rank(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

enum Slot<T> {
    Single(T),
    Group(i64),
}

/// Partitions `entries` into singles and ranked groups, then orders the
/// lot by head frequency.
///
/// Both sorts are stable. Each group sits at the position of its first
/// member before the final sort, so equal ranks keep input order.
pub fn group_entries<T, I>(entries: I) -> Vec<GroupedResult<T>>
where
    T: FrequencyRanked,
    I: IntoIterator<Item = T>,
{
    let mut slots: Vec<Slot<T>> = Vec::new();
    let mut buckets: IndexMap<i64, Vec<T>> = IndexMap::new();

    for entry in entries {
        match entry.group_id() {
            None => slots.push(Slot::Single(entry)),
            Some(id) => {
                let bucket = buckets.entry(id).or_default();
                if bucket.is_empty() {
                    slots.push(Slot::Group(id));
                }
                bucket.push(entry);
            }
        }
    }

    let mut results: Vec<GroupedResult<T>> = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Slot::Single(entry) => results.push(GroupedResult::Single(entry)),
            Slot::Group(id) => {
                let Some(mut members) = buckets.swap_remove(&id) else {
                    continue;
                };
                members.sort_by(|a, b| compare_rank(a.frequency(), b.frequency()));
                let mut members = members.into_iter();
                if let Some(representative) = members.next() {
                    results.push(GroupedResult::Group {
                        representative,
                        others: members.collect(),
                        group_id: id,
                    });
                }
            }
        }
    }

    results.sort_by(|a, b| compare_rank(a.head().frequency(), b.head().frequency()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_hits;
    use pretty_assertions::assert_eq;

    fn terms<'a>(result: &GroupedResult<&'a Entry>) -> Vec<&'a str> {
        result.members().map(|e| e.term.as_str()).collect()
    }

    #[test]
    fn single_outranks_group() {
        let hits = vec![
            Entry::new("食べる", "たべる").with_frequency(5.0).with_group(1),
            Entry::new("食べます", "たべます").with_frequency(3.0).with_group(1),
            Entry::new("犬", "いぬ").with_frequency(9.0),
        ];
        let grouped = group_entries(&hits);
        assert_eq!(grouped.len(), 2);
        assert!(matches!(grouped[0], GroupedResult::Single(e) if e.term == "犬"));
        match &grouped[1] {
            GroupedResult::Group {
                representative,
                others,
                group_id,
            } => {
                assert_eq!(representative.term, "食べる");
                assert_eq!(others.len(), 1);
                assert_eq!(others[0].term, "食べます");
                assert_eq!(*group_id, 1);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn representative_has_highest_rank() {
        let hits = sample_hits();
        for result in group_entries(&hits) {
            if let GroupedResult::Group {
                representative,
                others,
                ..
            } = &result
            {
                for other in others {
                    assert_ne!(
                        compare_rank(other.frequency, representative.frequency),
                        Ordering::Less
                    );
                }
            }
        }
    }

    #[test]
    fn missing_rank_is_lower_than_zero() {
        let hits = vec![
            Entry::new("none", ""),
            Entry::new("zero", "").with_frequency(0.0),
        ];
        let grouped = group_entries(&hits);
        let heads: Vec<_> = grouped.iter().map(|g| g.head().term.as_str()).collect();
        assert_eq!(heads, vec!["zero", "none"]);
    }

    #[test]
    fn others_are_frequency_descending() {
        let hits = vec![
            Entry::new("a", "").with_group(7),
            Entry::new("b", "").with_frequency(1.0).with_group(7),
            Entry::new("c", "").with_frequency(4.0).with_group(7),
            Entry::new("d", "").with_frequency(1.0).with_group(7),
        ];
        let grouped = group_entries(&hits);
        assert_eq!(grouped.len(), 1);
        assert_eq!(terms(&grouped[0]), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let hits = vec![
            Entry::new("x", "").with_frequency(2.0),
            Entry::new("g1", "").with_frequency(2.0).with_group(1),
            Entry::new("y", "").with_frequency(2.0),
            Entry::new("u", ""),
            Entry::new("v", ""),
        ];
        let grouped = group_entries(&hits);
        let heads: Vec<_> = grouped.iter().map(|g| g.head().term.as_str()).collect();
        assert_eq!(heads, vec!["x", "g1", "y", "u", "v"]);
    }

    #[test]
    fn lone_member_group_has_no_others() {
        let hits = vec![Entry::new("solo", "").with_frequency(1.0).with_group(3)];
        let grouped = group_entries(&hits);
        assert_eq!(grouped[0].len(), 1);
        assert_eq!(grouped[0].group_id(), Some(3));
        assert_eq!(grouped[0].head().term, "solo");
    }

    #[test]
    fn every_entry_lands_exactly_once() {
        let hits = sample_hits();
        let grouped = group_entries(&hits);
        let total: usize = grouped.iter().map(GroupedResult::len).sum();
        assert_eq!(total, hits.len());
    }
}
