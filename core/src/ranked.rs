use crate::Occurrence;
use serde::{Deserialize, Serialize};

/// Occurrences of one keyword, kept in non-increasing frequency order.
///
/// A document appears at most once per list; the extractor has already
/// folded every sighting within a document into a single frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedList(Vec<Occurrence>);

impl RankedList {
    pub fn new() -> Self { Self::default() }

    pub fn single(occurrence: Occurrence) -> Self { Self(vec![occurrence]) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> { self.0.iter() }

    pub fn as_slice(&self) -> &[Occurrence] { &self.0 }

    /// Document names in rank order.
    pub fn documents(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|o| o.document.as_str())
    }

    pub fn contains_document(&self, document: &str) -> bool {
        self.0.iter().any(|o| o.document == document)
    }

    /// True when every frequency is >= the one after it.
    pub fn is_ranked(&self) -> bool {
        self.0.windows(2).all(|w| w[0].frequency >= w[1].frequency)
    }

    /// Append `occurrence` and move it to its ranked position.
    pub fn push_ranked(&mut self, occurrence: Occurrence) -> Option<Vec<usize>> {
        self.0.push(occurrence);
        self.insert_last()
    }

    /// Move the last element into place, assuming everything before it is
    /// already ranked.
    ///
    /// Binary search over the prefix with inclusive bounds, `mid = (lo + hi) / 2`.
    /// On the first midpoint whose frequency equals the new one, the new
    /// occurrence is inserted right there, ahead of that element. So at equal
    /// frequency the most recently merged document tends to rank first, but the
    /// exact slot inside a run of ties is wherever the search lands first.
    /// When no equal frequency is probed, the element goes to `lo` once the
    /// bounds cross.
    ///
    /// Returns the midpoints probed, in order, or `None` when the list has at
    /// most one element and there is nothing to search.
    pub fn insert_last(&mut self) -> Option<Vec<usize>> {
        if self.0.len() <= 1 {
            return None;
        }
        let last = self.0.pop()?;
        let freq = last.frequency;

        let mut midpoints = Vec::new();
        // `hi` is exclusive here so it never underflows; `mid` matches the
        // inclusive formulation (lo + (hi - 1)) / 2.
        let mut lo = 0usize;
        let mut hi = self.0.len();
        let mut slot = None;
        while lo < hi {
            let mid = (lo + hi - 1) / 2;
            midpoints.push(mid);
            let mid_freq = self.0[mid].frequency;
            if freq < mid_freq {
                lo = mid + 1;
            } else if freq > mid_freq {
                hi = mid;
            } else {
                slot = Some(mid);
                break;
            }
        }
        self.0.insert(slot.unwrap_or(lo), last);
        debug_assert!(self.is_ranked(), "ranked list out of order after insert");
        Some(midpoints)
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(freqs: &[u32]) -> RankedList {
        RankedList(
            freqs
                .iter()
                .enumerate()
                .map(|(i, &f)| Occurrence::new(format!("d{i}"), f))
                .collect(),
        )
    }

    fn freqs(l: &RankedList) -> Vec<u32> { l.iter().map(|o| o.frequency).collect() }

    #[test]
    fn single_element_returns_none() {
        let mut l = list(&[3]);
        assert_eq!(l.insert_last(), None);
        assert_eq!(freqs(&l), vec![3]);
    }

    #[test]
    fn empty_list_returns_none() {
        let mut l = RankedList::new();
        assert_eq!(l.insert_last(), None);
        assert!(l.is_empty());
    }

    #[test]
    fn inserts_in_the_middle() {
        let mut l = list(&[12, 8, 7, 5, 3, 2, 6]);
        let mids = l.insert_last().unwrap();
        assert_eq!(freqs(&l), vec![12, 8, 7, 6, 5, 3, 2]);
        // prefix has 6 elements: probes 2 (7), 4 (3), 3 (5)
        assert_eq!(mids, vec![2, 4, 3]);
    }

    #[test]
    fn inserts_at_front_and_back() {
        let mut l = list(&[5, 4, 9]);
        assert_eq!(l.insert_last(), Some(vec![0]));
        assert_eq!(freqs(&l), vec![9, 5, 4]);

        let mut l = list(&[5, 4, 1]);
        assert_eq!(l.insert_last(), Some(vec![0, 1]));
        assert_eq!(freqs(&l), vec![5, 4, 1]);
        assert_eq!(l.as_slice()[2].document, "d2");
    }

    #[test]
    fn tie_goes_ahead_of_first_equal_probe() {
        let mut l = list(&[9, 5, 5, 5, 1, 5]);
        let mids = l.insert_last().unwrap();
        assert_eq!(mids, vec![2]);
        let docs: Vec<&str> = l.documents().collect();
        assert_eq!(docs, vec!["d0", "d1", "d5", "d2", "d3", "d4"]);
    }

    #[test]
    fn tie_with_two_element_prefix() {
        let mut l = list(&[4, 4, 4]);
        assert_eq!(l.insert_last(), Some(vec![0]));
        let docs: Vec<&str> = l.documents().collect();
        assert_eq!(docs, vec!["d2", "d0", "d1"]);
    }

    #[test]
    fn push_ranked_keeps_order() {
        let mut l = RankedList::new();
        for (i, f) in [3u32, 7, 1, 7, 4, 2, 9].into_iter().enumerate() {
            l.push_ranked(Occurrence::new(format!("d{i}"), f));
            assert!(l.is_ranked());
        }
        assert_eq!(freqs(&l), vec![9, 7, 7, 4, 3, 2, 1]);
    }
}
