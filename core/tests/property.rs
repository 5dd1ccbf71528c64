//! Property tests for the ranked lists and the top-5 query.

use proptest::prelude::*;
use search_core::{merge_top, DocumentKeywords, KeywordIndex, Occurrence, RankedList, TOP_MATCHES};
use std::collections::HashSet;

/// Each document gets a handful of keywords from a tiny vocabulary so lists
/// collide often and ties are common.
fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<(u8, u32)>>> {
    prop::collection::vec(prop::collection::vec((0u8..6, 1u32..5), 0..6), 1..20)
}

fn build(corpus: &[Vec<(u8, u32)>]) -> KeywordIndex {
    let mut idx = KeywordIndex::new();
    for (d, kws) in corpus.iter().enumerate() {
        let mut doc = DocumentKeywords::new(format!("doc{d}"));
        for &(k, f) in kws {
            doc.record_times(format!("kw{k}"), f);
        }
        idx.merge(doc).unwrap();
    }
    idx
}

fn ranked(freqs: Vec<u32>) -> Vec<u32> {
    let mut f = freqs;
    f.sort_unstable_by(|a, b| b.cmp(a));
    f
}

proptest! {
    #[test]
    fn lists_stay_ranked_and_unique(corpus in corpus_strategy()) {
        let idx = build(&corpus);
        for (_, list) in idx.iter() {
            prop_assert!(list.is_ranked());
            prop_assert!(list.iter().all(|o| o.frequency > 0 && idx.contains_document(&o.document)));
            let docs: HashSet<&str> = list.documents().collect();
            prop_assert_eq!(docs.len(), list.len());
        }
    }

    #[test]
    fn insert_last_lands_between_neighbours(prefix in prop::collection::vec(1u32..20, 0..40), new in 1u32..20) {
        let mut list = RankedList::new();
        for (i, f) in ranked(prefix).into_iter().enumerate() {
            list.push_ranked(Occurrence::new(format!("old{i}"), f));
        }
        let n = list.len();
        let mids = list.push_ranked(Occurrence::new("new", new));
        prop_assert_eq!(mids.is_none(), n == 0);
        if let Some(mids) = mids {
            prop_assert!(!mids.is_empty());
            prop_assert!(mids.iter().all(|&m| m < n));
        }

        let slice = list.as_slice();
        let pos = slice.iter().position(|o| o.document == "new").unwrap();
        if pos > 0 {
            prop_assert!(slice[pos - 1].frequency >= new);
        }
        if pos + 1 < slice.len() {
            prop_assert!(new >= slice[pos + 1].frequency);
        }
    }

    #[test]
    fn top_matches_is_bounded_and_deduplicated(corpus in corpus_strategy(), k1 in 0u8..8, k2 in 0u8..8) {
        let idx = build(&corpus);
        let (kw1, kw2) = (format!("kw{k1}"), format!("kw{k2}"));
        let both_empty = idx.occurrences(&kw1).is_empty() && idx.occurrences(&kw2).is_empty();
        match idx.top_matches(&kw1, &kw2) {
            None => prop_assert!(both_empty),
            Some(hits) => {
                prop_assert!(!both_empty);
                prop_assert!(!hits.is_empty() && hits.len() <= TOP_MATCHES);
                let unique: HashSet<&String> = hits.iter().collect();
                prop_assert_eq!(unique.len(), hits.len());
                for h in &hits {
                    let in_either = idx.occurrences(&kw1).iter().chain(idx.occurrences(&kw2)).any(|o| &o.document == h);
                    prop_assert!(in_either);
                }
            }
        }
    }

    #[test]
    fn merge_top_ranks_by_first_sighting(
        a in prop::collection::vec(1u32..10, 0..10),
        b in prop::collection::vec(1u32..10, 0..10),
    ) {
        let a: Vec<Occurrence> = ranked(a).into_iter().enumerate().map(|(i, f)| Occurrence::new(format!("d{}", i % 4), f)).collect();
        let b: Vec<Occurrence> = ranked(b).into_iter().enumerate().map(|(i, f)| Occurrence::new(format!("d{}", (i + 2) % 7), f)).collect();
        let hits = merge_top(&a, &b, TOP_MATCHES);

        // Rank frequency of each hit: the best frequency it was sighted with.
        let best = |d: &str| a.iter().chain(&b).filter(|o| o.document == d).map(|o| o.frequency).max().unwrap();
        let freqs: Vec<u32> = hits.iter().map(|d| best(*d)).collect();
        prop_assert!(freqs.windows(2).all(|w| w[0] >= w[1]));
    }
}
