//! Fuzzy text and tag-set similarity.
//!
//! `similarity` is a Ratcliff/Obershelp ratio: the longest common block is found, the
//! procedure recurses on the unmatched text to its left and right, and the total matched
//! length `M` yields `2M / (|a| + |b|)`. Inputs are case-folded and compared per Unicode
//! scalar value so non-Latin titles behave the same as ASCII ones.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Ratio in `[0.0, 1.0]`; `1.0` when the case-folded inputs are equal.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    // Matching is order sensitive when several longest blocks tie, so a canonical order
    // keeps the ratio symmetric.
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let total = first.len() + second.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&first, &second);
    (2 * matched) as f64 / total as f64
}

/// `|A ∩ B| / max(|A ∪ B|, 1)`; two empty sets overlap by `0.0`.
pub fn overlap<T, I, J>(left: I, right: J) -> f64
where
    T: Ord,
    I: IntoIterator<Item = T>,
    J: IntoIterator<Item = T>,
{
    let left: BTreeSet<T> = left.into_iter().collect();
    let right: BTreeSet<T> = right.into_iter().collect();

    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    intersection as f64 / union.max(1) as f64
}

fn matching_characters<T: Eq + Hash>(a: &[T], b: &[T]) -> usize {
    let mut positions: HashMap<&T, Vec<usize>> = HashMap::new();
    for (index, item) in b.iter().enumerate() {
        positions.entry(item).or_default().push(index);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let block = longest_block(a, &positions, a_lo, a_hi, b_lo, b_hi);
        if block.size == 0 {
            continue;
        }

        matched += block.size;
        if a_lo < block.a_start && b_lo < block.b_start {
            pending.push((a_lo, block.a_start, b_lo, block.b_start));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < a_hi && b_end < b_hi {
            pending.push((a_end, a_hi, b_end, b_hi));
        }
    }

    matched
}

struct Block {
    a_start: usize,
    b_start: usize,
    size: usize,
}

/// Longest block shared by `a[a_lo..a_hi]` and `b[b_lo..b_hi]`, earliest in `a` on ties.
fn longest_block<T: Eq + Hash>(
    a: &[T],
    positions: &HashMap<&T, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> Block {
    let mut best = Block {
        a_start: a_lo,
        b_start: b_lo,
        size: 0,
    };
    // run length of the match ending at b[j], for the previous row of `a`
    let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

    for (i, item) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_runs = HashMap::new();
        if let Some(indices) = positions.get(item) {
            for &j in indices {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let run = j
                    .checked_sub(1)
                    .and_then(|previous| run_ending_at.get(&previous))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, run);
                if run > best.size {
                    best = Block {
                        a_start: i + 1 - run,
                        b_start: j + 1 - run,
                        size: run,
                    };
                }
            }
        }
        run_ending_at = next_runs;
    }

    best
}
