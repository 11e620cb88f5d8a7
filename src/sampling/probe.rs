use indexmap::IndexSet;
use indicatif::ProgressBar;
use rand::Rng;
use rand::seq::index::{self, IndexVec};
use crate::errors::{DownSampleError, Result};
use crate::index_structure::inverted_index::InvertedIndex;
use crate::table::Table;
use crate::tokenizer::{RowTokenizer, TokenSet};

/// Counters collected while probing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    pub rows_probed: usize,
    /// Positions drawn from index hits, summed over rows (before deduplication).
    pub positives: usize,
    /// Positions drawn from the non-hit pool, summed over rows (before deduplication).
    pub negatives: usize,
}

/// Accumulated S positions (the sample set) together with probe counters.
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    pub positions: IndexSet<u32>,
    pub stats: ProbeStats,
}

/// Draws `amount` distinct indices uniformly from `0..length`.
///
/// # Errors
///
/// Returns `DownSampleError::InsufficientPool` when `amount > length`; the
/// request is never clamped.
pub fn draw_distinct<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    amount: usize,
) -> Result<IndexVec> {
    if amount > length {
        return Err(DownSampleError::InsufficientPool {
            requested: amount,
            available: length,
        });
    }
    Ok(index::sample(rng, length, amount))
}

/// Unions the postings of every token found in the index.
///
/// Tokens that are not in the index contribute nothing. The result keeps the
/// order in which positions were first seen.
pub fn gather_candidates(tokens: &TokenSet, s_index: &InvertedIndex) -> IndexSet<u32> {
    let mut candidates = IndexSet::new();
    for token in tokens {
        if let Some(positions) = s_index.get(token) {
            candidates.extend(positions.iter().copied());
        }
    }
    candidates
}

/// Maps `i` to the `i`-th position (0-based) of `0..` that is not in `excluded`.
///
/// `excluded` must be sorted ascending and free of duplicates.
#[inline]
fn nth_outside(i: u32, excluded: &[u32]) -> u32 {
    let mut position = i;
    for &e in excluded {
        if e <= position {
            position += 1;
        } else {
            break;
        }
    }
    position
}

/// Probes the S index with every row of `b_rows` and accumulates a sample of S positions.
///
/// For each row, with `y_pos = y / 2` and `M` the row's candidate positions:
/// 1. `k = min(y_pos, |M|)` positives are drawn from `M` without replacement.
/// 2. `y - k` negatives are drawn without replacement from the positions of
///    `0..s_tbl_sz` that were not picked as positives for this row.
/// 3. Both draws are added to the accumulated set; duplicates across rows collapse.
///
/// `progress` is advanced once per row and has no influence on the result.
///
/// # Errors
///
/// * `InsufficientPool` if a row needs more negatives than its pool holds
///   (`y - k > s_tbl_sz - k`).
/// * `InvalidArgument` if the index covers more rows than `s_tbl_sz`.
/// * Arrow errors from reading the text columns of `b_rows`.
pub fn probe_index<R: Rng + ?Sized>(
    b_rows: &Table,
    y: usize,
    s_tbl_sz: u32,
    s_index: &InvertedIndex,
    rng: &mut R,
    progress: &ProgressBar,
) -> Result<ProbeResult> {
    if s_index.num_positions() > s_tbl_sz {
        return Err(DownSampleError::InvalidArgument(format!(
            "index covers {} rows but the S table size is {}",
            s_index.num_positions(),
            s_tbl_sz
        )));
    }

    let y_pos = y / 2;
    let tokenizer = RowTokenizer::new(b_rows)?;
    let mut result = ProbeResult::default();

    for row in 0..tokenizer.num_rows() {
        progress.inc(1);

        let tokens = tokenizer.tokenize(row);
        let candidates = gather_candidates(&tokens, s_index);

        // Positives
        let k = y_pos.min(candidates.len());
        let mut positives: Vec<u32> = draw_distinct(rng, candidates.len(), k)?
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        positives.sort_unstable();

        // Negatives, drawn from 0..s_tbl_sz without this row's positives
        let pool_size = s_tbl_sz as usize - k;
        let needed = y - k;
        let negatives: Vec<u32> = draw_distinct(rng, pool_size, needed)?
            .into_iter()
            .map(|i| nth_outside(i as u32, &positives))
            .collect();

        tracing::trace!(
            row,
            tokens = tokens.len(),
            candidates = candidates.len(),
            positives = positives.len(),
            negatives = negatives.len(),
            "Probed row"
        );

        result.stats.rows_probed += 1;
        result.stats.positives += positives.len();
        result.stats.negatives += negatives.len();
        result.positions.extend(positives);
        result.positions.extend(negatives);
    }

    progress.finish_and_clear();

    tracing::debug!(
        rows = result.stats.rows_probed,
        positives = result.stats.positives,
        negatives = result.stats.negatives,
        sampled = result.positions.len(),
        "Index probe complete"
    );

    Ok(result)
}

// Link to test module (only compiled during tests)
#[cfg(test)]
#[path = "tests/probe_tests.rs"]
mod tests;
