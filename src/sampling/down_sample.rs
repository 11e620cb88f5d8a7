use rand::Rng;
use crate::catalog::Catalog;
use crate::errors::{DownSampleError, Result};
use crate::index_structure::inverted_index::InvertedIndex;
use crate::sampling::config::{probe_progress_bar, SampleConfig};
use crate::sampling::probe::{draw_distinct, probe_index, ProbeStats};
use crate::table::{positions_len, Table};

/// The two samples produced by one down-sampling call.
#[derive(Debug, Clone)]
pub struct DownSampleResult {
    s_sample: Table,
    b_sample: Table,
    s_positions: Vec<u32>,
    b_positions: Vec<u32>,
    stats: ProbeStats,
}

impl DownSampleResult {
    /// Sampled rows of S, in ascending original position.
    pub fn s_sample(&self) -> &Table {
        &self.s_sample
    }

    /// Sampled rows of B, in ascending original position.
    pub fn b_sample(&self) -> &Table {
        &self.b_sample
    }

    /// Original S positions of the rows in [`Self::s_sample`].
    pub fn s_positions(&self) -> &[u32] {
        &self.s_positions
    }

    /// Original B positions of the rows in [`Self::b_sample`].
    pub fn b_positions(&self) -> &[u32] {
        &self.b_positions
    }

    pub fn stats(&self) -> ProbeStats {
        self.stats
    }

    /// Consumes the result, returning `(s_sample, b_sample)`.
    pub fn into_tables(self) -> (Table, Table) {
        (self.s_sample, self.b_sample)
    }
}

/// Down-samples S and B using a thread-local random source.
///
/// See [`down_sample_with_rng`] for the algorithm and errors.
pub fn down_sample<C: Catalog + ?Sized>(
    s_table: &Table,
    b_table: &Table,
    size: usize,
    y: usize,
    catalog: &mut C,
) -> Result<DownSampleResult> {
    down_sample_with_config(s_table, b_table, size, y, catalog, &SampleConfig::default())
}

/// Down-samples S and B with the seed and progress settings of `config`.
///
/// Two calls with the same seed and the same inputs return identical samples.
pub fn down_sample_with_config<C: Catalog + ?Sized>(
    s_table: &Table,
    b_table: &Table,
    size: usize,
    y: usize,
    catalog: &mut C,
    config: &SampleConfig,
) -> Result<DownSampleResult> {
    let mut rng = config.rng();
    run(s_table, b_table, size, y, catalog, &mut rng, config.show_progress)
}

/// Down-samples S and B, drawing every random choice from `rng`.
///
/// 1. `b_sample_size = min(size, len(B))`; a warning is logged when B is smaller
///    than `size`.
/// 2. An inverted index is built over all of S.
/// 3. `b_sample_size` distinct B positions are drawn uniformly.
/// 4. Those B rows probe the index; each contributes up to `y / 2` positive S
///    positions (token overlap) and enough random negatives to reach `y`.
/// 5. S and B are sliced to the sampled positions, ascending.
/// 6. The catalog copies each source table's metadata onto its sample.
///
/// # Errors
///
/// * `InvalidArgument` if S or B is empty, or `size` or `y` is zero.
/// * `InsufficientPool` if `y` is too large for S (see [`probe_index`]).
/// * `MetadataCopy` if the catalog rejects either copy. Nothing is returned in
///   that case and metadata already copied onto the S sample is discarded.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{Int64Array, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use downsample::{down_sample_with_rng, InMemoryCatalog, Table};
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("id", DataType::Int64, false),
///     Field::new("title", DataType::Utf8, false),
/// ]));
/// let s = Table::try_new(schema.clone(), vec![
///     Arc::new(Int64Array::from((0..6).collect::<Vec<i64>>())),
///     Arc::new(StringArray::from(vec!["red apple", "pear", "plum", "fig", "lime", "apple pie"])),
/// ]).unwrap();
/// let b = Table::try_new(schema, vec![
///     Arc::new(Int64Array::from(vec![0, 1])),
///     Arc::new(StringArray::from(vec!["apple", "kiwi"])),
/// ]).unwrap();
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.set_key(&s, "id").unwrap();
/// catalog.set_key(&b, "id").unwrap();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let result = down_sample_with_rng(&s, &b, 1, 2, &mut catalog, &mut rng).unwrap();
/// assert_eq!(result.b_sample().len(), 1);
/// assert!(result.s_sample().len() <= 2);
/// ```
pub fn down_sample_with_rng<C: Catalog + ?Sized, R: Rng + ?Sized>(
    s_table: &Table,
    b_table: &Table,
    size: usize,
    y: usize,
    catalog: &mut C,
    rng: &mut R,
) -> Result<DownSampleResult> {
    run(s_table, b_table, size, y, catalog, rng, false)
}

fn run<C: Catalog + ?Sized, R: Rng + ?Sized>(
    s_table: &Table,
    b_table: &Table,
    size: usize,
    y: usize,
    catalog: &mut C,
    rng: &mut R,
    show_progress: bool,
) -> Result<DownSampleResult> {
    validate_arguments(s_table, b_table, size, y)?;

    if b_table.len() < size {
        tracing::warn!(
            b_rows = b_table.len(),
            size,
            "Size of table B is less than the requested sample size; using entire table B"
        );
    }
    let b_sample_size = size.min(b_table.len());
    let s_tbl_sz = positions_len(s_table)?;
    let b_tbl_sz = positions_len(b_table)?;

    let s_index = InvertedIndex::build(s_table)?;

    let mut b_positions: Vec<u32> = draw_distinct(rng, b_tbl_sz as usize, b_sample_size)?
        .into_iter()
        .map(|p| p as u32)
        .collect();
    b_positions.sort_unstable();

    let b_rows = b_table.take_positions(&b_positions)?;
    let progress = probe_progress_bar(show_progress, b_rows.len());
    let probed = probe_index(&b_rows, y, s_tbl_sz, &s_index, rng, &progress)?;

    let mut s_positions: Vec<u32> = probed.positions.into_iter().collect();
    s_positions.sort_unstable();

    let s_sample = s_table.take_positions(&s_positions)?;

    catalog.copy_properties(s_table, &s_sample)?;
    if let Err(e) = catalog.copy_properties(b_table, &b_rows) {
        catalog.discard(s_sample.id());
        return Err(DownSampleError::MetadataCopy(e));
    }

    tracing::info!(
        s_rows = s_table.len(),
        b_rows = b_table.len(),
        s_sample = s_sample.len(),
        b_sample = b_rows.len(),
        "Down-sampling complete"
    );

    Ok(DownSampleResult {
        s_sample,
        b_sample: b_rows,
        s_positions,
        b_positions,
        stats: probed.stats,
    })
}

fn validate_arguments(s_table: &Table, b_table: &Table, size: usize, y: usize) -> Result<()> {
    if s_table.is_empty() {
        return Err(DownSampleError::InvalidArgument("table S is empty".to_string()));
    }
    if b_table.is_empty() {
        return Err(DownSampleError::InvalidArgument("table B is empty".to_string()));
    }
    if size == 0 {
        return Err(DownSampleError::InvalidArgument("size must be greater than zero".to_string()));
    }
    if y == 0 {
        return Err(DownSampleError::InvalidArgument("y must be greater than zero".to_string()));
    }
    Ok(())
}

// Link to test module (only compiled during tests)
#[cfg(test)]
#[path = "tests/down_sample_tests.rs"]
mod tests;
