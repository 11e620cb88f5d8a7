use arrow::array::{Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use indexmap::IndexSet;
use crate::errors::Result;
use crate::stop_words::is_stop_word;
use crate::table::Table;

/// Deduplicated tokens of one row, in first-seen order.
///
/// Insertion order is kept so that anything iterating a token set (index
/// building, candidate gathering) behaves identically across runs.
pub type TokenSet = IndexSet<String>;

/// Returns true for the Arrow types treated as text columns.
#[inline]
pub fn is_string_type(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
}

/// Returns the indices of the columns whose declared type is a string type.
///
/// Detection is structural: an `Int64` column is never tokenized, even though
/// its values have a perfectly good string form.
///
/// # Examples
///
/// ```
/// use arrow::datatypes::{DataType, Field, Schema};
/// use downsample::tokenizer::string_column_indices;
///
/// let schema = Schema::new(vec![
///     Field::new("id", DataType::Int64, false),
///     Field::new("name", DataType::Utf8, true),
///     Field::new("notes", DataType::LargeUtf8, true),
/// ]);
/// assert_eq!(string_column_indices(&schema), vec![1, 2]);
/// ```
pub fn string_column_indices(schema: &Schema) -> Vec<usize> {
    schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| is_string_type(field.data_type()))
        .map(|(idx, _)| idx)
        .collect()
}

/// Turns the text values of one row into a token set.
///
/// The values are lower-cased and joined with single spaces, the trailing
/// whitespace is trimmed, and the result is split on whitespace. Duplicates
/// collapse and stop words are removed.
///
/// # Examples
///
/// ```
/// use downsample::tokenizer::tokenize_values;
///
/// let tokens = tokenize_values(["The Red Apple", "apple pie"]);
/// let tokens: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
/// assert_eq!(tokens, vec!["red", "apple", "pie"]);
/// ```
pub fn tokenize_values<'a>(values: impl IntoIterator<Item = &'a str>) -> TokenSet {
    let mut joined = String::new();
    for value in values {
        joined.push_str(&value.to_lowercase());
        joined.push(' ');
    }

    joined
        .trim_end()
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Tokenizes rows of a table using its string-typed columns.
///
/// Every string flavour (`Utf8`, `LargeUtf8`, `Utf8View`) is cast to a plain
/// `StringArray` once, up front, so per-row tokenization is a straight lookup.
/// Null cells contribute no text.
#[derive(Debug)]
pub struct RowTokenizer {
    columns: Vec<StringArray>,
    num_rows: usize,
}

impl RowTokenizer {
    /// Prepares a tokenizer over all string-typed columns of `table`.
    pub fn new(table: &Table) -> Result<Self> {
        let batch = table.batch();
        let column_indices = string_column_indices(batch.schema_ref());
        Self::for_columns(batch, &column_indices)
    }

    /// Prepares a tokenizer over the given columns of `batch`.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if a column index is out of range or a column
    /// cannot be cast to `Utf8`.
    pub fn for_columns(batch: &RecordBatch, column_indices: &[usize]) -> Result<Self> {
        let mut columns = Vec::with_capacity(column_indices.len());

        for &idx in column_indices {
            if idx >= batch.num_columns() {
                return Err(ArrowError::InvalidArgumentError(format!(
                    "column index {} out of range for batch with {} columns",
                    idx,
                    batch.num_columns()
                )).into());
            }

            let string_array_ref = cast(batch.column(idx), &DataType::Utf8)?;
            let string_array = string_array_ref
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| ArrowError::CastError(format!(
                    "column {} did not cast to a StringArray",
                    idx
                )))?
                .clone();
            columns.push(string_array);
        }

        Ok(RowTokenizer { columns, num_rows: batch.num_rows() })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of text columns this tokenizer reads.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the token set of the row at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.num_rows()`.
    pub fn tokenize(&self, row: usize) -> TokenSet {
        assert!(row < self.num_rows, "row {} out of range ({} rows)", row, self.num_rows);

        tokenize_values(
            self.columns
                .iter()
                .filter(|column| column.is_valid(row))
                .map(|column| column.value(row)),
        )
    }
}
