use std::sync::atomic::{AtomicU64, Ordering};
use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::take_record_batch;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use crate::errors::{DownSampleError, Result};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Table`].
///
/// The catalog attaches metadata by identity rather than by content, so two
/// tables holding identical rows are still distinct catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(u64);

impl TableId {
    fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable, schema-typed table.
///
/// Rows are addressed by their 0-based position in the underlying Arrow
/// `RecordBatch`. The batch is never modified after construction, so positions
/// stay valid for as long as the table exists; sub-tables are always new tables
/// with their own [`TableId`].
///
/// Column types come from the Arrow schema. Tokenization relies on those
/// declared types (see [`crate::tokenizer::string_column_indices`]) and never
/// inspects values to decide whether a column holds text.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{Int32Array, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use arrow::record_batch::RecordBatch;
/// use downsample::Table;
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("id", DataType::Int32, false),
///     Field::new("name", DataType::Utf8, false),
/// ]));
/// let batch = RecordBatch::try_new(schema, vec![
///     Arc::new(Int32Array::from(vec![1, 2])),
///     Arc::new(StringArray::from(vec!["alice", "bob"])),
/// ]).unwrap();
///
/// let table = Table::new(batch);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    id: TableId,
    batch: RecordBatch,
}

impl Table {
    /// Wraps a record batch, assigning the table a fresh identity.
    pub fn new(batch: RecordBatch) -> Self {
        Table { id: TableId::next(), batch }
    }

    /// Builds a table from a schema and its columns.
    ///
    /// # Errors
    ///
    /// Returns `DownSampleError::Arrow` if the columns do not match the schema.
    pub fn try_new(schema: SchemaRef, columns: Vec<ArrayRef>) -> Result<Self> {
        Ok(Table::new(RecordBatch::try_new(schema, columns)?))
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Returns the column with the given name, if the schema declares one.
    pub fn column_by_name(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Builds a new table holding the rows at `positions`, in the order given.
    ///
    /// The result is a fresh table with its own [`TableId`]; it does not inherit
    /// any catalog metadata from `self`.
    ///
    /// # Errors
    ///
    /// Returns `DownSampleError::InvalidArgument` if any position is outside
    /// `[0, len)`, or `DownSampleError::Arrow` if the take kernel fails.
    pub fn take_positions(&self, positions: &[u32]) -> Result<Table> {
        let num_rows = self.len();
        if let Some(&bad) = positions.iter().find(|&&p| p as usize >= num_rows) {
            return Err(DownSampleError::InvalidArgument(format!(
                "row position {} is out of range for table {} with {} rows",
                bad, self.id, num_rows
            )));
        }

        let indices = UInt32Array::from(positions.to_vec());
        let batch = take_record_batch(&self.batch, &indices)?;
        Ok(Table::new(batch))
    }
}

impl From<RecordBatch> for Table {
    fn from(batch: RecordBatch) -> Self {
        Table::new(batch)
    }
}

/// Converts a table length into the `u32` position space used by the index.
pub(crate) fn positions_len(table: &Table) -> Result<u32> {
    u32::try_from(table.len()).map_err(|_| {
        DownSampleError::InvalidArgument(format!(
            "table {} has {} rows, more than the {} supported",
            table.id(),
            table.len(),
            u32::MAX
        ))
    })
}
