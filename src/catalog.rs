//! Table metadata catalog.
//!
//! Sampling produces new tables, and downstream matching code expects each sample
//! to carry the same table-level metadata as the table it came from: the key
//! column, foreign-key links for candidate-pair tables, and free-form provenance.
//! The sampler only ever asks a catalog to copy that metadata from a source onto
//! a destination; everything else about how metadata is stored lives behind the
//! [`Catalog`] trait.

use arrow::array::Array;
use arrow::row::{RowConverter, SortField};
use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;
use crate::errors::CatalogError;
use crate::table::{Table, TableId};

/// Copies table-level metadata between tables.
pub trait Catalog {
    /// Attaches the metadata of `source` to `destination`.
    ///
    /// Fails if `source` lacks required metadata or `destination` already carries
    /// conflicting metadata.
    fn copy_properties(&mut self, source: &Table, destination: &Table) -> Result<(), CatalogError>;

    /// Forgets any metadata attached to `table`.
    ///
    /// Called when a sampling call fails after metadata was already copied onto
    /// one of its samples, so that nothing refers to a discarded table. A
    /// catalog that stores metadata must remove it here.
    fn discard(&mut self, table: TableId);
}

/// A catalog that records nothing and accepts every copy.
///
/// Use it when the tables carry no metadata worth propagating.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCatalog;

impl Catalog for NoCatalog {
    fn copy_properties(&mut self, _source: &Table, _destination: &Table) -> Result<(), CatalogError> {
        Ok(())
    }

    fn discard(&mut self, _table: TableId) {}
}

/// Links from a candidate-pair table to the two base tables it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeys {
    pub ltable: TableId,
    pub rtable: TableId,
    /// Column of the pair table referencing the left table's key
    pub fk_ltable: String,
    /// Column of the pair table referencing the right table's key
    pub fk_rtable: String,
}

/// Metadata attached to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProperties {
    pub key: Option<String>,
    pub foreign_keys: Option<ForeignKeys>,
    /// Free-form provenance (source file, loader, creation notes), in insertion order.
    pub provenance: IndexMap<String, String>,
}

/// Catalog kept in process memory, keyed by [`TableId`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{Int64Array, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use downsample::{Catalog, InMemoryCatalog, Table};
///
/// let schema = Arc::new(Schema::new(vec![
///     Field::new("id", DataType::Int64, false),
///     Field::new("name", DataType::Utf8, false),
/// ]));
/// let table = Table::try_new(schema, vec![
///     Arc::new(Int64Array::from(vec![1, 2, 3])),
///     Arc::new(StringArray::from(vec!["a", "b", "c"])),
/// ]).unwrap();
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.set_key(&table, "id").unwrap();
///
/// let subset = table.take_positions(&[0, 2]).unwrap();
/// catalog.copy_properties(&table, &subset).unwrap();
/// assert_eq!(catalog.key(subset.id()), Some("id"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: HashMap<TableId, TableProperties>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables with metadata.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, table: TableId) -> bool {
        self.entries.contains_key(&table)
    }

    pub fn properties(&self, table: TableId) -> Option<&TableProperties> {
        self.entries.get(&table)
    }

    pub fn key(&self, table: TableId) -> Option<&str> {
        self.entries.get(&table).and_then(|p| p.key.as_deref())
    }

    /// Declares `column` as the key of `table`, registering the table if needed.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if the schema has no such column, or `InvalidKey`
    /// if the column contains nulls or duplicate values.
    pub fn set_key(&mut self, table: &Table, column: &str) -> Result<(), CatalogError> {
        validate_key(table, column)?;
        self.entries.entry(table.id()).or_default().key = Some(column.to_string());
        Ok(())
    }

    /// Declares foreign-key links for a candidate-pair table.
    ///
    /// Both foreign-key columns must exist in `table`.
    pub fn set_foreign_keys(&mut self, table: &Table, foreign_keys: ForeignKeys) -> Result<(), CatalogError> {
        require_column(table, &foreign_keys.fk_ltable)?;
        require_column(table, &foreign_keys.fk_rtable)?;
        self.entries.entry(table.id()).or_default().foreign_keys = Some(foreign_keys);
        Ok(())
    }

    /// Records a provenance property, replacing any previous value under `name`.
    pub fn set_property(&mut self, table: &Table, name: &str, value: &str) {
        self.entries
            .entry(table.id())
            .or_default()
            .provenance
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove(&mut self, table: TableId) -> Option<TableProperties> {
        self.entries.remove(&table)
    }
}

impl Catalog for InMemoryCatalog {
    /// Copies all metadata of `source` onto `destination`.
    ///
    /// The source must have a key, and that key (plus any foreign-key columns)
    /// must still be valid in the destination. Copying identical metadata onto a
    /// destination a second time is accepted; different existing metadata is a
    /// conflict.
    fn copy_properties(&mut self, source: &Table, destination: &Table) -> Result<(), CatalogError> {
        let properties = self
            .entries
            .get(&source.id())
            .ok_or(CatalogError::NotRegistered(source.id()))?;
        let key = properties
            .key
            .as_deref()
            .ok_or(CatalogError::MissingKey(source.id()))?;

        validate_key(destination, key)?;
        if let Some(foreign_keys) = &properties.foreign_keys {
            require_column(destination, &foreign_keys.fk_ltable)?;
            require_column(destination, &foreign_keys.fk_rtable)?;
        }

        if let Some(existing) = self.entries.get(&destination.id()) {
            if existing != properties {
                return Err(CatalogError::Conflict(destination.id()));
            }
            return Ok(());
        }

        let copied = properties.clone();
        self.entries.insert(destination.id(), copied);
        Ok(())
    }

    fn discard(&mut self, table: TableId) {
        self.entries.remove(&table);
    }
}

fn require_column(table: &Table, column: &str) -> Result<(), CatalogError> {
    if table.column_by_name(column).is_none() {
        return Err(CatalogError::ColumnNotFound {
            table: table.id(),
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Checks that `column` exists in `table` and holds unique, non-null values.
fn validate_key(table: &Table, column: &str) -> Result<(), CatalogError> {
    let array = table.column_by_name(column).ok_or_else(|| CatalogError::ColumnNotFound {
        table: table.id(),
        column: column.to_string(),
    })?;

    let invalid = |reason: String| CatalogError::InvalidKey {
        table: table.id(),
        column: column.to_string(),
        reason,
    };

    if array.null_count() > 0 {
        return Err(invalid(format!("{} null values", array.null_count())));
    }

    // Row-encode the column so uniqueness works for any key type
    let converter = RowConverter::new(vec![SortField::new(array.data_type().clone())])
        .map_err(|e| invalid(e.to_string()))?;
    let rows = converter
        .convert_columns(std::slice::from_ref(array))
        .map_err(|e| invalid(e.to_string()))?;

    let mut seen = HashSet::with_capacity(rows.num_rows());
    for row in rows.iter() {
        if !seen.insert(row) {
            return Err(invalid("duplicate values".to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};

    fn people(ids: Vec<Option<i64>>) -> Table {
        let n = ids.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("name", DataType::Utf8, false),
        ]));
        let names: Vec<String> = (0..n).map(|i| format!("person {}", i)).collect();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(names)),
        ];
        Table::try_new(schema, columns).unwrap()
    }

    #[test]
    fn test_set_key_validates_column() {
        let table = people(vec![Some(1), Some(2)]);
        let mut catalog = InMemoryCatalog::new();

        assert!(matches!(
            catalog.set_key(&table, "missing"),
            Err(CatalogError::ColumnNotFound { .. })
        ));
        assert!(catalog.is_empty());

        catalog.set_key(&table, "id").unwrap();
        assert_eq!(catalog.key(table.id()), Some("id"));
    }

    #[test]
    fn test_set_key_rejects_duplicates_and_nulls() {
        let mut catalog = InMemoryCatalog::new();

        let dupes = people(vec![Some(1), Some(1)]);
        assert!(matches!(catalog.set_key(&dupes, "id"), Err(CatalogError::InvalidKey { .. })));

        let nulls = people(vec![Some(1), None]);
        assert!(matches!(catalog.set_key(&nulls, "id"), Err(CatalogError::InvalidKey { .. })));

        // String keys work through the same row encoding
        let table = people(vec![Some(1), Some(1)]);
        catalog.set_key(&table, "name").unwrap();
    }

    #[test]
    fn test_copy_properties_copies_everything() {
        let table = people(vec![Some(10), Some(20), Some(30)]);
        let mut catalog = InMemoryCatalog::new();
        catalog.set_key(&table, "id").unwrap();
        catalog.set_property(&table, "source", "walmart.csv");

        let sample = table.take_positions(&[2, 0]).unwrap();
        catalog.copy_properties(&table, &sample).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.properties(sample.id()), catalog.properties(table.id()));
        assert_eq!(
            catalog.properties(sample.id()).unwrap().provenance.get("source").map(String::as_str),
            Some("walmart.csv")
        );
    }

    #[test]
    fn test_copy_from_unregistered_or_keyless_source_fails() {
        let table = people(vec![Some(1), Some(2)]);
        let sample = table.take_positions(&[0]).unwrap();
        let mut catalog = InMemoryCatalog::new();

        assert_eq!(
            catalog.copy_properties(&table, &sample),
            Err(CatalogError::NotRegistered(table.id()))
        );

        catalog.set_property(&table, "source", "x");
        assert_eq!(
            catalog.copy_properties(&table, &sample),
            Err(CatalogError::MissingKey(table.id()))
        );
        assert!(!catalog.contains(sample.id()));
    }

    #[test]
    fn test_copy_onto_conflicting_destination_fails() {
        let table = people(vec![Some(1), Some(2)]);
        let sample = table.take_positions(&[0, 1]).unwrap();
        let mut catalog = InMemoryCatalog::new();
        catalog.set_key(&table, "id").unwrap();
        catalog.set_key(&sample, "name").unwrap();

        assert_eq!(
            catalog.copy_properties(&table, &sample),
            Err(CatalogError::Conflict(sample.id()))
        );
        assert_eq!(catalog.key(sample.id()), Some("name"));
    }

    #[test]
    fn test_copy_twice_is_accepted() {
        let table = people(vec![Some(1), Some(2)]);
        let sample = table.take_positions(&[1]).unwrap();
        let mut catalog = InMemoryCatalog::new();
        catalog.set_key(&table, "id").unwrap();

        catalog.copy_properties(&table, &sample).unwrap();
        catalog.copy_properties(&table, &sample).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_copy_checks_foreign_key_columns() {
        let pairs_schema = Arc::new(Schema::new(vec![
            Field::new("_id", DataType::Int64, false),
            Field::new("ltable_id", DataType::Int64, false),
        ]));
        let pairs = Table::try_new(
            pairs_schema,
            vec![
                Arc::new(Int64Array::from(vec![0, 1])) as ArrayRef,
                Arc::new(Int64Array::from(vec![5, 6])) as ArrayRef,
            ],
        )
        .unwrap();
        let left = people(vec![Some(5), Some(6)]);
        let right = people(vec![Some(7), Some(8)]);

        let mut catalog = InMemoryCatalog::new();
        catalog.set_key(&pairs, "_id").unwrap();
        let result = catalog.set_foreign_keys(&pairs, ForeignKeys {
            ltable: left.id(),
            rtable: right.id(),
            fk_ltable: "ltable_id".to_string(),
            fk_rtable: "rtable_id".to_string(),
        });
        assert!(matches!(result, Err(CatalogError::ColumnNotFound { .. })));
    }

    #[test]
    fn test_discard_removes_entry() {
        let table = people(vec![Some(1)]);
        let mut catalog = InMemoryCatalog::new();
        catalog.set_key(&table, "id").unwrap();
        catalog.discard(table.id());
        assert!(!catalog.contains(table.id()));
        assert!(catalog.remove(table.id()).is_none());
    }

    #[test]
    fn test_no_catalog_accepts_anything() {
        let table = people(vec![Some(1), Some(1)]);
        let sample = table.take_positions(&[0]).unwrap();
        assert!(NoCatalog.copy_properties(&table, &sample).is_ok());
    }
}
