//! Table builders shared by the sampling tests.

use std::sync::Arc;
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use rand::{Rng, SeedableRng};
use crate::table::Table;

/// A two-column table: `id` (Int64, 0-based row number) and `title` (Utf8).
pub fn titles_table(titles: &[Option<&str>]) -> Table {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("title", DataType::Utf8, true),
    ]));
    let ids: Vec<i64> = (0..titles.len() as i64).collect();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(ids)),
        Arc::new(StringArray::from(titles.to_vec())),
    ];
    Table::try_new(schema, columns).unwrap()
}

/// Ten rows where only rows 2 and 5 mention "apple".
pub fn apple_s_table() -> Table {
    titles_table(&[
        Some("oak desk"),
        Some("steel chair"),
        Some("Apple juice"),
        Some("paper lamp"),
        Some("glass vase"),
        Some("green apple"),
        Some("wool rug"),
        Some("brass hook"),
        Some("linen sheet"),
        Some("clay pot"),
    ])
}

/// Reads the `id` column back, for checking which original rows a sample holds.
pub fn ids(table: &Table) -> Vec<i64> {
    table
        .column_by_name("id")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap()
        .values()
        .to_vec()
}

/// A generated product table in the style of a record-linkage benchmark.
///
/// Columns: `id` (Int64), `title` (Utf8), `brand` (Utf8), `price` (Float64).
/// Titles are drawn from a small vocabulary so that rows share tokens.
pub fn product_table(rows: usize, seed: u64) -> Table {
    const BRANDS: [&str; 6] = ["acme", "globex", "initech", "umbrella", "hooli", "stark"];
    const NOUNS: [&str; 8] = ["laptop", "monitor", "keyboard", "mouse", "cable", "dock", "webcam", "stand"];
    const ADJECTIVES: [&str; 6] = ["wireless", "compact", "ergonomic", "gaming", "portable", "silent"];

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut id_data = Vec::with_capacity(rows);
    let mut title_data = Vec::with_capacity(rows);
    let mut brand_data = Vec::with_capacity(rows);
    let mut price_data = Vec::with_capacity(rows);

    for i in 0..rows {
        id_data.push(i as i64);
        title_data.push(format!(
            "{} {} model{}",
            ADJECTIVES[rng.random_range(0..ADJECTIVES.len())],
            NOUNS[rng.random_range(0..NOUNS.len())],
            rng.random_range(0..50)
        ));
        brand_data.push(BRANDS[rng.random_range(0..BRANDS.len())].to_string());
        price_data.push(rng.random_range(5.0..500.0));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("brand", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(id_data)),
        Arc::new(StringArray::from(title_data)),
        Arc::new(StringArray::from(brand_data)),
        Arc::new(Float64Array::from(price_data)),
    ];
    Table::try_new(schema, columns).unwrap()
}

/// Installs a test-writer tracing subscriber; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
