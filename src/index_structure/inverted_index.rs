use std::rc::Rc;
use hashbrown::HashMap;
use smallvec::SmallVec;
use crate::errors::Result;
use crate::table::{positions_len, Table};
use crate::tokenizer::RowTokenizer;

/// Row positions for one token, in ascending order.
///
/// Most tokens in entity-matching tables occur in a handful of rows, so the
/// first four positions are stored inline.
pub type Postings = SmallVec<[u32; 4]>;

/// Token to row-position index over a single table.
///
/// Built once per sampling call over the whole S table and only read afterwards.
/// Every position stored is below [`InvertedIndex::num_positions`], and only
/// tokens that actually occur in some row become keys.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<Rc<str>, Postings>,
    num_positions: u32,
}

impl std::fmt::Display for InvertedIndex {
    /// Formats a short summary: token count, row count and total postings.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InvertedIndex {{ tokens: {}, rows: {}, postings: {} }}",
            self.postings.len(),
            self.num_positions,
            self.postings.values().map(|p| p.len()).sum::<usize>()
        )
    }
}

impl InvertedIndex {
    /// Builds the index over every row of `table`.
    ///
    /// Rows are visited in order and each row's position is its row index. The
    /// row is tokenized from its string-typed columns and the position is
    /// appended to the postings of every token in the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has more than `u32::MAX` rows or its text
    /// columns cannot be read as strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use arrow::array::StringArray;
    /// use arrow::datatypes::{DataType, Field, Schema};
    /// use downsample::{InvertedIndex, Table};
    ///
    /// let schema = Arc::new(Schema::new(vec![Field::new("name", DataType::Utf8, false)]));
    /// let table = Table::try_new(schema, vec![
    ///     Arc::new(StringArray::from(vec!["red apple", "green apple", "pear"])),
    /// ]).unwrap();
    ///
    /// let index = InvertedIndex::build(&table).unwrap();
    /// assert_eq!(index.get("apple"), Some(&[0u32, 1][..]));
    /// assert_eq!(index.get("banana"), None);
    /// ```
    pub fn build(table: &Table) -> Result<Self> {
        let num_positions = positions_len(table)?;
        let tokenizer = RowTokenizer::new(table)?;
        let index = Self::from_tokenizer(&tokenizer, num_positions);

        tracing::debug!(
            table = %table.id(),
            rows = num_positions,
            tokens = index.len(),
            "Inverted index built"
        );

        Ok(index)
    }

    fn from_tokenizer(tokenizer: &RowTokenizer, num_positions: u32) -> Self {
        let mut postings: HashMap<Rc<str>, Postings> = HashMap::new();

        for position in 0..num_positions {
            for token in tokenizer.tokenize(position as usize) {
                postings
                    .entry_ref(token.as_str())
                    .or_default()
                    .push(position);
            }
        }

        InvertedIndex { postings, num_positions }
    }

    /// Returns the positions of the rows containing `token`.
    #[inline]
    pub fn get(&self, token: &str) -> Option<&[u32]> {
        self.postings.get(token).map(|p| p.as_slice())
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Number of rows of the indexed table.
    pub fn num_positions(&self) -> u32 {
        self.num_positions
    }

    /// Iterates the indexed tokens in arbitrary order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(|k| &**k)
    }
}
