pub mod inverted_index;
