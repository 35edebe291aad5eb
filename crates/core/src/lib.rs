mod corpus;
pub use corpus::{Corpus, CorpusError};

mod document;
pub use document::{Document, RawDocument};

mod query;
pub use query::{Query, QueryError, tokenize};

pub mod ranker;

mod vector_table;
pub use vector_table::{VectorTable, VectorTableError};

pub mod vectorize;
