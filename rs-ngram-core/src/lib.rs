//! Word-level n-gram sentence generation library.
//!
//! This crate provides the full pipeline behind the `rs-ngram` tools:
//! - Tokenizing raw text into terminated sentences
//! - Building a context → next-token frequency table
//! - Weighted random sampling over observed counts
//! - Bounded generation of new sentences
//! - Corpus I/O helpers
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so a seeded
//! generator makes every run reproducible.

/// N-gram model, its building blocks and generation logic.
pub mod model;

/// Corpus loading and file listing helpers.
pub mod io;

/// Error type shared by the whole crate.
pub mod error;

pub use error::{NgramError, Result};
pub use model::generation_config::GenerationConfig;
pub use model::ngram_model::NGramModel;
