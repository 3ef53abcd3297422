//! Top-level module for the n-gram generation system.
//!
//! Components, in dependency order:
//! - Tokenization of raw text into sentences (`tokenizer`)
//! - Frequency table construction (`frequency_table`, `state`)
//! - Weighted sampling of the next token (`sampler`)
//! - Sentence generation (`generator`, `generation_config`)
//! - A model facade tying them together (`NGramModel`)

/// Word-level n-gram model (`n >= 2`).
///
/// Builds from raw text or sentences and generates new sentences.
pub mod ngram_model;

/// Bounded random walk producing formatted sentences.
pub mod generator;

/// Limits for one generation run.
pub mod generation_config;

/// Context → next-token counts built from sliding windows.
pub mod frequency_table;

/// One context and its ordered next-token counts.
pub mod state;

/// Weighted choice over ordered counts.
pub mod sampler;

/// Text → tokens → sentences.
pub mod tokenizer;
