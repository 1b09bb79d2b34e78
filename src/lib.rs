//! Flattens Prometheus text expositions into flat, schema-less records.
//!
//! The exposition is decoded on a producer thread and handed over, family by
//! family, to a [`Transformer`](transform::Transformer) that merges samples
//! sharing a label set, expands summaries and histograms when asked to, and
//! accumulates label-less metrics into one wide record.
//!
//! ```ignore
//! use promflat::{config::FlattenConfig, transform::flatten};
//!
//! let mut records = Vec::new();
//! flatten(std::io::stdin(), &FlattenConfig::default(), &mut records);
//! ```

pub mod cliopt;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod parser;
pub mod transform;
