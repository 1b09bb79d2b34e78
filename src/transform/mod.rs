mod expand;
mod flattened;
mod format;
mod merge;
mod stamp;
mod transformer;

use std::io::Read;

use crate::config::FlattenConfig;
use crate::input::FamilyBridge;
use crate::model::Record;

pub use expand::{expand_buckets, expand_quantiles, KeyStyle};
pub use flattened::FlattenedAccumulator;
pub use format::{format_count, format_fixed, format_value};
pub use merge::{merge_key, MergeTable};
pub use stamp::stamp_attributes;
pub use transformer::{Transformer, RUNTIME_METRICS_MARKER};

// (Reader -> Decoder) -> FamilyBridge -> Transformer -> out
//      producer thread                  calling thread
//
// Reader      == exposition bytes        ->  lines
// Decoder     == lines                   ->  Iterator<Result<MetricFamily>>
// Bridge      == bounded queue (1024), closed when decoding ends
// Transformer == Iterator<MetricFamily>  ->  Vec<Record>

/// Flattens one exposition payload and appends the resulting records to `out`.
///
/// Decoding runs on its own thread. Decode failures are logged and end the
/// payload early; whatever was decoded up to that point is still flattened.
pub fn flatten<R>(input: R, config: &FlattenConfig, out: &mut Vec<Record>)
where
    R: Read + Send + 'static,
{
    let mut transformer = Transformer::new(config);
    for family in FamilyBridge::spawn(input) {
        transformer.consume(&family);
    }
    transformer.finish(out);
}
