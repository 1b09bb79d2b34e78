mod family;
mod record;

pub use family::*;
pub use record::*;

pub type MetricName = String;

pub type LabelName = String;

pub type LabelValue = String;

pub type SampleValue = f64;

// Ordered as they appeared on the exposition line.
pub type Labels = Vec<(LabelName, LabelValue)>;
