use super::expand::{expand_buckets, expand_quantiles, KeyStyle};
use super::flattened::FlattenedAccumulator;
use super::format::{format_count, format_value};
use super::merge::MergeTable;
use super::stamp::stamp_attributes;
use crate::config::{FlattenConfig, RollupKind};
use crate::model::{Histogram, MetricFamily, MetricType, Record, Sample, Summary};

// Families whose name contains this belong to the Go runtime.
pub const RUNTIME_METRICS_MARKER: &str = "go_";

/// Shapes the metric families of one exposition payload into records.
///
/// Holds all per-payload state. Build a fresh one for every payload, feed it
/// with `consume` and collect the records with `finish`.
pub struct Transformer<'a> {
    config: &'a FlattenConfig,
    standalone: Vec<Record>,
    merged: MergeTable,
    flattened: FlattenedAccumulator,
}

impl<'a> Transformer<'a> {
    pub fn new(config: &'a FlattenConfig) -> Self {
        Self {
            config,
            standalone: vec![],
            merged: MergeTable::new(config.strict_merge_key),
            flattened: FlattenedAccumulator::new(config.flattened_event_name()),
        }
    }

    pub fn consume(&mut self, family: &MetricFamily) {
        for sample in family.samples() {
            // Bails out on the whole rest of the family, not just this sample.
            if !self.config.include_runtime_metrics
                && family.name().contains(RUNTIME_METRICS_MARKER)
            {
                break;
            }

            let base = self.base_record(family, sample);
            match family.metric_type() {
                MetricType::Summary => self.summary(family, sample, base),
                MetricType::Histogram => self.histogram(family, sample, base),
                _ => self.scalar(family, sample, base),
            }
        }
    }

    /// Appends the records to `out`: standalone records in classification
    /// order, then the merged records in no particular order, then the
    /// flattened record.
    pub fn finish(self, out: &mut Vec<Record>) {
        let config = self.config;
        let attributes = &config.static_attributes;
        let emit = |out: &mut Vec<Record>, mut record: Record| {
            stamp_attributes(&mut record, attributes);
            out.push(record);
        };

        for record in self.standalone {
            emit(out, record);
        }
        for record in self.merged.into_records() {
            emit(out, record);
        }
        if !config.fully_expand {
            emit(out, self.flattened.into_record());
        }
    }

    fn base_record(&self, family: &MetricFamily, sample: &Sample) -> Record {
        let mut record = Record::new();
        record.insert("name".to_string(), family.name().clone());
        record.insert("help".to_string(), family.help().to_string());
        record.insert("type".to_string(), family.metric_type().to_string());
        stamp_attributes(&mut record, &self.config.static_attributes);
        record.extend(sample.labels().iter().cloned());
        record
    }

    fn summary(&mut self, family: &MetricFamily, sample: &Sample, mut record: Record) {
        let empty = Summary::default();
        let summary = sample.summary().unwrap_or(&empty);
        let name = family.name();

        if self.config.fully_expand {
            record.insert("count".to_string(), format_count(summary.count));
            record.insert("sum".to_string(), format_value(summary.sum));
            expand_quantiles(&mut record, name, summary, KeyStyle::Bare);
            self.standalone.push(record);
        } else if self.config.summary_rollup {
            record.insert("count".to_string(), format_count(summary.count));
            record.insert("sum".to_string(), format_value(summary.sum));
            record.insert(
                "event_type".to_string(),
                self.config.rollup_event_name(RollupKind::Summary),
            );
            expand_quantiles(&mut record, name, summary, KeyStyle::Prefixed);
            self.standalone.push(record);
        } else if sample.has_labels() {
            let merged = self.merged.entry(sample.labels());
            merged.insert(format!("{}.summary.count", name), format_count(summary.count));
            merged.insert(format!("{}.summary.sum", name), format_value(summary.sum));
        }
    }

    fn histogram(&mut self, family: &MetricFamily, sample: &Sample, mut record: Record) {
        let empty = Histogram::default();
        let histogram = sample.histogram().unwrap_or(&empty);
        let name = family.name();

        if self.config.fully_expand {
            record.insert("count".to_string(), format_count(histogram.count));
            record.insert("sum".to_string(), format_value(histogram.sum));
            expand_buckets(&mut record, name, histogram, KeyStyle::Bare);
            self.standalone.push(record);
        } else if self.config.histogram_rollup {
            record.insert("count".to_string(), format_count(histogram.count));
            record.insert("sum".to_string(), format_value(histogram.sum));
            record.insert(
                "event_type".to_string(),
                self.config.rollup_event_name(RollupKind::Histogram),
            );
            expand_buckets(&mut record, name, histogram, KeyStyle::Prefixed);
            self.standalone.push(record);
        } else if sample.has_labels() {
            let merged = self.merged.entry(sample.labels());
            merged.insert(
                format!("{}.histogram.count", name),
                format_count(histogram.count),
            );
            merged.insert(format!("{}.histogram.sum", name), format_value(histogram.sum));
        }
    }

    // Gauges, counters and untyped metrics.
    fn scalar(&mut self, family: &MetricFamily, sample: &Sample, mut record: Record) {
        let value = format_value(sample.value());
        record.insert("value".to_string(), value.clone());

        if self.config.fully_expand {
            self.standalone.push(record);
            return;
        }

        let name = family.name();
        if sample.has_labels() {
            let key = match family.metric_type() {
                MetricType::Gauge => format!("{}.gauge", name),
                MetricType::Counter => format!("{}.counter", name),
                _ => name.clone(),
            };
            self.merged.entry(sample.labels()).insert(key, value);
            return;
        }

        let key = self
            .config
            .key_merge_labels
            .iter()
            .find_map(|label| record.get(label))
            .map_or_else(|| name.clone(), |suffix| format!("{}.{}", name, suffix));
        self.flattened.absorb(key, value);
    }
}
