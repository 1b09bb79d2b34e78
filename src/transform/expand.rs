use super::format::{format_count, format_fixed, format_value};
use crate::model::{Histogram, Record, Summary};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyStyle {
    // `0.500000`
    Bare,
    // `<metric>.0.500000`
    Prefixed,
}

fn field_name(metric: &str, bound: f64, style: KeyStyle) -> String {
    match style {
        KeyStyle::Bare => format_fixed(bound),
        KeyStyle::Prefixed => format!("{}.{}", metric, format_fixed(bound)),
    }
}

/// Writes one field per quantile. NaN quantile values are skipped.
pub fn expand_quantiles(record: &mut Record, metric: &str, summary: &Summary, style: KeyStyle) {
    for q in summary.quantiles.iter().filter(|q| !q.value.is_nan()) {
        record.insert(field_name(metric, q.quantile, style), format_value(q.value));
    }
}

/// Writes one field per bucket holding its cumulative count.
pub fn expand_buckets(record: &mut Record, metric: &str, histogram: &Histogram, style: KeyStyle) {
    for b in &histogram.buckets {
        record.insert(
            field_name(metric, b.upper_bound, style),
            format_count(b.cumulative_count),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bucket, Quantile};

    #[test]
    fn test_expand_quantiles_skips_nan() {
        let summary = Summary {
            count: 10,
            sum: 1.5,
            quantiles: vec![
                Quantile { quantile: 0.5, value: 0.2 },
                Quantile { quantile: 0.9, value: f64::NAN },
                Quantile { quantile: 0.99, value: 0.7 },
            ],
        };

        let mut bare = Record::new();
        expand_quantiles(&mut bare, "latency", &summary, KeyStyle::Bare);
        assert_eq!(bare.len(), 2);
        assert_eq!(bare["0.500000"], "0.2");
        assert_eq!(bare["0.990000"], "0.7");
        assert!(!bare.contains_key("0.900000"));

        let mut prefixed = Record::new();
        expand_quantiles(&mut prefixed, "latency", &summary, KeyStyle::Prefixed);
        assert_eq!(prefixed.len(), 2);
        assert_eq!(prefixed["latency.0.500000"], "0.2");
        assert_eq!(prefixed["latency.0.990000"], "0.7");
    }

    #[test]
    fn test_expand_buckets() {
        let histogram = Histogram {
            count: 5,
            sum: 0.75,
            buckets: vec![
                Bucket { upper_bound: 0.1, cumulative_count: 3 },
                Bucket { upper_bound: f64::INFINITY, cumulative_count: 5 },
            ],
        };

        let mut bare = Record::new();
        expand_buckets(&mut bare, "rpc", &histogram, KeyStyle::Bare);
        assert_eq!(bare["0.100000"], "3");
        assert_eq!(bare["+Inf"], "5");

        let mut prefixed = Record::new();
        expand_buckets(&mut prefixed, "rpc", &histogram, KeyStyle::Prefixed);
        assert_eq!(prefixed["rpc.0.100000"], "3");
        assert_eq!(prefixed["rpc.+Inf"], "5");
    }
}
