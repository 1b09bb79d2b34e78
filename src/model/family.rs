use std::fmt;
use std::str::FromStr;

use super::{Labels, MetricName, SampleValue};
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MetricType {
    Gauge,
    Counter,
    Summary,
    Histogram,
    Untyped,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}

impl FromStr for MetricType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gauge" => Ok(MetricType::Gauge),
            "counter" => Ok(MetricType::Counter),
            "summary" => Ok(MetricType::Summary),
            "histogram" => Ok(MetricType::Histogram),
            "untyped" => Ok(MetricType::Untyped),
            _ => Err(format!("unknown metric type \"{}\"", s).into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quantile {
    pub quantile: f64,
    pub value: SampleValue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub upper_bound: f64,
    pub cumulative_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub count: u64,
    pub sum: SampleValue,
    pub quantiles: Vec<Quantile>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    pub count: u64,
    pub sum: SampleValue,
    pub buckets: Vec<Bucket>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SampleData {
    Value(SampleValue),
    Summary(Summary),
    Histogram(Histogram),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    labels: Labels,
    data: SampleData,
}

impl Sample {
    pub fn new(labels: Labels, data: SampleData) -> Self {
        Self { labels, data }
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    #[inline]
    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &SampleData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut SampleData {
        &mut self.data
    }

    /// Scalar value of a gauge, counter or untyped sample. Anything else reads as zero.
    pub fn value(&self) -> SampleValue {
        match self.data {
            SampleData::Value(v) => v,
            _ => 0.0,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.data {
            SampleData::Summary(s) => Some(s),
            _ => None,
        }
    }

    pub fn histogram(&self) -> Option<&Histogram> {
        match &self.data {
            SampleData::Histogram(h) => Some(h),
            _ => None,
        }
    }
}

/// All samples sharing one metric name, help text and type.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricFamily {
    name: MetricName,
    help: String,
    metric_type: MetricType,
    samples: Vec<Sample>,
}

impl MetricFamily {
    pub fn new<N, H>(name: N, help: H, metric_type: MetricType, samples: Vec<Sample>) -> Self
    where
        N: Into<MetricName>,
        H: Into<String>,
    {
        Self {
            name: name.into(),
            help: help.into(),
            metric_type,
            samples,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[inline]
    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub(crate) fn set_help(&mut self, help: String) {
        self.help = help;
    }

    pub(crate) fn set_metric_type(&mut self, metric_type: MetricType) {
        self.metric_type = metric_type;
    }

    pub(crate) fn samples_mut(&mut self) -> &mut Vec<Sample> {
        &mut self.samples
    }
}
