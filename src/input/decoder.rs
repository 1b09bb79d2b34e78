use std::collections::HashSet;
use std::str;

use super::reader::Reader;
use crate::error::{Error, Result};
use crate::model::{
    Bucket, Histogram, Labels, MetricFamily, MetricName, MetricType, Quantile, Sample,
    SampleData, Summary,
};
use crate::parser::{parse_float, parse_line, Line, SampleLine};

/// Decodes a text exposition into metric families, one at a time.
///
/// A family is yielded as soon as the next one starts (or the input ends),
/// so everything decoded before a malformed line is still handed out. The
/// first error ends the iteration.
pub struct Decoder {
    reader: Box<dyn Reader>,
    line_no: usize,
    assembler: FamilyAssembler,
    done: bool,
}

impl Decoder {
    pub fn new(reader: Box<dyn Reader>) -> Self {
        Self {
            reader,
            line_no: 0,
            assembler: FamilyAssembler::default(),
            done: false,
        }
    }

    fn feed(&mut self, buf: &[u8]) -> Result<Option<MetricFamily>> {
        let line = str::from_utf8(buf).map_err(|e| ("exposition is not valid UTF-8", e))?;

        match parse_line(line)? {
            Line::Blank | Line::Comment => Ok(None),
            Line::Help(name, help) => self.assembler.help(name, help),
            Line::Type(name, metric_type) => self.assembler.metric_type(name, metric_type),
            Line::Sample(sample) => self.assembler.sample(sample),
        }
    }
}

impl std::iter::Iterator for Decoder {
    type Item = Result<MetricFamily>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let mut buf = Vec::new();
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return self.assembler.finish().map(Ok);
                }
                Ok(_) => (),
                Err(e) => {
                    self.done = true;
                    return Some(Err(("reading exposition failed", e).into()));
                }
            };

            self.line_no += 1;

            match self.feed(&buf) {
                Ok(Some(family)) => return Some(Ok(family)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.at_line(self.line_no)));
                }
            }
        }
    }
}

#[derive(Default)]
struct FamilyAssembler {
    current: Option<Pending>,
    seen: HashSet<MetricName>,
}

impl FamilyAssembler {
    fn help(&mut self, name: MetricName, help: String) -> Result<Option<MetricFamily>> {
        let (flushed, pending) = self.switch_to(&name)?;
        if pending.has_help {
            return Err(format!("second HELP line for metric name {}", name).into());
        }
        pending.has_help = true;
        pending.family.set_help(help);
        Ok(flushed)
    }

    fn metric_type(
        &mut self,
        name: MetricName,
        metric_type: MetricType,
    ) -> Result<Option<MetricFamily>> {
        let (flushed, pending) = self.switch_to(&name)?;
        if pending.has_type {
            return Err(format!("second TYPE line for metric name {}", name).into());
        }
        if !pending.family.samples().is_empty() {
            return Err(format!("TYPE line for {} reported after samples", name).into());
        }
        pending.has_type = true;
        pending.family.set_metric_type(metric_type);
        Ok(flushed)
    }

    fn sample(&mut self, line: SampleLine) -> Result<Option<MetricFamily>> {
        if let Some(pending) = self.current.as_mut() {
            if pending.owns(&line.name) {
                pending.add(line)?;
                return Ok(None);
            }
        }

        // Samples without a preceding TYPE line start an untyped family.
        let name = line.name.clone();
        let (flushed, pending) = self.switch_to(&name)?;
        pending.add(line)?;
        Ok(flushed)
    }

    fn finish(&mut self) -> Option<MetricFamily> {
        self.current.take().and_then(Pending::into_family)
    }

    // Makes `name` the current family, handing back the previous one if it's done.
    fn switch_to(&mut self, name: &str) -> Result<(Option<MetricFamily>, &mut Pending)> {
        let mut flushed = None;
        if self
            .current
            .as_ref()
            .map_or(true, |p| p.family.name() != name)
        {
            if !self.seen.insert(name.to_string()) {
                return Err(format!("metric family {} appears in more than one group", name).into());
            }
            flushed = self.current.take().and_then(Pending::into_family);
        }

        let pending = self
            .current
            .get_or_insert_with(|| Pending::new(name.to_string()));
        Ok((flushed, pending))
    }
}

struct Pending {
    family: MetricFamily,
    has_help: bool,
    has_type: bool,
}

impl Pending {
    fn new(name: MetricName) -> Self {
        Self {
            family: MetricFamily::new(name, "", MetricType::Untyped, vec![]),
            has_help: false,
            has_type: false,
        }
    }

    // Families that never got a sample are dropped.
    fn into_family(self) -> Option<MetricFamily> {
        Some(self.family).filter(|f| !f.samples().is_empty())
    }

    fn owns(&self, name: &str) -> bool {
        let suffix = match name.strip_prefix(self.family.name().as_str()) {
            Some(suffix) => suffix,
            None => return false,
        };

        match (self.family.metric_type(), suffix) {
            (_, "") => true,
            (MetricType::Summary, "_sum") | (MetricType::Summary, "_count") => true,
            (MetricType::Histogram, "_sum")
            | (MetricType::Histogram, "_count")
            | (MetricType::Histogram, "_bucket") => true,
            _ => false,
        }
    }

    fn add(&mut self, mut line: SampleLine) -> Result<()> {
        let suffix = line.name[self.family.name().len()..].to_string();

        match self.family.metric_type() {
            MetricType::Summary => match suffix.as_str() {
                "_sum" => self.summary(line.labels).sum = line.value,
                "_count" => self.summary(line.labels).count = line.value as u64,
                _ => {
                    let quantile = line
                        .take_label("quantile")
                        .as_deref()
                        .and_then(parse_float)
                        .ok_or_else(|| {
                            Error::from(format!("summary {} has no valid quantile label", line.name))
                        })?;
                    self.summary(line.labels).quantiles.push(Quantile {
                        quantile,
                        value: line.value,
                    });
                }
            },
            MetricType::Histogram => match suffix.as_str() {
                "_sum" => self.histogram(line.labels).sum = line.value,
                "_count" => self.histogram(line.labels).count = line.value as u64,
                "_bucket" => {
                    let upper_bound = line
                        .take_label("le")
                        .as_deref()
                        .and_then(parse_float)
                        .ok_or_else(|| {
                            Error::from(format!("histogram {} has no valid le label", line.name))
                        })?;
                    self.histogram(line.labels).buckets.push(Bucket {
                        upper_bound,
                        cumulative_count: line.value as u64,
                    });
                }
                _ => {
                    return Err(format!(
                        "histogram sample {} needs a _bucket, _sum or _count suffix",
                        line.name
                    )
                    .into())
                }
            },
            _ => self
                .family
                .samples_mut()
                .push(Sample::new(line.labels, SampleData::Value(line.value))),
        }

        Ok(())
    }

    fn summary(&mut self, labels: Labels) -> &mut Summary {
        match self.grouped(labels, || SampleData::Summary(Summary::default())) {
            SampleData::Summary(s) => s,
            _ => unreachable!("summary families hold summary samples only"),
        }
    }

    fn histogram(&mut self, labels: Labels) -> &mut Histogram {
        match self.grouped(labels, || SampleData::Histogram(Histogram::default())) {
            SampleData::Histogram(h) => h,
            _ => unreachable!("histogram families hold histogram samples only"),
        }
    }

    // Summary and histogram lines sharing a label set make up one sample. The
    // sample keeps the label order of its first line.
    fn grouped<F>(&mut self, labels: Labels, empty: F) -> &mut SampleData
    where
        F: FnOnce() -> SampleData,
    {
        let samples = self.family.samples_mut();
        let pos = match samples
            .iter()
            .position(|s| same_label_set(s.labels(), &labels))
        {
            Some(pos) => pos,
            None => {
                samples.push(Sample::new(labels, empty()));
                samples.len() - 1
            }
        };
        samples[pos].data_mut()
    }
}

// Label names are unique within a line, so equal length plus containment
// means the same set.
fn same_label_set(a: &Labels, b: &Labels) -> bool {
    a.len() == b.len() && a.iter().all(|pair| b.contains(pair))
}
