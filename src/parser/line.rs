use std::collections::HashSet;

use lazy_static::lazy_static;
use nom::{
    character::complete::{char as nom_char, space0, space1},
    combinator::{all_consuming, opt},
    sequence::preceded,
};
use regex;

use super::common::{braced_list, label_identifier, maybe_lpadded, maybe_padded, metric_identifier};
use super::number::{sample_value, timestamp};
use super::result::{IResult, ParseError, Span};
use super::string::{string_literal, unescape_help};
use crate::error::{Error, Result};
use crate::model::{LabelName, LabelValue, Labels, MetricName, MetricType, SampleValue};

#[derive(Debug, PartialEq)]
pub enum Line {
    Blank,
    Comment,
    Help(MetricName, String),
    Type(MetricName, MetricType),
    Sample(SampleLine),
}

#[derive(Debug, PartialEq)]
pub struct SampleLine {
    pub name: MetricName,
    pub labels: Labels,
    pub value: SampleValue,
    pub timestamp: Option<i64>,
}

impl SampleLine {
    /// Removes the label `name` and returns its value.
    pub fn take_label(&mut self, name: &str) -> Option<LabelValue> {
        let pos = self.labels.iter().position(|(n, _)| n == name)?;
        Some(self.labels.remove(pos).1)
    }
}

pub fn parse_line(line: &str) -> Result<Line> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line.starts_with('#') {
        return descriptor(line);
    }

    let (_, sample) = all_consuming(sample_line)(Span::new(line)).map_err(ParseError::from)?;

    let mut seen = HashSet::new();
    for (name, _) in &sample.labels {
        if !seen.insert(name) {
            return Err(format!("duplicate label name \"{}\" for {}", name, sample.name).into());
        }
    }

    Ok(Line::Sample(sample))
}

fn descriptor(line: &str) -> Result<Line> {
    lazy_static! {
        static ref RE: regex::Regex =
            regex::Regex::new(r"^#[ \t]+(HELP|TYPE)[ \t]+(\S+)(?:[ \t]+(.*))?$").unwrap();
    }

    let caps = match RE.captures(line) {
        Some(caps) => caps,
        None => return Ok(Line::Comment),
    };

    let name = all_consuming(metric_identifier)(Span::new(&caps[2]))
        .map(|(_, name)| name)
        .map_err(|_| Error::from(format!("invalid metric name \"{}\" in comment", &caps[2])))?;
    let text = caps.get(3).map_or("", |m| m.as_str());

    match &caps[1] {
        "HELP" => Ok(Line::Help(name, unescape_help(text))),
        _ => Ok(Line::Type(name, text.trim().parse()?)),
    }
}

fn sample_line(input: Span) -> IResult<SampleLine> {
    // metric_identifier [label_set] value [timestamp]
    let (rest, name) = metric_identifier(input)?;
    let (rest, labels) = opt(maybe_lpadded(label_set))(rest)?;
    let (rest, value) = preceded(space1, sample_value)(rest)?;
    let (rest, timestamp) = opt(preceded(space1, timestamp))(rest)?;
    let (rest, _) = space0(rest)?;
    Ok((
        rest,
        SampleLine {
            name,
            labels: labels.unwrap_or_default(),
            value,
            timestamp,
        },
    ))
}

fn label_set(input: Span) -> IResult<Labels> {
    braced_list(label_pair, "label set", "label")(input)
}

fn label_pair(input: Span) -> IResult<(LabelName, LabelValue)> {
    // IDENTIFIER = STRING
    let (rest, name) = label_identifier(input)?;
    let (rest, _) = maybe_padded(nom_char('='))(rest)?;
    let (rest, value) = string_literal(rest)?;
    Ok((rest, (name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sample_lines_valid() {
        #[rustfmt::skip]
        let tests = vec![
            ("up 1", "up", labels(&[]), 1.0, None),
            ("up{} 1", "up", labels(&[]), 1.0, None),
            ("  up 1  ", "up", labels(&[]), 1.0, None),
            (
                r#"http_requests_total{method="get",code="200"} 1027 1395066363000"#,
                "http_requests_total", labels(&[("method", "get"), ("code", "200")]), 1027.0, Some(1395066363000),
            ),
            (
                r#"rpc_bucket{ le = "+Inf", } 5"#,
                "rpc_bucket", labels(&[("le", "+Inf")]), 5.0, None,
            ),
            (
                r#"msdos_file_access_time_seconds{path="C:\\DIR\\FILE.TXT",error="Cannot find file:\n\"FILE.TXT\""} 1.458255915e9"#,
                "msdos_file_access_time_seconds",
                labels(&[("path", r"C:\DIR\FILE.TXT"), ("error", "Cannot find file:\n\"FILE.TXT\"")]),
                1.458255915e9, None,
            ),
            ("metric_without_timestamp_and_labels 12.47", "metric_without_timestamp_and_labels", labels(&[]), 12.47, None),
            ("something_weird{problem=\"division by zero\"} +Inf -3982045", "something_weird", labels(&[("problem", "division by zero")]), f64::INFINITY, Some(-3982045)),
        ];

        for (input, name, expected_labels, value, ts) in tests {
            let expected = Line::Sample(SampleLine {
                name: name.to_string(),
                labels: expected_labels,
                value,
                timestamp: ts,
            });
            assert_eq!(parse_line(input).unwrap(), expected, "while parsing {}", input);
        }
    }

    #[test]
    fn test_sample_lines_invalid() {
        let tests = [
            "up",
            "up{} ",
            "1up 1",
            "up{job=\"a\" 1",
            "up{job=a} 1",
            "up 1 2 3",
            "up one",
            "up 1 later",
            "up{job=\"a\",job=\"b\"} 1",
        ];

        for input in &tests {
            assert!(parse_line(input).is_err(), "expected error while parsing {}", input);
        }
    }

    #[test]
    fn test_descriptor_lines() {
        assert_eq!(parse_line("").unwrap(), Line::Blank);
        assert_eq!(parse_line("   ").unwrap(), Line::Blank);
        assert_eq!(parse_line("# just a comment").unwrap(), Line::Comment);
        assert_eq!(parse_line("#HELP up not a descriptor").unwrap(), Line::Comment);
        assert_eq!(
            parse_line(r"# HELP http_requests_total The total number\nof requests.").unwrap(),
            Line::Help(
                "http_requests_total".to_string(),
                "The total number\nof requests.".to_string()
            )
        );
        assert_eq!(
            parse_line("# HELP up").unwrap(),
            Line::Help("up".to_string(), String::new())
        );
        assert_eq!(
            parse_line("# TYPE rpc_duration_seconds histogram").unwrap(),
            Line::Type("rpc_duration_seconds".to_string(), MetricType::Histogram)
        );

        assert!(parse_line("# TYPE up gauges").is_err());
        assert!(parse_line("# TYPE up").is_err());
        assert!(parse_line("# HELP 1up help").is_err());
    }

    #[test]
    fn test_take_label() {
        let mut line = SampleLine {
            name: "rpc".to_string(),
            labels: labels(&[("service", "a"), ("quantile", "0.5")]),
            value: 1.0,
            timestamp: None,
        };
        assert_eq!(line.take_label("quantile"), Some("0.5".to_string()));
        assert_eq!(line.take_label("quantile"), None);
        assert_eq!(line.labels, labels(&[("service", "a")]));
    }
}
