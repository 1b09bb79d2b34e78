use std::path::PathBuf;

use structopt::StructOpt;

use crate::config::FlattenConfig;
use crate::error::Result;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "promflat",
    about = "Flattens a Prometheus text exposition into JSON records"
)]
pub struct CliOpt {
    /// Exposition file; stdin when omitted.
    #[structopt(parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// JSON file with the flattening settings. Flags below take precedence.
    #[structopt(long = "config", short = "c", parse(from_os_str))]
    pub config: Option<PathBuf>,

    #[structopt(long = "name", short = "n")]
    pub name: Option<String>,

    #[structopt(long = "flattened-event", short = "e")]
    pub flattened_event: Option<String>,

    #[structopt(long = "fully-expand", short = "x")]
    pub fully_expand: bool,

    #[structopt(long = "summary-rollup")]
    pub summary_rollup: bool,

    #[structopt(long = "histogram-rollup")]
    pub histogram_rollup: bool,

    #[structopt(long = "include-runtime-metrics")]
    pub include_runtime_metrics: bool,

    #[structopt(long = "key-merge", short = "k", number_of_values = 1)]
    pub key_merge: Vec<String>,

    /// Static attribute stamped on every record, as key=value.
    #[structopt(long = "attr", short = "a", number_of_values = 1, parse(try_from_str = parse_attribute))]
    pub attributes: Vec<(String, String)>,

    #[structopt(long = "strict-merge-key")]
    pub strict_merge_key: bool,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}

impl CliOpt {
    pub fn flatten_config(&self) -> Result<FlattenConfig> {
        let mut config = match &self.config {
            Some(path) => FlattenConfig::from_file(path)?,
            None => FlattenConfig::default(),
        };

        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(event) = &self.flattened_event {
            config.flattened_event = Some(event.clone());
        }
        config.fully_expand |= self.fully_expand;
        config.summary_rollup |= self.summary_rollup;
        config.histogram_rollup |= self.histogram_rollup;
        config.include_runtime_metrics |= self.include_runtime_metrics;
        config.strict_merge_key |= self.strict_merge_key;
        if !self.key_merge.is_empty() {
            config.key_merge_labels = self.key_merge.clone();
        }
        config
            .static_attributes
            .extend(self.attributes.iter().cloned());

        Ok(config)
    }
}

fn parse_attribute(s: &str) -> Result<(String, String)> {
    match s.find('=') {
        Some(pos) if pos > 0 => Ok((s[..pos].to_string(), s[pos + 1..].to_string())),
        _ => Err(format!("attribute must look like key=value, got \"{}\"", s).into()),
    }
}
