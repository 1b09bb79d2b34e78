use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json;

use crate::error::Result;
use crate::model::LabelName;

const DEFAULT_NAME: &str = "prometheus";

const SAMPLE_SUFFIX: &str = "Sample";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RollupKind {
    Summary,
    Histogram,
}

impl RollupKind {
    fn event_suffix(&self) -> &'static str {
        match self {
            RollupKind::Summary => "SummarySample",
            RollupKind::Histogram => "HistogramSample",
        }
    }
}

/// Knobs of the flattening policy.
///
/// Field aliases accept the older configuration key names.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FlattenConfig {
    /// Source identifier, the base of every derived event name.
    pub name: String,

    /// `event_type` of the flattened record. Defaults to `<name>Sample`.
    pub flattened_event: Option<String>,

    /// One record per sample with every quantile and bucket expanded.
    #[serde(alias = "unflatten")]
    pub fully_expand: bool,

    #[serde(alias = "summary")]
    pub summary_rollup: bool,

    #[serde(alias = "histogram")]
    pub histogram_rollup: bool,

    /// Keep families of the Go runtime (`go_*`).
    #[serde(alias = "go_metrics")]
    pub include_runtime_metrics: bool,

    /// Candidates, in order, for disambiguating label-less metrics.
    #[serde(alias = "key_merge")]
    pub key_merge_labels: Vec<LabelName>,

    #[serde(alias = "custom_attributes")]
    pub static_attributes: BTreeMap<String, String>,

    /// Build merge keys from name/value pairs instead of bare label values.
    pub strict_merge_key: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            flattened_event: None,
            fully_expand: false,
            summary_rollup: false,
            histogram_rollup: false,
            include_runtime_metrics: false,
            key_merge_labels: vec![],
            static_attributes: BTreeMap::new(),
            strict_merge_key: false,
        }
    }
}

impl FlattenConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| (format!("cannot read config {}", path.display()), e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ("malformed config", e).into())
    }

    // Empty names count as unset.
    fn explicit_event(&self) -> Option<&str> {
        self.flattened_event
            .as_deref()
            .filter(|event| !event.is_empty())
    }

    pub fn flattened_event_name(&self) -> String {
        match self.explicit_event() {
            Some(event) => event.to_string(),
            None => format!("{}{}", self.name, SAMPLE_SUFFIX),
        }
    }

    pub fn rollup_event_name(&self, kind: RollupKind) -> String {
        let base = self.explicit_event().unwrap_or(self.name.as_str());
        if base.contains(SAMPLE_SUFFIX) {
            base.replace(SAMPLE_SUFFIX, kind.event_suffix())
        } else {
            format!("{}{}", base, kind.event_suffix())
        }
    }
}
