use std::collections::HashMap;

use crate::model::{Labels, Record};

/// Grouping key of a labelled sample.
///
/// The default key is the concatenation of the label values in label order;
/// label names do not take part. Different label sets can therefore collide,
/// e.g. `{a="xy"}` and `{a="x",b="y"}` both yield `xy`, and their fields end
/// up in one record. Existing consumers depend on that key, so the stricter
/// name/value key is opt-in only.
pub fn merge_key(labels: &Labels, strict: bool) -> String {
    if strict {
        labels
            .iter()
            .map(|(name, value)| format!("{}={:?},", name, value))
            .collect()
    } else {
        labels.iter().map(|(_, value)| value.as_str()).collect()
    }
}

/// Records accumulated per merge key.
pub struct MergeTable {
    strict: bool,
    records: HashMap<String, Record>,
}

impl MergeTable {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            records: HashMap::new(),
        }
    }

    /// Record for the sample's merge key. A new record starts out with the
    /// sample's labels as fields.
    pub fn entry(&mut self, labels: &Labels) -> &mut Record {
        self.records
            .entry(merge_key(labels, self.strict))
            .or_insert_with(|| labels.iter().cloned().collect())
    }

    // Unordered.
    pub fn into_records(self) -> impl Iterator<Item = Record> {
        self.records.into_iter().map(|(_, record)| record)
    }
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
    fn test_merge_key() {
        let ls = labels(&[("method", "get"), ("code", "200")]);
        assert_eq!(merge_key(&ls, false), "get200");
        assert_eq!(merge_key(&ls, true), "method=\"get\",code=\"200\",");
        assert_eq!(merge_key(&labels(&[]), false), "");
    }

    #[test]
    fn test_value_only_keys_collide() {
        // Known weakness of the compatible key.
        let one = labels(&[("a", "xy")]);
        let two = labels(&[("a", "x"), ("b", "y")]);
        assert_eq!(merge_key(&one, false), merge_key(&two, false));
        assert_ne!(merge_key(&one, true), merge_key(&two, true));

        let mut table = MergeTable::new(false);
        table.entry(&one).insert("first".into(), "1".into());
        table.entry(&two).insert("second".into(), "2".into());
        let records: Vec<_> = table.into_records().collect();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        // Only the labels of the sample that created the record are kept.
        assert_eq!(record.get("a").map(String::as_str), Some("xy"));
        assert!(record.get("b").is_none());
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_strict_table_keeps_label_sets_apart() {
        let mut table = MergeTable::new(true);
        table.entry(&labels(&[("a", "xy")]));
        table.entry(&labels(&[("a", "x"), ("b", "y")]));
        assert_eq!(table.into_records().count(), 2);
    }

    #[test]
    fn test_same_labels_share_a_record() {
        let ls = labels(&[("method", "get")]);
        let mut table = MergeTable::new(false);
        table.entry(&ls).insert("requests.counter".into(), "5".into());
        table.entry(&ls).insert("latency.summary.count".into(), "2".into());
        let records: Vec<_> = table.into_records().collect();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.len(), 3);
        assert_eq!(record["method"], "get");
    }
}
