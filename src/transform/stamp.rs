use std::collections::BTreeMap;

use crate::model::Record;

/// Writes the configured attributes into `record`, overwriting fields of the
/// same name.
pub fn stamp_attributes(record: &mut Record, attributes: &BTreeMap<String, String>) {
    for (key, value) in attributes {
        record.insert(key.clone(), value.clone());
    }
}
