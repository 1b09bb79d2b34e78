use crate::model::Record;

const EVENT_TYPE: &str = "event_type";

/// The single wide record collecting every label-less gauge and counter of a
/// payload.
pub struct FlattenedAccumulator {
    record: Record,
}

impl FlattenedAccumulator {
    pub fn new(event_type: String) -> Self {
        let mut record = Record::new();
        record.insert(EVENT_TYPE.to_string(), event_type);
        Self { record }
    }

    // Last write wins for a repeated key.
    pub fn absorb(&mut self, key: String, value: String) {
        self.record.insert("name".to_string(), "main".to_string());
        self.record.insert(key, value);
    }

    /// The accumulated record. It carries `event_type` even when nothing was
    /// absorbed.
    pub fn into_record(self) -> Record {
        self.record
    }
}
