use std::collections::BTreeMap;

// Schema-less output record. Every value is stringified, numerics included.
// Ordered only to keep serialized output stable.
pub type Record = BTreeMap<String, String>;
