use serde_json;

use super::encoder::Encoder;
use crate::error::Result;
use crate::model::Record;

// One flat JSON object per record, fields in key order.
pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        serde_json::to_vec(record).map_err(|e| ("JSON serialization failed", e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_record() {
        let mut record = Record::new();
        record.insert("method".to_string(), "get".to_string());
        record.insert("http_requests_total.counter".to_string(), "5".to_string());
        record.insert("help".to_string(), "say \"hi\"".to_string());

        let buf = JsonEncoder::new().encode(&record).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            r#"{"help":"say \"hi\"","http_requests_total.counter":"5","method":"get"}"#
        );
    }

    #[test]
    fn test_encode_empty_record() {
        let buf = JsonEncoder::new().encode(&Record::new()).unwrap();
        assert_eq!(buf, b"{}".to_vec());
    }
}
