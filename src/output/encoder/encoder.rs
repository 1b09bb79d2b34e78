use crate::error::Result;
use crate::model::Record;

pub trait Encoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>>;
}
