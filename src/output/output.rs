use super::encoder::Encoder;
use super::writer::Writer;
use crate::error::Result;
use crate::model::Record;

pub struct Output {
    writer: Box<dyn Writer>,
    encoder: Box<dyn Encoder>,
}

impl Output {
    pub fn new(writer: Box<dyn Writer>, encoder: Box<dyn Encoder>) -> Self {
        Self { writer, encoder }
    }

    pub fn write(&mut self, record: &Record) -> Result<()> {
        let buf = self.encoder.encode(record)?;

        self.writer
            .write(&buf)
            .map_err(|e| ("writer failed with error", e))?;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| ("writer failed with error", e).into())
    }
}
