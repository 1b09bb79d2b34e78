mod encoder;
mod json;

pub use encoder::Encoder;
pub use json::JsonEncoder;
