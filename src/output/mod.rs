pub mod encoder;
mod output;
pub mod writer;

pub use encoder::{Encoder, JsonEncoder};
pub use output::Output;
pub use writer::{LineWriter, Writer};
