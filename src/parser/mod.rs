mod common;
mod line;
mod number;
mod result;
mod string;

pub use line::{parse_line, Line, SampleLine};
pub use number::parse_float;
pub use result::ParseError;
