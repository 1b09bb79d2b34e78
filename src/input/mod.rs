mod bridge;
mod decoder;
mod reader;

pub use bridge::{FamilyBridge, BRIDGE_CAPACITY};
pub use decoder::Decoder;
pub use reader::{LineReader, Reader};
