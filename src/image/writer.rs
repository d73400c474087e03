mod codec;

pub use codec::CodecImageWriter;
