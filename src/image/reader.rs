mod codec;

pub use codec::CodecImageReader;
