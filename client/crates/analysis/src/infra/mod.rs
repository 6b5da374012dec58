//! Infrastructure Layer
//!
//! Decoding of the framed analysis byte stream.

pub mod frame_decoder;
pub mod stream;

pub use frame_decoder::FrameDecoder;
pub use stream::AnalysisStream;
