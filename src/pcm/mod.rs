// ABOUTME: PCM types for decode targets
// ABOUTME: Format descriptors, sample storage, and the frame-addressed buffer

/// PCM sample buffer container
pub mod buffer;
/// PCM format descriptor and decode-target validation
pub mod format;

pub use buffer::{PcmBuffer, SampleData};
pub use format::{PcmFormat, SampleFormat};
