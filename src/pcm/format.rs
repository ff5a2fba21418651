// ABOUTME: PCM format descriptor
// ABOUTME: SampleFormat, PcmFormat, and the decode-target validity predicate

/// Sample representation of a linear PCM stream
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    /// 16-bit signed integer samples
    Int16,
    /// 32-bit signed integer samples
    Int32,
    /// 32-bit IEEE float samples
    Float32,
    /// 64-bit IEEE float samples
    Float64,
}

impl SampleFormat {
    /// Size of one sample in bytes
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::Int16 => 2,
            SampleFormat::Int32 | SampleFormat::Float32 => 4,
            SampleFormat::Float64 => 8,
        }
    }
}

/// Linear PCM format specification
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PcmFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u8,
    /// Sample representation
    pub sample_format: SampleFormat,
}

impl PcmFormat {
    /// Create a format descriptor
    pub fn new(sample_rate: u32, channels: u8, sample_format: SampleFormat) -> Self {
        Self {
            sample_rate,
            channels,
            sample_format,
        }
    }

    /// Whether this format can be decoded into directly.
    ///
    /// The decoder produces 16-bit integer or 32-bit float samples only.
    /// Sample rate and channel ranges are not checked here; decoder
    /// creation is the authoritative check for those.
    pub fn is_valid_decode_format(&self) -> bool {
        matches!(
            self.sample_format,
            SampleFormat::Int16 | SampleFormat::Float32
        )
    }
}
