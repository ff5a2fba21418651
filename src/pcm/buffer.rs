// ABOUTME: Linear PCM buffer
// ABOUTME: Interleaved sample storage with frame capacity and length bookkeeping

use crate::pcm::format::{PcmFormat, SampleFormat};

/// Interleaved sample storage, one variant per [`SampleFormat`]
#[derive(Clone, Debug, PartialEq)]
pub enum SampleData {
    /// 16-bit signed integer samples
    I16(Vec<i16>),
    /// 32-bit signed integer samples
    I32(Vec<i32>),
    /// 32-bit float samples
    F32(Vec<f32>),
    /// 64-bit float samples
    F64(Vec<f64>),
}

/// Linear PCM buffer with a fixed frame capacity
///
/// Storage is interleaved: one frame holds one sample per channel, so the
/// backing vector holds `frame_capacity * channels` samples. The frame
/// length starts at zero and is set by decode operations to the number of
/// frames actually produced, which may be less than the capacity.
#[derive(Clone, Debug)]
pub struct PcmBuffer {
    format: PcmFormat,
    frame_capacity: usize,
    frame_length: usize,
    data: SampleData,
}

impl PcmBuffer {
    /// Allocate a zero-filled buffer for `frame_capacity` frames of `format`
    pub fn new(format: PcmFormat, frame_capacity: usize) -> Self {
        let samples = frame_capacity * usize::from(format.channels);
        let data = match format.sample_format {
            SampleFormat::Int16 => SampleData::I16(vec![0; samples]),
            SampleFormat::Int32 => SampleData::I32(vec![0; samples]),
            SampleFormat::Float32 => SampleData::F32(vec![0.0; samples]),
            SampleFormat::Float64 => SampleData::F64(vec![0.0; samples]),
        };
        Self {
            format,
            frame_capacity,
            frame_length: 0,
            data,
        }
    }

    /// The format this buffer was allocated for
    pub fn format(&self) -> &PcmFormat {
        &self.format
    }

    /// Maximum number of frames the storage can hold
    pub fn frame_capacity(&self) -> usize {
        self.frame_capacity
    }

    /// Number of valid frames currently in the buffer
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Set the number of valid frames
    ///
    /// # Panics
    /// Panics if `frames` exceeds the frame capacity.
    pub fn set_frame_length(&mut self, frames: usize) {
        assert!(
            frames <= self.frame_capacity,
            "frame length {} exceeds capacity {}",
            frames,
            self.frame_capacity
        );
        self.frame_length = frames;
    }

    /// The full interleaved storage, valid and unwritten frames alike
    pub fn data(&self) -> &SampleData {
        &self.data
    }

    // The storage vector must keep its allocated length; decode paths rely
    // on it matching frame_capacity * channels.
    pub(crate) fn data_mut(&mut self) -> &mut SampleData {
        &mut self.data
    }

    /// Valid decoded samples as `i16`, if that is this buffer's representation
    ///
    /// Returns the interleaved `frame_length * channels` prefix.
    pub fn as_i16(&self) -> Option<&[i16]> {
        match &self.data {
            SampleData::I16(samples) => Some(&samples[..self.valid_samples()]),
            _ => None,
        }
    }

    /// Valid decoded samples as `f32`, if that is this buffer's representation
    ///
    /// Returns the interleaved `frame_length * channels` prefix.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            SampleData::F32(samples) => Some(&samples[..self.valid_samples()]),
            _ => None,
        }
    }

    fn valid_samples(&self) -> usize {
        self.frame_length * usize::from(self.format.channels)
    }
}
