// ABOUTME: Stateful Opus packet decoder
// ABOUTME: Owns one libopus decoder handle and decodes packets into PCM buffers

use crate::error::Error;
use crate::pcm::{PcmBuffer, PcmFormat, SampleData, SampleFormat};
use crate::Result;
use audiopus_sys as sys;
use std::fmt;
use std::os::raw::c_int;
use std::ptr::NonNull;

/// Codec tuning hint recorded at construction
///
/// Mirrors the libopus application modes. Decoder creation in libopus does
/// not take an application argument, so the hint has no effect on decode
/// output; it is kept for callers that configure the encode and decode
/// sides of a stream from one description.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Application {
    /// General audio
    #[default]
    Audio,
    /// Voice over IP
    Voip,
    /// Restricted low-delay mode
    LowDelay,
}

/// Stateful Opus decoder bound to one PCM format
///
/// Owns exactly one libopus decoder handle, created from the sample rate
/// and channel count of the format passed to [`Decoder::new`] and destroyed
/// when the decoder is dropped. The binding never changes for the life of
/// the instance; [`Decoder::reset`] reinitializes codec state in place
/// without touching it.
///
/// Mutating operations take `&mut self`, so the borrow checker serializes
/// all use of one instance. Distinct instances are fully independent and
/// may be driven concurrently from different threads.
pub struct Decoder {
    handle: NonNull<sys::OpusDecoder>,
    format: PcmFormat,
    application: Application,
}

// The handle is exclusively owned and libopus decoder state has no thread
// affinity, so moving a Decoder between threads is sound. Sync is not
// claimed: libopus handles are not safe for concurrent access.
unsafe impl Send for Decoder {}

impl Decoder {
    /// Create a decoder bound to `format`
    ///
    /// Fails with [`Error::BadArg`] before any codec call if the format is
    /// not a valid decode target. Otherwise propagates whatever
    /// `opus_decoder_create` reports; the codec is the authoritative check
    /// for sample rate and channel ranges. On failure nothing is retained.
    pub fn new(format: PcmFormat, application: Application) -> Result<Self> {
        if !format.is_valid_decode_format() {
            return Err(Error::BadArg);
        }

        let mut err: c_int = 0;
        let raw = unsafe {
            sys::opus_decoder_create(
                format.sample_rate as i32,
                c_int::from(format.channels),
                &mut err,
            )
        };
        if err < 0 {
            return Err(Error::from_raw(err));
        }
        let handle = NonNull::new(raw).ok_or(Error::AllocFail)?;

        log::debug!(
            "created opus decoder: {} Hz, {} ch, {:?}",
            format.sample_rate,
            format.channels,
            format.sample_format
        );

        Ok(Self {
            handle,
            format,
            application,
        })
    }

    /// The PCM format this decoder was bound to at construction
    pub fn format(&self) -> &PcmFormat {
        &self.format
    }

    /// The tuning hint recorded at construction
    pub fn application(&self) -> Application {
        self.application
    }

    /// Reinitialize codec state in place
    ///
    /// Clears adaptive state, including packet-loss-concealment history,
    /// while keeping the handle and the bound format. The stored sample
    /// rate and channel count are always used, never a caller-supplied
    /// format. After a failed reset the handle must not be assumed usable;
    /// recreate the decoder instead.
    pub fn reset(&mut self) -> Result<()> {
        let ret = unsafe {
            sys::opus_decoder_init(
                self.handle.as_ptr(),
                self.format.sample_rate as i32,
                c_int::from(self.format.channels),
            )
        };
        if ret < 0 {
            return Err(Error::from_raw(ret));
        }
        log::debug!("reset opus decoder");
        Ok(())
    }

    /// Decode one packet into a freshly allocated buffer in the bound format
    ///
    /// The buffer is sized to exactly the frame count the packet announces
    /// for this decoder's sample rate; on success its frame length equals
    /// that count. Nothing is allocated if the query fails.
    pub fn decode(&mut self, packet: &[u8]) -> Result<PcmBuffer> {
        let frames = self.expected_frames(packet)?;
        let mut output = PcmBuffer::new(self.format, frames);
        self.decode_into(packet, &mut output)?;
        Ok(output)
    }

    /// Decode one packet into a caller-supplied buffer
    ///
    /// Dispatches on the destination's sample representation: int16 and
    /// float32 storage is decoded directly, anything else fails with
    /// [`Error::BadArg`] before any codec call and without touching the
    /// buffer. The destination's channel count must match the decoder's
    /// binding; a mismatch is rejected the same way. On success the
    /// buffer's frame length is set to the decoded frame count; a count
    /// short of the capacity is a legal shorter decode (packet-loss
    /// concealment), not an error. On failure the frame length is left as
    /// it was.
    pub fn decode_into(&mut self, packet: &[u8], output: &mut PcmBuffer) -> Result<()> {
        // The codec writes frame_capacity * bound-channel-count samples; a
        // destination laid out for a different channel count cannot hold
        // them.
        if output.format().channels != self.format.channels {
            return Err(Error::BadArg);
        }

        let capacity = output.frame_capacity();
        let decoded = match output.data_mut() {
            SampleData::I16(samples) => self.decode_i16_raw(packet, samples, capacity)?,
            SampleData::F32(samples) => self.decode_f32_raw(packet, samples, capacity)?,
            _ => return Err(Error::BadArg),
        };
        output.set_frame_length(decoded);
        Ok(())
    }

    /// Decode one packet into a raw byte payload
    ///
    /// The payload is sized for the bound representation: 2 bytes per
    /// sample for an int16-bound decoder, 4 for float32-bound; any other
    /// binding fails with [`Error::BadArg`]. The payload is then filled by
    /// the int16 decode primitive in little-endian order regardless of the
    /// binding, so a float32-bound decoder gets int16 samples in the first
    /// half of the payload and zeros in the rest. Fails with
    /// [`Error::InvalidState`] if the decoded frame count disagrees with
    /// the count the packet announced; no partial payload is returned.
    pub fn decode_to_bytes(&mut self, packet: &[u8]) -> Result<Vec<u8>> {
        let frames = self.expected_frames(packet)?;
        let channels = usize::from(self.format.channels);
        let bytes_len = match self.format.sample_format {
            SampleFormat::Int16 | SampleFormat::Float32 => {
                self.format.sample_format.bytes_per_sample() * frames * channels
            }
            _ => return Err(Error::BadArg),
        };

        // Byte sizing above is the only representation-aware step; the
        // decode itself always runs through the int16 primitive.
        let mut scratch = vec![0i16; bytes_len / 2];
        let frame_capacity = scratch.len() / channels;
        let decoded = self.decode_i16_raw(packet, &mut scratch, frame_capacity)?;
        if decoded != frames {
            return Err(Error::InvalidState);
        }

        let mut bytes = vec![0u8; bytes_len];
        for (chunk, sample) in bytes.chunks_exact_mut(2).zip(&scratch) {
            chunk.copy_from_slice(&sample.to_le_bytes());
        }
        Ok(bytes)
    }

    /// Frame count this packet will decode to at the bound sample rate
    fn expected_frames(&self, packet: &[u8]) -> Result<usize> {
        let len = packet_len(packet)?;
        let count =
            unsafe { sys::opus_decoder_get_nb_samples(self.handle.as_ptr(), packet.as_ptr(), len) };
        if count < 0 {
            return Err(Error::from_raw(count));
        }
        Ok(count as usize)
    }

    // `output` must hold at least `frame_capacity * channels` samples.
    fn decode_i16_raw(
        &mut self,
        packet: &[u8],
        output: &mut [i16],
        frame_capacity: usize,
    ) -> Result<usize> {
        debug_assert!(output.len() >= frame_capacity * usize::from(self.format.channels));
        let len = packet_len(packet)?;
        let decoded = unsafe {
            sys::opus_decode(
                self.handle.as_ptr(),
                packet.as_ptr(),
                len,
                output.as_mut_ptr(),
                frame_capacity as c_int,
                0, // forward error correction is never requested
            )
        };
        if decoded < 0 {
            return Err(Error::from_raw(decoded));
        }
        Ok(decoded as usize)
    }

    // `output` must hold at least `frame_capacity * channels` samples.
    fn decode_f32_raw(
        &mut self,
        packet: &[u8],
        output: &mut [f32],
        frame_capacity: usize,
    ) -> Result<usize> {
        debug_assert!(output.len() >= frame_capacity * usize::from(self.format.channels));
        let len = packet_len(packet)?;
        let decoded = unsafe {
            sys::opus_decode_float(
                self.handle.as_ptr(),
                packet.as_ptr(),
                len,
                output.as_mut_ptr(),
                frame_capacity as c_int,
                0, // forward error correction is never requested
            )
        };
        if decoded < 0 {
            return Err(Error::from_raw(decoded));
        }
        Ok(decoded as usize)
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        unsafe { sys::opus_decoder_destroy(self.handle.as_ptr()) };
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("format", &self.format)
            .field("application", &self.application)
            .finish_non_exhaustive()
    }
}

/// Packet lengths beyond the i32 range cannot be expressed to libopus
fn packet_len(packet: &[u8]) -> Result<i32> {
    i32::try_from(packet.len()).map_err(|_| Error::BadArg)
}
