// ABOUTME: Main library entry point for opus-pcm
// ABOUTME: Exports the Opus decoder, PCM types, and error model

//! # opus-pcm
//!
//! Safe decoding of Opus packets into linear PCM buffers.
//!
//! The crate wraps the libopus decoder behind an owned [`Decoder`] type:
//! construction validates the requested PCM format, decode calls dispatch to
//! the int16 or float32 primitive based on the destination buffer's sample
//! representation, and every negative libopus return code surfaces as a
//! typed [`Error`].
//!
//! ```no_run
//! use opus_pcm::{Application, Decoder, PcmFormat, SampleFormat};
//!
//! # fn main() -> opus_pcm::Result<()> {
//! let format = PcmFormat::new(48_000, 1, SampleFormat::Int16);
//! let mut decoder = Decoder::new(format, Application::Audio)?;
//! # let packet: &[u8] = &[];
//! let buffer = decoder.decode(packet)?;
//! assert_eq!(buffer.format(), &format);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Stateful Opus packet decoder
pub mod decoder;
/// PCM format descriptors and sample buffers
pub mod pcm;

pub use decoder::{Application, Decoder};
pub use error::Error;
pub use pcm::{PcmBuffer, PcmFormat, SampleData, SampleFormat};

/// Result type for opus-pcm operations
pub type Result<T> = std::result::Result<T, error::Error>;

/// Error types for opus-pcm
pub mod error {
    use thiserror::Error;

    /// Error raised by decoder construction and decode operations.
    ///
    /// One variant per libopus error code, plus [`Error::Unknown`] for any
    /// code this crate does not recognize. [`Error::BadArg`] is also raised
    /// locally, before any codec call, when a requested or destination PCM
    /// format is not a decodable target.
    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Error {
        /// Invalid argument, or an unsupported PCM format was requested
        #[error("invalid argument or unsupported PCM format")]
        BadArg,

        /// The destination buffer cannot hold the decoded frames
        #[error("destination buffer too small")]
        BufferTooSmall,

        /// libopus detected an internal fault
        #[error("internal codec error")]
        Internal,

        /// The compressed packet is corrupted or malformed
        #[error("corrupted or invalid packet")]
        InvalidPacket,

        /// The codec does not implement the request
        #[error("request not implemented by the codec")]
        Unimplemented,

        /// Decoder state is inconsistent, or the decoded frame count
        /// disagreed with the count the packet announced
        #[error("invalid or inconsistent decoder state")]
        InvalidState,

        /// The codec failed to allocate memory
        #[error("codec memory allocation failed")]
        AllocFail,

        /// A libopus error code this crate does not recognize
        #[error("unknown codec error ({0})")]
        Unknown(i32),
    }

    impl Error {
        /// Map a raw libopus return code to an error.
        ///
        /// Callers check the sign first; non-negative returns are sample
        /// counts, not errors.
        pub(crate) fn from_raw(code: i32) -> Self {
            match code {
                audiopus_sys::OPUS_BAD_ARG => Error::BadArg,
                audiopus_sys::OPUS_BUFFER_TOO_SMALL => Error::BufferTooSmall,
                audiopus_sys::OPUS_INTERNAL_ERROR => Error::Internal,
                audiopus_sys::OPUS_INVALID_PACKET => Error::InvalidPacket,
                audiopus_sys::OPUS_UNIMPLEMENTED => Error::Unimplemented,
                audiopus_sys::OPUS_INVALID_STATE => Error::InvalidState,
                audiopus_sys::OPUS_ALLOC_FAIL => Error::AllocFail,
                other => Error::Unknown(other),
            }
        }

        /// The libopus error code this error corresponds to
        pub fn raw_code(&self) -> i32 {
            match self {
                Error::BadArg => audiopus_sys::OPUS_BAD_ARG,
                Error::BufferTooSmall => audiopus_sys::OPUS_BUFFER_TOO_SMALL,
                Error::Internal => audiopus_sys::OPUS_INTERNAL_ERROR,
                Error::InvalidPacket => audiopus_sys::OPUS_INVALID_PACKET,
                Error::Unimplemented => audiopus_sys::OPUS_UNIMPLEMENTED,
                Error::InvalidState => audiopus_sys::OPUS_INVALID_STATE,
                Error::AllocFail => audiopus_sys::OPUS_ALLOC_FAIL,
                Error::Unknown(code) => *code,
            }
        }
    }
}
