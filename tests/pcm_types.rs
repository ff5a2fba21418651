use opus_pcm::{PcmBuffer, PcmFormat, SampleData, SampleFormat};

#[test]
fn test_validator_accepts_decodable_formats() {
    for rate in [8_000, 12_000, 16_000, 24_000, 48_000] {
        for channels in [1, 2] {
            assert!(PcmFormat::new(rate, channels, SampleFormat::Int16).is_valid_decode_format());
            assert!(PcmFormat::new(rate, channels, SampleFormat::Float32).is_valid_decode_format());
        }
    }
}

#[test]
fn test_validator_rejects_other_representations() {
    assert!(!PcmFormat::new(48_000, 2, SampleFormat::Int32).is_valid_decode_format());
    assert!(!PcmFormat::new(48_000, 2, SampleFormat::Float64).is_valid_decode_format());
}

#[test]
fn test_bytes_per_sample() {
    assert_eq!(SampleFormat::Int16.bytes_per_sample(), 2);
    assert_eq!(SampleFormat::Int32.bytes_per_sample(), 4);
    assert_eq!(SampleFormat::Float32.bytes_per_sample(), 4);
    assert_eq!(SampleFormat::Float64.bytes_per_sample(), 8);
}

#[test]
fn test_buffer_allocation_matches_format() {
    let format = PcmFormat::new(48_000, 2, SampleFormat::Int16);
    let buffer = PcmBuffer::new(format, 960);

    assert_eq!(buffer.format(), &format);
    assert_eq!(buffer.frame_capacity(), 960);
    assert_eq!(buffer.frame_length(), 0);

    // Interleaved storage: frames * channels samples, zero-filled
    match buffer.data() {
        SampleData::I16(samples) => {
            assert_eq!(samples.len(), 960 * 2);
            assert!(samples.iter().all(|&s| s == 0));
        }
        other => panic!("unexpected storage: {:?}", other),
    }
}

#[test]
fn test_buffer_views_track_frame_length() {
    let format = PcmFormat::new(48_000, 1, SampleFormat::Float32);
    let mut buffer = PcmBuffer::new(format, 480);

    assert_eq!(buffer.as_f32().unwrap().len(), 0);
    assert!(buffer.as_i16().is_none());

    buffer.set_frame_length(120);
    assert_eq!(buffer.as_f32().unwrap().len(), 120);
}

#[test]
fn test_buffer_views_count_interleaved_samples() {
    let format = PcmFormat::new(48_000, 2, SampleFormat::Int16);
    let mut buffer = PcmBuffer::new(format, 480);

    buffer.set_frame_length(100);
    assert_eq!(buffer.as_i16().unwrap().len(), 200);
}

#[test]
#[should_panic]
fn test_frame_length_cannot_exceed_capacity() {
    let format = PcmFormat::new(48_000, 1, SampleFormat::Int16);
    let mut buffer = PcmBuffer::new(format, 10);
    buffer.set_frame_length(11);
}
