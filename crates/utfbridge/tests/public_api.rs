#![allow(missing_docs)]

mod common;

use rstest::rstest;
use utfbridge::{
    Backend, OperationStatus, TranscodeError, TranscodeOptions, first_invalid_utf8,
    first_invalid_utf16, max_utf8_len, max_utf16_len, scalar_count_utf8, transcode_utf8_to_utf16,
    transcode_utf8_to_utf16_with, transcode_utf16_to_utf8, utf8_len_for_utf16, utf16_len_for_utf8,
};

use crate::common::{MIXED, mixed_with_garbage};

#[test]
fn exact_sizing_then_transcode() {
    let len = utf16_len_for_utf8(MIXED.as_bytes()).unwrap();
    let mut wide = vec![0u16; len];
    let (read, written, status) = transcode_utf8_to_utf16(MIXED.as_bytes(), &mut wide, false, true);
    status.into_result(read, written).unwrap();
    assert_eq!(written, len);
    assert_eq!(wide, MIXED.encode_utf16().collect::<Vec<_>>());

    assert_eq!(utf8_len_for_utf16(&wide), Ok(MIXED.len()));
    let scalars = MIXED.chars().count();
    assert_eq!(scalar_count_utf8(MIXED.as_bytes()), Ok(scalars));

    let mut narrow = vec![0u8; MIXED.len()];
    assert_eq!(
        transcode_utf16_to_utf8(&wide, &mut narrow, false, true),
        (wide.len(), MIXED.len(), OperationStatus::Done)
    );
    assert_eq!(narrow, MIXED.as_bytes());
}

#[test]
fn worst_case_bounds_hold_for_garbage() {
    let (bytes, lossy) = mixed_with_garbage();
    let mut wide = vec![0u16; max_utf16_len(bytes.len())];
    let (read, written, status) = transcode_utf8_to_utf16(&bytes, &mut wide, true, true);
    assert_eq!((read, status), (bytes.len(), OperationStatus::Done));
    assert_eq!(wide[..written], lossy.encode_utf16().collect::<Vec<_>>());

    let lone: Vec<u16> = vec![0xDC00; 10];
    let mut narrow = vec![0u8; max_utf8_len(lone.len()).unwrap()];
    let (_, written, status) = transcode_utf16_to_utf8(&lone, &mut narrow, true, true);
    assert_eq!((written, status), (narrow.len(), OperationStatus::Done));
}

#[test]
fn strict_mode_reports_the_first_malformation() {
    let (bytes, _) = mixed_with_garbage();
    let (valid, _, _) = first_invalid_utf8(&bytes);
    let mut wide = vec![0u16; bytes.len()];
    let (read, written, status) = transcode_utf8_to_utf16(&bytes, &mut wide, false, true);
    assert_eq!(status, OperationStatus::InvalidData);
    assert_eq!(read, valid);
    assert_eq!(
        status.into_result(read, written),
        Err(TranscodeError::InvalidData { offset: valid })
    );
    assert_eq!(
        utf16_len_for_utf8(&bytes),
        Err(TranscodeError::InvalidData { offset: valid })
    );
}

#[rstest]
#[case::utf8_overlong(b"ab\xC0\xAF", 2)]
#[case::utf8_truncated(b"abc\xE2\x82", 3)]
#[case::clean(b"abcdef", 6)]
fn first_invalid_offsets(#[case] bytes: &[u8], #[case] expected: usize) {
    assert_eq!(first_invalid_utf8(bytes).0, expected);
}

#[test]
fn first_invalid_utf16_reports_adjustments() {
    let wide: Vec<u16> = "a€😀".encode_utf16().chain([0xDFFF, 0x61]).collect();
    // 1 + 3 + 4 bytes from 1 + 1 + 2 units; 3 scalars from 4 units.
    assert_eq!(first_invalid_utf16(&wide), (4, 4, -1));
}

#[test]
fn every_listed_backend_runs() {
    let (bytes, lossy) = mixed_with_garbage();
    let expected: Vec<u16> = lossy.encode_utf16().collect();
    for backend in Backend::ALL {
        // Unavailable backends fall back to the detected one.
        let options = TranscodeOptions::new()
            .with_replacement(true)
            .with_backend(backend);
        let mut wide = vec![0u16; bytes.len()];
        let (_, written, status) = transcode_utf8_to_utf16_with(&bytes, &mut wide, options);
        assert_eq!(status, OperationStatus::Done, "{backend:?}");
        assert_eq!(wide[..written], expected, "{backend:?}");
    }
}

#[test]
fn error_display() {
    let too_small = TranscodeError::DestinationTooSmall {
        read: 3,
        written: 2,
    };
    assert_eq!(
        too_small.to_string(),
        "destination too small after reading 3 and writing 2 code units"
    );
    assert_eq!(
        TranscodeError::Truncated { offset: 9 }.to_string(),
        "truncated sequence at offset 9"
    );
}

#[cfg(feature = "serde")]
#[test]
fn options_serde_shape() {
    let backend = Backend::Portable(utfbridge::LaneWidth::X8);
    let options = TranscodeOptions::new().with_backend(backend);
    insta::assert_yaml_snapshot!(options, @r"
    replace_invalid: false
    is_final: true
    backend:
      Portable: X8
    ");
}
