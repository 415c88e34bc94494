use topo_render::{encode_frame, FrameDecoder, TopologyError};

fn decode_all(input: &[u8]) -> Result<Vec<Vec<u8>>, TopologyError> {
    FrameDecoder::new(input, None).collect()
}

#[test]
fn test_round_trip_sizes() {
    let large: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();

    for payload in [Vec::new(), vec![b'{'], large] {
        let frames = decode_all(&encode_frame(&payload)).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], payload);
    }
}

#[test]
fn test_payload_may_contain_framing_bytes() {
    let payload = b"3:a,b:,,";
    let frames = decode_all(&encode_frame(payload)).unwrap();
    assert_eq!(frames, vec![payload.to_vec()]);
}

#[test]
fn test_truncated_payload_is_malformed() {
    for input in [&b"10:short,"[..], b"5:abc", b"1:"] {
        let err = decode_all(input).unwrap_err();
        assert!(
            matches!(err, TopologyError::MalformedFrame { .. }),
            "{:?} gave {err}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_truncated_large_frame_is_malformed() {
    let mut input = b"100000:".to_vec();
    input.extend(std::iter::repeat(b'x').take(99_999));
    let err = decode_all(&input).unwrap_err();
    assert!(matches!(err, TopologyError::MalformedFrame { .. }));
}

#[test]
fn test_wrong_terminator_is_malformed() {
    for terminator in [b';', b'\n', b'0', b' '] {
        let input = [b'2', b':', b'o', b'k', terminator];
        let err = decode_all(&input).unwrap_err();
        assert!(matches!(err, TopologyError::MalformedFrame { offset: 4, .. }));
    }
}

#[test]
fn test_missing_terminator_at_end_of_stream_is_malformed() {
    let err = decode_all(b"2:ok").unwrap_err();
    assert!(matches!(err, TopologyError::MalformedFrame { .. }));
}

#[test]
fn test_frames_before_error_are_delivered() {
    let mut decoder = FrameDecoder::new(&b"2:ok,2:no"[..], None);
    assert_eq!(decoder.next().unwrap().unwrap(), b"ok".to_vec());
    assert!(decoder.next().unwrap().is_err());
    assert!(decoder.next().is_none());
}

#[test]
fn test_limit_is_checked_before_payload_is_read() {
    // Declared length over the cap fails even though the payload is absent.
    let mut decoder = FrameDecoder::new(&b"4096:"[..], Some(1024));
    let err = decoder.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        TopologyError::FrameTooLarge {
            length: 4096,
            limit: 1024
        }
    ));
    assert_eq!(decoder.bytes_read(), 5);
}
