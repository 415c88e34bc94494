//! Length-prefixed framing: each frame is `<decimal-length>:<payload>,`.

use crate::utils::error::{Result, TopologyError};
use std::io::{self, BufRead, Read};

const SEPARATOR: u8 = b':';
const TERMINATOR: u8 = b',';

/// Upper bound on the buffer reserved up front for a payload; larger
/// payloads grow as bytes actually arrive.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Encodes one payload as a frame.
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let prefix = payload.len().to_string();
    let mut frame = Vec::with_capacity(prefix.len() + payload.len() + 2);
    frame.extend_from_slice(prefix.as_bytes());
    frame.push(SEPARATOR);
    frame.extend_from_slice(payload);
    frame.push(TERMINATOR);
    frame
}

/// Pulls frames off a byte stream one at a time.
///
/// End of stream exactly at a frame boundary ends the sequence; end of
/// stream anywhere else is a `MalformedFrame`. After the first error or
/// the end of the stream the iterator is fused.
pub struct FrameDecoder<R> {
    reader: R,
    max_frame_length: Option<usize>,
    offset: u64,
    frames: u64,
    finished: bool,
}

impl<R: BufRead> FrameDecoder<R> {
    /// `max_frame_length` of `None` disables the size check.
    pub fn new(reader: R, max_frame_length: Option<usize>) -> Self {
        Self {
            reader,
            max_frame_length,
            offset: 0,
            frames: 0,
            finished: false,
        }
    }

    /// Number of frames decoded so far.
    pub fn frames_read(&self) -> u64 {
        self.frames
    }

    /// Bytes consumed from the underlying reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.offset
    }

    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let frame_start = self.offset;

        let length = match self.read_length()? {
            Some(length) => length,
            None => return Ok(None),
        };

        if let Some(limit) = self.max_frame_length {
            if length > limit {
                return Err(TopologyError::FrameTooLarge { length, limit });
            }
        }

        let payload = self.read_payload(length)?;

        match self.read_byte()? {
            Some(TERMINATOR) => {}
            Some(other) => {
                return Err(TopologyError::malformed(
                    self.offset - 1,
                    format!("expected ',' after payload, found 0x{:02x}", other),
                ))
            }
            None => {
                return Err(TopologyError::malformed(
                    self.offset,
                    "stream ended before frame terminator",
                ))
            }
        }

        self.frames += 1;
        tracing::trace!(
            "Decoded frame #{} ({} bytes) at offset {}",
            self.frames,
            length,
            frame_start
        );
        Ok(Some(payload))
    }

    /// Reads the decimal prefix and its separator. `None` means the stream
    /// ended cleanly before any prefix byte.
    fn read_length(&mut self) -> Result<Option<usize>> {
        let start = self.offset;
        let mut length: usize = 0;
        let mut digits = 0usize;

        loop {
            match self.read_byte()? {
                None if digits == 0 => return Ok(None),
                None => {
                    return Err(TopologyError::malformed(
                        start,
                        "stream ended inside length prefix",
                    ))
                }
                Some(SEPARATOR) if digits == 0 => {
                    return Err(TopologyError::malformed(start, "empty length prefix"))
                }
                Some(SEPARATOR) => return Ok(Some(length)),
                Some(byte @ b'0'..=b'9') => {
                    length = length
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                        .ok_or_else(|| {
                            TopologyError::malformed(start, "length prefix overflows")
                        })?;
                    digits += 1;
                }
                Some(other) => {
                    return Err(TopologyError::malformed(
                        self.offset - 1,
                        format!("invalid byte 0x{:02x} in length prefix", other),
                    ))
                }
            }
        }
    }

    fn read_payload(&mut self, length: usize) -> Result<Vec<u8>> {
        let start = self.offset;
        let mut payload = Vec::with_capacity(length.min(PREALLOC_LIMIT));
        let read = (&mut self.reader)
            .take(length as u64)
            .read_to_end(&mut payload)?;
        self.offset += read as u64;

        if read < length {
            return Err(TopologyError::malformed(
                start,
                format!("truncated payload: expected {} bytes, got {}", length, read),
            ));
        }

        Ok(payload)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if byte.is_some() {
            self.reader.consume(1);
            self.offset += 1;
        }
        Ok(byte)
    }
}

impl<R: BufRead> Iterator for FrameDecoder<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(input: &[u8], limit: Option<usize>) -> Result<Vec<Vec<u8>>> {
        FrameDecoder::new(input, limit).collect()
    }

    #[test]
    fn test_encode_frame() {
        assert_eq!(encode_frame(b"hello"), b"5:hello,".to_vec());
        assert_eq!(encode_frame(b""), b"0:,".to_vec());
    }

    #[test]
    fn test_decode_sequence_of_frames() {
        let frames = decode_all(b"3:abc,0:,1:x,", None).unwrap();
        assert_eq!(frames, vec![b"abc".to_vec(), Vec::new(), b"x".to_vec()]);
    }

    #[test]
    fn test_empty_stream_yields_no_frames() {
        assert!(decode_all(b"", None).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_decimal_prefix() {
        for input in [&b"x:abc,"[..], b"-1:a,", b":abc,", b"1 :a,"] {
            let err = decode_all(input, None).unwrap_err();
            assert!(
                matches!(err, TopologyError::MalformedFrame { .. }),
                "{:?} gave {err}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_rejects_stream_ending_inside_prefix() {
        let err = decode_all(b"3:abc,12", None).unwrap_err();
        assert!(matches!(err, TopologyError::MalformedFrame { offset: 6, .. }));
    }

    #[test]
    fn test_rejects_overflowing_prefix() {
        let err = decode_all(b"99999999999999999999999999:", None).unwrap_err();
        assert!(matches!(err, TopologyError::MalformedFrame { .. }));
    }

    #[test]
    fn test_frame_too_large() {
        let err = decode_all(b"6:abcdef,", Some(5)).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::FrameTooLarge {
                length: 6,
                limit: 5
            }
        ));

        assert_eq!(decode_all(b"5:abcde,", Some(5)).unwrap().len(), 1);
    }

    #[test]
    fn test_iterator_is_fused_after_error() {
        let mut decoder = FrameDecoder::new(&b"1:a,1:bX1:c,"[..], None);
        assert_eq!(decoder.next().unwrap().unwrap(), b"a".to_vec());
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
        assert_eq!(decoder.frames_read(), 1);
    }
}
