//! Length-prefixed framing of notation text.
//!
//! A frame is a `u32` big-endian byte count followed by that many bytes of
//! UTF-8 text:
//!
//! ```text
//! +----------------+---------------------------+
//! | length (u32 BE)| notation text (length B)  |
//! +----------------+---------------------------+
//! ```
//!
//! ```rust
//! use object_notation::frame;
//!
//! let mut bytes = frame::encode_frame("a: 1").unwrap();
//! bytes.extend(frame::encode_frame("[]").unwrap());
//! assert_eq!(&bytes[..4], &[0, 0, 0, 4]);
//!
//! let (first, rest) = frame::decode_frame(&bytes).unwrap();
//! let (second, rest) = frame::decode_frame(rest).unwrap();
//! assert_eq!((first, second), ("a: 1", "[]"));
//! assert!(rest.is_empty());
//! ```

use crate::{Error, Result};
use std::io::{Read, Write};

const PREFIX_LEN: usize = 4;

/// Prefixes `text` with its byte length.
pub fn encode_frame(text: &str) -> Result<Vec<u8>> {
    let len = u32::try_from(text.len())
        .map_err(|_| Error::frame(format!("{} bytes do not fit a 32-bit length", text.len())))?;
    let mut out = Vec::with_capacity(PREFIX_LEN + text.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(text.as_bytes());
    Ok(out)
}

/// Reads one frame from the front of `bytes`, returning its text and the
/// bytes after it.
pub fn decode_frame(bytes: &[u8]) -> Result<(&str, &[u8])> {
    if bytes.len() < PREFIX_LEN {
        return Err(Error::frame(format!(
            "need {} length bytes, found {}",
            PREFIX_LEN,
            bytes.len()
        )));
    }
    let (prefix, body) = bytes.split_at(PREFIX_LEN);
    let len = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
    if body.len() < len {
        return Err(Error::frame(format!(
            "length prefix announces {} bytes, only {} follow",
            len,
            body.len()
        )));
    }
    let (payload, rest) = body.split_at(len);
    let text = std::str::from_utf8(payload)
        .map_err(|e| Error::frame(format!("payload is not UTF-8: {}", e)))?;
    Ok((text, rest))
}

/// Decodes a buffer that must hold exactly one frame.
pub fn decode_single(bytes: &[u8]) -> Result<&str> {
    let (text, rest) = decode_frame(bytes)?;
    if !rest.is_empty() {
        return Err(Error::frame(format!(
            "{} trailing bytes after frame",
            rest.len()
        )));
    }
    Ok(text)
}

/// Writes one frame to `writer`.
pub fn write_frame<W: Write>(mut writer: W, text: &str) -> Result<()> {
    let bytes = encode_frame(text)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))
}

/// Reads one frame from `reader`, consuming exactly its bytes.
///
/// A prefix announcing more than `max_len` bytes is rejected before any
/// payload is read. The payload buffer grows only as bytes arrive.
pub fn read_frame<R: Read>(mut reader: R, max_len: usize) -> Result<String> {
    let mut prefix = [0u8; PREFIX_LEN];
    reader
        .read_exact(&mut prefix)
        .map_err(|e| Error::io(&e.to_string()))?;
    let len = u32::from_be_bytes(prefix) as usize;
    if len > max_len {
        return Err(Error::frame(format!(
            "frame length {} exceeds limit {}",
            len, max_len
        )));
    }
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut payload)
        .map_err(|e| Error::io(&e.to_string()))?;
    if payload.len() < len {
        return Err(Error::io(&format!(
            "stream ended after {} of {} payload bytes",
            payload.len(),
            len
        )));
    }
    String::from_utf8(payload).map_err(|e| Error::frame(format!("payload is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_big_endian() {
        let text = "x".repeat(0x0102);
        let bytes = encode_frame(&text).unwrap();
        assert_eq!(&bytes[..4], &[0x00, 0x00, 0x01, 0x02]);
        assert_eq!(bytes.len(), 4 + 0x0102);
    }

    #[test]
    fn test_short_and_truncated() {
        assert!(matches!(decode_frame(&[0, 0, 1]), Err(Error::Frame(_))));
        assert!(matches!(decode_frame(&[0, 0, 0, 5, b'a']), Err(Error::Frame(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            decode_frame(&[0, 0, 0, 2, 0xff, 0xfe]),
            Err(Error::Frame(_))
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = encode_frame("1").unwrap();
        assert_eq!(decode_single(&bytes).unwrap(), "1");
        bytes.push(0);
        assert!(matches!(decode_single(&bytes), Err(Error::Frame(_))));
    }

    #[test]
    fn test_empty_payload() {
        let bytes = encode_frame("").unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(decode_single(&bytes).unwrap(), "");
    }

    #[test]
    fn test_stream_round_trip() {
        let mut buffer = Vec::new();
        write_frame(&mut buffer, "first").unwrap();
        write_frame(&mut buffer, "second").unwrap();

        let mut reader = buffer.as_slice();
        assert_eq!(read_frame(&mut reader, 64).unwrap(), "first");
        assert_eq!(read_frame(&mut reader, 64).unwrap(), "second");
        assert!(matches!(read_frame(&mut reader, 64), Err(Error::Io(_))));
    }

    #[test]
    fn test_stream_length_over_limit() {
        let mut reader: &[u8] = &[0xff; 4];
        match read_frame(&mut reader, 1 << 20) {
            Err(Error::Frame(msg)) => assert!(msg.contains("4294967295")),
            other => panic!("unexpected {:?}", other),
        }

        let bytes = encode_frame("abcdef").unwrap();
        assert!(matches!(read_frame(bytes.as_slice(), 5), Err(Error::Frame(_))));
        assert_eq!(read_frame(bytes.as_slice(), 6).unwrap(), "abcdef");
    }

    #[test]
    fn test_stream_truncated_payload() {
        let reader: &[u8] = &[0, 0, 0, 9, b'a', b'b'];
        match read_frame(reader, 64) {
            Err(Error::Io(msg)) => assert!(msg.contains("2 of 9")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
