//! Minimal DER for PKCS#1-shaped keys.
//!
//! Only the sub-grammar the key encodings need: definite-length headers
//! (short and long form), `INTEGER` restricted to nonnegative values, and
//! `SEQUENCE`. Encoding is canonical DER; decoding rejects everything BER
//! would tolerate: non-minimal lengths, non-minimal integer bodies,
//! negative integers, indefinite lengths and trailing bytes.

use alloc::vec::Vec;

use crate::bigint::BigUint;
use crate::errors::{Error, Result};

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

/// Cursor over a DER-encoded byte slice.
pub struct Reader<'a> {
    input: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Starts reading at the beginning of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Reader { input }
    }

    /// Reads a `SEQUENCE` header and returns a reader over its content.
    pub fn read_sequence(&mut self) -> Result<Reader<'a>> {
        let content = self.read_element(TAG_SEQUENCE)?;
        Ok(Reader { input: content })
    }

    /// Reads a nonnegative `INTEGER` and returns its magnitude bytes with
    /// the sign byte stripped (empty for zero).
    pub fn read_uint_bytes(&mut self) -> Result<&'a [u8]> {
        let body = self.read_element(TAG_INTEGER)?;
        match body {
            [] => Err(Error::Decode),
            [first, ..] if first & 0x80 != 0 => Err(Error::Decode),
            [0x00] => Ok(&body[1..]),
            [0x00, second, ..] if second & 0x80 == 0 => Err(Error::Decode),
            [0x00, ..] => Ok(&body[1..]),
            _ => Ok(body),
        }
    }

    /// Reads a nonnegative `INTEGER` as a [`BigUint`].
    pub fn read_uint(&mut self) -> Result<BigUint> {
        Ok(BigUint::from_bytes_be(self.read_uint_bytes()?))
    }

    /// Reads an `INTEGER` and requires the exact value `expected`.
    pub fn read_version(&mut self, expected: u64) -> Result<()> {
        if self.read_uint()? == BigUint::from(expected) {
            Ok(())
        } else {
            Err(Error::Decode)
        }
    }

    /// True when every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Peeks at the next tag byte without consuming it.
    pub fn peek_tag(&self) -> Option<u8> {
        self.input.first().copied()
    }

    /// Fails unless the reader has been fully consumed.
    pub fn finish(&self) -> Result<()> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(Error::Decode)
        }
    }

    fn read_element(&mut self, tag: u8) -> Result<&'a [u8]> {
        let (&got, rest) = self.input.split_first().ok_or(Error::Decode)?;
        if got != tag {
            return Err(Error::Decode);
        }
        let (len, rest) = read_length(rest)?;
        if rest.len() < len {
            return Err(Error::Decode);
        }
        let (content, remaining) = rest.split_at(len);
        self.input = remaining;
        Ok(content)
    }
}

fn read_length(input: &[u8]) -> Result<(usize, &[u8])> {
    let (&first, rest) = input.split_first().ok_or(Error::Decode)?;
    if first < 0x80 {
        return Ok((usize::from(first), rest));
    }
    let count = usize::from(first & 0x7f);
    // 0x80 is the BER indefinite form; anything longer than usize cannot
    // describe real input.
    if count == 0 || count > core::mem::size_of::<usize>() || rest.len() < count {
        return Err(Error::Decode);
    }
    let (len_bytes, rest) = rest.split_at(count);
    if len_bytes[0] == 0 {
        return Err(Error::Decode);
    }
    let mut len = 0usize;
    for &b in len_bytes {
        len = (len << 8) | usize::from(b);
    }
    if len < 0x80 {
        // Fits the short form, so the long form is not minimal.
        return Err(Error::Decode);
    }
    Ok((len, rest))
}

fn write_header(out: &mut Vec<u8>, tag: u8, len: usize) {
    out.push(tag);
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }
}

/// Encodes canonical trimmed big-endian magnitude bytes as an `INTEGER`.
pub fn encode_uint_bytes(out: &mut Vec<u8>, magnitude: &[u8]) {
    debug_assert!(magnitude.first() != Some(&0));
    let sign_pad = magnitude.first().map_or(true, |&b| b & 0x80 != 0);
    let len = magnitude.len() + usize::from(sign_pad);
    write_header(out, TAG_INTEGER, len.max(1));
    if sign_pad {
        out.push(0);
    }
    out.extend_from_slice(magnitude);
}

/// Encodes a [`BigUint`] as an `INTEGER`.
pub fn encode_uint(out: &mut Vec<u8>, value: &BigUint) {
    encode_uint_bytes(out, &value.to_bytes_be());
}

/// Wraps already-encoded `body` in a `SEQUENCE`.
pub fn encode_sequence(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 4);
    write_header(&mut out, TAG_SEQUENCE, body.len());
    out.extend_from_slice(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn uint_der(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_uint_bytes(&mut out, bytes);
        out
    }

    #[test]
    fn integer_encoding_is_canonical() {
        assert_eq!(uint_der(&[]), [0x02, 0x01, 0x00]);
        assert_eq!(uint_der(&[0x7f]), [0x02, 0x01, 0x7f]);
        // Sign-bit rule: a leading 0x00 keeps the value nonnegative.
        assert_eq!(uint_der(&[0x80]), [0x02, 0x02, 0x00, 0x80]);
        assert_eq!(uint_der(&[0x01, 0x02]), [0x02, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn integer_round_trip() {
        for bytes in [&[][..], &[0x01][..], &[0xff, 0x00, 0x80][..]] {
            let der = uint_der(bytes);
            let mut reader = Reader::new(&der);
            assert_eq!(reader.read_uint_bytes().unwrap(), bytes);
            reader.finish().unwrap();
        }
    }

    #[test]
    fn long_form_lengths() {
        let body = vec![0xab; 300];
        let der = encode_sequence(&body);
        assert_eq!(&der[..4], &[0x30, 0x82, 0x01, 0x2c]);
        let mut reader = Reader::new(&der);
        let inner = reader.read_sequence().unwrap();
        assert_eq!(inner.input, &body[..]);
        reader.finish().unwrap();
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut der = uint_der(&[0x01]);
        der.push(0x00);
        let mut reader = Reader::new(&der);
        reader.read_uint().unwrap();
        assert_eq!(reader.finish(), Err(Error::Decode));
    }

    #[test]
    fn rejects_negative_integer() {
        let der = [0x02, 0x01, 0x80];
        assert_eq!(Reader::new(&der).read_uint(), Err(Error::Decode));
    }

    #[test]
    fn rejects_non_minimal_integer() {
        // 0x00 0x01 must be encoded as just 0x01.
        let der = [0x02, 0x02, 0x00, 0x01];
        assert_eq!(Reader::new(&der).read_uint(), Err(Error::Decode));
        // An empty integer body is not a value at all.
        let der = [0x02, 0x00];
        assert_eq!(Reader::new(&der).read_uint(), Err(Error::Decode));
    }

    #[test]
    fn accepts_zero_integer() {
        let der = [0x02, 0x01, 0x00];
        assert!(Reader::new(&der).read_uint().unwrap().is_zero());
    }

    #[test]
    fn rejects_non_minimal_length() {
        // Length 5 in long form must use the short form.
        let der = [0x02, 0x81, 0x05, 0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(Reader::new(&der).read_uint(), Err(Error::Decode));
        // Leading zero length byte.
        let mut der = vec![0x30, 0x82, 0x00, 0x81];
        der.extend_from_slice(&[0u8; 0x81]);
        assert!(Reader::new(&der).read_sequence().is_err());
    }

    #[test]
    fn rejects_indefinite_length() {
        let der = [0x30, 0x80, 0x02, 0x01, 0x01, 0x00, 0x00];
        assert!(Reader::new(&der).read_sequence().is_err());
    }

    #[test]
    fn rejects_wrong_tag_and_truncation() {
        let der = [0x04, 0x01, 0x00];
        assert_eq!(Reader::new(&der).read_uint(), Err(Error::Decode));
        let der = [0x02, 0x05, 0x01];
        assert_eq!(Reader::new(&der).read_uint(), Err(Error::Decode));
        assert!(Reader::new(&[]).read_uint().is_err());
    }
}
