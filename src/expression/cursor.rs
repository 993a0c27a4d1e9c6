//! Byte cursor for location-expression operands.
//!
//! All fixed-width reads are little-endian. The LEB128 readers intentionally
//! reproduce the 32-bit arithmetic of the reference decoder, including
//! shift-amounts taken modulo 32 and signed results: producers of these
//! expressions never emit operands wider than that arithmetic supports.

/// Cursor over a borrowed expression byte slice with an explicit position.
#[derive(Debug)]
pub struct ExprCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ExprCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current position in the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Read one byte; `None` when the stream is exhausted.
    pub fn read_u8(&mut self) -> Option<u8> {
        let b = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    pub fn read_i8(&mut self) -> Option<i32> {
        self.read_u8().map(|b| b as i8 as i32)
    }

    pub fn read_u16(&mut self) -> Option<u32> {
        let lo = self.read_u8()? as u32;
        let hi = self.read_u8()? as u32;
        Some(lo | (hi << 8))
    }

    pub fn read_i16(&mut self) -> Option<i32> {
        self.read_u16().map(|w| w as u16 as i16 as i32)
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        let b0 = self.read_u8()? as u32;
        let b1 = self.read_u8()? as u32;
        let b2 = self.read_u8()? as u32;
        let b3 = self.read_u8()? as u32;
        Some(b0 | (b1 << 8) | (b2 << 16) | (b3 << 24))
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_u32().map(|w| w as i32)
    }

    /// Unsigned LEB128: accumulate 7-bit groups while the continuation bit
    /// (0x80) is set. The result is 32-bit signed, as in the reference
    /// decoder.
    pub fn read_uleb(&mut self) -> Option<i32> {
        let mut n: i32 = 0;
        let mut shift: u32 = 0;
        loop {
            let b = self.read_u8()? as i32;
            if b & 0x80 != 0 {
                n |= (b & 0x7f).wrapping_shl(shift);
                shift += 7;
            } else {
                return Some(n | b.wrapping_shl(shift));
            }
        }
    }

    /// Signed LEB128 with the reference decoder's semantics: the final group
    /// is sign-extended only when the accumulated bit width exceeds 32.
    pub fn read_sleb(&mut self) -> Option<i32> {
        let mut n: i32 = 0;
        let mut shift: u32 = 0;
        loop {
            let b = self.read_u8()? as i32;
            if b & 0x80 != 0 {
                n |= (b & 0x7f).wrapping_shl(shift);
                shift += 7;
            } else {
                n |= b.wrapping_shl(shift);
                shift += 7;
                if shift > 32 {
                    let s = (32i32.wrapping_sub(shift as i32)) as u32;
                    return Some(n.wrapping_shl(s).wrapping_shr(s));
                }
                return Some(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_reads_are_little_endian() {
        let mut cur = ExprCursor::new(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(cur.read_u16(), Some(0x1234));
        assert_eq!(cur.read_u32(), Some(0x12345678));
        assert_eq!(cur.read_u8(), None);
    }

    #[test]
    fn signed_reads_sign_extend() {
        let mut cur = ExprCursor::new(&[0xFF]);
        assert_eq!(cur.read_i8(), Some(-1));
        let mut cur = ExprCursor::new(&[0xFE, 0xFF]);
        assert_eq!(cur.read_i16(), Some(-2));
        let mut cur = ExprCursor::new(&[0xFD, 0xFF, 0xFF, 0xFF]);
        assert_eq!(cur.read_i32(), Some(-3));
    }

    #[test]
    fn uleb_multi_byte() {
        let mut cur = ExprCursor::new(&[0xE5, 0x8E, 0x26]);
        assert_eq!(cur.read_uleb(), Some(624_485));
    }

    #[test]
    fn sleb_five_byte_negative_sign_extends() {
        // -1 spread over five groups crosses the 32-bit boundary, which is
        // the only case the reference decoder sign-extends.
        let mut cur = ExprCursor::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(cur.read_sleb(), Some(-1));
    }

    #[test]
    fn sleb_short_negative_stays_positive() {
        // The reference decoder does not sign-extend groups within 32 bits;
        // a lone 0x7F reads as 127, not -1.
        let mut cur = ExprCursor::new(&[0x7F]);
        assert_eq!(cur.read_sleb(), Some(127));
    }

    #[test]
    fn leb_truncated_stream_is_none() {
        let mut cur = ExprCursor::new(&[0x80, 0x80]);
        assert_eq!(cur.read_uleb(), None);
        let mut cur = ExprCursor::new(&[0x80]);
        assert_eq!(cur.read_sleb(), None);
    }
}
