// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity containers backing the parser's buffers and stacks.
//!
//! Over-capacity operations fail with [`CapacityError`] instead of
//! truncating or writing out of bounds.

/// An append or push was attempted on a full container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("capacity exceeded")
    }
}

/// A fixed-capacity byte string.
#[derive(Debug, Clone, Copy)]
pub struct FixedBuf<const N: usize> {
    len: usize,
    buf: [u8; N],
}

impl<const N: usize> FixedBuf<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        FixedBuf { len: 0, buf: [0; N] }
    }

    /// Empties the buffer. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends one byte, failing when the buffer is full.
    pub fn push(&mut self, byte: u8) -> Result<(), CapacityError> {
        if self.len == N {
            return Err(CapacityError);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Contents as text. A trailing split multi-byte sequence is dropped
    /// rather than failing; the parser only ever stores whole input bytes.
    pub fn as_str(&self) -> &str {
        utf8_prefix(self.as_bytes())
    }
}

impl<const N: usize> Default for FixedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest valid UTF-8 prefix of `bytes`.
pub(crate) fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
    }
}

/// A fixed-capacity stack.
#[derive(Debug, Clone, Copy)]
pub struct FixedStack<T, const N: usize> {
    len: usize,
    buf: [T; N],
}

impl<T: Copy, const N: usize> FixedStack<T, N> {
    /// Creates an empty stack; `fill` seeds the backing storage.
    pub fn new(fill: T) -> Self {
        FixedStack { len: 0, buf: [fill; N] }
    }

    /// Empties the stack. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Pushes an item, failing when the stack is full.
    pub fn push(&mut self, item: T) -> Result<(), CapacityError> {
        if self.len == N {
            return Err(CapacityError);
        }
        self.buf[self.len] = item;
        self.len += 1;
        Ok(())
    }

    /// Pops the most recently pushed item, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.buf[self.len])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buf_push_until_full() {
        let mut buf: FixedBuf<3> = FixedBuf::new();
        assert!(buf.push(b'a').is_ok());
        assert!(buf.push(b'b').is_ok());
        assert!(buf.push(b'c').is_ok());
        assert_eq!(buf.push(b'd'), Err(CapacityError));
        // A rejected push leaves the contents intact.
        assert_eq!(buf.as_str(), "abc");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn buf_clear_allows_reuse() {
        let mut buf: FixedBuf<2> = FixedBuf::new();
        buf.push(b'x').unwrap();
        buf.push(b'y').unwrap();
        buf.clear();
        assert!(buf.is_empty());
        buf.push(b'z').unwrap();
        assert_eq!(buf.as_str(), "z");
    }

    #[test]
    fn buf_as_str_drops_split_sequence() {
        // 0xC3 starts a two-byte sequence that never completes.
        let mut buf: FixedBuf<4> = FixedBuf::new();
        buf.push(b'a').unwrap();
        buf.push(0xC3).unwrap();
        assert_eq!(buf.as_str(), "a");
        assert_eq!(buf.as_bytes(), &[b'a', 0xC3]);
    }

    #[test]
    fn stack_push_pop() {
        let mut stack: FixedStack<u8, 2> = FixedStack::new(0);
        assert!(stack.push(1).is_ok());
        assert!(stack.push(2).is_ok());
        assert_eq!(stack.push(3), Err(CapacityError));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn stack_clear() {
        let mut stack: FixedStack<u8, 4> = FixedStack::new(0);
        stack.push(7).unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }
}
