// SPDX-License-Identifier: Apache-2.0

//! Rolling history of recently consumed characters, kept only to annotate
//! error reports with local input context.

/// Fixed-capacity ring of the most recently recorded bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct History<const N: usize> {
    buf: [u8; N],
    head: usize,
    recorded: usize,
}

impl<const N: usize> History<N> {
    pub fn new() -> Self {
        History {
            buf: [0; N],
            head: 0,
            recorded: 0,
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.recorded = 0;
    }

    pub fn record(&mut self, byte: u8) {
        self.buf[self.head] = byte;
        self.head += 1;
        if self.head >= N {
            self.head = 0;
        }
        self.recorded = self.recorded.saturating_add(1);
    }

    /// Copies the most recent bytes into `out` in input order; returns how
    /// many were written (at most `N`).
    pub fn copy_recent(&self, out: &mut [u8; N]) -> usize {
        let len = self.recorded.min(N);
        let mut pos = (self.head + N - len) % N;
        for slot in out.iter_mut().take(len) {
            *slot = self.buf[pos];
            pos += 1;
            if pos >= N {
                pos = 0;
            }
        }
        len
    }
}
