// SPDX-License-Identifier: Apache-2.0

//! A fixed pool of independent parser instances with a movable selection
//! cursor.
//!
//! The pool lets a consumer switch to a second, independent parser (for a
//! value embedded as a sub-document, say) and switch back without
//! disturbing the outer parser's progress — nested parsing without
//! recursion. The selected instance is the implicit target of every feed
//! and registration call.

use log::warn;

use crate::parser::{ErrorHook, IntegerHook, NameHook, Parser, StringHook};

/// Number of instances in a default-sized pool.
pub const MAX_PARSERS: usize = 2;

/// A selection move past either end of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// `select_next` was called with the last instance selected.
    AtLast,
    /// `select_previous` was called with the first instance selected.
    AtFirst,
}

impl core::fmt::Display for SelectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectError::AtLast => f.write_str("already at the last parser"),
            SelectError::AtFirst => f.write_str("already at the first parser"),
        }
    }
}

/// A fixed collection of `N` independent [`Parser`] instances plus a
/// selection cursor. `N` must be at least 1.
///
/// Single-threaded by construction: the pool is an ordinary owned value
/// with no interior synchronization. Confine it to one thread, or wrap it
/// in a mutex at the call site.
pub struct ParserPool<'cb, const N: usize = MAX_PARSERS> {
    parsers: [Parser<'cb>; N],
    selected: usize,
}

impl<'cb, const N: usize> ParserPool<'cb, N> {
    /// Creates a pool with every instance freshly reset and the first one
    /// selected.
    pub fn new() -> Self {
        ParserPool {
            parsers: core::array::from_fn(|_| Parser::new()),
            selected: 0,
        }
    }

    /// Index of the currently selected instance.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Moves the selection forward. Fails, leaving the selection
    /// unchanged, when the last instance is already selected.
    pub fn select_next(&mut self) -> Result<usize, SelectError> {
        if self.selected + 1 >= N {
            warn!("parser pool: select_next past instance {}", self.selected);
            return Err(SelectError::AtLast);
        }
        self.selected += 1;
        Ok(self.selected)
    }

    /// Moves the selection backward. Fails, leaving the selection
    /// unchanged, when the first instance is already selected.
    pub fn select_previous(&mut self) -> Result<usize, SelectError> {
        if self.selected == 0 {
            warn!("parser pool: select_previous past instance 0");
            return Err(SelectError::AtFirst);
        }
        self.selected -= 1;
        Ok(self.selected)
    }

    pub fn selected(&self) -> &Parser<'cb> {
        &self.parsers[self.selected]
    }

    pub fn selected_mut(&mut self) -> &mut Parser<'cb> {
        &mut self.parsers[self.selected]
    }

    pub fn feed(&mut self, byte: u8) {
        self.selected_mut().feed(byte);
    }

    pub fn feed_bytes(&mut self, data: &[u8]) {
        self.selected_mut().feed_bytes(data);
    }

    pub fn reset(&mut self) {
        self.selected_mut().reset();
    }

    pub fn set_on_error(&mut self, hook: Option<ErrorHook<'cb>>) {
        self.selected_mut().set_on_error(hook);
    }

    pub fn set_on_object_start(&mut self, hook: Option<NameHook<'cb>>) {
        self.selected_mut().set_on_object_start(hook);
    }

    pub fn set_on_object_complete(&mut self, hook: Option<NameHook<'cb>>) {
        self.selected_mut().set_on_object_complete(hook);
    }

    pub fn set_on_array_start(&mut self, hook: Option<NameHook<'cb>>) {
        self.selected_mut().set_on_array_start(hook);
    }

    pub fn set_on_array_complete(&mut self, hook: Option<NameHook<'cb>>) {
        self.selected_mut().set_on_array_complete(hook);
    }

    pub fn set_on_string(&mut self, hook: Option<StringHook<'cb>>) {
        self.selected_mut().set_on_string(hook);
    }

    pub fn set_on_integer(&mut self, hook: Option<IntegerHook<'cb>>) {
        self.selected_mut().set_on_integer(hook);
    }
}

impl<const N: usize> Default for ParserPool<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
