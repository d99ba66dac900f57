// SPDX-License-Identifier: Apache-2.0

//! The character-feed parsing engine.
//!
//! One [`Parser`] holds the complete state of a single parse: the grammar
//! state machine, the saved-state stack used to resume an enclosing
//! context, the bounded stack of (name, value) nesting frames, and the
//! registered hooks. `feed` consumes one byte; hooks fire synchronously
//! from within the call and the engine never raises — malformed input is
//! reported through the error hook and the instance resets itself.

use log::{debug, trace};

use crate::error::ErrorKind;
use crate::fixed_buf::{utf8_prefix, FixedBuf, FixedStack};
use crate::history::History;

/// Maximum length of a member name, in bytes.
pub const MAX_NAME: usize = 30;
/// Maximum length of a string or number literal, in bytes.
pub const MAX_VALUE: usize = 160;
/// Maximum object/array nesting depth.
pub const MAX_NESTING: usize = 5;
/// Capacity of the saved-state stack.
pub const MAX_SAVED_STATES: usize = 10;
/// Number of recent characters kept for error context.
pub const ERROR_HISTORY: usize = 20;

/// Cap on same-byte re-dispatches. One byte can pop at most the whole
/// saved-state stack before the machine stabilizes, so hitting this cap
/// means the machine is stuck and is treated as an internal error.
const REDISPATCH_LIMIT: usize = MAX_SAVED_STATES + 2;

/// Grammar position of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    InObject,
    ToName,
    InName,
    ToColon,
    ToValue,
    InString,
    InNum,
    InArray,
    OutValue,
}

/// Hook invoked with the name of a starting or completing container.
pub type NameHook<'cb> = &'cb mut dyn FnMut(&str);
/// Hook invoked with a member name and a completed string value.
pub type StringHook<'cb> = &'cb mut dyn FnMut(&str, &str);
/// Hook invoked with a member name and a completed integer value.
pub type IntegerHook<'cb> = &'cb mut dyn FnMut(&str, i64);
/// Hook invoked with the error kind, its label, and recent input context.
pub type ErrorHook<'cb> = &'cb mut dyn FnMut(ErrorKind, &'static str, &str);

/// One optional slot per callback kind. An absent hook is a silent no-op.
#[derive(Default)]
struct Hooks<'cb> {
    on_error: Option<ErrorHook<'cb>>,
    on_object_start: Option<NameHook<'cb>>,
    on_object_complete: Option<NameHook<'cb>>,
    on_array_start: Option<NameHook<'cb>>,
    on_array_complete: Option<NameHook<'cb>>,
    on_string: Option<StringHook<'cb>>,
    on_integer: Option<IntegerHook<'cb>>,
}

/// The (name, value) pair tracked per nesting level. Names at shallower
/// depths persist across sibling values until overwritten.
#[derive(Clone, Copy)]
struct Frame {
    name: FixedBuf<MAX_NAME>,
    value: FixedBuf<MAX_VALUE>,
}

impl Frame {
    const fn new() -> Self {
        Frame {
            name: FixedBuf::new(),
            value: FixedBuf::new(),
        }
    }
}

/// A single parsing context.
///
/// The `'cb` lifetime covers the registered hooks; a hook must not
/// re-enter `feed` on the same instance (switching to a sibling instance
/// through [`crate::ParserPool`] is the supported nested-parse pattern).
pub struct Parser<'cb> {
    state: State,
    saved: FixedStack<State, MAX_SAVED_STATES>,
    frames: [Frame; MAX_NESTING],
    depth: usize,
    allow_comma: bool,
    in_escape: bool,
    history: History<ERROR_HISTORY>,
    char_count: usize,
    hooks: Hooks<'cb>,
}

impl<'cb> Parser<'cb> {
    pub fn new() -> Self {
        Parser {
            state: State::None,
            saved: FixedStack::new(State::None),
            frames: [Frame::new(); MAX_NESTING],
            depth: 0,
            allow_comma: false,
            in_escape: false,
            history: History::new(),
            char_count: 0,
            hooks: Hooks::default(),
        }
    }

    /// Clears all parse state back to idle: empty stacks, empty buffers,
    /// empty history. Registered hooks are kept and no callbacks fire.
    pub fn reset(&mut self) {
        self.state = State::None;
        self.saved.clear();
        self.depth = 0;
        for frame in &mut self.frames {
            frame.name.clear();
            frame.value.clear();
        }
        self.allow_comma = false;
        self.in_escape = false;
        self.history.clear();
        self.char_count = 0;
    }

    /// Consumes one input byte. Completed elements and errors are reported
    /// through the registered hooks before this returns.
    pub fn feed(&mut self, byte: u8) {
        self.char_count = self.char_count.saturating_add(1);
        if !is_whitespace(byte) {
            self.history.record(byte);
        }
        let mut hops = 0;
        loop {
            match self.dispatch(byte) {
                Ok(false) => break,
                Ok(true) => {
                    hops += 1;
                    if hops > REDISPATCH_LIMIT {
                        self.report(ErrorKind::Internal);
                        break;
                    }
                }
                Err(kind) => {
                    self.report(kind);
                    break;
                }
            }
        }
    }

    /// Feeds every byte of `data` in order.
    pub fn feed_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.feed(byte);
        }
    }

    /// Characters consumed since construction or the last reset.
    pub fn chars_consumed(&self) -> usize {
        self.char_count
    }

    pub fn set_on_error(&mut self, hook: Option<ErrorHook<'cb>>) {
        self.hooks.on_error = hook;
    }

    pub fn set_on_object_start(&mut self, hook: Option<NameHook<'cb>>) {
        self.hooks.on_object_start = hook;
    }

    pub fn set_on_object_complete(&mut self, hook: Option<NameHook<'cb>>) {
        self.hooks.on_object_complete = hook;
    }

    pub fn set_on_array_start(&mut self, hook: Option<NameHook<'cb>>) {
        self.hooks.on_array_start = hook;
    }

    pub fn set_on_array_complete(&mut self, hook: Option<NameHook<'cb>>) {
        self.hooks.on_array_complete = hook;
    }

    pub fn set_on_string(&mut self, hook: Option<StringHook<'cb>>) {
        self.hooks.on_string = hook;
    }

    pub fn set_on_integer(&mut self, hook: Option<IntegerHook<'cb>>) {
        self.hooks.on_integer = hook;
    }

    /// Runs one transition for `byte`. `Ok(true)` means the byte's meaning
    /// depends on the state it landed in and it must be re-dispatched; the
    /// input cursor never moves during re-dispatch.
    fn dispatch(&mut self, byte: u8) -> Result<bool, ErrorKind> {
        match self.state {
            State::None => match byte {
                b'{' => {
                    self.fire_object_start();
                    self.push_enter(State::InObject)?;
                    self.push_enter(State::ToName)?;
                    self.allow_comma = false;
                }
                b'"' => self.push_enter(State::InName)?,
                _ if is_whitespace(byte) => {}
                _ => {
                    #[cfg(feature = "strict-discard")]
                    return Err(ErrorKind::Discard);
                }
            },

            State::InObject => match byte {
                b'}' => {
                    self.fire_object_complete();
                    self.pop_enter()?;
                }
                b'"' => self.push_enter(State::InName)?,
                b',' if self.allow_comma => {
                    self.allow_comma = false;
                    self.push_enter(State::ToName)?;
                }
                _ if is_whitespace(byte) => {}
                _ => return Err(ErrorKind::ParseObject),
            },

            State::ToName => match byte {
                b'"' => self.enter(State::InName)?,
                _ if is_whitespace(byte) => {}
                _ => return Err(ErrorKind::ParseName),
            },

            State::InName => match byte {
                b'"' => self.enter(State::ToColon)?,
                _ if is_name_char(byte) => self.append_name(byte)?,
                _ => return Err(ErrorKind::IllegalNameChar),
            },

            State::ToColon => match byte {
                b':' => self.enter(State::ToValue)?,
                _ if is_whitespace(byte) => {}
                _ => return Err(ErrorKind::ParseAssignment),
            },

            State::ToValue => match byte {
                b'"' => {
                    self.in_escape = false;
                    self.enter(State::InString)?;
                }
                b'[' => {
                    self.fire_array_start();
                    self.enter(State::InArray)?;
                    self.push_enter(State::ToName)?;
                }
                b'{' => {
                    self.fire_object_start();
                    self.enter(State::InObject)?;
                    self.push_enter(State::ToName)?;
                }
                _ if byte.is_ascii_digit() || is_sign(byte) => {
                    self.append_value(byte)?;
                    self.enter(State::InNum)?;
                }
                _ if is_whitespace(byte) => {}
                _ => return Err(ErrorKind::ParseValue),
            },

            State::InString => {
                if !self.in_escape && byte == b'\\' {
                    self.in_escape = true;
                } else if self.in_escape {
                    // Escape sequences are preserved verbatim, not decoded.
                    self.in_escape = false;
                    self.append_value(b'\\')?;
                    self.append_value(byte)?;
                } else if byte == b'"' {
                    self.fire_string();
                    self.enter(State::OutValue)?;
                } else {
                    self.append_value(byte)?;
                }
            }

            State::InNum => {
                if byte.is_ascii_digit() {
                    self.append_value(byte)?;
                } else {
                    // The byte that ends a number is the first byte of
                    // whatever follows it.
                    self.fire_integer()?;
                    self.enter(State::OutValue)?;
                    return Ok(true);
                }
            }

            State::InArray => match byte {
                b']' => {
                    self.fire_array_complete();
                    self.pop_enter()?;
                }
                b'"' => self.push_enter(State::InName)?,
                b',' if self.allow_comma => {
                    self.allow_comma = false;
                    self.push_enter(State::ToName)?;
                }
                _ if is_whitespace(byte) => {}
                _ => return Err(ErrorKind::ParseArray),
            },

            State::OutValue => {
                if !is_whitespace(byte) {
                    if byte == b',' {
                        self.push_enter(State::ToName)?;
                    } else {
                        self.pop_enter()?;
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Enters `next`, applying its entry side effects: `InName` clears the
    /// active name, `ToValue` clears the active value, and entering a
    /// container pushes a nesting frame.
    fn enter(&mut self, next: State) -> Result<(), ErrorKind> {
        trace!("state {:?} -> {:?}", self.state, next);
        self.state = next;
        match next {
            State::InName => self.frames[self.depth].name.clear(),
            State::ToValue => self.frames[self.depth].value.clear(),
            State::InObject | State::InArray => {
                if self.depth + 1 >= MAX_NESTING {
                    return Err(ErrorKind::Internal);
                }
                self.depth += 1;
                self.frames[self.depth].name.clear();
            }
            _ => {}
        }
        Ok(())
    }

    /// Saves the current state, then enters `next`.
    fn push_enter(&mut self, next: State) -> Result<(), ErrorKind> {
        self.saved
            .push(self.state)
            .map_err(|_| ErrorKind::Internal)?;
        self.enter(next)
    }

    /// Returns to the enclosing saved state. Restoring a container state
    /// pops its nesting frame and re-allows a comma; restoring the idle
    /// state clears the top-level name.
    fn pop_enter(&mut self) -> Result<(), ErrorKind> {
        let prev = self.saved.pop().ok_or(ErrorKind::Internal)?;
        trace!("state {:?} -> {:?} (pop)", self.state, prev);
        self.state = prev;
        match prev {
            State::InObject | State::InArray => {
                if self.depth == 0 {
                    return Err(ErrorKind::Internal);
                }
                self.depth -= 1;
                self.allow_comma = true;
            }
            State::None => self.frames[self.depth].name.clear(),
            _ => {}
        }
        Ok(())
    }

    fn append_name(&mut self, byte: u8) -> Result<(), ErrorKind> {
        self.frames[self.depth]
            .name
            .push(byte)
            .map_err(|_| ErrorKind::NameTooLong)
    }

    fn append_value(&mut self, byte: u8) -> Result<(), ErrorKind> {
        self.frames[self.depth]
            .value
            .push(byte)
            .map_err(|_| ErrorKind::ValueTooLong)
    }

    fn fire_object_start(&mut self) {
        let name = self.frames[self.depth].name.as_str();
        if let Some(hook) = self.hooks.on_object_start.as_mut() {
            hook(name);
        }
    }

    fn fire_object_complete(&mut self) {
        let name = self.frames[self.depth].name.as_str();
        if let Some(hook) = self.hooks.on_object_complete.as_mut() {
            hook(name);
        }
    }

    fn fire_array_start(&mut self) {
        let name = self.frames[self.depth].name.as_str();
        if let Some(hook) = self.hooks.on_array_start.as_mut() {
            hook(name);
        }
    }

    fn fire_array_complete(&mut self) {
        let name = self.frames[self.depth].name.as_str();
        if let Some(hook) = self.hooks.on_array_complete.as_mut() {
            hook(name);
        }
    }

    fn fire_string(&mut self) {
        let frame = &self.frames[self.depth];
        if let Some(hook) = self.hooks.on_string.as_mut() {
            hook(frame.name.as_str(), frame.value.as_str());
        }
    }

    fn fire_integer(&mut self) -> Result<(), ErrorKind> {
        let frame = &self.frames[self.depth];
        let value: i64 = frame
            .value
            .as_str()
            .parse()
            .map_err(|_| ErrorKind::ParseValue)?;
        if let Some(hook) = self.hooks.on_integer.as_mut() {
            hook(frame.name.as_str(), value);
        }
        Ok(())
    }

    /// Reports `kind` through the error hook with recent-input context,
    /// then resets the instance. This is the only error path out of `feed`;
    /// the engine never raises.
    fn report(&mut self, kind: ErrorKind) {
        let mut recent = [0u8; ERROR_HISTORY];
        let len = self.history.copy_recent(&mut recent);
        let context = utf8_prefix(&recent[..len]);
        debug!("parse error: {} near '{}'", kind.label(), context);
        if let Some(hook) = self.hooks.on_error.as_mut() {
            hook(kind, kind.label(), context);
        }
        self.reset();
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\r' | b'\n' | b'\t')
}

fn is_sign(byte: u8) -> bool {
    matches!(byte, b'-' | b'+')
}

fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'+'
}
