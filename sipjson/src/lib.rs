// SPDX-License-Identifier: Apache-2.0

//! An incremental JSON parser for resource-constrained systems.
//!
//! The engine consumes input one byte at a time and reports completed
//! syntactic elements through optional callback hooks. All buffers and
//! stacks have fixed capacities; the crate performs no heap allocation
//! and no I/O.

#![cfg_attr(not(test), no_std)]

mod error;
mod fixed_buf;
mod history;
mod parser;
mod pool;

pub use error::ErrorKind;
pub use fixed_buf::{CapacityError, FixedBuf, FixedStack};
pub use parser::{
    ErrorHook, IntegerHook, NameHook, Parser, StringHook, ERROR_HISTORY, MAX_NAME, MAX_NESTING,
    MAX_SAVED_STATES, MAX_VALUE,
};
pub use pool::{ParserPool, SelectError, MAX_PARSERS};
