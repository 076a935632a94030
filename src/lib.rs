//! Utilities which flatten linear error propagation: fallible calls are
//! unwrapped inline with [`brow`], and one scoped [`batch`] boundary at the
//! edge of the function turns the lobbed error back into a plain `Err`.
//! Panics raised anywhere else are never absorbed, boundaries re-raise them.
//!
//! # Error handling strategies:
//! ### LobOkExt / LobUnwrapExt
//! Unwrap Results/Options inline with or_lob, deferring the error to the enclosing boundary
//! ### Boundaries
//! [`batch::catch`] collects into a Result, [`batch::catch_then`] adjusts the
//! error first, [`batch::catch_fatal`] hands a located report to a terminal
//! sink, [`batch::catch_frame`] exposes the error and call frame directly
//! ### Macros
//! Lob formatted errors with [`toss!`], or attach context while unwrapping
//! with [`get_or_toss!`]/[`unwrap_or_toss!`]
//!
//! # Additional
//! Strictly a same-call-stack discipline: a lobbed error is invisible to
//! other threads. Requires an unwinding panic runtime (`panic = "abort"`
//! turns every lob into an abort).

#![feature(never_type)]

pub mod batch; // catch: scoped recovery boundaries
pub mod brow; // throw: fallible-result adapters
pub mod macros;
pub mod misc;
