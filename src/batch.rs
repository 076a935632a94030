//! Catch: scoped boundaries which reclaim a lobbed error back into an
//! ordinary value at the edge of a function.
//!
//! Each boundary takes the guarded body as a closure so it covers every
//! exit path of that body, and each one re-raises panics it did not
//! produce: only errors lobbed by [`crate::brow`] are reclaimed.

use std::cell::Cell;
use std::panic::{AssertUnwindSafe, Location, catch_unwind, resume_unwind};

use crate::brow::{BoxError, Lobbed};

thread_local! {
    static ARMED: Cell<u32> = const { Cell::new(0) };
}

// counts boundaries on this thread's stack, for the hook
struct Armed;

impl Armed {
    fn arm() -> Self {
        ARMED.with(|depth| depth.set(depth.get() + 1));
        Armed
    }
}

impl Drop for Armed {
    fn drop(&mut self) {
        ARMED.with(|depth| depth.set(depth.get() - 1));
    }
}

fn armed() -> bool {
    ARMED.try_with(|depth| depth.get() > 0).unwrap_or(false)
}

/// Run `body`, reclaiming a lobbed error and re-raising anything else
fn reclaim<T>(body: impl FnOnce() -> T) -> Result<T, Lobbed> {
    let outcome = {
        let _armed = Armed::arm();
        catch_unwind(AssertUnwindSafe(body))
    };
    match outcome {
        Ok(v) => Ok(v),
        Err(payload) => match payload.downcast::<Lobbed>() {
            Ok(lobbed) => Err(*lobbed),
            Err(foreign) => resume_unwind(foreign),
        },
    }
}

/// Scope a boundary around `body`: its value comes back as `Ok`, an error
/// lobbed inside comes back as `Err`, unrelated panics keep unwinding.
///
/// # Example
/// ```rust
/// use error_boilerplate_automation::batch;
/// use error_boilerplate_automation::brow::{BoxError, LobOkExt};
///
/// fn parse_port(raw: &str) -> Result<u16, BoxError> {
///     batch::catch(|| raw.trim().parse::<u16>().or_lob())
/// }
///
/// assert_eq!(parse_port(" 8080 ").unwrap(), 8080);
/// assert!(parse_port("eighty").is_err());
/// ```
pub fn catch<T>(body: impl FnOnce() -> T) -> Result<T, BoxError> {
    reclaim(body).map_err(Lobbed::into_err)
}

/// Like [`catch`], then let `adjust` rewrite the reclaimed error in place.
///
/// `adjust` runs only on the error path, after the error is assigned, so
/// it sees the value the caller would otherwise receive.
///
/// # Example
/// ```rust
/// use error_boilerplate_automation::batch;
/// use error_boilerplate_automation::brow::{BoxError, LobOkExt};
///
/// fn load(path: &str) -> Result<String, BoxError> {
///     batch::catch_then(
///         || std::fs::read_to_string(path).or_lob(),
///         |err| *err = format!("loading {path}: {err}").into(),
///     )
/// }
///
/// let err = load("/definitely/missing").unwrap_err();
/// assert!(err.to_string().starts_with("loading /definitely/missing:"));
/// ```
pub fn catch_then<T>(
    body: impl FnOnce() -> T,
    adjust: impl FnOnce(&mut BoxError),
) -> Result<T, BoxError> {
    match reclaim(body) {
        Ok(v) => Ok(v),
        Err(lobbed) => {
            let mut err = lobbed.into_err();
            adjust(&mut err);
            Err(err)
        }
    }
}

/// Like [`catch`], but hand a reclaimed error to a terminal `sink` instead
/// of returning it.
///
/// The sink receives the [`Lobbed`] itself, which displays as
/// `file:line: message` with the call site the error was lobbed from. It
/// pairs with test-failure reporters (`|l| panic!("{l}")`) and
/// process-terminating loggers ([`crate::misc::log_fatal`]).
pub fn catch_fatal<T>(body: impl FnOnce() -> T, sink: impl FnOnce(Lobbed) -> !) -> T {
    match reclaim(body) {
        Ok(v) => v,
        Err(lobbed) => sink(lobbed),
    }
}

/// Like [`catch`], but pass a reclaimed error and its call frame to
/// `handler`, returning `None` in that case.
///
/// # Example
/// ```rust
/// use error_boilerplate_automation::{batch, brow::LobOkExt};
///
/// let ran = batch::catch_frame(
///     || "5x".parse::<u32>().or_lob(),
///     |err, frame| eprintln!("{}:{} {err}", frame.file(), frame.line()),
/// );
/// assert!(ran.is_none());
/// ```
pub fn catch_frame<T>(
    body: impl FnOnce() -> T,
    handler: impl FnOnce(BoxError, &'static Location<'static>),
) -> Option<T> {
    match reclaim(body) {
        Ok(v) => Some(v),
        Err(lobbed) => {
            let (err, location) = lobbed.into_parts();
            handler(err, location);
            None
        }
    }
}

/// Teach the panic hook about lobbed errors. Optional, call once at startup.
///
/// The hook stays quiet for a lob raised under a boundary (the report would
/// be noise on every propagated error), renders a lob with no boundary on
/// its thread as `file:line: message` to stderr before the thread dies, and
/// hands every unrelated panic to the previously installed hook.
pub fn init_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        match info.payload().downcast_ref::<Lobbed>() {
            Some(lobbed) => {
                if !armed() {
                    eprintln!("{lobbed}");
                }
            }
            None => previous(info),
        }
    }));
}
