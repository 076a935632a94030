//! Throw: adapters which unwrap a fallible result or lob its error up the
//! stack to the nearest enclosing [`crate::batch`] boundary.
//!
//! Lobbing is a same-call-stack discipline: a lobbed error is only visible
//! to boundaries below it on the same thread, and an unwinding panic
//! runtime is required (`panic = "abort"` turns every lob into an abort).

use std::borrow::Cow;
use std::error::Error;
use std::panic::Location;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error in flight between an adapter in this module and the boundary
/// which reclaims it.
///
/// Only the adapters construct one; the recorded location is their caller's
/// call site. Displays as `file:line: message`, and exposes the original
/// error through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{}:{}: {}", short_file(.location), .location.line(), .err)]
pub struct Lobbed {
    #[source]
    err: BoxError,
    location: &'static Location<'static>,
}

impl Lobbed {
    pub fn err(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.err.as_ref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn into_err(self) -> BoxError {
        self.err
    }

    pub(crate) fn into_parts(self) -> (BoxError, &'static Location<'static>) {
        (self.err, self.location)
    }
}

/// Last segment of the recorded source file, split on either separator
fn short_file<'a>(location: &'a Location<'a>) -> &'a str {
    let file = location.file();
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}

/// Unwrap the payload or lob the error.
///
/// The payload shape is up to `T`: `()` for error-only calls, a bare value,
/// or a tuple for functions returning several values at once.
#[track_caller]
pub fn lob<T, E: Into<BoxError>>(res: Result<T, E>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => toss(e),
    }
}

/// Lob `err` directly, never returning.
///
/// [`crate::toss!`] is the formatted variant.
#[track_caller]
pub fn toss<E: Into<BoxError>>(err: E) -> ! {
    std::panic::panic_any(Lobbed {
        err: err.into(),
        location: Location::caller(),
    })
}

/// # Example
/// ```rust
/// use error_boilerplate_automation::batch;
/// use error_boilerplate_automation::brow::{BoxError, LobOkExt, LobUnwrapExt};
///
/// fn smallest(raw: &str) -> Result<u32, BoxError> {
///     batch::catch(|| {
///         let mut nums: Vec<u32> = raw
///             .split(',')
///             .map(|field| field.trim().parse::<u32>().or_lob())
///             .collect();
///         nums.sort();
///         nums.first().copied().or_lob("empty input")
///     })
/// }
///
/// assert_eq!(smallest("4, 2, 9").unwrap(), 2);
/// assert!(smallest("4, x, 9").is_err());
/// ```

#[easy_ext::ext(LobOkExt)]
pub impl<T, E: Into<BoxError>> Result<T, E> {
    /// Unwrap or lob the error to the enclosing boundary
    #[track_caller]
    fn or_lob(self) -> T {
        lob(self)
    }
}

#[easy_ext::ext(LobUnwrapExt)]
pub impl<T> Option<T> {
    /// Unwrap or lob `msg` as the error
    #[track_caller]
    fn or_lob<'a>(self, msg: impl Into<Cow<'a, str>>) -> T {
        match self {
            Some(v) => v,
            None => toss(msg.into().into_owned()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::batch;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn ok_values_pass_through() {
        Ok::<(), Boom>(()).or_lob();
        assert_eq!(Ok::<i32, Boom>(7).or_lob(), 7);
        assert_eq!(Ok::<(i32, &str), Boom>((1, "a")).or_lob(), (1, "a"));
        assert_eq!(Ok::<(u8, u8, u8), Boom>((1, 2, 3)).or_lob(), (1, 2, 3));
        assert_eq!(
            Ok::<(u8, u8, u8, u8), Boom>((1, 2, 3, 4)).or_lob(),
            (1, 2, 3, 4)
        );
        assert_eq!(Some(5).or_lob("missing"), 5);
    }

    #[test]
    fn err_never_returns() {
        let mut reached = false;
        let caught = batch::catch(|| {
            Err::<(), Boom>(Boom).or_lob();
            reached = true;
        });
        assert!(caught.is_err());
        assert!(!reached);
    }

    #[test]
    fn none_lobs_the_message() {
        let caught = batch::catch(|| None::<u8>.or_lob("nothing here"));
        assert_eq!(caught.unwrap_err().to_string(), "nothing here");
    }

    #[test]
    fn toss_macro_formats() {
        let caught = batch::catch(|| -> u8 { crate::toss!("bad value: {}", 9) });
        assert_eq!(caught.unwrap_err().to_string(), "bad value: 9");
    }

    #[test]
    fn lobbed_renders_short_file_and_keeps_source() {
        let lobbed = Lobbed {
            err: Boom.into(),
            location: Location::caller(),
        };
        let text = lobbed.to_string();
        assert!(text.starts_with("brow.rs:"), "got {text}");
        assert!(text.ends_with(": boom"), "got {text}");
        assert!(lobbed.err().downcast_ref::<Boom>().is_some());
        assert!(std::error::Error::source(&lobbed).is_some());
    }
}
