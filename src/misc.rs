//! Terminal sinks for [`crate::batch::catch_fatal`]

use crate::brow::Lobbed;

/// Report through the `log` facade and exit
///
/// # Example
/// ```no_run
/// use error_boilerplate_automation::{batch, misc, brow::LobOkExt};
///
/// let text = batch::catch_fatal(
///     || std::fs::read_to_string("config.toml").or_lob(),
///     misc::log_fatal,
/// );
/// ```
pub fn log_fatal(lobbed: Lobbed) -> ! {
    log::error!("{lobbed}");
    std::process::exit(1);
}

/// Report to stderr and exit, for binaries carrying no logger
pub fn eprint_fatal(lobbed: Lobbed) -> ! {
    eprintln!("{lobbed}");
    std::process::exit(1);
}
