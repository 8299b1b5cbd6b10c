use serde::Serialize;
use strum_macros::Display;

/// Why the session loop stopped.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TerminationReason {
    /// Unsafe altitude while the sensors read (or had just read) RED.
    Crashed,
    /// Battery depleted or iteration cap reached.
    Exhausted,
    /// Loop-level fault; the session stopped with whatever it had.
    Aborted,
}
