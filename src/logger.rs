#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("\x1b[32m[INFO] [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        println!("\x1b[33m[LOG]  [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        println!("\x1b[35m[WARN] [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        println!("\x1b[31m[ERROR][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

/// Observability seam of the flight session.
///
/// The session never prints on its own; every line goes through the sink
/// supplied at construction, so parallel sessions stay isolated and tests
/// can run silent.
pub trait EventSink {
    fn info(&self, msg: &str);
    fn debug(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards every event to the ANSI console macros.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn info(&self, msg: &str) { info!("{msg}"); }
    fn debug(&self, msg: &str) { log!("{msg}"); }
    fn warn(&self, msg: &str) { warn!("{msg}"); }
    fn error(&self, msg: &str) { error!("{msg}"); }
}

/// Swallows everything.
pub struct SilentSink;

impl EventSink for SilentSink {
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}
