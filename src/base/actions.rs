//! GitHub Actions workflow commands.
//!
//! The runner scans stdout for lines of the form `::<command>::<message>` and turns them
//! into annotations; `::error::` plus a non-zero exit marks the step as failed.

/// Escape a message for use as workflow command data.
pub fn escape_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Format a workflow command line.
pub fn command(name: &str, message: &str) -> String {
    format!("::{name}::{}", escape_data(message))
}

/// Emit a warning annotation.
pub fn warning(message: &str) {
    println!("{}", command("warning", message));
}

/// Emit an error annotation; the caller is responsible for exiting non-zero.
pub fn set_failed(message: &str) {
    println!("{}", command("error", message));
}
