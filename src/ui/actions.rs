//! ui::actions
//!
//! GitHub Actions workflow commands.
//!
//! When running as an Actions step, the runner scans stdout for
//! `::command::value` lines. `add-mask` registers a secret so every later
//! occurrence in the job log is replaced by `***`.

/// Whether the process runs inside a GitHub Actions job.
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Format the `add-mask` workflow command for `value`.
///
/// Newlines and `%` are escaped the way the runner expects.
pub fn add_mask_command(value: &str) -> String {
    format!("::add-mask::{}", escape_data(value))
}

/// Register `value` as a secret with the Actions runner.
///
/// No-op outside GitHub Actions.
pub fn mask(value: &str) {
    if is_github_actions() && !value.is_empty() {
        println!("{}", add_mask_command(value));
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
