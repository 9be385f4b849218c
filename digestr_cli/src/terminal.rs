//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY
    if is_ci_environment() {
        return false;
    }

    if env::var("DEBIAN_FRONTEND").unwrap_or_default() == "noninteractive" {
        return false;
    }

    true
}

/// Check if the terminal supports ANSI escape codes for colors
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }

    // Windows 10+ consoles and Windows Terminal handle ANSI; elsewhere TERM must be set
    cfg!(windows) || !term.is_empty()
}

/// Whether output should be colored, given the `output.color_enabled` setting.
///
/// `NO_COLOR` (any non-empty value) always disables color.
pub fn use_color(color_enabled: bool) -> bool {
    color_enabled && !no_color_requested() && supports_ansi()
}

fn no_color_requested() -> bool {
    env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}
