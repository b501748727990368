/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Running clocks are highlighted, stopped ones greyed out.
pub fn clock_color(running: bool) -> &'static str {
    if running { YELLOW } else { GREY }
}

/// Active companies in green, inactive ones greyed out.
pub fn used_color(used: bool) -> &'static str {
    if used { GREEN } else { GREY }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
