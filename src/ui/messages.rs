//! User-facing terminal messages. Diagnostics go through `tracing`.

use crate::utils::colors::{BOLD, CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt;
use std::io::{self, BufRead, Write};

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_ALARM: &str = "⏰";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{CYAN}{BOLD}{ICON_INFO} {RESET}{msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{GREEN}{BOLD}{ICON_OK} {RESET}{msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

/// Alarm notification; the BEL character makes the terminal beep.
pub fn alarm<T: fmt::Display>(msg: T) {
    println!("\x07{YELLOW}{BOLD}{ICON_ALARM} {msg}{RESET}");
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{CYAN}{BOLD}== {msg} =={RESET}\n");
}

/// `prompt` followed by `[y/N]`; anything but y/yes is a no.
pub fn ask_confirmation<R: BufRead>(prompt: &str, input: &mut R) -> bool {
    confirmation_prompt(prompt);

    let mut s = String::new();
    match input.read_line(&mut s) {
        Ok(_) => is_yes(&s),
        Err(_) => false,
    }
}

/// Print the question only; the caller collects the answer.
pub fn confirmation_prompt(prompt: &str) {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
