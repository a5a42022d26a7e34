//! Output formatting for CLI responses.
//!
//! Everything here writes to stdout or stderr directly; the `serve`
//! command never calls into this module since stdout carries protocol
//! traffic there.

use sensei_types::DiagnosticError;

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("[OK] {message}");
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

/// Prints the cause and fix of a diagnostic error, when known.
pub fn print_diagnostic(e: &dyn DiagnosticError) {
    if let Some(hint) = e.hint() {
        eprintln!("\n  Cause: {hint}");
    }
    if let Some(fix) = e.fix() {
        eprintln!("  Fix:   {fix}\n");
    }
}

/// Truncates `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) if max > 3 => {
            let cut = text
                .char_indices()
                .nth(max - 3)
                .map_or(idx, |(i, _)| i);
            format!("{}...", &text[..cut])
        }
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
