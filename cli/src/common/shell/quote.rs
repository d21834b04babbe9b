//! # toolfs Path Quoter (`common::shell::quote`)
//!
//! File: cli/src/common/shell/quote.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Escapes a path (or any other argument, such as a URL) so it can be embedded
//! in a textual command line and still reach the program as exactly one
//! argument, byte for byte.
//!
//! - **POSIX**: the argument is wrapped in single quotes. Inside single quotes
//!   the shell interprets nothing, so only the single quote itself needs care:
//!   it is closed, emitted escaped, and reopened (`'` becomes `'\''`).
//! - **cmd**: the argument is wrapped in double quotes following the
//!   `CommandLineToArgvW` rules: backslashes are literal unless they precede
//!   a double quote, embedded quotes are backslash-escaped, trailing
//!   backslashes are doubled so they cannot escape the closing quote, and `%`
//!   is emitted outside the quotes. Absolute paths are first rewritten to
//!   backslash separators, and the bare root `\` is left unquoted because
//!   `cd "\"` misbehaves.
//!
//! Quoting is a pure string transform and cannot fail; arguments are `&str`,
//! so the non-string inputs a dynamic caller could pass are ruled out by type.
//!
//! ## Usage
//!
//! ```rust
//! use toolfs::common::shell::{quote::quote, ShellFlavor};
//!
//! assert_eq!(quote(ShellFlavor::Posix, "it's here"), r"'it'\''s here'");
//! assert_eq!(quote(ShellFlavor::Cmd, "C:/Program Files"), r#""C:\Program Files""#);
//! ```
//!
use super::ShellFlavor;

/// Quotes `arg` for safe inclusion in a command line of the given flavor.
pub fn quote(flavor: ShellFlavor, arg: &str) -> String {
    match flavor {
        ShellFlavor::Posix => quote_posix(arg),
        ShellFlavor::Cmd => quote_cmd(arg),
    }
}

fn quote_posix(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Matches the leading `[.A-Za-z]?:?[\/]` of a path that should use backslashes.
fn looks_like_windows_path(arg: &str) -> bool {
    let mut rest = arg;
    if rest.starts_with(|c: char| c == '.' || c.is_ascii_alphabetic()) {
        rest = &rest[1..];
    }
    if let Some(stripped) = rest.strip_prefix(':') {
        rest = stripped;
    }
    rest.starts_with(['/', '\\'])
}

fn quote_cmd(arg: &str) -> String {
    let arg = if looks_like_windows_path(arg) {
        arg.replace('/', "\\")
    } else {
        arg.to_string()
    };
    if arg == "\\" {
        return arg;
    }

    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    // Backslashes are only special in front of a quote, so hold them until
    // the next character decides how many to emit.
    let mut pending = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => pending += 1,
            '"' => {
                out.push_str(&"\\".repeat(pending * 2 + 1));
                out.push('"');
                pending = 0;
            }
            '%' => {
                out.push_str(&"\\".repeat(pending * 2));
                out.push_str("\"%\"");
                pending = 0;
            }
            _ => {
                out.push_str(&"\\".repeat(pending));
                out.push(c);
                pending = 0;
            }
        }
    }
    out.push_str(&"\\".repeat(pending * 2));
    out.push('"');
    out
}
