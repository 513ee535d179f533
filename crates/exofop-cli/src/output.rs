//! Printing helpers shared by the subcommands.

use serde::Serialize;

/// Pretty-print any serialisable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("  Error: could not serialise output: {e}"),
    }
}

/// Print a text summary without doubling the trailing newline.
pub fn print_text(text: &str) {
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
}
