//! Interactive confirmation.

use std::io::{BufRead, Write};

/// Ask `Proceed? [y/N]` and read one line of answer.
///
/// Only `y` or `yes` (any case, surrounding whitespace ignored) confirm. A
/// read failure or end of input counts as no.
pub fn ask_confirmation(input: &mut dyn BufRead, w: &mut dyn Write) -> bool {
    if write!(w, "Proceed? [y/N]: ").and_then(|_| w.flush()).is_err() {
        return false;
    }

    let mut response = String::new();
    match input.read_line(&mut response) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_affirmative(&response),
    }
}

fn is_affirmative(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}
