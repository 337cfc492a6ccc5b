// cli/terminal.rs - blocking prompts on the controlling terminal

use std::io::{self, BufRead, Write};

use crate::ui::Confirm;

/// Confirmation read from stdin; anything but `y`/`yes` declines
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match read_line(&format!("{} [y/N] ", prompt)) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Read a secret from the terminal without echoing it
pub fn read_password(prompt: &str) -> io::Result<String> {
    rpassword::prompt_password(prompt)
}

/// Print `prompt` to stderr and read one line from stdin, without the newline
fn read_line(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES\n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
