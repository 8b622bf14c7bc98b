//! Interactive yes/no confirmation.

use parking_lot::Mutex;
use std::io::{BufRead, StdinLock, Stdout, Write};

/// Asks the operator a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Ask `prompt`; `default` is the answer for empty input.
    fn ask(&self, prompt: &str, default: bool) -> bool;
}

/// Line-oriented prompt over a reader/writer pair.
///
/// Empty input picks the default, `y`/`yes`/`n`/`no` (any case) answer
/// directly, anything else repeats the question. End of input or an I/O
/// error falls back to the default.
pub struct TerminalPrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Create a prompt reading answers from `reader`, asking on `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Take back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn ask(&self, prompt: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut io = self.io.lock();
        let (reader, writer) = &mut *io;

        loop {
            if write!(writer, "{} {}: ", prompt, hint)
                .and_then(|_| writer.flush())
                .is_err()
            {
                return default;
            }

            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => return default,
                Ok(_) => {}
            }

            let answer = line.trim();
            if answer.is_empty() {
                return default;
            }
            if let Some(yes) = parse_answer(answer) {
                return yes;
            }
            let _ = writeln!(writer, "Please answer yes or no.");
        }
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn ask(input: &str, default: bool) -> (bool, String) {
        let prompt = TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let answer = prompt.ask("Overwrite?", default);
        let (_, out) = prompt.into_inner();
        (answer, String::from_utf8(out).unwrap())
    }

    #[rstest]
    #[case("y\n", false, true)]
    #[case("YES\n", false, true)]
    #[case(" yes \n", false, true)]
    #[case("n\n", true, false)]
    #[case("No\n", true, false)]
    #[case("\n", true, true)]
    #[case("\n", false, false)]
    #[case("", true, true)]
    #[case("", false, false)]
    fn test_answers(#[case] input: &str, #[case] default: bool, #[case] expected: bool) {
        assert_eq!(ask(input, default).0, expected);
    }

    #[test]
    fn test_hint_reflects_default() {
        assert_eq!(ask("\n", false).1, "Overwrite? [y/N]: ");
        assert_eq!(ask("\n", true).1, "Overwrite? [Y/n]: ");
    }

    #[test]
    fn test_reasks_until_understood() {
        let (answer, out) = ask("maybe\nsure\ny\n", false);
        assert!(answer);
        assert_eq!(out.matches("Overwrite? [y/N]: ").count(), 3);
        assert_eq!(out.matches("Please answer yes or no.").count(), 2);
    }

    #[test]
    fn test_unanswered_reask_falls_back_to_default() {
        assert!(!ask("maybe\n", false).0);
    }
}
