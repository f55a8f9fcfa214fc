use std::io::{self, BufRead, Write};

/// Operator response to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Yes, and do not ask again for the rest of the run.
    All,
}

impl Answer {
    /// `y`/`yes` and `x` are affirmative; anything else declines.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Answer::Yes,
            "x" => Answer::All,
            _ => Answer::No,
        }
    }

    pub fn proceeds(self) -> bool {
        matches!(self, Answer::Yes | Answer::All)
    }
}

pub trait Confirm {
    fn ask(&mut self, question: &str) -> Answer;
}

/// Prompts on stdout and reads one line from stdin. End of input declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn ask(&mut self, question: &str) -> Answer {
        print!("{question} [y/n/x]: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Answer::No,
            Ok(_) => Answer::parse(&line),
        }
    }
}
