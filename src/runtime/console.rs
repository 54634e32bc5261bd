//! Line-oriented prompts for the login and menu screens.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        self.output.flush()
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Print `label` and read one trimmed line. `None` once input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for a 1-based menu number. `Some(None)` means "0 / cancel / not a
    /// number", `None` means input is exhausted.
    pub fn pick(&mut self, label: &str, count: usize) -> io::Result<Option<Option<usize>>> {
        let Some(answer) = self.prompt(label)? else {
            return Ok(None);
        };
        let choice = answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=count).contains(n))
            .map(|n| n - 1);
        Ok(Some(choice))
    }

    /// Wait for Enter.
    pub fn pause(&mut self, label: &str) -> io::Result<bool> {
        Ok(self.prompt(label)?.is_some())
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
