use anyhow::Result;
use std::io::{BufRead, Write};

use crate::util::is_quit_word;

// Owns both console streams. Generic over the streams so the same code runs
// against locked stdio, byte buffers in tests, and a script string in wasm.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn print(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    // Show a prompt and read one trimmed line. None means the input is exhausted.
    pub fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    // Keeps prompting until the user enters a valid float.
    // None means quit: a quit keyword or the end of input.
    pub fn read_number(&mut self, prompt: &str) -> Result<Option<f64>> {
        loop {
            let text = match self.prompt(prompt)? {
                Some(text) => text,
                None => return Ok(None),
            };
            if is_quit_word(&text) {
                return Ok(None);
            }
            match text.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    self.print("Invalid number. Please enter a numeric value or 'q' to quit.")?
                }
            }
        }
    }

    // Same loop, but parses as a float and truncates toward zero, so "3.7"
    // is accepted as 3. Non-finite parses are rejected here rather than
    // being allowed to saturate the cast.
    pub fn read_integer(&mut self, prompt: &str) -> Result<Option<i64>> {
        loop {
            let text = match self.prompt(prompt)? {
                Some(text) => text,
                None => return Ok(None),
            };
            if is_quit_word(&text) {
                return Ok(None);
            }
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(Some(value as i64)),
                _ => self.print("Invalid integer. Please enter an integer value.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_read_number(script: &str) -> (Option<f64>, String) {
        let mut out = Vec::new();
        let mut console = Console::new(script.as_bytes(), &mut out);
        let got = console.read_number("n: ").unwrap();
        drop(console);
        (got, String::from_utf8(out).unwrap())
    }

    fn run_read_integer(script: &str) -> (Option<i64>, String) {
        let mut out = Vec::new();
        let mut console = Console::new(script.as_bytes(), &mut out);
        let got = console.read_integer("n: ").unwrap();
        drop(console);
        (got, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_like_the_standard_float_parser() {
        for text in &["1", "2.5", "-0.125", "1e6", "-1e-3", "  42  "] {
            let (got, _) = run_read_number(&format!("{}\n", text));
            assert_eq!(got, Some(text.trim().parse::<f64>().unwrap()));
        }
    }

    #[test]
    fn one_bad_line_causes_exactly_one_retry_message() {
        let (got, output) = run_read_number("abc\n4.5\n");
        assert_eq!(got, Some(4.5));
        assert_eq!(output.matches("Invalid number").count(), 1);
        // re-prompted once after the bad line
        assert_eq!(output.matches("n: ").count(), 2);
    }

    #[test]
    fn keeps_retrying_until_valid() {
        let (got, output) = run_read_number("x\n\n1.2.3\n7\n");
        assert_eq!(got, Some(7.0));
        assert_eq!(output.matches("Invalid number").count(), 3);
    }

    #[test]
    fn quit_keywords_stop_reading() {
        for word in &["q", "Q", "quit", "EXIT"] {
            let (got, output) = run_read_number(&format!("{}\n", word));
            assert_eq!(got, None);
            assert!(!output.contains("Invalid"));
        }
    }

    #[test]
    fn end_of_input_stops_reading() {
        let (got, _) = run_read_number("");
        assert_eq!(got, None);
        let (got, _) = run_read_integer("");
        assert_eq!(got, None);
    }

    #[test]
    fn integer_input_truncates_toward_zero() {
        assert_eq!(run_read_integer("3\n").0, Some(3));
        assert_eq!(run_read_integer("3.7\n").0, Some(3));
        assert_eq!(run_read_integer("-3.7\n").0, Some(-3));
        assert_eq!(run_read_integer("0.9\n").0, Some(0));
    }

    #[test]
    fn integer_input_rejects_garbage_and_non_finite() {
        let (got, output) = run_read_integer("five\ninf\nnan\n5\n");
        assert_eq!(got, Some(5));
        assert_eq!(output.matches("Invalid integer").count(), 3);
    }

    #[test]
    fn prompt_is_written_before_reading() {
        let mut out = Vec::new();
        let mut console = Console::new("hello\n".as_bytes(), &mut out);
        let got = console.prompt("Enter choice: ").unwrap();
        drop(console);
        assert_eq!(got, Some("hello".to_string()));
        assert_eq!(String::from_utf8(out).unwrap(), "Enter choice: ");
    }
}
