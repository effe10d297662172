//! Line-based prompts over an explicit reader/writer pair.
//!
//! Every question resolves with the next input line, or with
//! [`CliError::InputClosed`] once input ends.

use std::fmt::Display;
use std::io::{BufRead, Write};

use super::CliError;

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Wrap an input/output pair.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` without a newline and wait for one answer line.
    ///
    /// The returned answer has its line terminator removed and is otherwise
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InputClosed`] at end of input, or
    /// [`CliError::Io`] when reading or writing fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    ///
    /// use coursework::inbound::cli::Prompter;
    ///
    /// let mut prompter = Prompter::new(Cursor::new("Ada\n"), Vec::new());
    /// assert_eq!(prompter.ask("Name: ").expect("answer"), "Ada");
    /// ```
    pub fn ask(&mut self, question: &str) -> Result<String, CliError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Err(CliError::InputClosed {
                question: question.trim().to_owned(),
            });
        }

        if answer.ends_with('\n') {
            answer.pop();
            if answer.ends_with('\r') {
                answer.pop();
            }
        }
        Ok(answer)
    }

    /// Print one line of output.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] when writing fails.
    pub fn say(&mut self, line: impl Display) -> Result<(), CliError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Direct access to the output stream for multi-line rendering.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Release the wrapped streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use rstest::rstest;

    fn prompter(input: &str) -> Prompter<Cursor<String>, Vec<u8>> {
        Prompter::new(Cursor::new(input.to_owned()), Vec::new())
    }

    #[rstest]
    #[case::unix("Ada\nnext\n", "Ada")]
    #[case::windows("Ada\r\nnext\r\n", "Ada")]
    #[case::no_trailing_newline("Ada", "Ada")]
    #[case::blank_line("\nnext\n", "")]
    #[case::keeps_inner_whitespace("  Ada  \n", "  Ada  ")]
    fn answers_strip_only_the_line_terminator(#[case] input: &str, #[case] expected: &str) {
        let mut prompter = prompter(input);
        assert_eq!(prompter.ask("Name: ").expect("answer"), expected);
    }

    #[rstest]
    fn questions_are_answered_in_sequence() {
        let mut prompter = prompter("Ada\nada@example.com\n");
        assert_eq!(prompter.ask("Name: ").expect("name"), "Ada");
        assert_eq!(prompter.ask("Email: ").expect("email"), "ada@example.com");

        let (_, output) = prompter.into_parts();
        assert_eq!(String::from_utf8(output).expect("utf8"), "Name: Email: ");
    }

    #[rstest]
    fn end_of_input_resolves_with_an_error() {
        let mut prompter = prompter("");
        let error = prompter.ask("Age: ").expect_err("input is closed");
        assert!(
            matches!(&error, CliError::InputClosed { question } if question == "Age:"),
            "unexpected error: {error:?}"
        );
    }
}
