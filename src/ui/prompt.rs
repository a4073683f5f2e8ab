use std::io::{self, BufRead, Write};

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{Result, ShlistError};

/// Line-oriented question/answer.
///
/// On a terminal the questions go through `dialoguer`, which handles line
/// editing. Otherwise (piped input, scripted sessions) lines are read from
/// `input` and the label is echoed to `output`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interactive: false,
        }
    }

    /// Use `dialoguer` for questions. Only meaningful when stdin and stdout
    /// are both a terminal.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Print `label: ` and return the answer without its line ending.
    /// A closed input yields [`ShlistError::EndOfInput`]; an answer that is
    /// not valid UTF-8 is a [`ShlistError::Record`].
    pub fn ask(&mut self, label: &str) -> Result<String> {
        if self.interactive {
            return ask_terminal(label);
        }
        let bytes = self.read_answer(label)?;
        String::from_utf8(bytes)
            .map_err(|_| ShlistError::Record(format!("invalid {label}: not valid UTF-8")))
    }

    /// Read a menu selection. Undecodable bytes are replaced rather than
    /// rejected; the resulting text never names an action, so the caller
    /// reports it as an invalid option.
    pub fn ask_selection(&mut self, label: &str) -> Result<String> {
        if self.interactive {
            return ask_terminal(label);
        }
        let bytes = self.read_answer(label)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_answer(&mut self, label: &str) -> Result<Vec<u8>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(ShlistError::EndOfInput);
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        Ok(line)
    }

    /// Like [`ask`](Self::ask), with an empty answer meaning "absent".
    pub fn ask_optional(&mut self, label: &str) -> Result<Option<String>> {
        let answer = self.ask(label)?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    /// Ask for an integer. Anything unparsable is a [`ShlistError::Record`]
    /// because these answers always name a record or one of its fields.
    pub fn ask_number(&mut self, label: &str) -> Result<i64> {
        let answer = self.ask(label)?;
        parse_number(label, &answer)
    }

    pub fn ask_optional_number(&mut self, label: &str) -> Result<Option<i64>> {
        match self.ask_optional(label)? {
            Some(answer) => parse_number(label, &answer).map(Some),
            None => Ok(None),
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

fn ask_terminal(label: &str) -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(|err| match err {
            dialoguer::Error::IO(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                ShlistError::EndOfInput
            }
            dialoguer::Error::IO(err) => ShlistError::Io(err),
        })
}

fn parse_number(label: &str, answer: &str) -> Result<i64> {
    answer
        .trim()
        .parse()
        .map_err(|_| ShlistError::Record(format!("invalid {label}: {answer:?}")))
}
