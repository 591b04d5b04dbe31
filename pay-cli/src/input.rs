//! Interactive collection of employee details.
//!
//! Each question is asked once; invalid answers print the validation message
//! and wait for another line, without repeating the question.

use std::io::{self, BufRead, Write};

use pay_core::{Employee, ValidationError};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

pub const NAME_PROMPT: &str = "Employee name: ";
pub const NUMBER_PROMPT: &str = "Please enter your employee number: ";
pub const SALARY_PROMPT: &str = "What is the yearly gross salary (in £) of the employee? ";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads answers from `input` and writes questions and messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn full_name(&mut self) -> Result<String, PromptError> {
        self.ask(NAME_PROMPT, |line| {
            Employee::validate_name(line)?;
            Ok(line.to_string())
        })
    }

    pub fn employee_number(&mut self) -> Result<u32, PromptError> {
        self.ask(NUMBER_PROMPT, Employee::parse_number)
    }

    pub fn yearly_gross_salary(&mut self) -> Result<Decimal, PromptError> {
        self.ask(SALARY_PROMPT, Employee::parse_salary)
    }

    fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        loop {
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    debug!(%error, "rejected answer");
                    writeln!(self.output, "{error}")?;
                    self.output.flush()?;
                }
            }
        }
    }

    /// One line of input without its line terminator.
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}
