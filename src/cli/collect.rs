//! Terminal answer collection.
//!
//! The session engine only sees the `AnswerCollector` trait; this module
//! is the human-facing implementation that prompts on stdout and reads
//! stdin. Invalid answers are the driver's business (it simply calls
//! `collect` again, and the prompt repeats); a closed or failing stdin
//! surfaces as an `Io` error that aborts the session.

use crate::data::{QuestionCatalog, Value};
use crate::error::{CribarError, Result};
use crate::session::AnswerCollector;
use std::io::{BufRead, Write};

/// Prompts on the terminal using catalog prompt text.
pub struct StdinCollector<'a> {
    catalog: &'a QuestionCatalog,
}

impl<'a> StdinCollector<'a> {
    #[must_use]
    pub fn new(catalog: &'a QuestionCatalog) -> Self {
        Self { catalog }
    }
}

impl AnswerCollector for StdinCollector<'_> {
    fn collect(&mut self, question: &str, choices: &[Value]) -> Result<Value> {
        let rendered: Vec<String> = choices.iter().map(ToString::to_string).collect();
        println!("\nPlease answer: {}", self.catalog.prompt_or_code(question));
        println!("Choices are: [{}]", rendered.join(", "));
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(CribarError::io(
                "reading an answer from stdin",
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed"),
            )),
            Err(e) => Err(CribarError::io("reading an answer from stdin", e)),
            Ok(_) => Ok(parse_answer(line.trim())),
        }
    }
}

/// Numeric if it parses as a number, text otherwise.
pub(crate) fn parse_answer(input: &str) -> Value {
    input
        .parse::<f64>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::Text(input.to_string()))
}
