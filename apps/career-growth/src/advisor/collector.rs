//! Answer Collector — asks each question and records the raw reply.

use std::io::{BufRead, Write};

use crate::errors::AppError;

/// Question → answer pairs in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(String, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer. Re-answering a question replaces the earlier reply in place.
    pub fn insert(&mut self, question: &str, answer: &str) {
        match self.entries.iter_mut().find(|(q, _)| q == question) {
            Some(entry) => entry.1 = answer.to_string(),
            None => self
                .entries
                .push((question.to_string(), answer.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(q, a)| (q.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (q, a) in iter {
            set.insert(q, a);
        }
        set
    }
}

/// Prints each question followed by a `> ` prompt and reads one line per answer.
///
/// Any text is accepted — yes/no answers are not validated. End of input before
/// the last question is answered fails with `AppError::InputClosed`.
pub fn collect_answers<R, W>(
    questions: &[&str],
    input: &mut R,
    output: &mut W,
) -> Result<AnswerSet, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut answers = AnswerSet::new();
    let mut line = String::new();

    for (i, question) in questions.iter().enumerate() {
        write!(output, "{question}\n> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed { question: i + 1 });
        }
        answers.insert(question, line.trim_end_matches(['\r', '\n']));
    }

    Ok(answers)
}
