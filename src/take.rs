use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use crate::loader::{OptionLabel, Question};
use crate::output::format_question;
use crate::quiz::QuizModel;
use crate::scoring::Answers;

/// Respondent name and answers collected by [`run_quiz`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: Option<String>,
    pub answers: Answers,
}

/// Prompt with a message and return the trimmed input, or None at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{}", message).context("Failed to write prompt")?;
    out.flush().context("Failed to flush output")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask until the respondent picks one of the question's options.
/// Input is case-insensitive.
fn ask_question<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &Question,
    use_colors: bool,
) -> Result<OptionLabel> {
    writeln!(out, "{}", format_question(question, use_colors))?;

    let choices: Vec<&str> = question.options.keys().map(|l| l.as_str()).collect();
    let message = format!("Answer [{}]: ", choices.join("/"));

    loop {
        let Some(answer) = prompt(input, out, &message)? else {
            bail!("Input ended before question {} was answered", question.id);
        };

        match answer.to_uppercase().parse::<OptionLabel>() {
            Ok(label) if question.options.contains_key(&label) => {
                writeln!(out)?;
                return Ok(label);
            }
            _ => writeln!(out, "Please choose one of {}.", choices.join(", "))?,
        }
    }
}

/// Walk the respondent through every loaded question in order.
///
/// With `ask_name`, a non-empty name is requested first. Every question must
/// be answered; running out of input is an error.
pub fn run_quiz<R: BufRead, W: Write>(
    model: &QuizModel,
    input: &mut R,
    out: &mut W,
    ask_name: bool,
    use_colors: bool,
) -> Result<Submission> {
    let name = if ask_name {
        loop {
            match prompt(input, out, "What is your name? ")? {
                None => bail!("Input ended before a name was given"),
                Some(n) if n.is_empty() => writeln!(out, "Please enter your name.")?,
                Some(n) => break Some(n),
            }
        }
    } else {
        None
    };
    writeln!(out)?;

    let total = model.questions().len();
    let mut answers = Answers::new();
    for (i, question) in model.questions().iter().enumerate() {
        writeln!(out, "Question {}/{}", i + 1, total)?;
        let label = ask_question(input, out, question, use_colors)?;
        answers.insert(question.id.clone(), label.to_string());
    }

    Ok(Submission { name, answers })
}
