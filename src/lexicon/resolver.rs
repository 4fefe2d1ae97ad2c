//! Resolution of unknown lexemes
//!
//! When the dictionary has no category for a lexeme, the classifier asks a
//! [`Resolver`]. The interactive [`PromptResolver`] prints a numbered menu and
//! keeps asking until it gets a valid number; it never guesses. The other
//! implementations cover non-interactive runs and tests.

use super::category::Category;
use super::error::ResolveError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Capability that turns an unknown lexeme into a category
pub trait Resolver {
    /// Pick a category for `lexeme`. `options` is the menu offered, in order;
    /// a resolver may also answer with a label that is not among them, which
    /// creates a new category.
    fn resolve(&mut self, lexeme: &str, options: &[Category]) -> Result<Category, ResolveError>;
}

impl<T: Resolver + ?Sized> Resolver for &mut T {
    fn resolve(&mut self, lexeme: &str, options: &[Category]) -> Result<Category, ResolveError> {
        (**self).resolve(lexeme, options)
    }
}

impl<T: Resolver + ?Sized> Resolver for Box<T> {
    fn resolve(&mut self, lexeme: &str, options: &[Category]) -> Result<Category, ResolveError> {
        (**self).resolve(lexeme, options)
    }
}

/// Numbered terminal menu
///
/// Option `0` defines a new category; `1..=n` pick from the menu.
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl PromptResolver<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        PromptResolver::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptResolver { input, output }
    }

    /// Consume the resolver, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Undecodable bytes become replacement characters, so they read as a
    /// non-numeric answer instead of an IO failure.
    fn read_answer(&mut self) -> Result<String, ResolveError> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(ResolveError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    fn read_new_category(&mut self) -> Result<Category, ResolveError> {
        loop {
            write!(self.output, "Name of the new category: ")?;
            self.output.flush()?;
            let label = self.read_answer()?;
            if !label.is_empty() {
                return Ok(Category::new(label));
            }
            writeln!(self.output, "The category name cannot be empty.")?;
        }
    }
}

impl<R: BufRead, W: Write> Resolver for PromptResolver<R, W> {
    fn resolve(&mut self, lexeme: &str, options: &[Category]) -> Result<Category, ResolveError> {
        loop {
            writeln!(self.output, "Please assign a token to this lexeme: {}", lexeme)?;
            writeln!(self.output, "0 - (new category)")?;
            for (index, option) in options.iter().enumerate() {
                writeln!(self.output, "{} - {}", index + 1, option)?;
            }
            write!(self.output, "Enter the number corresponding to your choice: ")?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            match answer.parse::<usize>() {
                Ok(0) => return self.read_new_category(),
                Ok(choice) if choice <= options.len() => return Ok(options[choice - 1].clone()),
                Ok(_) => writeln!(
                    self.output,
                    "Incorrect option, please enter a number between 0 and {}.",
                    options.len()
                )?,
                Err(_) => writeln!(self.output, "Invalid input, please enter a number.")?,
            }
        }
    }
}

/// Assigns one fixed category to every unknown lexeme
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    category: Category,
}

impl FallbackResolver {
    pub fn new(category: Category) -> Self {
        FallbackResolver { category }
    }
}

impl Resolver for FallbackResolver {
    fn resolve(&mut self, lexeme: &str, _options: &[Category]) -> Result<Category, ResolveError> {
        log::debug!("'{}' defaults to {}", lexeme, self.category);
        Ok(self.category.clone())
    }
}

/// Replays a fixed list of answers, recording what was asked
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    answers: VecDeque<Category>,
    asked: Vec<String>,
}

impl ScriptedResolver {
    pub fn new<I, C>(answers: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        ScriptedResolver {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Lexemes the resolver was asked about, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Resolver for ScriptedResolver {
    fn resolve(&mut self, lexeme: &str, _options: &[Category]) -> Result<Category, ResolveError> {
        self.asked.push(lexeme.to_string());
        self.answers.pop_front().ok_or(ResolveError::InputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::category::menu_options;
    use std::io::Cursor;

    fn prompt(input: &str) -> PromptResolver<Cursor<Vec<u8>>, Vec<u8>> {
        PromptResolver::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(resolver: PromptResolver<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(resolver.into_output()).unwrap()
    }

    #[test]
    fn picks_the_numbered_option() {
        let options = menu_options(&[]);
        let mut resolver = prompt("2\n");
        let chosen = resolver.resolve("pluma", &options).unwrap();
        assert_eq!(chosen, options[1]);

        let out = transcript(resolver);
        assert!(out.contains("Please assign a token to this lexeme: pluma"));
        assert!(out.contains("1 - ARTICLE"));
        assert!(out.contains("7 - LEXICAL_ERROR"));
    }

    #[test]
    fn reprompts_until_the_answer_is_valid() {
        let options = menu_options(&[]);
        let mut resolver = prompt("abc\n\n-1\n42\n7\n");
        let chosen = resolver.resolve("xyzzy", &options).unwrap();
        assert!(chosen.is_lexical_error());

        let out = transcript(resolver);
        assert_eq!(out.matches("Invalid input, please enter a number.").count(), 3);
        assert_eq!(out.matches("Incorrect option").count(), 1);
        assert_eq!(out.matches("Please assign a token").count(), 5);
    }

    #[test]
    fn undecodable_answer_is_treated_as_invalid_input() {
        let options = menu_options(&[]);
        let input = vec![0xff, 0xfe, b'\n', b'2', b'\n'];
        let mut resolver = PromptResolver::new(Cursor::new(input), Vec::new());
        let chosen = resolver.resolve("pluma", &options).unwrap();
        assert_eq!(chosen, Category::new("NOUN"));

        let out = transcript(resolver);
        assert_eq!(out.matches("Invalid input, please enter a number.").count(), 1);
        assert_eq!(out.matches("Please assign a token").count(), 2);
    }

    #[test]
    fn zero_defines_a_new_category() {
        let options = menu_options(&[]);
        let mut resolver = prompt("0\n   \n PRONOUN \n");
        let chosen = resolver.resolve("ella", &options).unwrap();
        assert_eq!(chosen, Category::new("PRONOUN"));
        assert!(transcript(resolver).contains("cannot be empty"));
    }

    #[test]
    fn closed_input_is_an_error_not_a_guess() {
        let options = menu_options(&[]);
        let mut resolver = prompt("nope\n");
        assert!(matches!(
            resolver.resolve("pluma", &options),
            Err(ResolveError::InputClosed)
        ));
    }

    #[test]
    fn scripted_resolver_replays_answers() {
        let mut resolver = ScriptedResolver::new(["NOUN", "VERB"]);
        assert_eq!(resolver.resolve("a", &[]).unwrap(), Category::new("NOUN"));
        assert_eq!(resolver.resolve("b", &[]).unwrap(), Category::new("VERB"));
        assert!(resolver.resolve("c", &[]).is_err());
        assert_eq!(resolver.asked(), &["a", "b", "c"]);
    }

    #[test]
    fn fallback_always_answers_the_same() {
        let mut resolver = FallbackResolver::new(Category::new("OTHER"));
        assert_eq!(resolver.resolve("x", &[]).unwrap(), Category::new("OTHER"));
        assert_eq!(resolver.resolve("y", &[]).unwrap(), Category::new("OTHER"));
    }
}
