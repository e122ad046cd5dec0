//! # Regular expressions
//!
//! Parses a regex string into postfix form via a shunting-yard pass and hands that postfix
//! stream to the [Thompson builder](crate::nfa::thompson) to produce an [Nfa].
//! From there, [Nfa::to_dfa](crate::nfa::Nfa::to_dfa) runs subset construction against a
//! caller-supplied alphabet.
//!
//! ## Syntax
//! Metacharacters are `| * + ? ( )` plus the internal explicit-concatenation marker `·`
//! (users never write `·` themselves — it's inserted by [Regex::parse]). Every other
//! extended grapheme cluster is an operand, so a regex's "characters" may be multi-byte
//! clusters rather than single Rust `char`s.
//!
//! ```
//! use langtables::regex::Regex;
//! use std::rc::Rc;
//!
//! let regex = Regex::parse("a(b|c)*").unwrap();
//! let nfa = regex.to_nfa().unwrap();
//! let alphabet: Vec<Rc<str>> = vec![Rc::from("a"), Rc::from("b"), Rc::from("c")];
//! let dfa = nfa.to_dfa(&alphabet);
//!
//! assert!(dfa.accepts(&["a"]));
//! assert!(dfa.accepts(&["a", "b", "c"]));
//! assert!(!dfa.accepts(&["b"]));
//! ```

mod shunting_yard;

use crate::nfa::{thompson, Nfa};
use std::rc::Rc;
use thiserror::Error;

pub use shunting_yard::{infix_to_postfix, insert_concatenation, tokenize};

/// A single shunting-yard token: an operand (one grapheme cluster) or one of the six
/// regex operators/grouping marks, plus the internal explicit-concatenation marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegexToken {
    Operand(Rc<str>),
    Union,
    Concat,
    Star,
    Plus,
    Question,
    LParen,
    RParen,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegexError {
    #[error("regex is empty")]
    Empty,
    #[error("mismatched parenthesis")]
    MismatchedParenthesis,
    #[error("operator '{0}' has no operand")]
    InsufficientOperands(char),
    #[error("postfix expression did not reduce to a single fragment")]
    MalformedPostfix,
}

/// A parsed regular expression, held internally as its postfix token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regex {
    postfix: Vec<RegexToken>,
}

impl Regex {
    /// Runs tokenization, explicit-concatenation insertion, and the shunting-yard pass.
    /// Leading/trailing whitespace is trimmed; an empty (or whitespace-only) input fails
    /// with [RegexError::Empty].
    pub fn parse(source: &str) -> Result<Self, RegexError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(RegexError::Empty);
        }
        let tokens = tokenize(trimmed);
        let tokens = insert_concatenation(tokens);
        let postfix = infix_to_postfix(tokens)?;
        Ok(Self { postfix })
    }

    pub fn postfix(&self) -> &[RegexToken] {
        &self.postfix
    }

    /// Builds the Thompson-construction NFA for this regex. See [crate::nfa::thompson].
    pub fn to_nfa(&self) -> Result<Nfa, RegexError> {
        thompson::build(&self.postfix)
    }
}
