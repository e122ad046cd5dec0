//! # Parsing driver
//!
//! The stack-based shift/reduce/accept loop that drives a built [LalrTable] over a stream
//! of [Token]s. The driver only consults a token's `kind` (the terminal name); the lexeme is
//! carried through unused, ready for a caller that wants it for diagnostics.
//!
//! There is no error recovery: on the first unexpected token or missing GOTO, [parse]
//! returns a [ParseError] and stops.

use crate::grammar::{Grammar, Symbol};
use crate::lalr::{Action, LalrTable};
use thiserror::Error;

/// A single input token. Only `kind` is significant to the driver; `lexeme` is carried
/// through for callers that want it in diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: String,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: impl Into<String>, lexeme: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            lexeme: lexeme.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("state {state}; expected one of {expected}; found {found}")]
    UnexpectedToken {
        state: usize,
        expected: String,
        found: String,
    },
    #[error("state {state}; no GOTO defined for {symbol} after reducing")]
    MissingGoto { state: usize, symbol: String },
}

/// Runs the shift/reduce/accept loop. An EOF token of type `$` is appended internally;
/// callers should not include one in `tokens`.
pub fn parse(grammar: &Grammar, table: &LalrTable, tokens: &[Token]) -> Result<(), ParseError> {
    let mut stack = vec![table.initial()];
    let mut input: Vec<Token> = tokens.to_vec();
    input.push(Token::new("$", ""));
    let mut ip = 0usize;

    loop {
        let state = *stack.last().expect("parse stack is never empty");
        let token = &input[ip];
        let symbol = token_symbol(grammar, token);

        match table.action(state, &symbol) {
            None => {
                let mut expected: Vec<String> = table
                    .expected_terminals(state)
                    .into_iter()
                    .map(|s| s.name.to_string())
                    .collect();
                expected.sort();
                return Err(ParseError::UnexpectedToken {
                    state,
                    expected: expected.join(", "),
                    found: token.kind.clone(),
                });
            }
            Some(Action::Shift(target)) => {
                stack.push(*target);
                ip += 1;
            }
            Some(Action::Reduce(production_idx)) => {
                let production_idx = *production_idx;
                let production = &grammar.productions()[production_idx];
                let new_len = stack.len() - production.right.len();
                stack.truncate(new_len);
                let uncovered = *stack.last().expect("parse stack is never empty");
                match table.goto(uncovered, &production.left) {
                    Some(target) => stack.push(target),
                    None => {
                        return Err(ParseError::MissingGoto {
                            state: uncovered,
                            symbol: production.left.name.to_string(),
                        })
                    }
                }
            }
            Some(Action::Accept) => return Ok(()),
        }
    }
}

fn token_symbol(grammar: &Grammar, token: &Token) -> Symbol {
    if token.kind == "$" {
        return Symbol::end_marker();
    }
    grammar
        .terminal_named(&token.kind)
        .cloned()
        .unwrap_or_else(|| Symbol::terminal(token.kind.clone()))
}
