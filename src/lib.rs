//! # langtables
//!
//! `langtables` builds the two tables a hand-written lexer/parser pair needs: a DFA transition
//! table from a regular expression, and a shift/reduce/goto table from a context-free grammar.
//!
//! ## Regex to DFA
//!
//! A [Regex](regex::Regex) is parsed to postfix via a shunting-yard pass, built into an
//! [Nfa](nfa::Nfa) by Thompson construction, and turned into a [Dfa](dfa::Dfa) by subset
//! construction against a caller-chosen alphabet:
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
//! assert!(dfa.accepts(&["a", "b", "c", "c"]));
//! assert!(!dfa.accepts(&["b"]));
//! ```
//!
//! ## Grammar to LALR(1) table
//!
//! A [Grammar](grammar::Grammar) feeds [FirstSets](first::FirstSets), which the LR(1)
//! [canonical collection](lr1::Automaton) uses to compute lookaheads. Merging that collection's
//! states by kernel produces an [LalrTable](lalr::LalrTable), which [parse::parse] drives over a
//! token stream:
//!
//! ```
//! use langtables::grammar::{Grammar, Production, Symbol};
//! use langtables::lalr::LalrTable;
//! use langtables::parse::{parse, Token};
//! use std::collections::HashSet;
//!
//! let s = Symbol::non_terminal("S");
//! let a = Symbol::terminal("a");
//! let grammar = Grammar::new(
//!     vec![Production::new(s.clone(), vec![a.clone()])],
//!     s.clone(),
//!     HashSet::from([a]),
//!     HashSet::from([s]),
//! )
//! .unwrap();
//!
//! let table = LalrTable::build(&grammar);
//! assert!(parse(&grammar, &table, &[Token::new("a", "a")]).is_ok());
//! ```
//!
//! ## Modules
//!
//! * [regex] — shunting-yard tokenizer and infix-to-postfix conversion
//! * [nfa] — Thompson construction and stepwise NFA evaluation
//! * [dfa] — subset construction and stepwise DFA evaluation
//! * [grammar] — context-free grammar data model and validation
//! * [first] — FIRST-set fixed-point computation
//! * [lr1] — canonical LR(1) item set collection
//! * [lalr] — kernel-merged LALR(1) ACTION/GOTO table construction and conflict diagnostics
//! * [parse] — the shift/reduce/accept driver

pub mod dfa;
pub mod first;
pub mod grammar;
pub mod lalr;
pub mod lr1;
pub mod nfa;
pub mod parse;
pub mod regex;
