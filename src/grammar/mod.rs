//! # Grammar model
//!
//! A [Grammar] is a finite bag of [Production]s over a set of [Symbol]s, together with
//! a designated start symbol and the terminal/non-terminal partitions those symbols belong
//! to. This module only models and validates grammars; the interesting algorithms
//! ([FIRST-set computation](crate::first), the [LR(1) automaton](crate::lr1) and the
//! [LALR(1) table builder](crate::lalr)) all consume a `&Grammar` without mutating it.
//!
//! Production order is preserved from construction, since LR state discovery order (and
//! therefore the reproducibility of conflict diagnostics) depends on the order productions
//! are visited in.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Whether a [Symbol] is a terminal (an input token) or a non-terminal (something the
/// grammar expands further).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// A named grammar symbol. Equality is by `(name, kind)`, so a terminal and a non-terminal
/// sharing a name are distinct symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    pub name: Rc<str>,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn terminal(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Terminal,
        }
    }

    pub fn non_terminal(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::NonTerminal,
        }
    }

    /// The distinguished end-of-input marker `$`.
    pub fn end_marker() -> Self {
        Self::terminal("$")
    }

    /// The distinguished empty-string marker `ε`. Never appears as a lookahead; see
    /// [crate::first] for how it is filtered out of lookahead sets.
    pub fn epsilon() -> Self {
        Self::terminal("ε")
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    pub fn is_non_terminal(&self) -> bool {
        self.kind == SymbolKind::NonTerminal
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A single production `left -> right`. `right` may be empty, denoting `left -> ε`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production {
    pub left: Symbol,
    pub right: Vec<Symbol>,
}

impl Production {
    pub fn new(left: Symbol, right: Vec<Symbol>) -> Self {
        Self { left, right }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.right.is_empty() {
            write!(f, "{} -> ε", self.left)
        } else {
            let rhs = self
                .right
                .iter()
                .map(|s| s.name.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{} -> {}", self.left, rhs)
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("start symbol '{0}' is not a declared non-terminal")]
    StartNotNonTerminal(Rc<str>),
    #[error("symbol '{0}' in production '{1}' is neither a declared terminal nor a declared non-terminal")]
    UndeclaredSymbol(Rc<str>, String),
}

/// A context-free grammar: a finite set of [Production]s, a start [Symbol], and the
/// terminal/non-terminal partition induced by the caller. See [crate::grammar] for the
/// invariants this type enforces at construction time.
#[derive(Clone, Debug)]
pub struct Grammar {
    productions: Vec<Production>,
    start: Symbol,
    terminals: HashSet<Symbol>,
    non_terminals: HashSet<Symbol>,
}

impl Grammar {
    /// Builds a grammar, validating that the start symbol is a declared non-terminal and
    /// that every right-hand-side symbol belongs to one of the two partitions (ε excepted).
    ///
    /// A written-out ε on a right-hand side (`vec![Symbol::epsilon()]`) is normalized away
    /// here: the stored [Production::right] is always the empty `Vec` for an ε-production,
    /// which is the only representation the rest of the pipeline (FIRST, the LR(1) item
    /// builder, the parsing driver) needs to handle.
    pub fn new(
        productions: Vec<Production>,
        start: Symbol,
        terminals: HashSet<Symbol>,
        non_terminals: HashSet<Symbol>,
    ) -> Result<Self, GrammarError> {
        if start.kind != SymbolKind::NonTerminal || !non_terminals.contains(&start) {
            return Err(GrammarError::StartNotNonTerminal(start.name));
        }

        let epsilon = Symbol::epsilon();
        for production in &productions {
            for symbol in &production.right {
                if *symbol == epsilon {
                    continue;
                }
                let declared = match symbol.kind {
                    SymbolKind::Terminal => terminals.contains(symbol),
                    SymbolKind::NonTerminal => non_terminals.contains(symbol),
                };
                if !declared {
                    return Err(GrammarError::UndeclaredSymbol(
                        symbol.name.clone(),
                        production.to_string(),
                    ));
                }
            }
        }

        let productions = productions
            .into_iter()
            .map(|p| Production::new(p.left, p.right.into_iter().filter(|s| *s != epsilon).collect()))
            .collect();

        Ok(Self {
            productions,
            start,
            terminals,
            non_terminals,
        })
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    pub fn non_terminals(&self) -> &HashSet<Symbol> {
        &self.non_terminals
    }

    /// Productions with the given non-terminal on the left, paired with their index in
    /// [Grammar::productions] (the index LR items refer back to).
    pub fn productions_for<'a>(
        &'a self,
        non_terminal: &'a Symbol,
    ) -> impl Iterator<Item = (usize, &'a Production)> + 'a {
        self.productions
            .iter()
            .enumerate()
            .filter(move |(_, p)| &p.left == non_terminal)
    }

    /// Looks up a declared terminal by name, used by the [parsing driver](crate::parse) to
    /// turn a token's `type` string into a [Symbol].
    pub fn terminal_named(&self, name: &str) -> Option<&Symbol> {
        self.terminals.iter().find(|s| s.name.as_ref() == name)
    }
}
