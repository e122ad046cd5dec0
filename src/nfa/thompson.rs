//! # Thompson construction
//!
//! Builds an [Nfa] from a regex's postfix token stream by walking a stack of fragments:
//! operands push a two-state fragment, each operator pops its operand fragment(s) and pushes
//! a new composite fragment wired with ε-transitions.

use super::{Label, Nfa, NfaState};
use crate::regex::{RegexError, RegexToken};

/// A fragment under construction: its start and end state indices into the builder's arena.
/// The end state is never marked final until the whole postfix stream reduces to one
/// fragment, at which point [build] marks it so.
struct Fragment {
    start: usize,
    end: usize,
}

struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn new() -> Self {
        Self { states: Vec::new() }
    }

    fn push_state(&mut self) -> usize {
        let idx = self.states.len();
        self.states.push(NfaState {
            is_final: false,
            transitions: Vec::new(),
        });
        idx
    }

    fn add_transition(&mut self, from: usize, label: Label, to: usize) {
        self.states[from].transitions.push((label, to));
    }

    /// A single `symbol -> accepting` fragment.
    fn operand(&mut self, symbol: &str) -> Fragment {
        let start = self.push_state();
        let end = self.push_state();
        self.add_transition(start, Label::Symbol(symbol.into()), end);
        Fragment { start, end }
    }

    /// `ab`: wires `a`'s end to `b`'s start via ε, discarding the seam in between.
    fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
        self.add_transition(a.end, Label::Epsilon, b.start);
        Fragment {
            start: a.start,
            end: b.end,
        }
    }

    /// `a|b`: a new start ε-branches to both fragments' starts, both ends ε-converge on a
    /// new end.
    fn union(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.push_state();
        let end = self.push_state();
        self.add_transition(start, Label::Epsilon, a.start);
        self.add_transition(start, Label::Epsilon, b.start);
        self.add_transition(a.end, Label::Epsilon, end);
        self.add_transition(b.end, Label::Epsilon, end);
        Fragment { start, end }
    }

    /// `a*`: new start/end ε-bypass the fragment entirely (zero repetitions), and the
    /// fragment's end loops back to its own start (further repetitions).
    fn star(&mut self, a: Fragment) -> Fragment {
        let start = self.push_state();
        let end = self.push_state();
        self.add_transition(start, Label::Epsilon, a.start);
        self.add_transition(start, Label::Epsilon, end);
        self.add_transition(a.end, Label::Epsilon, a.start);
        self.add_transition(a.end, Label::Epsilon, end);
        Fragment { start, end }
    }

    /// `a+`: like `a*` but without the bypass — at least one pass through `a` is mandatory.
    fn plus(&mut self, a: Fragment) -> Fragment {
        let end = self.push_state();
        self.add_transition(a.end, Label::Epsilon, a.start);
        self.add_transition(a.end, Label::Epsilon, end);
        Fragment {
            start: a.start,
            end,
        }
    }

    /// `a?`: new start ε-branches to `a`'s start and directly to a new end; `a`'s end also
    /// ε-converges on the new end.
    fn question(&mut self, a: Fragment) -> Fragment {
        let start = self.push_state();
        let end = self.push_state();
        self.add_transition(start, Label::Epsilon, a.start);
        self.add_transition(start, Label::Epsilon, end);
        self.add_transition(a.end, Label::Epsilon, end);
        Fragment { start, end }
    }
}

/// Consumes a postfix token stream and produces the corresponding [Nfa]. Each operator pops
/// its operand(s) from the fragment stack; running out of operands for an operator is
/// [RegexError::InsufficientOperands], and a stream that doesn't reduce to exactly one
/// fragment is [RegexError::MalformedPostfix].
pub fn build(postfix: &[RegexToken]) -> Result<Nfa, RegexError> {
    let mut builder = Builder::new();
    let mut stack: Vec<Fragment> = Vec::new();

    for token in postfix {
        match token {
            RegexToken::Operand(symbol) => stack.push(builder.operand(symbol)),
            RegexToken::Concat => {
                let b = stack.pop().ok_or(RegexError::InsufficientOperands('\u{b7}'))?;
                let a = stack.pop().ok_or(RegexError::InsufficientOperands('\u{b7}'))?;
                stack.push(builder.concat(a, b));
            }
            RegexToken::Union => {
                let b = stack.pop().ok_or(RegexError::InsufficientOperands('|'))?;
                let a = stack.pop().ok_or(RegexError::InsufficientOperands('|'))?;
                stack.push(builder.union(a, b));
            }
            RegexToken::Star => {
                let a = stack.pop().ok_or(RegexError::InsufficientOperands('*'))?;
                stack.push(builder.star(a));
            }
            RegexToken::Plus => {
                let a = stack.pop().ok_or(RegexError::InsufficientOperands('+'))?;
                stack.push(builder.plus(a));
            }
            RegexToken::Question => {
                let a = stack.pop().ok_or(RegexError::InsufficientOperands('?'))?;
                stack.push(builder.question(a));
            }
            RegexToken::LParen | RegexToken::RParen => {
                unreachable!("parentheses never survive the shunting-yard pass")
            }
        }
    }

    if stack.len() != 1 {
        return Err(RegexError::MalformedPostfix);
    }
    let fragment = stack.pop().expect("checked len == 1 above");
    builder.states[fragment.end].is_final = true;

    Ok(Nfa {
        states: builder.states,
        start: fragment.start,
        end: fragment.end,
    })
}
