//! # Deterministic finite automaton
//!
//! A [Dfa] is produced from an [Nfa](crate::nfa::Nfa) by [subset construction](subset) against
//! a caller-supplied alphabet. Unlike the NFA it's built from, a [Dfa] carries its alphabet
//! with it — every state has at most one outgoing transition per alphabet symbol, recorded in
//! a `HashMap<Rc<str>, usize>` rather than a flat table, since most DFA states don't
//! transition on every symbol.
//!
//! A state with no transition defined for the symbol just read is a dead state: acceptance
//! stops at the first symbol that falls off the table, which [DfaEvaluator] implements by
//! switching to `None`.

pub mod eval;
pub mod subset;

pub use eval::DfaEvaluator;

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// A state in a constructed DFA. `nfa_states` is the subset-construction provenance (the set
/// of NFA state indices this DFA state corresponds to) and doubles as the dedup key during
/// construction; it carries no meaning once the DFA is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) nfa_states: BTreeSet<usize>,
    pub(crate) is_final: bool,
    pub(crate) transitions: HashMap<Rc<str>, usize>,
}

impl DfaState {
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn transitions(&self) -> &HashMap<Rc<str>, usize> {
        &self.transitions
    }

    pub fn nfa_states(&self) -> &BTreeSet<usize> {
        &self.nfa_states
    }
}

/// A deterministic finite automaton over a fixed alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: usize,
    pub(crate) alphabet: Rc<[Rc<str>]>,
}

impl Dfa {
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn alphabet(&self) -> &[Rc<str>] {
        &self.alphabet
    }

    /// Runs `word` against the DFA from the start state, stepping through [DfaEvaluator].
    /// A symbol outside the alphabet (or encountered from a dead state) rejects the word.
    pub fn accepts(&self, word: &[&str]) -> bool {
        let mut evaluator = self.evaluator();
        for &elem in word {
            evaluator.step(elem);
        }
        evaluator.is_accepting()
    }

    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        DfaEvaluator::from(self)
    }

    /// States with no path back from the start state. Dead, unreachable work left over from
    /// subset construction when the NFA had branches the alphabet can never traverse.
    pub fn unreachable_states(&self) -> BTreeSet<usize> {
        let mut reachable = BTreeSet::new();
        let mut worklist = vec![self.start];
        reachable.insert(self.start);
        while let Some(state) = worklist.pop() {
            for &target in self.states[state].transitions.values() {
                if reachable.insert(target) {
                    worklist.push(target);
                }
            }
        }
        (0..self.states.len())
            .filter(|s| !reachable.contains(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::thompson;
    use crate::regex::RegexToken;

    fn operand(s: &str) -> RegexToken {
        RegexToken::Operand(Rc::from(s))
    }

    fn alphabet(symbols: &[&str]) -> Vec<Rc<str>> {
        symbols.iter().map(|s| Rc::from(*s)).collect()
    }

    #[test]
    fn dfa_from_star_accepts_empty_and_repeats() {
        let nfa = thompson::build(&[operand("a"), RegexToken::Star]).unwrap();
        let dfa = nfa.to_dfa(&alphabet(&["a"]));
        assert!(dfa.accepts(&[]));
        assert!(dfa.accepts(&["a", "a", "a"]));
    }

    #[test]
    fn dfa_rejects_symbol_outside_alphabet() {
        let nfa = thompson::build(&[operand("a")]).unwrap();
        let dfa = nfa.to_dfa(&alphabet(&["a"]));
        assert!(!dfa.accepts(&["b"]));
    }
}
