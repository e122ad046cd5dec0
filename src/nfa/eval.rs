//! Stepwise NFA evaluation: a [NfaEvaluator] tracks the ε-closed set of live states as input
//! symbols arrive, without ever materializing a DFA. Used both by [Nfa::accepts](super::Nfa::accepts)
//! and as an oracle to cross-check the DFA built from the same NFA.

use super::{Label, Nfa};
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    current_states: BTreeSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_states
            .iter()
            .any(|&s| self.nfa.states()[s].is_final())
    }

    pub fn current_states(&self) -> &BTreeSet<usize> {
        &self.current_states
    }

    /// Advances across one input symbol: first take every labeled transition out of the
    /// current state set, then close the result under ε.
    pub fn step(&mut self, elem: &str) {
        let mut next = BTreeSet::new();
        for &state in &self.current_states {
            for (label, target) in self.nfa.states()[state].transitions() {
                if let Label::Symbol(symbol) = label {
                    if &**symbol == elem {
                        next.insert(*target);
                    }
                }
            }
        }
        self.current_states = next;
        self.close_epsilon();
    }

    fn close_epsilon(&mut self) {
        let mut worklist: Vec<usize> = self.current_states.iter().copied().collect();
        while let Some(state) = worklist.pop() {
            for (label, target) in self.nfa.states()[state].transitions() {
                if matches!(label, Label::Epsilon) && self.current_states.insert(*target) {
                    worklist.push(*target);
                }
            }
        }
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        let mut evaluator = Self {
            nfa,
            current_states: BTreeSet::new(),
        };
        evaluator.current_states.insert(nfa.start());
        evaluator.close_epsilon();
        evaluator
    }
}
