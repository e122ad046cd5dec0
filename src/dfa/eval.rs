//! Stepwise DFA evaluation. Unlike [NfaEvaluator](crate::nfa::NfaEvaluator), a [DfaEvaluator]
//! tracks at most one live state — once a symbol falls off the current state's transition
//! table the evaluator goes dead (`None`) for good: acceptance stops at the first symbol
//! that falls off the table.

use super::Dfa;

#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current_state: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state
            .is_some_and(|s| self.dfa.states()[s].is_final())
    }

    pub fn current_state(&self) -> Option<usize> {
        self.current_state
    }

    /// Once dead, always dead: there is no transition out of `None`.
    pub fn step(&mut self, elem: &str) {
        self.current_state = self
            .current_state
            .and_then(|s| self.dfa.states()[s].transitions().get(elem).copied());
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current_state: Some(dfa.start()),
        }
    }
}
