//! # Subset construction
//!
//! Turns an [Nfa] into a [Dfa] over a fixed alphabet: each DFA state is the ε-closure of an
//! NFA state set, discovered breadth-first from the closure of the NFA's start state. Two DFA
//! states are the same exactly when their underlying NFA state sets are equal, which is what
//! the `HashMap<BTreeSet<usize>, usize>` dedup index below keys on.

use crate::nfa::{Label, Nfa};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use super::{Dfa, DfaState};

fn epsilon_closure(nfa: &Nfa, states: &BTreeSet<usize>) -> BTreeSet<usize> {
    let mut closure = states.clone();
    let mut worklist: Vec<usize> = states.iter().copied().collect();
    while let Some(state) = worklist.pop() {
        for (label, target) in nfa.states()[state].transitions() {
            if matches!(label, Label::Epsilon) && closure.insert(*target) {
                worklist.push(*target);
            }
        }
    }
    closure
}

fn mov(nfa: &Nfa, states: &BTreeSet<usize>, symbol: &str) -> BTreeSet<usize> {
    let mut result = BTreeSet::new();
    for &state in states {
        for (label, target) in nfa.states()[state].transitions() {
            if let Label::Symbol(sym) = label {
                if &**sym == symbol {
                    result.insert(*target);
                }
            }
        }
    }
    result
}

/// Builds the DFA for `nfa` over `alphabet` by worklist-driven discovery of ε-closed NFA
/// state sets, one DFA transition per alphabet symbol per discovered set. Symbols outside
/// `alphabet` never appear in any constructed transition.
pub fn construct(nfa: &Nfa, alphabet: &[Rc<str>]) -> Dfa {
    let start_set = epsilon_closure(nfa, &BTreeSet::from([nfa.start()]));

    let mut index: HashMap<BTreeSet<usize>, usize> = HashMap::new();
    let mut states: Vec<DfaState> = Vec::new();
    let mut worklist: Vec<BTreeSet<usize>> = Vec::new();

    let start = intern(&start_set, nfa, &mut index, &mut states, &mut worklist);

    while let Some(current) = worklist.pop() {
        let current_idx = *index
            .get(&current)
            .expect("every worklist entry was interned before being queued");
        for symbol in alphabet {
            let moved = mov(nfa, &current, symbol);
            if moved.is_empty() {
                continue;
            }
            let closed = epsilon_closure(nfa, &moved);
            let target = intern(&closed, nfa, &mut index, &mut states, &mut worklist);
            states[current_idx]
                .transitions
                .insert(Rc::clone(symbol), target);
        }
    }

    Dfa {
        states,
        start,
        alphabet: alphabet.to_vec().into(),
    }
}

/// Looks up (or creates) the DFA state for an ε-closed NFA state set, queuing it for
/// expansion the first time it's seen.
fn intern(
    closed: &BTreeSet<usize>,
    nfa: &Nfa,
    index: &mut HashMap<BTreeSet<usize>, usize>,
    states: &mut Vec<DfaState>,
    worklist: &mut Vec<BTreeSet<usize>>,
) -> usize {
    if let Some(&idx) = index.get(closed) {
        return idx;
    }
    let is_final = closed.iter().any(|&s| nfa.states()[s].is_final());
    let idx = states.len();
    states.push(DfaState {
        nfa_states: closed.clone(),
        is_final,
        transitions: HashMap::new(),
    });
    index.insert(closed.clone(), idx);
    worklist.push(closed.clone());
    idx
}
