//! # LALR(1) table builder
//!
//! Merges the LR(1) canonical collection ([crate::lr1]) by kernel equivalence into the
//! (smaller) LALR(1) collection, fills ACTION/GOTO, and records conflicts rather than
//! failing the build. See [Conflict] for the diagnostic message format.
//!
//! Conflict resolution is **first-writer-wins**: whichever action reaches a cell first is
//! kept, and every later attempt to overwrite it is recorded as a [Conflict] instead. This
//! is deliberately permissive — it lets a caller inspect every ambiguity in one pass rather
//! than aborting at the first one.

use crate::first::FirstSets;
use crate::grammar::{Grammar, Production, Symbol, SymbolKind};
use crate::lr1::{self, Automaton, ItemSet, Kernel};
use std::collections::HashMap;
use std::fmt;

/// An entry of the ACTION table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// A shift/reduce or reduce/reduce conflict recorded while filling a cell that already had
/// an entry. `Display` renders exactly the message format from the diagnostic surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Conflict {
    ShiftReduce {
        state: usize,
        symbol: Symbol,
        shift_to: usize,
        reduce: usize,
    },
    ReduceReduce {
        state: usize,
        symbol: Symbol,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::ShiftReduce {
                state,
                symbol,
                shift_to,
                reduce,
            } => write!(
                f,
                "Shift/Reduce conflict in state {state} on {symbol}: SHIFT {shift_to} vs REDUCE {reduce}"
            ),
            Conflict::ReduceReduce {
                state,
                symbol,
                first,
                second,
            } => write!(
                f,
                "Reduce/Reduce conflict in state {state} on {symbol}: REDUCE {first} vs REDUCE {second}"
            ),
        }
    }
}

/// The built LALR(1) table: ACTION, GOTO, the initial state, and any conflicts encountered.
/// Immutable once returned by [LalrTable::build].
pub struct LalrTable {
    action: HashMap<(usize, Symbol), Action>,
    goto: HashMap<(usize, Symbol), usize>,
    initial: usize,
    conflicts: Vec<Conflict>,
    state_count: usize,
    lr1_state_count: usize,
}

impl LalrTable {
    pub fn build(grammar: &Grammar) -> Self {
        let first = FirstSets::compute(grammar);
        let automaton = Automaton::build(grammar, &first);
        Self::from_automaton(automaton)
    }

    fn from_automaton(automaton: Automaton) -> Self {
        let Automaton {
            augmented_start,
            productions,
            states,
            transitions,
            initial,
        } = automaton;
        let lr1_state_count = states.len();

        let (state_to_merged, merged_items) = merge_by_kernel(&states);
        let merged_count = merged_items.len();

        let mut merged_transitions: Vec<HashMap<Symbol, usize>> =
            vec![HashMap::new(); merged_count];
        for (from, trans) in transitions.iter().enumerate() {
            let merged_from = state_to_merged[from];
            for (symbol, &to) in trans {
                merged_transitions[merged_from].insert(symbol.clone(), state_to_merged[to]);
            }
        }

        let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
        let mut goto: HashMap<(usize, Symbol), usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (state_idx, trans) in merged_transitions.iter().enumerate() {
            for (symbol, &target) in trans {
                match symbol.kind {
                    SymbolKind::NonTerminal => {
                        goto.insert((state_idx, symbol.clone()), target);
                    }
                    SymbolKind::Terminal => {
                        set_action(
                            &mut action,
                            &mut conflicts,
                            state_idx,
                            symbol.clone(),
                            Action::Shift(target),
                        );
                    }
                }
            }
        }

        for (state_idx, item_set) in merged_items.iter().enumerate() {
            for item in item_set {
                let production = &productions[item.production];
                if item.dot != production.right.len() {
                    continue;
                }
                if production.left == augmented_start {
                    if item.lookahead == Symbol::end_marker() {
                        set_action(
                            &mut action,
                            &mut conflicts,
                            state_idx,
                            Symbol::end_marker(),
                            Action::Accept,
                        );
                    }
                    // Other lookaheads on the augmenting production are ignored, per design.
                } else {
                    set_action(
                        &mut action,
                        &mut conflicts,
                        state_idx,
                        item.lookahead.clone(),
                        Action::Reduce(item.production),
                    );
                }
            }
        }

        Self {
            action,
            goto,
            initial: state_to_merged[initial],
            conflicts,
            state_count: merged_count,
            lr1_state_count,
        }
    }

    pub fn action(&self, state: usize, symbol: &Symbol) -> Option<&Action> {
        self.action.get(&(state, symbol.clone()))
    }

    pub fn goto(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.goto.get(&(state, symbol.clone())).copied()
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn lr1_state_count(&self) -> usize {
        self.lr1_state_count
    }

    /// Terminals for which ACTION is defined in `state` — the "expected" set the parsing
    /// driver reports on a syntax error.
    pub fn expected_terminals(&self, state: usize) -> Vec<Symbol> {
        self.action
            .keys()
            .filter(|(s, _)| *s == state)
            .map(|(_, symbol)| symbol.clone())
            .collect()
    }
}

fn merge_by_kernel(states: &[ItemSet]) -> (Vec<usize>, Vec<ItemSet>) {
    let mut merged_index: HashMap<Kernel, usize> = HashMap::new();
    let mut merged_items: Vec<ItemSet> = Vec::new();
    let mut state_to_merged = vec![0usize; states.len()];

    for (i, state) in states.iter().enumerate() {
        let k = lr1::kernel(state);
        let merged_idx = *merged_index.entry(k).or_insert_with(|| {
            merged_items.push(ItemSet::new());
            merged_items.len() - 1
        });
        state_to_merged[i] = merged_idx;
        for item in state {
            merged_items[merged_idx].insert(item.clone());
        }
    }

    (state_to_merged, merged_items)
}

fn set_action(
    action: &mut HashMap<(usize, Symbol), Action>,
    conflicts: &mut Vec<Conflict>,
    state: usize,
    symbol: Symbol,
    new_action: Action,
) {
    match action.get(&(state, symbol.clone())) {
        None => {
            action.insert((state, symbol), new_action);
        }
        Some(existing) if *existing == new_action => {
            // identical entry, no-op
        }
        Some(existing) => {
            let conflict = match (existing, &new_action) {
                (Action::Shift(shift_to), Action::Reduce(reduce)) => Conflict::ShiftReduce {
                    state,
                    symbol,
                    shift_to: *shift_to,
                    reduce: *reduce,
                },
                (Action::Reduce(reduce), Action::Shift(shift_to)) => Conflict::ShiftReduce {
                    state,
                    symbol,
                    shift_to: *shift_to,
                    reduce: *reduce,
                },
                (Action::Reduce(first), Action::Reduce(second)) => Conflict::ReduceReduce {
                    state,
                    symbol,
                    first: *first,
                    second: *second,
                },
                _ => return,
            };
            // First-writer-wins: the existing entry is retained, the conflict is recorded.
            conflicts.push(conflict);
        }
    }
}
