//! # LR(1) automaton
//!
//! Builds the canonical collection of LR(1) item sets for a grammar: augmentation with a
//! fresh start symbol, CLOSURE, GOTO, and the worklist-driven construction of all reachable
//! states. This is the most expensive stage of table construction, since CLOSURE is a
//! per-state fixed point and GOTO is computed for every symbol of every state.
//!
//! Item sets double as the hash keys that determine state identity, so [Item] derives a
//! total order; a [BTreeSet] of items is therefore already in canonical form and can be used
//! directly as a `HashMap` key.

use crate::first::FirstSets;
use crate::grammar::{Grammar, Production, Symbol, SymbolKind};
use std::collections::{BTreeSet, HashMap};

/// `[production -> · right, lookahead]`. `production` indexes into [Automaton::productions]
/// (the grammar's productions plus the synthesized augmenting production).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: usize,
    pub dot: usize,
    pub lookahead: Symbol,
}

/// A closed LR(1) item set. Two states are the same state iff their item sets are equal.
pub type ItemSet = BTreeSet<Item>;

/// An item set stripped of lookaheads, used only to decide which LR(1) states merge into
/// the same LALR(1) state.
pub type Kernel = BTreeSet<(usize, usize)>;

pub fn kernel(items: &ItemSet) -> Kernel {
    items.iter().map(|item| (item.production, item.dot)).collect()
}

/// The canonical collection: every reachable LR(1) state plus the transitions between them.
pub struct Automaton {
    /// The synthesized `S'` symbol, `original_start` with `'` appended.
    pub augmented_start: Symbol,
    /// The grammar's productions followed by the single augmenting production `S' -> S`,
    /// at index `productions.len() - 1`.
    pub productions: Vec<Production>,
    pub states: Vec<ItemSet>,
    pub transitions: Vec<HashMap<Symbol, usize>>,
    pub initial: usize,
}

impl Automaton {
    pub fn augmented_index(&self) -> usize {
        self.productions.len() - 1
    }

    pub fn build(grammar: &Grammar, first: &FirstSets) -> Self {
        let augmented_start = Symbol::non_terminal(format!("{}'", grammar.start().name));
        let mut productions: Vec<Production> = grammar.productions().to_vec();
        let augmented_index = productions.len();
        productions.push(Production::new(
            augmented_start.clone(),
            vec![grammar.start().clone()],
        ));

        let closure = |seed: ItemSet| -> ItemSet {
            let mut items = seed.clone();
            let mut worklist: Vec<Item> = seed.into_iter().collect();
            while let Some(item) = worklist.pop() {
                let production = &productions[item.production];
                if item.dot >= production.right.len() {
                    continue;
                }
                let after_dot = &production.right[item.dot];
                if after_dot.kind != SymbolKind::NonTerminal {
                    continue;
                }

                let mut beta_a = production.right[item.dot + 1..].to_vec();
                beta_a.push(item.lookahead.clone());
                let lookaheads = first.of_sequence(&beta_a);

                for (prod_idx, candidate) in productions.iter().enumerate() {
                    if candidate.left != *after_dot {
                        continue;
                    }
                    for lookahead in lookaheads.iter().filter(|s| **s != Symbol::epsilon()) {
                        let new_item = Item {
                            production: prod_idx,
                            dot: 0,
                            lookahead: lookahead.clone(),
                        };
                        if items.insert(new_item.clone()) {
                            worklist.push(new_item);
                        }
                    }
                }
            }
            items
        };

        let goto = |state: &ItemSet, symbol: &Symbol| -> ItemSet {
            let shifted: ItemSet = state
                .iter()
                .filter_map(|item| {
                    let production = &productions[item.production];
                    (item.dot < production.right.len() && production.right[item.dot] == *symbol)
                        .then(|| Item {
                            production: item.production,
                            dot: item.dot + 1,
                            lookahead: item.lookahead.clone(),
                        })
                })
                .collect();
            closure(shifted)
        };

        let initial_item = Item {
            production: augmented_index,
            dot: 0,
            lookahead: Symbol::end_marker(),
        };
        let initial_state = closure(ItemSet::from([initial_item]));

        let mut states = vec![initial_state.clone()];
        let mut transitions: Vec<HashMap<Symbol, usize>> = vec![HashMap::new()];
        let mut index_of: HashMap<ItemSet, usize> = HashMap::from([(initial_state, 0)]);
        let mut worklist = vec![0usize];

        while let Some(state_idx) = worklist.pop() {
            let symbols_after_dot: BTreeSet<Symbol> = states[state_idx]
                .iter()
                .filter_map(|item| {
                    let production = &productions[item.production];
                    (item.dot < production.right.len())
                        .then(|| production.right[item.dot].clone())
                })
                .collect();

            for symbol in symbols_after_dot {
                let target_set = goto(&states[state_idx], &symbol);
                if target_set.is_empty() {
                    continue;
                }
                let target_idx = match index_of.get(&target_set) {
                    Some(&idx) => idx,
                    None => {
                        let idx = states.len();
                        index_of.insert(target_set.clone(), idx);
                        states.push(target_set);
                        transitions.push(HashMap::new());
                        worklist.push(idx);
                        idx
                    }
                };
                transitions[state_idx].insert(symbol, target_idx);
            }
        }

        Self {
            augmented_start,
            productions,
            states,
            transitions,
            initial: 0,
        }
    }
}
