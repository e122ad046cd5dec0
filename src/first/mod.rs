//! # FIRST-set engine
//!
//! Computes FIRST(X) for every grammar symbol X by the standard fixed-point iteration, and
//! answers FIRST-of-a-sequence queries used by [CLOSURE](crate::lr1) to compute lookaheads.
//!
//! ε participates in the arithmetic here (a symbol or sequence that can derive the empty
//! string has ε in its FIRST set) but the engine never lets ε escape into a lookahead set —
//! callers that need "FIRST minus ε" filter it themselves, since that is the shape CLOSURE
//! needs it in.

use crate::grammar::{Grammar, Symbol};
use std::collections::{HashMap, HashSet};

/// A precomputed FIRST table for every terminal and non-terminal of a [Grammar].
#[derive(Clone, Debug)]
pub struct FirstSets {
    table: HashMap<Symbol, HashSet<Symbol>>,
}

impl FirstSets {
    /// Runs the fixed-point computation described in the module docs. Terminates because
    /// each iteration either adds at least one symbol to some FIRST set or leaves every set
    /// unchanged, and the sets are bounded by the (finite) symbol alphabet.
    pub fn compute(grammar: &Grammar) -> Self {
        let epsilon = Symbol::epsilon();
        let mut table: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();

        for terminal in grammar.terminals() {
            table.insert(terminal.clone(), HashSet::from([terminal.clone()]));
        }
        for non_terminal in grammar.non_terminals() {
            table.entry(non_terminal.clone()).or_default();
        }

        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let rhs: Vec<&Symbol> = production
                    .right
                    .iter()
                    .filter(|s| **s != epsilon)
                    .collect();

                let mut addition = HashSet::new();
                let mut nullable = true;
                for symbol in &rhs {
                    let symbol_first = table
                        .get(*symbol)
                        .cloned()
                        .unwrap_or_else(|| HashSet::from([(*symbol).clone()]));
                    addition.extend(symbol_first.iter().filter(|s| **s != epsilon).cloned());
                    if !symbol_first.contains(&epsilon) {
                        nullable = false;
                        break;
                    }
                }
                if rhs.is_empty() || nullable {
                    addition.insert(epsilon.clone());
                }

                let entry = table.entry(production.left.clone()).or_default();
                let before = entry.len();
                entry.extend(addition);
                if entry.len() != before {
                    changed = true;
                }
            }
        }

        Self { table }
    }

    /// FIRST(X). Symbols outside the precomputed table (external terminals such as `$`
    /// that never appear on a grammar's left-hand side) are treated as terminals whose
    /// FIRST is themselves.
    pub fn of(&self, symbol: &Symbol) -> HashSet<Symbol> {
        self.table
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| HashSet::from([symbol.clone()]))
    }

    /// FIRST of a sequence of symbols, walking left to right and stopping at the first
    /// non-nullable symbol. An empty sequence yields `{ε}`. A symbol absent from the table
    /// terminates the walk without contributing ε, per [crate::first].
    pub fn of_sequence(&self, sequence: &[Symbol]) -> HashSet<Symbol> {
        let epsilon = Symbol::epsilon();
        if sequence.is_empty() {
            return HashSet::from([epsilon]);
        }

        let mut result = HashSet::new();
        for symbol in sequence {
            if *symbol == epsilon {
                continue;
            }
            match self.table.get(symbol) {
                Some(symbol_first) => {
                    result.extend(symbol_first.iter().filter(|s| **s != epsilon).cloned());
                    if !symbol_first.contains(&epsilon) {
                        return result;
                    }
                }
                None => {
                    result.insert(symbol.clone());
                    return result;
                }
            }
        }
        result.insert(epsilon);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;
    use std::collections::HashSet as Set;

    fn nt(name: &str) -> Symbol {
        Symbol::non_terminal(name)
    }

    fn t(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    // S -> S + T | T
    // T -> T * F | F
    // F -> ( S ) | id
    fn arithmetic_grammar() -> Grammar {
        let (s, t_, f) = (nt("S"), nt("T"), nt("F"));
        let (plus, star, lparen, rparen, id) = (t("+"), t("*"), t("("), t(")"), t("id"));
        Grammar::new(
            vec![
                Production::new(s.clone(), vec![s.clone(), plus.clone(), t_.clone()]),
                Production::new(s.clone(), vec![t_.clone()]),
                Production::new(t_.clone(), vec![t_.clone(), star.clone(), f.clone()]),
                Production::new(t_.clone(), vec![f.clone()]),
                Production::new(f.clone(), vec![lparen.clone(), s.clone(), rparen.clone()]),
                Production::new(f.clone(), vec![id.clone()]),
            ],
            s.clone(),
            Set::from([plus, star, lparen, rparen, id.clone()]),
            Set::from([s, t_, f]),
        )
        .unwrap()
    }

    #[test]
    fn first_of_every_non_terminal_is_the_leaf_terminals() {
        let grammar = arithmetic_grammar();
        let first = FirstSets::compute(&grammar);
        let expected = Set::from([t("("), t("id")]);
        assert_eq!(first.of(&nt("S")), expected);
        assert_eq!(first.of(&nt("T")), expected);
        assert_eq!(first.of(&nt("F")), expected);
    }

    #[test]
    fn nullable_chain_propagates_epsilon() {
        // A -> B C, B -> ε, C -> ε | c
        let (a, b, c) = (nt("A"), nt("B"), nt("C"));
        let grammar = Grammar::new(
            vec![
                Production::new(a.clone(), vec![b.clone(), c.clone()]),
                Production::new(b.clone(), vec![]),
                Production::new(c.clone(), vec![]),
                Production::new(c.clone(), vec![t("c")]),
            ],
            a.clone(),
            Set::from([t("c")]),
            Set::from([a.clone(), b, c]),
        )
        .unwrap();
        let first = FirstSets::compute(&grammar);
        assert_eq!(first.of(&a), Set::from([t("c"), Symbol::epsilon()]));
    }

    #[test]
    fn of_sequence_stops_at_first_non_nullable_symbol() {
        let grammar = arithmetic_grammar();
        let first = FirstSets::compute(&grammar);
        // FIRST(T $) should not include ε, since T is never nullable here.
        let seq = vec![nt("T"), Symbol::end_marker()];
        let result = first.of_sequence(&seq);
        assert_eq!(result, Set::from([t("("), t("id")]));
    }

    #[test]
    fn of_sequence_of_external_terminal_is_itself() {
        let grammar = arithmetic_grammar();
        let first = FirstSets::compute(&grammar);
        let result = first.of_sequence(&[Symbol::end_marker()]);
        assert_eq!(result, Set::from([Symbol::end_marker()]));
    }

    #[test]
    fn of_sequence_of_empty_is_epsilon() {
        let grammar = arithmetic_grammar();
        let first = FirstSets::compute(&grammar);
        assert_eq!(first.of_sequence(&[]), Set::from([Symbol::epsilon()]));
    }
}
