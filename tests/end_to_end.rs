//! Integration tests exercising full pipelines: regex source to DFA acceptance, and grammar
//! definition to a driven parse, including the conflict diagnostics a grammar author needs to
//! see when a grammar isn't LALR(1).

use langtables::grammar::{Grammar, Production, Symbol};
use langtables::lalr::{Action, Conflict, LalrTable};
use langtables::parse::{parse, ParseError, Token};
use langtables::regex::Regex;
use std::collections::HashSet;
use std::rc::Rc;

fn alphabet(symbols: &[&str]) -> Vec<Rc<str>> {
    symbols.iter().map(|s| Rc::from(*s)).collect()
}

#[test]
fn regex_a_optional_b_plus_end_to_end() {
    let regex = Regex::parse("a?b+").unwrap();
    let nfa = regex.to_nfa().unwrap();
    let dfa = nfa.to_dfa(&alphabet(&["a", "b"]));

    assert!(dfa.accepts(&["b"]));
    assert!(dfa.accepts(&["a", "b"]));
    assert!(dfa.accepts(&["b", "b", "b"]));
    assert!(!dfa.accepts(&[]));
    assert!(!dfa.accepts(&["a"]));
    assert!(!dfa.accepts(&["b", "a"]));
}

fn nt(name: &str) -> Symbol {
    Symbol::non_terminal(name)
}

fn t(name: &str) -> Symbol {
    Symbol::terminal(name)
}

fn arithmetic_grammar() -> Grammar {
    let (s, tt, f) = (nt("S"), nt("T"), nt("F"));
    Grammar::new(
        vec![
            Production::new(s.clone(), vec![s.clone(), t("+"), tt.clone()]),
            Production::new(s.clone(), vec![tt.clone()]),
            Production::new(tt.clone(), vec![tt.clone(), t("*"), f.clone()]),
            Production::new(tt.clone(), vec![f.clone()]),
            Production::new(f.clone(), vec![t("("), s.clone(), t(")")]),
            Production::new(f.clone(), vec![t("id")]),
        ],
        s.clone(),
        HashSet::from([t("+"), t("*"), t("("), t(")"), t("id")]),
        HashSet::from([s, tt, f]),
    )
    .unwrap()
}

fn tokens(kinds: &[&str]) -> Vec<Token> {
    kinds.iter().map(|k| Token::new(*k, *k)).collect()
}

#[test]
fn arithmetic_grammar_has_no_conflicts_and_parses_nested_expressions() {
    let grammar = arithmetic_grammar();
    let table = LalrTable::build(&grammar);
    assert!(table.conflicts().is_empty());

    assert!(parse(&grammar, &table, &tokens(&["id", "+", "id", "*", "id"])).is_ok());
    assert!(parse(
        &grammar,
        &table,
        &tokens(&["(", "id", "+", "id", ")", "*", "id"])
    )
    .is_ok());

    let err = parse(&grammar, &table, &tokens(&["id", "+"])).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

/// `S -> if E then S | if E then S else S | other` — the canonical dangling-else
/// shift/reduce conflict: on seeing `else` after `if E then S`, the table must shift
/// (binding `else` to the nearest `if`) rather than reduce.
#[test]
fn dangling_else_grammar_reports_exactly_one_shift_reduce_conflict() {
    let s = nt("S");
    let e = nt("E");
    let grammar = Grammar::new(
        vec![
            Production::new(s.clone(), vec![t("if"), e.clone(), t("then"), s.clone()]),
            Production::new(
                s.clone(),
                vec![t("if"), e.clone(), t("then"), s.clone(), t("else"), s.clone()],
            ),
            Production::new(s.clone(), vec![t("other")]),
            Production::new(e.clone(), vec![t("true")]),
        ],
        s.clone(),
        HashSet::from([t("if"), t("then"), t("else"), t("true"), t("other")]),
        HashSet::from([s, e]),
    )
    .unwrap();

    let table = LalrTable::build(&grammar);
    let shift_reduce = table
        .conflicts()
        .iter()
        .filter(|c| matches!(c, Conflict::ShiftReduce { .. }))
        .count();
    assert_eq!(shift_reduce, 1);

    let result = parse(
        &grammar,
        &table,
        &tokens(&["if", "true", "then", "if", "true", "then", "other", "else", "other"]),
    );
    assert!(result.is_ok(), "dangling else should resolve by shifting: {result:?}");
}

/// Two productions both reducible after the same prefix with overlapping lookaheads.
#[test]
fn ambiguous_grammar_reports_a_reduce_reduce_conflict() {
    let s = nt("S");
    let a = nt("A");
    let b = nt("B");
    let grammar = Grammar::new(
        vec![
            Production::new(s.clone(), vec![a.clone()]),
            Production::new(s.clone(), vec![b.clone()]),
            Production::new(a.clone(), vec![t("id")]),
            Production::new(b.clone(), vec![t("id")]),
        ],
        s.clone(),
        HashSet::from([t("id")]),
        HashSet::from([s, a, b]),
    )
    .unwrap();

    let table = LalrTable::build(&grammar);
    assert!(table
        .conflicts()
        .iter()
        .any(|c| matches!(c, Conflict::ReduceReduce { .. })));
}

#[test]
fn action_display_matches_the_documented_diagnostic_format() {
    let s = nt("S");
    let a = nt("A");
    let b = nt("B");
    let grammar = Grammar::new(
        vec![
            Production::new(s.clone(), vec![a.clone()]),
            Production::new(s.clone(), vec![b.clone()]),
            Production::new(a.clone(), vec![t("id")]),
            Production::new(b.clone(), vec![t("id")]),
        ],
        s.clone(),
        HashSet::from([t("id")]),
        HashSet::from([s, a, b]),
    )
    .unwrap();
    let table = LalrTable::build(&grammar);
    let conflict = table
        .conflicts()
        .iter()
        .find(|c| matches!(c, Conflict::ReduceReduce { .. }))
        .unwrap();
    let text = conflict.to_string();
    assert!(text.contains("Reduce/Reduce conflict in state"));
}

#[test]
fn postfix_worked_example_a_or_b_concat_c() {
    use langtables::regex::{infix_to_postfix, RegexToken};

    // a|b·c -> abc·|
    let operand = |s: &str| RegexToken::Operand(Rc::from(s));
    let infix = vec![
        operand("a"),
        RegexToken::Union,
        operand("b"),
        RegexToken::Concat,
        operand("c"),
    ];
    let postfix = infix_to_postfix(infix).unwrap();
    assert_eq!(
        postfix,
        vec![
            operand("a"),
            operand("b"),
            operand("c"),
            RegexToken::Concat,
            RegexToken::Union,
        ]
    );
}
