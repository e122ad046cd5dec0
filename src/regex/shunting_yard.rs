//! Tokenization, explicit-concatenation insertion, and infix-to-postfix conversion — the
//! three passes that turn a regex source string into postfix, kept as free functions since
//! none of them need state beyond their own input.

use super::{RegexError, RegexToken};
use std::rc::Rc;
use unicode_segmentation::UnicodeSegmentation;

/// Splits a regex source string into tokens, one per extended grapheme cluster. Every
/// grapheme that isn't one of the seven reserved metacharacters becomes an operand.
pub fn tokenize(source: &str) -> Vec<RegexToken> {
    source
        .graphemes(true)
        .map(|g| match g {
            "|" => RegexToken::Union,
            "*" => RegexToken::Star,
            "?" => RegexToken::Question,
            "+" => RegexToken::Plus,
            "(" => RegexToken::LParen,
            ")" => RegexToken::RParen,
            "\u{00b7}" => RegexToken::Concat,
            other => RegexToken::Operand(Rc::from(other)),
        })
        .collect()
}

fn can_end_operand(tok: &RegexToken) -> bool {
    matches!(
        tok,
        RegexToken::Operand(_) | RegexToken::RParen | RegexToken::Star | RegexToken::Plus | RegexToken::Question
    )
}

fn can_start_operand(tok: &RegexToken) -> bool {
    matches!(tok, RegexToken::Operand(_) | RegexToken::LParen)
}

/// Inserts the explicit concatenation marker between adjacent tokens `c1, c2` exactly when
/// `c1` can end an operand-like construct and `c2` can start one. Idempotent: running this
/// on an already-explicit token stream inserts nothing new.
pub fn insert_concatenation(tokens: Vec<RegexToken>) -> Vec<RegexToken> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut iter = tokens.into_iter().peekable();
    while let Some(tok) = iter.next() {
        let needs_concat = iter
            .peek()
            .is_some_and(|next| can_end_operand(&tok) && can_start_operand(next));
        out.push(tok);
        if needs_concat {
            out.push(RegexToken::Concat);
        }
    }
    out
}

fn precedence(tok: &RegexToken) -> u8 {
    match tok {
        RegexToken::Union => 1,
        RegexToken::Concat => 2,
        RegexToken::Star | RegexToken::Plus | RegexToken::Question => 3,
        _ => 0,
    }
}

fn is_operator(tok: &RegexToken) -> bool {
    matches!(
        tok,
        RegexToken::Union | RegexToken::Concat | RegexToken::Star | RegexToken::Plus | RegexToken::Question
    )
}

/// Standard shunting-yard, all operators left-associative (`>=` precedence comparison).
pub fn infix_to_postfix(tokens: Vec<RegexToken>) -> Result<Vec<RegexToken>, RegexError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<RegexToken> = Vec::new();

    for tok in tokens {
        match tok {
            RegexToken::Operand(_) => output.push(tok),
            RegexToken::LParen => operators.push(tok),
            RegexToken::RParen => loop {
                match operators.pop() {
                    Some(RegexToken::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(RegexError::MismatchedParenthesis),
                }
            },
            ref op if is_operator(op) => {
                while let Some(top) = operators.last() {
                    if matches!(top, RegexToken::LParen) || precedence(top) < precedence(op) {
                        break;
                    }
                    output.push(operators.pop().unwrap());
                }
                operators.push(tok);
            }
            _ => unreachable!("every RegexToken variant is handled above"),
        }
    }

    while let Some(op) = operators.pop() {
        if matches!(op, RegexToken::LParen) {
            return Err(RegexError::MismatchedParenthesis);
        }
        output.push(op);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operand(s: &str) -> RegexToken {
        RegexToken::Operand(Rc::from(s))
    }

    #[test]
    fn inserts_concatenation_between_two_operands() {
        let tokens = tokenize("ab");
        let explicit = insert_concatenation(tokens);
        assert_eq!(explicit, vec![operand("a"), RegexToken::Concat, operand("b")]);
    }

    #[test]
    fn does_not_insert_concatenation_before_alternation() {
        let tokens = tokenize("a|b");
        let explicit = insert_concatenation(tokens);
        assert_eq!(explicit, vec![operand("a"), RegexToken::Union, operand("b")]);
    }

    #[test]
    fn inserting_concatenation_is_idempotent() {
        let once = insert_concatenation(tokenize("a(b|c)*"));
        let twice = insert_concatenation(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn star_then_operand_gets_a_concatenation() {
        let tokens = tokenize("a*b");
        let explicit = insert_concatenation(tokens);
        assert_eq!(
            explicit,
            vec![operand("a"), RegexToken::Star, RegexToken::Concat, operand("b")]
        );
    }

    #[test]
    fn postfix_of_alternation_with_explicit_concat() {
        // a|b·c -> abc·|
        let tokens = vec![
            operand("a"),
            RegexToken::Union,
            operand("b"),
            RegexToken::Concat,
            operand("c"),
        ];
        let postfix = infix_to_postfix(tokens).unwrap();
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

    #[test]
    fn unmatched_close_paren_is_an_error() {
        let tokens = vec![operand("a"), RegexToken::RParen];
        assert_eq!(
            infix_to_postfix(tokens).unwrap_err(),
            RegexError::MismatchedParenthesis
        );
    }

    #[test]
    fn unmatched_open_paren_is_an_error() {
        let tokens = vec![RegexToken::LParen, operand("a")];
        assert_eq!(
            infix_to_postfix(tokens).unwrap_err(),
            RegexError::MismatchedParenthesis
        );
    }

    #[test]
    fn full_pipeline_on_kleene_star_of_alternation() {
        let tokens = tokenize("a(b|c)*");
        let explicit = insert_concatenation(tokens);
        let postfix = infix_to_postfix(explicit).unwrap();
        assert_eq!(
            postfix,
            vec![
                operand("a"),
                operand("b"),
                operand("c"),
                RegexToken::Union,
                RegexToken::Star,
                RegexToken::Concat,
            ]
        );
    }
}
