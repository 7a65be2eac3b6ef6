// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Lexical pieces of the expression grammar.
//!
//! ```text
//! <call-head>  := <name> ["." <name>] &"("
//! <args>       := "(" <argument> ("," <argument>)* ")"
//! <argument>   := (<quoted> | <parens> | [^(),"]+)*
//! <quoted>     := '"' ('\"' | [^"])* '"'
//! <arith>      := <product> (("+" | "-") <product>)*
//! <product>    := <factor> (("*" | "/" | "%") <factor>)*
//! <factor>     := ("+" | "-") <factor> | <number> | "(" <arith> ")"
//! ```
//!
//! Names are maximal runs of characters that are not separators. A member
//! name may contain `::` (`Behavior::Function`).

use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, delimited, opt, peek, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_while};
use winnow::ModalResult;

// ============================================================================
// Names
// ============================================================================

const SEPARATORS: &str = " ,+-*/%.<>=&|;()#^![]{}\t\n\r";

/// Whether `c` delimits names.
pub(crate) fn is_separator(c: char) -> bool {
    SEPARATORS.contains(c)
}

/// Whether `c` can be part of a name.
pub(crate) fn is_name_char(c: char) -> bool {
    !is_separator(c) && c != '"'
}

pub(crate) fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_name_char).parse_next(input)
}

/// The callee of a call, without its argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CallHead<'i> {
    /// Object name as written (spaces encoded as `~`).
    pub receiver: Option<&'i str>,
    /// Function name, or `Behavior::Function` for behavior calls.
    pub member: &'i str,
}

/// Parse a call head; succeeds only when an argument list follows.
pub(crate) fn call_head<'i>(input: &mut &'i str) -> ModalResult<CallHead<'i>> {
    let first = name(input)?;
    let member = opt(preceded('.', name)).parse_next(input)?;
    peek('(').parse_next(input)?;
    Ok(match member {
        Some(member) => CallHead {
            receiver: Some(first),
            member,
        },
        None => CallHead {
            receiver: None,
            member: first,
        },
    })
}

/// Decode an object name written in an expression.
pub(crate) fn decode_object_name(written: &str) -> String {
    written.replace('~', " ")
}

/// Encode an object name for writing in an expression.
pub(crate) fn encode_object_name(name: &str) -> String {
    name.replace(' ', "~")
}

// ============================================================================
// Quotes and Argument Lists
// ============================================================================

/// A double-quoted literal, quotes included.
pub(crate) fn quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('"', quoted_body, '"').take().parse_next(input)
}

fn quoted_body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat(0.., alt(("\\\"", "\\", take_till(1.., ['"', '\\']))))
        .map(|()| ())
        .take()
        .parse_next(input)
}

/// Content of a quoted literal with `\"` unescaped.
pub(crate) fn unquote(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    inner.replace("\\\"", "\"")
}

/// Quote `text` as a literal, escaping inner quotes.
pub(crate) fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

fn parenthesized<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited(
        '(',
        repeat(
            0..,
            alt((quoted, parenthesized, take_till(1.., ['(', ')', '"']))),
        )
        .map(|()| ()),
        ')',
    )
    .take()
    .parse_next(input)
}

fn argument<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat(
        0..,
        alt((quoted, parenthesized, take_till(1.., ['(', ')', '"', ',']))),
    )
    .map(|()| ())
    .take()
    .parse_next(input)
}

/// Parse `(a, b, ...)` into the raw argument texts.
///
/// Commas and parentheses inside quotes or nested parentheses do not split.
/// A trailing blank argument is dropped, so `()` has no arguments.
pub(crate) fn argument_list<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    let mut arguments: Vec<&str> =
        delimited('(', separated(0.., argument, ','), ')').parse_next(input)?;
    if arguments.last().is_some_and(|last| last.trim().is_empty()) {
        arguments.pop();
    }
    Ok(arguments)
}

fn bracketed<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited(
        '[',
        repeat(0.., alt((quoted, bracketed, take_till(1.., ['[', ']', '"'])))).map(|()| ()),
        ']',
    )
    .take()
    .parse_next(input)
}

/// Parse `[...]` and return the text between the brackets.
pub(crate) fn index_accessor<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let whole = bracketed(input)?;
    Ok(&whole[1..whole.len() - 1])
}

// ============================================================================
// Arithmetic Skeleton
// ============================================================================

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., [' ', '\t', '\n', '\r'])
        .void()
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<()> {
    (
        digit1,
        opt(('.', digit0)),
        opt(('e', opt('-'), digit1)),
    )
        .void()
        .parse_next(input)
}

fn factor(input: &mut &str) -> ModalResult<()> {
    ws(input)?;
    alt((
        preceded(one_of(['+', '-']), factor),
        number,
        delimited('(', arithmetic, (ws, ')')),
    ))
    .parse_next(input)
}

fn product(input: &mut &str) -> ModalResult<()> {
    factor(input)?;
    repeat(0.., (ws, one_of(['*', '/', '%']), factor))
        .map(|()| ())
        .parse_next(input)
}

fn arithmetic(input: &mut &str) -> ModalResult<()> {
    product(input)?;
    repeat(0.., (ws, one_of(['+', '-']), product))
        .map(|()| ())
        .parse_next(input)
}

/// Check that `text` is well-formed arithmetic over numbers.
///
/// On failure returns a message and the byte position it refers to.
pub(crate) fn check_arithmetic(text: &str) -> Result<(), (&'static str, usize)> {
    if text.trim().is_empty() {
        return Err(("empty math expression", 0));
    }
    let mut input = text;
    let parsed = (arithmetic, ws).parse_next(&mut input);
    let position = text.len() - input.len();
    match parsed {
        Ok(_) if input.is_empty() => Ok(()),
        Ok(_) => Err(("unexpected symbol in math expression", position)),
        Err(_) => Err(("invalid math expression", position)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod heads {
        use super::*;

        #[test]
        fn static_and_object_heads() {
            let mut input = "Random(10)";
            let head = call_head(&mut input).unwrap();
            assert_eq!(head.receiver, None);
            assert_eq!(head.member, "Random");
            assert_eq!(input, "(10)");

            let mut input = "My~Player.Physics::Speed()";
            let head = call_head(&mut input).unwrap();
            assert_eq!(head.receiver, Some("My~Player"));
            assert_eq!(head.member, "Physics::Speed");
        }

        #[test]
        fn decimal_is_not_a_call() {
            let mut input = "1.5 + 2";
            assert!(call_head(&mut input).is_err());
        }

        #[test]
        fn object_name_encoding() {
            assert_eq!(decode_object_name("My~Player"), "My Player");
            assert_eq!(encode_object_name("My Player"), "My~Player");
        }
    }

    mod arguments {
        use super::*;

        #[test]
        fn splits_on_top_level_commas() {
            let mut input = "(1, Max(2, 3), \"a,b\")+1";
            let args = argument_list(&mut input).unwrap();
            assert_eq!(args, ["1", " Max(2, 3)", " \"a,b\""]);
            assert_eq!(input, "+1");
        }

        #[test]
        fn quotes_hide_parentheses() {
            let mut input = "(\")\", \"\\\"(\")";
            let args = argument_list(&mut input).unwrap();
            assert_eq!(args, ["\")\"", " \"\\\"(\""]);
        }

        #[test]
        fn trailing_blank_argument_is_dropped() {
            let mut input = "()";
            assert!(argument_list(&mut input).unwrap().is_empty());
            let mut input = "(a, )";
            assert_eq!(argument_list(&mut input).unwrap(), ["a"]);
            let mut input = "(, a)";
            assert_eq!(argument_list(&mut input).unwrap(), ["", " a"]);
        }

        #[test]
        fn unclosed_list_fails() {
            let mut input = "(1, 2";
            assert!(argument_list(&mut input).is_err());
            let mut input = "(\"1)";
            assert!(argument_list(&mut input).is_err());
        }

        #[test]
        fn index_accessor_nests() {
            let mut input = "[a[\"]\"]].b";
            assert_eq!(index_accessor(&mut input).unwrap(), "a[\"]\"]");
            assert_eq!(input, ".b");
        }
    }

    mod literals {
        use super::*;

        #[test]
        fn escaped_quotes() {
            let mut input = "\"say \\\"hi\\\"\" + x";
            let literal = quoted(&mut input).unwrap();
            assert_eq!(unquote(literal), "say \"hi\"");
            assert_eq!(quote("say \"hi\""), literal);
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn accepts_well_formed() {
            for text in ["1", "1 + 2*3", "-(1.5e-3 % 2)", "2*-3", " ( 0 ) ", "1.", "--2"] {
                assert!(check_arithmetic(text).is_ok(), "{text}");
            }
        }

        #[test]
        fn rejects_malformed() {
            for text in ["", "  ", "1 +", "(1", "1)", "()", "2 3", "x", "1 + foo", ".5", "1 ** 2"] {
                assert!(check_arithmetic(text).is_err(), "{text}");
            }
        }

        #[test]
        fn reports_position_of_trailing_garbage() {
            assert_eq!(
                check_arithmetic("1 + 2 x"),
                Err(("unexpected symbol in math expression", 6))
            );
        }
    }
}
