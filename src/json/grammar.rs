//! Grammar Engine - Top-Down JSON Matcher
//!
//! This module recognizes JSON documents and reports what it is doing to a [`Control`]
//! implementation, which is where values actually get built. The engine itself produces
//! nothing but notifications:
//!
//! - `enter(rule, offset)` when a rule is attempted at `offset`
//! - `success(rule, matched)` when it matched, with the exact text consumed
//! - `failure(rule)` when it did not, after which the engine backtracks
//!
//! Notifications are strictly nested: every `enter` is closed by exactly one `success` or
//! `failure`, innermost first. A `success` handler may reject the match (a number that
//! does not fit a float, an escape that does not decode); the engine then stops and closes
//! every still-open rule with `failure` on the way out.
//!
//! The grammar follows RFC 8259:
//!
//! ```text
//! text      = ws value ws EOF
//! value     = string / number / object / array / false / null / true
//! object    = '{' ws ( '}' / member ws ( ',' ws member ws )* '}' )
//! member    = key ws ':' ws value
//! array     = '[' ws ( ']' / value ws ( ',' ws value ws )* ']' )
//! string    = '"' ( unescaped / escaped-char / unicode )* '"'
//! ```
//!
//! A separator commits: once a `,` matched, the following member or element is required
//! and its absence fails the whole container.

pub mod tokens;

use logos::Logos;

use crate::json::config::ParseOptions;
use crate::json::error::ParseError;
use tokens::Fragment;

/// Every rule the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The whole document, including surrounding whitespace
    Text,
    Value,
    Object,
    /// `key : value` inside an object
    Member,
    /// The quoted name of a member
    Key,
    /// `:`
    NameSeparator,
    Array,
    /// `,` between elements or members
    ValueSeparator,
    String,
    /// A run of string characters that need no decoding
    Unescaped,
    /// A two-character escape such as `\n`
    EscapedChar,
    /// A run of `\uXXXX` escapes
    Unicode,
    Number,
    Null,
    True,
    False,
}

/// Receiver of rule notifications.
pub trait Control {
    /// `rule` is being attempted at byte `position`.
    fn enter(&mut self, rule: Rule, position: usize);

    /// `rule` matched exactly `matched`. Returning an error aborts the parse.
    fn success(&mut self, rule: Rule, matched: &str) -> Result<(), ParseError>;

    /// `rule` did not match; anything it started must be dropped.
    fn failure(&mut self, rule: Rule);
}

/// Run the grammar over `source`, reporting to `control`.
///
/// Returns `Ok(())` once the whole input matched as one document.
pub fn drive<C: Control>(
    source: &str,
    control: &mut C,
    options: &ParseOptions,
) -> Result<(), ParseError> {
    let mut matcher = Matcher {
        source,
        pos: 0,
        furthest: 0,
        depth: 0,
        max_depth: options.max_depth,
        control,
    };
    if matcher.text()? {
        Ok(())
    } else {
        Err(matcher.mismatch())
    }
}

/// `Ok(true)` matched, `Ok(false)` did not match, `Err` aborts.
type Outcome = Result<bool, ParseError>;

struct Matcher<'s, 'c, C: Control> {
    source: &'s str,
    pos: usize,
    /// Furthest offset at which a primitive match failed; where mismatches are reported
    furthest: usize,
    depth: usize,
    max_depth: Option<usize>,
    control: &'c mut C,
}

impl<'s, 'c, C: Control> Matcher<'s, 'c, C> {
    fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    fn mismatch(&self) -> ParseError {
        ParseError::GrammarMismatch {
            offset: self.furthest,
            found: self.source[self.furthest..].chars().next(),
        }
    }

    fn miss(&mut self) {
        self.furthest = self.furthest.max(self.pos);
    }

    /// Attempt `rule`, bracketing `body` with notifications and rewinding on failure.
    fn rule(&mut self, rule: Rule, body: impl FnOnce(&mut Self) -> Outcome) -> Outcome {
        let start = self.pos;
        self.control.enter(rule, start);
        match body(self) {
            Ok(true) => {
                let matched = &self.source[start..self.pos];
                self.control.success(rule, matched)?;
                Ok(true)
            }
            Ok(false) => {
                self.pos = start;
                self.control.failure(rule);
                Ok(false)
            }
            Err(err) => {
                self.control.failure(rule);
                Err(err)
            }
        }
    }

    /// Run the body of an array or object one level deeper. `open` is the offset of its
    /// opening bracket.
    fn nested(&mut self, open: usize, body: impl FnOnce(&mut Self) -> Outcome) -> Outcome {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(ParseError::DepthLimitExceeded {
                    limit,
                    offset: open,
                });
            }
        }
        self.depth += 1;
        let outcome = body(self);
        self.depth -= 1;
        outcome
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            self.miss();
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            self.miss();
            false
        }
    }

    fn ws(&mut self) {
        let rest = self.rest();
        let trimmed =
            rest.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'));
        self.pos += rest.len() - trimmed.len();
    }

    fn text(&mut self) -> Outcome {
        self.rule(Rule::Text, |m| {
            m.ws();
            if !m.value()? {
                return Ok(false);
            }
            m.ws();
            if !m.rest().is_empty() {
                m.miss();
                return Ok(false);
            }
            Ok(true)
        })
    }

    fn value(&mut self) -> Outcome {
        self.rule(Rule::Value, |m| {
            Ok(m.string()?
                || m.number()?
                || m.object()?
                || m.array()?
                || m.literal(Rule::False, "false")?
                || m.literal(Rule::Null, "null")?
                || m.literal(Rule::True, "true")?)
        })
    }

    fn literal(&mut self, rule: Rule, word: &'static str) -> Outcome {
        self.rule(rule, |m| Ok(m.eat_str(word)))
    }

    fn number(&mut self) -> Outcome {
        self.rule(Rule::Number, |m| match tokens::number_len(m.rest()) {
            Some(len) => {
                m.pos += len;
                Ok(true)
            }
            None => {
                m.miss();
                Ok(false)
            }
        })
    }

    fn object(&mut self) -> Outcome {
        self.rule(Rule::Object, |m| {
            let open = m.pos;
            if !m.eat('{') {
                return Ok(false);
            }
            m.nested(open, |m| {
                m.ws();
                if m.eat('}') {
                    return Ok(true);
                }
                loop {
                    if !m.member()? {
                        return Ok(false);
                    }
                    m.ws();
                    if m.eat('}') {
                        return Ok(true);
                    }
                    if !m.value_separator()? {
                        return Ok(false);
                    }
                    m.ws();
                }
            })
        })
    }

    fn member(&mut self) -> Outcome {
        self.rule(Rule::Member, |m| {
            if !m.key()? {
                return Ok(false);
            }
            m.ws();
            if !m.name_separator()? {
                return Ok(false);
            }
            m.ws();
            m.value()
        })
    }

    fn key(&mut self) -> Outcome {
        self.rule(Rule::Key, |m| m.quoted())
    }

    fn name_separator(&mut self) -> Outcome {
        self.rule(Rule::NameSeparator, |m| Ok(m.eat(':')))
    }

    fn array(&mut self) -> Outcome {
        self.rule(Rule::Array, |m| {
            let open = m.pos;
            if !m.eat('[') {
                return Ok(false);
            }
            m.nested(open, |m| {
                m.ws();
                if m.eat(']') {
                    return Ok(true);
                }
                loop {
                    if !m.value()? {
                        return Ok(false);
                    }
                    m.ws();
                    if m.eat(']') {
                        return Ok(true);
                    }
                    if !m.value_separator()? {
                        return Ok(false);
                    }
                    m.ws();
                }
            })
        })
    }

    fn value_separator(&mut self) -> Outcome {
        self.rule(Rule::ValueSeparator, |m| Ok(m.eat(',')))
    }

    fn string(&mut self) -> Outcome {
        self.rule(Rule::String, |m| m.quoted())
    }

    /// `"` content `"`, shared by strings and member keys.
    fn quoted(&mut self) -> Outcome {
        if !self.eat('"') {
            return Ok(false);
        }
        if !self.content()? {
            return Ok(false);
        }
        Ok(self.eat('"'))
    }

    /// Report each fragment of a string body, stopping in front of the closing quote.
    fn content(&mut self) -> Outcome {
        let base = self.pos;
        let mut lexer = Fragment::lexer(self.rest());
        while let Some(token) = lexer.next() {
            let span = lexer.span();
            let rule = match token {
                Ok(Fragment::Quote) => return Ok(true),
                Ok(Fragment::Unescaped) => Rule::Unescaped,
                Ok(Fragment::EscapedChar) => Rule::EscapedChar,
                Ok(Fragment::Unicode) => Rule::Unicode,
                Err(()) => {
                    self.pos = base + span.start;
                    self.miss();
                    return Ok(false);
                }
            };
            let len = span.len();
            self.rule(rule, |m| {
                m.pos += len;
                Ok(true)
            })?;
        }
        // unterminated string
        self.miss();
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every notification as a short line of text.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Control for Recorder {
        fn enter(&mut self, rule: Rule, position: usize) {
            self.events.push(format!("enter {:?}@{}", rule, position));
        }

        fn success(&mut self, rule: Rule, matched: &str) -> Result<(), ParseError> {
            self.events.push(format!("success {:?} {:?}", rule, matched));
            Ok(())
        }

        fn failure(&mut self, rule: Rule) {
            self.events.push(format!("failure {:?}", rule));
        }
    }

    /// Checks that notifications nest, and rejects every number.
    #[derive(Default)]
    struct Nesting {
        open: Vec<Rule>,
        max_open: usize,
        reject_numbers: bool,
    }

    impl Nesting {
        fn close(&mut self, rule: Rule) {
            assert_eq!(self.open.pop(), Some(rule), "notifications out of order");
        }
    }

    impl Control for Nesting {
        fn enter(&mut self, rule: Rule, _position: usize) {
            self.open.push(rule);
            self.max_open = self.max_open.max(self.open.len());
        }

        fn success(&mut self, rule: Rule, matched: &str) -> Result<(), ParseError> {
            self.close(rule);
            if self.reject_numbers && rule == Rule::Number {
                return Err(ParseError::NumberFormat {
                    literal: matched.to_string(),
                    offset: 0,
                });
            }
            Ok(())
        }

        fn failure(&mut self, rule: Rule) {
            self.close(rule);
        }
    }

    fn record(source: &str) -> (Result<(), ParseError>, Vec<String>) {
        let mut recorder = Recorder::default();
        let result = drive(source, &mut recorder, &ParseOptions::default());
        (result, recorder.events)
    }

    #[test]
    fn test_notifications_for_single_element_array() {
        let (result, events) = record("[1]");

        assert_eq!(result, Ok(()));
        assert_eq!(
            events,
            vec![
                "enter Text@0",
                "enter Value@0",
                "enter String@0",
                "failure String",
                "enter Number@0",
                "failure Number",
                "enter Object@0",
                "failure Object",
                "enter Array@0",
                "enter Value@1",
                "enter String@1",
                "failure String",
                "enter Number@1",
                "success Number \"1\"",
                "success Value \"1\"",
                "success Array \"[1]\"",
                "success Value \"[1]\"",
                "success Text \"[1]\"",
            ]
        );
    }

    #[test]
    fn test_string_fragments_are_reported() {
        let (result, events) = record(r#""a\n\u0041""#);

        assert_eq!(result, Ok(()));
        let reported: Vec<&String> = events
            .iter()
            .filter(|e| e.starts_with("success"))
            .collect();
        assert_eq!(
            reported,
            vec![
                "success Unescaped \"a\"",
                "success EscapedChar \"\\\\n\"",
                "success Unicode \"\\\\u0041\"",
                "success String \"\\\"a\\\\n\\\\u0041\\\"\"",
                "success Value \"\\\"a\\\\n\\\\u0041\\\"\"",
                "success Text \"\\\"a\\\\n\\\\u0041\\\"\"",
            ]
        );
    }

    #[test]
    fn test_object_member_notifications() {
        let (result, events) = record(r#"{"k":true}"#);

        assert_eq!(result, Ok(()));
        let member_events: Vec<&String> = events
            .iter()
            .filter(|e| {
                e.contains("Key") || e.contains("NameSeparator") || e.contains("Member")
            })
            .collect();
        assert_eq!(
            member_events,
            vec![
                "enter Member@1",
                "enter Key@1",
                "success Key \"\\\"k\\\"\"",
                "enter NameSeparator@4",
                "success NameSeparator \":\"",
                "success Member \"\\\"k\\\":true\"",
            ]
        );
    }

    #[test]
    fn test_notifications_nest_on_success_and_failure() {
        for source in [
            r#"{"a": [1, 2, {"b": null}], "c": "dé"}"#,
            r#"{"a": [1, 2, {"b": nul}]}"#,
            "[[[[]]]]",
            "[1,]",
            "\"unterminated",
        ] {
            let mut nesting = Nesting::default();
            let _ = drive(source, &mut nesting, &ParseOptions::default());
            assert!(nesting.open.is_empty(), "unclosed rules for {}", source);
        }
    }

    #[test]
    fn test_rejected_success_unwinds_open_rules() {
        let mut nesting = Nesting {
            reject_numbers: true,
            ..Nesting::default()
        };
        let result = drive("[[{\"a\": 7}]]", &mut nesting, &ParseOptions::default());

        assert!(matches!(result, Err(ParseError::NumberFormat { .. })));
        assert!(nesting.open.is_empty());
        assert!(nesting.max_open > 5);
    }

    #[test]
    fn test_mismatch_reports_furthest_position() {
        assert_eq!(
            record("[1, 2 x]").0,
            Err(ParseError::GrammarMismatch {
                offset: 6,
                found: Some('x')
            })
        );
        assert_eq!(
            record("[1,]").0,
            Err(ParseError::GrammarMismatch {
                offset: 3,
                found: Some(']')
            })
        );
        assert_eq!(
            record("{\"a\" 1}").0,
            Err(ParseError::GrammarMismatch {
                offset: 5,
                found: Some('1')
            })
        );
        assert_eq!(
            record("").0,
            Err(ParseError::GrammarMismatch {
                offset: 0,
                found: None
            })
        );
        assert_eq!(
            record("[\"abc").0,
            Err(ParseError::GrammarMismatch {
                offset: 5,
                found: None
            })
        );
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert_eq!(
            record("true false").0,
            Err(ParseError::GrammarMismatch {
                offset: 5,
                found: Some('f')
            })
        );
        assert_eq!(
            record("01").0,
            Err(ParseError::GrammarMismatch {
                offset: 1,
                found: Some('1')
            })
        );
    }

    #[test]
    fn test_whitespace_around_document() {
        assert_eq!(record(" \t\r\n[ 1 , 2 ]\n").0, Ok(()));
        assert!(record("\u{a0}1").0.is_err());
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::default().with_max_depth(Some(3));
        let mut nesting = Nesting::default();

        assert_eq!(drive("[[[]]]", &mut nesting, &options), Ok(()));
        assert_eq!(
            drive("[[{\"a\": []}]]", &mut nesting, &options),
            Err(ParseError::DepthLimitExceeded {
                limit: 3,
                offset: 8
            })
        );
        assert!(nesting.open.is_empty());

        let unlimited = ParseOptions::default().with_max_depth(None);
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert_eq!(drive(&deep, &mut nesting, &unlimited), Ok(()));
    }
}
