//! Document-level parsing tests
//!
//! Each test parses a complete document through the public `parse` entry point and checks
//! the resulting tree (or error) with the fluent assertion API.

use json_build::json::testing::assert_value;
use json_build::json::unescape::UnescapeError;
use json_build::{parse, parse_with, ParseError, ParseOptions, Value};
use rstest::rstest;

// ===== Containers =====

#[test]
fn test_empty_array() {
    let value = parse("[]").unwrap();
    assert_value(&value).array_len(0);
}

#[test]
fn test_empty_object() {
    let value = parse("{}").unwrap();
    assert_value(&value).object_len(0);
}

#[rstest]
#[case::padded_array("[ \n ]", Value::Array(vec![]))]
#[case::padded_object("{\t}", Value::Object(Default::default()))]
fn test_empty_containers_with_whitespace(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(parse(source).unwrap(), expected);
}

#[test]
fn test_nested_arrays() {
    let value = parse("[[[[]]]]").unwrap();

    assert_value(&value).depth(4).array_len(1).element(0, |second| {
        second.array_len(1).element(0, |third| {
            third.array_len(1).element(0, |fourth| {
                fourth.array_len(0);
            });
        });
    });
}

#[test]
fn test_duplicate_key_last_write_wins() {
    let value = parse(r#"{"a":1,"a":2}"#).unwrap();

    assert_value(&value).object_len(1).member("a", |a| {
        a.number(2.0);
    });
}

#[test]
fn test_members_are_ordered_by_key() {
    let value = parse(r#"{"b": 1, "c": 2, "a": 3}"#).unwrap();
    assert_value(&value).keys(&["a", "b", "c"]);
}

#[test]
fn test_array_keeps_source_order() {
    let value = parse(r#"[3, "two", null, false, {}, []]"#).unwrap();

    assert_value(&value)
        .array_len(6)
        .element(0, |e| {
            e.number(3.0);
        })
        .element(1, |e| {
            e.string("two");
        })
        .element(2, |e| {
            e.is_null();
        })
        .element(3, |e| {
            e.boolean(false);
        })
        .element(4, |e| {
            e.object_len(0);
        })
        .element(5, |e| {
            e.array_len(0);
        });
}

#[test]
fn test_mixed_document() {
    let source = r#"
        {
            "name": "json-build",
            "version": 1.5,
            "tags": ["parser", "builder"],
            "nested": {"flag": true, "none": null, "list": [{"k": "v"}]}
        }
    "#;
    let value = parse(source).unwrap();

    assert_value(&value)
        .keys(&["name", "nested", "tags", "version"])
        .member("name", |v| {
            v.string("json-build");
        })
        .member("version", |v| {
            v.number(1.5);
        })
        .member("tags", |tags| {
            tags.array_len(2).element(1, |t| {
                t.string("builder");
            });
        })
        .member("nested", |nested| {
            nested
                .member("flag", |f| {
                    f.boolean(true);
                })
                .member("none", |n| {
                    n.is_null();
                })
                .member("list", |list| {
                    list.element(0, |item| {
                        item.member("k", |k| {
                            k.string("v");
                        });
                    });
                });
        });
}

// ===== Strings =====

#[test]
fn test_string_escapes_are_decoded() {
    let value = parse(r#""\n\t\"\\""#).unwrap();
    assert_value(&value).string("\n\t\"\\");
}

#[rstest]
#[case::plain(r#""plain""#, "plain")]
#[case::empty(r#""""#, "")]
#[case::solidus(r#""a\/b""#, "a/b")]
#[case::control(r#""\b\f\r""#, "\u{8}\u{c}\r")]
#[case::unicode(r#""\u0041\u00e9""#, "Aé")]
#[case::surrogate_pair(r#""\ud83d\ude00""#, "😀")]
#[case::raw_non_ascii(r#""日本語""#, "日本語")]
#[case::mixed(r#""x y\nz""#, "x y\nz")]
fn test_string_contents(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(parse(source).unwrap(), Value::String(expected.to_string()));
}

#[test]
fn test_escaped_keys() {
    let value = parse(r#"{"a\nb": 1, "c": 2}"#).unwrap();
    assert_value(&value)
        .keys(&["a\nb", "c"])
        .member("c", |c| {
            c.number(2.0);
        });
}

#[test]
fn test_lone_surrogate_is_escape_error() {
    assert_eq!(
        parse(r#"["ok", "\ud800"]"#),
        Err(ParseError::EscapeDecode {
            fragment: "\\ud800".to_string(),
            offset: 8,
            source: UnescapeError::LoneSurrogate(0xd800),
        })
    );
}

// ===== Numbers =====

#[rstest]
#[case("0", 0.0)]
#[case("-0", -0.0)]
#[case("42", 42.0)]
#[case("-7.25", -7.25)]
#[case("1e3", 1000.0)]
#[case("1E+2", 100.0)]
#[case("25e-1", 2.5)]
#[case("1.7976931348623157e308", f64::MAX)]
#[case("1e-400", 0.0)]
fn test_number_literals(#[case] source: &str, #[case] expected: f64) {
    assert_eq!(parse(source).unwrap(), Value::Number(expected));
}

#[test]
fn test_number_out_of_range() {
    assert_eq!(
        parse("1e400"),
        Err(ParseError::NumberFormat {
            literal: "1e400".to_string(),
            offset: 0,
        })
    );
    assert!(matches!(
        parse(r#"{"x": [-2e308]}"#),
        Err(ParseError::NumberFormat { offset: 7, .. })
    ));
}

#[rstest]
#[case::leading_plus("+1", 0)]
#[case::leading_zero("01", 1)]
#[case::bare_fraction(".5", 0)]
#[case::trailing_dot("1.", 1)]
#[case::empty_exponent("1e", 1)]
#[case::hex("0x10", 1)]
#[case::infinity("Infinity", 0)]
#[case::nan("NaN", 0)]
fn test_non_json_numbers_rejected(#[case] source: &str, #[case] offset: usize) {
    assert!(matches!(
        parse(source),
        Err(ParseError::GrammarMismatch { offset: o, .. }) if o == offset
    ));
}

// ===== Failures =====

#[test]
fn test_missing_member_value() {
    let result = parse(r#"{"a":}"#);
    assert_eq!(
        result,
        Err(ParseError::GrammarMismatch {
            offset: 5,
            found: Some('}'),
        })
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace_only("   ")]
#[case::trailing_comma_array("[1,]")]
#[case::trailing_comma_object(r#"{"a":1,}"#)]
#[case::missing_comma("[1 2]")]
#[case::unquoted_key("{a:1}")]
#[case::single_quotes("['a']")]
#[case::unterminated_string(r#""abc"#)]
#[case::unterminated_array("[1, 2")]
#[case::raw_newline_in_string("\"a\nb\"")]
#[case::invalid_escape(r#""\x""#)]
#[case::short_unicode(r#""\u12""#)]
#[case::two_documents("{} {}")]
#[case::bare_word("nul")]
#[case::comment("[1] // done")]
fn test_malformed_documents(#[case] source: &str) {
    assert!(
        matches!(parse(source), Err(ParseError::GrammarMismatch { .. })),
        "expected grammar mismatch for {:?}",
        source
    );
}

#[test]
fn test_error_position_is_reported() {
    let source = "{\n  \"a\": [1, 2,\n  ]\n}";
    let err = parse(source).unwrap_err();

    assert_eq!(err.position(source).line, 3);
    assert_eq!(err.position(source).column, 3);
}

// ===== Options =====

#[test]
fn test_depth_limit() {
    let deep = format!("{}{}", "[".repeat(129), "]".repeat(129));
    assert!(matches!(
        parse(&deep),
        Err(ParseError::DepthLimitExceeded {
            limit: 128,
            offset: 128
        })
    ));

    let relaxed = ParseOptions::default().with_max_depth(Some(200));
    assert_value(&parse_with(&deep, &relaxed).unwrap()).depth(129);
}
