//! Glob-style domain patterns for access rules.
//!
//! Supported syntax:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `*` | any sequence of characters, dots included |
//! | `?` | exactly one character |
//! | `[abc]`, `[a-z]` | one character from the class |
//! | `[!abc]` | one character not in the class |
//! | `{a,b}` | one of the comma-separated alternatives |
//! | `\x` | literal `x` |
//!
//! Labels get no special treatment: `*.example.com` matches `a.b.example.com`
//! and `.example.com`, but not `example.com`.

use std::fmt;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source`, failing with [`CoreError::InvalidPattern`] on malformed syntax.
    pub fn compile(source: &str) -> CoreResult<Self> {
        let invalid = |detail: &str| CoreError::InvalidPattern {
            pattern: source.to_string(),
            detail: detail.to_string(),
        };

        let mut re = String::with_capacity(source.len() * 2 + 2);
        re.push('^');

        let mut chars = source.chars();
        let mut in_alternation = false;
        while let Some(c) = chars.next() {
            match c {
                '*' => re.push_str(".*"),
                '?' => re.push('.'),
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| invalid("trailing escape"))?;
                    push_literal(&mut re, escaped);
                }
                '[' => {
                    let mut class = String::from("[");
                    let mut first = true;
                    let mut closed = false;
                    while let Some(c) = chars.next() {
                        match c {
                            ']' if !first => {
                                closed = true;
                                break;
                            }
                            '!' if first => class.push('^'),
                            '\\' => {
                                let escaped =
                                    chars.next().ok_or_else(|| invalid("trailing escape"))?;
                                push_literal(&mut class, escaped);
                            }
                            '[' | '&' | '~' | '^' => {
                                class.push('\\');
                                class.push(c);
                            }
                            _ => class.push(c),
                        }
                        first = false;
                    }
                    if !closed {
                        return Err(invalid("unterminated character class"));
                    }
                    class.push(']');
                    re.push_str(&class);
                }
                '{' if in_alternation => return Err(invalid("nested alternation")),
                '{' => {
                    in_alternation = true;
                    re.push_str("(?:");
                }
                ',' if in_alternation => re.push('|'),
                '}' if in_alternation => {
                    in_alternation = false;
                    re.push(')');
                }
                _ => push_literal(&mut re, c),
            }
        }
        if in_alternation {
            return Err(invalid("unterminated alternation"));
        }
        re.push('$');

        let regex = Regex::new(&re).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Exact match against `candidate`; no normalization is applied.
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The pattern as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(re: &mut String, c: char) {
    let mut buf = [0u8; 4];
    re.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> Pattern {
        Pattern::compile(source).unwrap()
    }

    #[test]
    fn wildcard_suffix() {
        let p = compile("*.test");
        assert_eq!(p.as_str(), "*.test");
        for (candidate, expected) in [
            ("something.test", true),
            ("def.abc.test", true),
            ("test", false),
            (".test", true),
            ("a.test", true),
            ("test.priv", false),
        ] {
            assert_eq!(p.matches(candidate), expected, "{candidate}");
        }
    }

    #[test]
    fn literal_dots_are_not_wildcards() {
        let p = compile("abc.test");
        assert!(p.matches("abc.test"));
        assert!(!p.matches("abcxtest"));
        assert!(!p.matches("abc.test.evil"));
    }

    #[test]
    fn single_char_and_classes() {
        let p = compile("host?.[a-c]x.example.com");
        assert!(p.matches("host1.bx.example.com"));
        assert!(!p.matches("host.bx.example.com"));
        assert!(!p.matches("host1.dx.example.com"));

        let negated = compile("[!p]*.example.com");
        assert!(negated.matches("www.example.com"));
        assert!(!negated.matches("private.example.com"));
    }

    #[test]
    fn alternation() {
        let p = compile("{www,api}.example.com");
        assert!(p.matches("www.example.com"));
        assert!(p.matches("api.example.com"));
        assert!(!p.matches("mail.example.com"));
    }

    #[test]
    fn escapes() {
        let p = compile(r"a\*b");
        assert!(p.matches("a*b"));
        assert!(!p.matches("axxb"));
    }

    #[test]
    fn escapes_inside_class() {
        let bracket = compile(r"[\]]x");
        assert!(bracket.matches("]x"));
        assert!(!bracket.matches("\\]x"));
        assert!(!bracket.matches("\\x"));

        let dash = compile(r"[a\-c]");
        assert!(dash.matches("-"));
        assert!(dash.matches("c"));
        assert!(!dash.matches("b"));

        let backslash = compile(r"[\\]");
        assert!(backslash.matches("\\"));

        assert!(Pattern::compile(r"[abc\").is_err());
    }

    #[test]
    fn empty_pattern_matches_only_empty() {
        let p = compile("");
        assert!(p.matches(""));
        assert!(!p.matches("a"));
    }

    #[test]
    fn malformed_patterns_fail() {
        for source in ["[abc", "{a,b", "{a,{b}}", r"abc\", "[z-a]"] {
            let err = Pattern::compile(source).unwrap_err();
            assert!(
                matches!(&err, CoreError::InvalidPattern { pattern, .. } if pattern == source),
                "{source}: {err:?}"
            );
        }
    }

    #[test]
    fn recompiling_is_stable() {
        let a = compile("*.example.{com,org}");
        let b = compile("*.example.{com,org}");
        for candidate in ["x.example.com", "x.example.org", "example.com", "x.example.net"] {
            assert_eq!(a.matches(candidate), b.matches(candidate));
        }
    }
}
