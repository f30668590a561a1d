//! Annotated fixture checking.
//!
//! A fixture is plain text where some lines carry an expected rendering in a
//! trailing comment:
//!
//! ```text
//! new new Foo() // NEW(NEW(Foo))
//! new (new Foo)(x) // NEW(NEW(Foo), x)
//! ```
//!
//! Only comments that start with a canonical tag (`NEW(`, `CALL(`, `MEMBER(`)
//! make a line a case; every other line is ignored. The comment marker is
//! looked up outside string literals, so `"//"` inside a string is safe.

use crate::error::SyntaxError;
use crate::options::ParseOptions;
use crate::parse_expression_with;
use crate::render::render;

const TAGS: [&str; 3] = ["NEW(", "CALL(", "MEMBER("];

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedCase {
    /// 1-based line number in the fixture.
    pub line: usize,
    pub source: String,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Pass,
    Mismatch { actual: String },
    Error(SyntaxError),
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub results: Vec<(AnnotatedCase, CaseOutcome)>,
}

impl CheckReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, o)| o.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// True when every case passed. An empty report counts as success.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Collect every annotated line of a fixture.
pub fn annotated_cases(text: &str) -> Vec<AnnotatedCase> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let (source, comment) = split_line_comment(line)?;
            let expected = comment.trim();
            let source = source.trim();
            if source.is_empty() || !TAGS.iter().any(|tag| expected.starts_with(tag)) {
                return None;
            }
            Some(AnnotatedCase {
                line: i + 1,
                source: source.to_string(),
                expected: expected.to_string(),
            })
        })
        .collect()
}

pub fn check_case(case: &AnnotatedCase, options: &ParseOptions) -> CaseOutcome {
    match parse_expression_with(&case.source, options) {
        Ok(expr) => {
            let actual = render(&expr);
            if actual == case.expected {
                CaseOutcome::Pass
            } else {
                CaseOutcome::Mismatch { actual }
            }
        }
        Err(err) => CaseOutcome::Error(err),
    }
}

pub fn check_fixture(text: &str, options: &ParseOptions) -> CheckReport {
    let results: Vec<_> = annotated_cases(text)
        .into_iter()
        .map(|case| {
            let outcome = check_case(&case, options);
            (case, outcome)
        })
        .collect();
    let report = CheckReport { results };
    tracing::debug!(
        cases = report.results.len(),
        passed = report.passed(),
        "checked fixture"
    );
    report
}

/// Split a line at the first `//` that is not inside a string literal.
fn split_line_comment(line: &str) -> Option<(&str, &str)> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '/' if chars.peek().is_some_and(|(_, next)| *next == '/') => {
                    return Some((&line[..i], &line[i + 2..]));
                }
                _ => {}
            },
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_tagged_comments() {
        let text = "var x = 123 // plain comment\nnew new Foo() // NEW(NEW(Foo))\n// NEW(orphan)\n";
        let cases = annotated_cases(text);
        assert_eq!(
            cases,
            vec![AnnotatedCase {
                line: 2,
                source: "new new Foo()".into(),
                expected: "NEW(NEW(Foo))".into(),
            }]
        );
    }

    #[test]
    fn comment_marker_inside_string_is_ignored() {
        let (code, comment) = split_line_comment(r#"new Url("http://x") // NEW(Url, "http://x")"#).unwrap();
        assert_eq!(code, r#"new Url("http://x") "#);
        assert_eq!(comment, r#" NEW(Url, "http://x")"#);
    }

    #[test]
    fn outcomes() {
        let options = ParseOptions::default();
        let case = |source: &str, expected: &str| AnnotatedCase {
            line: 1,
            source: source.into(),
            expected: expected.into(),
        };
        assert_eq!(check_case(&case("new Foo", "NEW(Foo)"), &options), CaseOutcome::Pass);
        assert_eq!(
            check_case(&case("new Foo(x)", "NEW(Foo)"), &options),
            CaseOutcome::Mismatch {
                actual: "NEW(Foo, x)".into()
            }
        );
        assert!(matches!(
            check_case(&case("new", "NEW(Foo)"), &options),
            CaseOutcome::Error(_)
        ));
    }
}
