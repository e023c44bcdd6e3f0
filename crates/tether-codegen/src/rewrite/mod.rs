//! Statement-level translation from the source language into each target.
//!
//! The pipeline only depends on the [`RewriteEngine`] trait. [`RuleEngine`] is the bundled
//! implementation: an ordered table of textual rules per target, covering the subset of the
//! source language that derived exchange classes use.

mod php;
mod python;

use regex::Regex;
use tether_core::{Language, Result};

/// Options for a single translation.
#[derive(Debug, Clone, Copy)]
pub struct TranslateOptions {
    /// Drop whitespace-only lines from the output.
    pub remove_empty_lines: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            remove_empty_lines: true,
        }
    }
}

/// One source body rendered in every target language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub python3: String,
    pub python2: String,
    pub php: String,
}

impl Translation {
    /// Body for the given target.
    pub fn body(&self, language: Language) -> &str {
        match language {
            Language::Python => &self.python3,
            Language::Python2 => &self.python2,
            Language::Php => &self.php,
        }
    }
}

/// Translates source-language code into the target languages.
pub trait RewriteEngine {
    fn translate(&self, source: &str, options: &TranslateOptions) -> Result<Translation>;
}

/// Rule-table rewrite engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteEngine for RuleEngine {
    fn translate(&self, source: &str, options: &TranslateOptions) -> Result<Translation> {
        let python3 = python::translate(source);
        let python2 = python::downgrade(&python3);
        let php = php::translate(source)?;

        let finish = |body: String| {
            if options.remove_empty_lines {
                remove_empty_lines(&body)
            } else {
                body
            }
        };

        Ok(Translation {
            python3: finish(python3),
            python2: finish(python2),
            php: finish(php),
        })
    }
}

/// An ordered find/replace rule. Replacements use `regex` capture syntax.
pub(crate) struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    pub(crate) fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static rewrite rule"),
            replacement,
        }
    }
}

pub(crate) fn apply_rules(rules: &[Rule], text: &str) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| {
        rule.pattern.replace_all(&acc, rule.replacement).into_owned()
    })
}

/// Whether the end of `before` sits inside a quoted literal opened on the same line.
pub(crate) fn in_string_literal(before: &str) -> bool {
    let line = match before.rfind('\n') {
        Some(i) => &before[i + 1..],
        None => before,
    };

    let mut open: Option<char> = None;
    let mut escaped = false;
    for c in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match (open, c) {
            (Some(_), '\\') => escaped = true,
            (Some(quote), c) if c == quote => open = None,
            (None, '\'' | '"' | '`') => open = Some(c),
            _ => {}
        }
    }
    open.is_some()
}

fn remove_empty_lines(text: &str) -> String {
    let mut out = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') && !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHOD: &str = "    async fetchTicker (symbol, params = {}) {
        await this.loadMarkets ();

        const market = this.market (symbol);
        if (market === undefined) {
            return false;
        }
        return true;
    }
";

    #[test]
    fn test_translation_body_per_language() {
        let translation = Translation {
            python3: "a".into(),
            python2: "b".into(),
            php: "c".into(),
        };
        assert_eq!(translation.body(Language::Python), "a");
        assert_eq!(translation.body(Language::Python2), "b");
        assert_eq!(translation.body(Language::Php), "c");
    }

    #[test]
    fn test_empty_lines_removed_by_default() {
        let translation = RuleEngine::new()
            .translate(METHOD, &TranslateOptions::default())
            .unwrap();
        assert!(!translation.python3.contains("\n\n"));
        assert!(!translation.php.contains("\n\n"));
    }

    #[test]
    fn test_empty_lines_preserved_on_request() {
        let options = TranslateOptions {
            remove_empty_lines: false,
        };
        let translation = RuleEngine::new().translate(METHOD, &options).unwrap();
        assert!(translation.python3.contains("\n\n"));
        assert!(translation.php.contains("\n\n"));
    }

    #[test]
    fn test_all_targets_translated() {
        let translation = RuleEngine::new()
            .translate(METHOD, &TranslateOptions::default())
            .unwrap();

        assert!(translation
            .python3
            .contains("async def fetchTicker(self, symbol, params={}):"));
        assert!(translation
            .python2
            .contains("def fetchTicker(self, symbol, params={}):"));
        assert!(!translation.python2.contains("async"));
        assert!(translation
            .php
            .contains("public function fetchTicker($symbol, $params = array()) {"));
    }

    #[test]
    fn test_in_string_literal() {
        assert!(in_string_literal("x = 'ok"));
        assert!(in_string_literal("a\nb = \"it's"));
        assert!(!in_string_literal("x = 'ok' + "));
        assert!(!in_string_literal("'open\nnext "));
        assert!(in_string_literal(r"x = 'don\'t"));
    }

    #[test]
    fn test_apply_rules_in_order() {
        let rules = [Rule::new("a", "b"), Rule::new("b", "c")];
        assert_eq!(apply_rules(&rules, "a"), "c");
    }
}
