//! Rewrite of the order-book test fixture into Python and PHP.
//!
//! The fixture carries source-only boilerplate (strict mode, `require` lines and a local
//! `equals` helper) which is stripped before translation and replaced by per-language
//! headers.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use tether_core::config::FixtureConfig;
use tether_core::{Result, TetherError};

use crate::fs::overwrite_file;
use crate::header::{CONTRIBUTING_URL, DO_NOT_EDIT, PHP_NAMESPACE, PYTHON_PACKAGE};
use crate::rewrite::{RewriteEngine, TranslateOptions};

/// Order-book types the fixture exercises.
pub const ORDER_BOOK_TYPES: &[&str] = &[
    "OrderBook",
    "LimitedOrderBook",
    "IndexedOrderBook",
    "LimitedIndexedOrderBook",
    "LimitedCountedOrderBook",
    "CountedOrderBook",
];

static STRIP_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"'use strict';?\s+").unwrap(),
        Regex::new(r"(?m)^[^\n]*\brequire\b[^\n]*\n").unwrap(),
        Regex::new(r"(?s)function equals\s*\(.*?return true;?\n\}\n").unwrap(),
    ]
});

/// Transpiles the order-book test fixture.
#[derive(Debug, Clone)]
pub struct OrderBookTestTranspiler {
    source: PathBuf,
    python_output: PathBuf,
    php_output: PathBuf,
}

impl OrderBookTestTranspiler {
    pub fn new(
        source: impl Into<PathBuf>,
        python_output: impl Into<PathBuf>,
        php_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            python_output: python_output.into(),
            php_output: php_output.into(),
        }
    }

    pub fn from_config(config: &FixtureConfig) -> Self {
        Self::new(&config.order_book, &config.python_output, &config.php_output)
    }

    /// Translate the fixture and write both outputs.
    ///
    /// The fixture is required: failing to read it aborts the run.
    pub fn transpile(&self, engine: &dyn RewriteEngine) -> Result<()> {
        tracing::info!("Transpiling from {}", self.source.display());

        let js = std::fs::read_to_string(&self.source).map_err(|source| TetherError::Fixture {
            path: self.source.clone(),
            source,
        })?;

        let stripped = strip_boilerplate(&js);
        let options = TranslateOptions {
            remove_empty_lines: false,
        };
        let translation = engine.translate(&stripped, &options)?;

        let python = format!(
            "{}{}{}",
            python_preamble(),
            python_header(),
            translation.python2
        );
        let php = format!("{}{}{}", php_preamble(), php_header(), translation.php);

        tracing::info!("→ {}", self.python_output.display());
        tracing::info!("→ {}", self.php_output.display());

        overwrite_file(&self.python_output, &python)?;
        overwrite_file(&self.php_output, &php)?;

        Ok(())
    }
}

/// Remove strict mode, import lines and the local `equals` helper, in that order.
pub fn strip_boilerplate(js: &str) -> String {
    STRIP_RULES
        .iter()
        .fold(js.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

fn python_preamble() -> String {
    [
        "import os",
        "import sys",
        "",
        "root = os.path.dirname(os.path.dirname(os.path.dirname(os.path.abspath(__file__))))",
        "sys.path.append(root)",
        "",
        "# ----------------------------------------------------------------------------",
        "",
        &format!("# {}", DO_NOT_EDIT),
        &format!("# {}", CONTRIBUTING_URL),
        "",
        "# -----------------------------------------------------------------------------",
        "",
    ]
    .join("\n")
}

fn python_header() -> String {
    [
        "",
        &format!(
            "from {}.base.order_book import {}  # noqa: F402",
            PYTHON_PACKAGE,
            ORDER_BOOK_TYPES.join(", ")
        ),
        "",
        "",
        "def equals(a, b):",
        "    return a == b",
        "",
    ]
    .join("\n")
}

fn php_preamble() -> String {
    [
        "<?php",
        &format!("namespace {};", PHP_NAMESPACE),
        "include_once __DIR__ . '/../../vendor/autoload.php';",
        "// ----------------------------------------------------------------------------",
        "",
        &format!("// {}", DO_NOT_EDIT),
        &format!("// {}", CONTRIBUTING_URL),
        "",
        "// -----------------------------------------------------------------------------",
        "",
    ]
    .join("\n")
}

fn php_header() -> String {
    let imports: Vec<String> = ORDER_BOOK_TYPES
        .iter()
        .map(|name| format!("use {}\\{};", PHP_NAMESPACE, name))
        .collect();

    [
        "",
        &imports.join("\n"),
        "",
        "function equals($a, $b) {",
        "    return json_encode($a) === json_encode($b);",
        "}",
        "",
    ]
    .join("\n")
}
