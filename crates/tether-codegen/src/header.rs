//! File headers: banner, namespace, imports and compatibility shims.
//!
//! Every import beyond the base class is driven by what the generated body actually uses, so
//! a file never carries imports or shims it does not need.

use tether_core::{Inheritance, Language};

/// Line every generated file carries so nobody edits it by hand.
pub const DO_NOT_EDIT: &str =
    "PLEASE DO NOT EDIT THIS FILE, IT IS GENERATED AND WILL BE OVERWRITTEN:";

/// Where contributors should make their changes instead.
pub const CONTRIBUTING_URL: &str =
    "https://github.com/ccxt/ccxt/blob/master/CONTRIBUTING.md#how-to-contribute-code";

/// Namespace generated PHP classes live in.
pub const PHP_NAMESPACE: &str = "ccxtpro";

/// Python package generated classes live in.
pub const PYTHON_PACKAGE: &str = "ccxtpro";

/// String base type that only exists in Python 2.
pub const LEGACY_STRING_TYPE: &str = "basestring";

/// Base classes whose module path differs from their snake-cased name.
const MODULE_ALIASES: &[(&str, &str)] = &[("Exchange", "base.exchange")];

/// Core library error hierarchy, parents first.
const ERROR_CLASSES: &[&str] = &[
    "BaseError",
    "ExchangeError",
    "AuthenticationError",
    "PermissionDenied",
    "AccountSuspended",
    "ArgumentsRequired",
    "BadRequest",
    "BadSymbol",
    "BadResponse",
    "NullResponse",
    "InsufficientFunds",
    "InvalidAddress",
    "AddressPending",
    "InvalidOrder",
    "OrderNotFound",
    "OrderNotCached",
    "CancelPending",
    "OrderImmediatelyFillable",
    "OrderNotFillable",
    "DuplicateOrderId",
    "NotSupported",
    "NetworkError",
    "DDoSProtection",
    "RateLimitExceeded",
    "ExchangeNotAvailable",
    "OnMaintenance",
    "InvalidNonce",
    "RequestTimeout",
];

/// Streaming caches shipped with the generated package.
const CACHE_CLASSES: &[&str] = &["ArrayCache", "ArrayCacheByTimestamp", "ArrayCacheBySymbolById"];

/// Build the ordered header lines for one generated file.
///
/// Order: banner, namespace, imports, optional compatibility shim.
pub fn build_header(
    language: Language,
    inheritance: &Inheritance,
    is_async: bool,
    body: &str,
) -> Vec<String> {
    match language {
        Language::Python | Language::Python2 => python_header(inheritance, is_async, body),
        Language::Php => php_header(body),
    }
}

/// Banner lines for Python files.
pub fn python_banner() -> Vec<String> {
    vec![
        "# -*- coding: utf-8 -*-".to_string(),
        String::new(),
        format!("# {}", DO_NOT_EDIT),
        format!("# {}", CONTRIBUTING_URL),
    ]
}

/// Banner lines for PHP files, starting with the open tag.
pub fn php_banner() -> Vec<String> {
    vec![
        "<?php".to_string(),
        String::new(),
        format!("// {}", DO_NOT_EDIT),
        format!("// {}", CONTRIBUTING_URL),
    ]
}

/// Python module path, relative to the package, that defines `base_class`.
pub fn python_module_for(base_class: &str) -> String {
    MODULE_ALIASES
        .iter()
        .find(|(name, _)| *name == base_class)
        .map(|(_, module)| module.to_string())
        .unwrap_or_else(|| to_snake_case(base_class))
}

/// Python imports locating the base class.
pub fn python_class_imports(inheritance: &Inheritance, is_async: bool) -> Vec<String> {
    if inheritance.is_core_derived() {
        let variant = if is_async { ".async_support" } else { "" };
        vec![
            format!(
                "from {}.{} import Exchange",
                PYTHON_PACKAGE,
                python_module_for("Exchange")
            ),
            format!("import ccxt{} as ccxt", variant),
        ]
    } else {
        let base = inheritance.base_class_name();
        vec![format!(
            "from {}.{} import {}",
            PYTHON_PACKAGE,
            python_module_for(base),
            base
        )]
    }
}

fn python_header(inheritance: &Inheritance, is_async: bool, body: &str) -> Vec<String> {
    let mut lines = python_banner();
    lines.push(String::new());
    lines.extend(python_class_imports(inheritance, is_async));

    let caches: Vec<&str> = CACHE_CLASSES
        .iter()
        .copied()
        .filter(|name| uses_identifier(body, name))
        .collect();
    if !caches.is_empty() {
        lines.push(format!(
            "from {}.base.cache import {}",
            PYTHON_PACKAGE,
            caches.join(", ")
        ));
    }
    if uses_identifier(body, "hashlib") {
        lines.push("import hashlib".to_string());
    }
    for error in used(ERROR_CLASSES, body) {
        lines.push(format!("from ccxt.base.errors import {}", error));
    }
    if uses_identifier(body, "Precise") {
        lines.push("from ccxt.base.precise import Precise".to_string());
    }

    if uses_identifier(body, LEGACY_STRING_TYPE) {
        lines.extend(
            [
                "",
                "# -----------------------------------------------------------------------------",
                "",
                "try:",
                "    basestring  # Python 3",
                "except NameError:",
                "    basestring = str  # Python 2",
            ]
            .map(String::from),
        );
    }

    lines
}

fn php_header(body: &str) -> Vec<String> {
    let mut lines = php_banner();
    lines.push(String::new());
    lines.push(format!("namespace {};", PHP_NAMESPACE));
    lines.push(String::new());
    lines.push("use Exception; // a common import".to_string());

    for error in used(ERROR_CLASSES, body) {
        lines.push(format!("use \\ccxt\\{};", error));
    }
    if uses_identifier(body, "Precise") {
        lines.push("use \\ccxt\\Precise;".to_string());
    }

    lines
}

fn used<'a>(names: &'a [&'a str], body: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    names
        .iter()
        .copied()
        .filter(move |name| uses_identifier(body, name))
}

/// Whether `ident` occurs in `body` as a whole identifier, not inside a longer one.
pub fn uses_identifier(body: &str, ident: &str) -> bool {
    if ident.is_empty() {
        return false;
    }
    let is_ident_char = |c: char| c.is_alphanumeric() || c == '_';

    body.match_indices(ident).any(|(start, _)| {
        let before = body[..start].chars().next_back();
        let after = body[start + ident.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

/// Convert a class name to its snake_case module name.
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
