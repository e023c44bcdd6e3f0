use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tether_core::{Result, TetherError};

use super::{apply_rules, in_string_literal, Rule};

static METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)(?:async[ \t]+)?(\w+)[ \t]*\(([^)\n]*)\)[ \t]*\{[ \t]*$").unwrap()
});
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+(\w+)|\bcatch\s*\((\w+)\)").unwrap()
});

static TOKENS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            r"\bfor\s*\(\s*(?:const|let|var)\s+(\w+)\s+of\s+(.*)\)\s*\{",
            "foreach (${2} as ${1}) {",
        ),
        Rule::new(r"\}\s*catch\s*\((\w+)\)", "} catch (Exception $$${1})"),
        Rule::new(r"\bthis\.", "$$this->"),
        Rule::new(r"\bawait\s+", ""),
        Rule::new(r"\b(?:const|let|var)\s+", ""),
        Rule::new(r"\bundefined\b", "null"),
        Rule::new(r"\{\s*\}", "array()"),
        Rule::new(r"\[\s*\]", "array()"),
        Rule::new(r"\s\+\s'", " . '"),
        Rule::new(r"'\s\+\s", "' . "),
    ]
});

const NOT_METHODS: &[&str] = &["if", "for", "while", "switch", "catch", "function", "return"];

/// Translate a source body into PHP.
pub(super) fn translate(source: &str) -> Result<String> {
    let mut variables: Vec<String> = Vec::new();
    for caps in DECLARATION.captures_iter(source) {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            remember(&mut variables, name.as_str());
        }
    }

    let with_methods = METHOD.replace_all(source, |caps: &Captures| {
        let name = &caps[2];
        if NOT_METHODS.contains(&name) {
            return caps[0].to_string();
        }
        let params: Vec<&str> = caps[3]
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        for param in &params {
            let param_name = param.split('=').next().unwrap_or_default().trim();
            remember(&mut variables, param_name);
        }
        let params: Vec<String> = params
            .iter()
            .map(|p| match p.split_once('=') {
                Some((name, default)) => format!("{} = {}", name.trim(), default.trim()),
                None => p.to_string(),
            })
            .collect();
        format!("{}public function {}({}) {{", &caps[1], name, params.join(", "))
    });

    let text = apply_rules(&TOKENS, &with_methods);
    prefix_variables(&text, &variables)
}

fn remember(variables: &mut Vec<String>, name: &str) {
    let is_identifier = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if is_identifier && name != "this" && !variables.iter().any(|v| v == name) {
        variables.push(name.to_string());
    }
}

/// Prefix every bare use of a known local variable with `$`. Comments and string literals are
/// left alone.
fn prefix_variables(text: &str, variables: &[String]) -> Result<String> {
    if variables.is_empty() {
        return Ok(text.to_string());
    }

    let alternation = variables
        .iter()
        .map(|v| regex::escape(v))
        .collect::<Vec<_>>()
        .join("|");
    let re = Regex::new(&format!(r"\b(?:{})\b", alternation))
        .map_err(|e| TetherError::Translation(format!("variable pattern: {}", e)))?;

    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        let before = &text[..m.start()];
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let in_comment = before[line_start..].contains("//");
        let is_member = before.ends_with('$')
            || before.ends_with("->")
            || before.ends_with('.')
            || before.ends_with('\'')
            || before.ends_with('"');

        out.push_str(&text[last..m.start()]);
        if !in_comment && !is_member && !in_string_literal(before) {
            out.push('$');
        }
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}
