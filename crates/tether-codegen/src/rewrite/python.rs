use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{apply_rules, in_string_literal, Rule};

static METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(async\s+)?(\w+)\s*\(([^)]*)\)\s*\{\s*$").unwrap());
static IF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)if\s*\((.*)\)\s*\{\s*$").unwrap());
static ELSE_IF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)\}\s*else\s+if\s*\((.*)\)\s*\{\s*$").unwrap());
static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\}\s*else\s*\{\s*$").unwrap());
static FOR_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)for\s*\(\s*(?:const|let|var)\s+(\w+)\s+of\s+(.*)\)\s*\{\s*$").unwrap()
});
static WHILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)while\s*\((.*)\)\s*\{\s*$").unwrap());
static TRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)try\s*\{\s*$").unwrap());
static CATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)\}\s*catch\s*\((\w+)\)\s*\{\s*$").unwrap());
static PARAM_DEFAULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=\s*").unwrap());
static NEGATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"!([^=])").unwrap());

static TOKENS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"(?m)^(\s*)//\s?", "${1}# "),
        Rule::new(r"(\S)[ \t]+//\s", "${1}  # "),
        Rule::new(r"\bthis\.", "self."),
        Rule::new(r"\bthis\b", "self"),
        Rule::new(r"\b(?:const|let|var)\s+", ""),
        Rule::new(r"===", "=="),
        Rule::new(r"!==", "!="),
        Rule::new(r"\s&&\s", " and "),
        Rule::new(r"\s\|\|\s", " or "),
        Rule::new(r"\btrue\b", "True"),
        Rule::new(r"\bfalse\b", "False"),
        Rule::new(r"\b(?:null|undefined)\b", "None"),
        Rule::new(r"(?m);([ \t]*(?:#.*)?)$", "${1}"),
    ]
});

static DOWNGRADE: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"\basync\s+def\b", "def"),
        Rule::new(r"\bawait\s+", ""),
    ]
});

const NOT_METHODS: &[&str] = &["if", "for", "while", "switch", "catch", "function", "return"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    /// Opened a statement block; its closing line disappears.
    Block,
    /// Part of an expression such as an object literal; kept verbatim.
    Literal,
}

/// Translate a source body into Python 3.
pub(super) fn translate(source: &str) -> String {
    negate(&apply_rules(&TOKENS, &convert_blocks(source)))
}

/// Derive the Python 2 body from the Python 3 one.
pub(super) fn downgrade(python3: &str) -> String {
    apply_rules(&DOWNGRADE, python3)
}

/// Rewrite `!x` as `not x`, leaving string literals untouched.
fn negate(text: &str) -> String {
    NEGATION
        .replace_all(text, |caps: &Captures| {
            let start = caps.get(0).map_or(0, |m| m.start());
            if in_string_literal(&text[..start]) {
                caps[0].to_string()
            } else {
                format!("not {}", &caps[1])
            }
        })
        .into_owned()
}

/// Turn brace-delimited blocks into indentation-delimited ones.
///
/// Braces inside string literals are not tracked.
fn convert_blocks(source: &str) -> String {
    let mut stack: Vec<Brace> = Vec::new();
    let mut out: Vec<String> = Vec::new();

    for line in source.lines() {
        if let Some(header) = block_header(line, &mut stack) {
            out.push(header);
            continue;
        }

        let mut closes_block = false;
        for ch in line.chars() {
            match ch {
                '{' => stack.push(Brace::Literal),
                '}' => closes_block = stack.pop() == Some(Brace::Block),
                _ => {}
            }
        }

        let trimmed = line.trim();
        if closes_block && (trimmed == "}" || trimmed == "};") {
            continue;
        }
        out.push(line.to_string());
    }

    let mut result = out.join("\n");
    if source.ends_with('\n') {
        result.push('\n');
    }
    result
}

fn block_header(line: &str, stack: &mut Vec<Brace>) -> Option<String> {
    if let Some(caps) = ELSE_IF.captures(line) {
        stack.pop();
        stack.push(Brace::Block);
        return Some(format!("{}elif {}:", &caps[1], &caps[2]));
    }
    if let Some(caps) = ELSE.captures(line) {
        stack.pop();
        stack.push(Brace::Block);
        return Some(format!("{}else:", &caps[1]));
    }
    if let Some(caps) = CATCH.captures(line) {
        stack.pop();
        stack.push(Brace::Block);
        return Some(format!("{}except Exception as {}:", &caps[1], &caps[2]));
    }

    let header = if let Some(caps) = IF.captures(line) {
        format!("{}if {}:", &caps[1], &caps[2])
    } else if let Some(caps) = WHILE.captures(line) {
        format!("{}while {}:", &caps[1], &caps[2])
    } else if let Some(caps) = FOR_OF.captures(line) {
        format!("{}for {} in {}:", &caps[1], &caps[2], &caps[3])
    } else if let Some(caps) = TRY.captures(line) {
        format!("{}try:", &caps[1])
    } else {
        let caps = METHOD.captures(line)?;
        if NOT_METHODS.contains(&&caps[3]) {
            return None;
        }
        let prefix = if caps.get(2).is_some() { "async def" } else { "def" };
        let params = PARAM_DEFAULT.replace_all(caps[4].trim(), "=");
        if params.is_empty() {
            format!("{}{} {}(self):", &caps[1], prefix, &caps[3])
        } else {
            format!("{}{} {}(self, {}):", &caps[1], prefix, &caps[3], params)
        }
    };

    stack.push(Brace::Block);
    Some(header)
}
