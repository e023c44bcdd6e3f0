//! Data model shared by discovery, the builders and the declaration exporter.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::error::{Result, TetherError};

/// Namespace prefix marking a base class that lives in the core library.
pub const CORE_PREFIX: &str = "ccxt.";

/// A generated target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Python 3, async flavour.
    Python,
    /// Python 2 compatible, synchronous.
    Python2,
    Php,
}

impl Language {
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python | Language::Python2 => "py",
            Language::Php => "php",
        }
    }

    /// Whether classes generated for this language extend the async core library.
    pub fn is_async(&self) -> bool {
        matches!(self, Language::Python)
    }

    /// Text placed between the header and the class declaration.
    pub fn header_separator(&self) -> &'static str {
        match self {
            Language::Python | Language::Python2 => "\n\n\n",
            Language::Php => "\n\n",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::Python2 => write!(f, "python2"),
            Language::Php => write!(f, "php"),
        }
    }
}

/// One discovered source class.
#[derive(Debug, Clone)]
pub struct ClassUnit {
    pub class_name: String,
    pub base_class_name: String,
    /// Everything between the class's opening and closing braces.
    pub source_body: String,
    /// File the class was read from.
    pub source_path: PathBuf,
}

/// The relationship every builder works from.
///
/// Constructed once per class so the declaration, the imports and the class map all see the
/// same base class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inheritance {
    class_name: String,
    base_class_name: String,
    core_derived: bool,
}

impl Inheritance {
    /// Validate a class/base pair. Empty or whitespace-bearing names are rejected.
    pub fn new(class_name: impl Into<String>, base_class_name: impl Into<String>) -> Result<Self> {
        let class_name = class_name.into();
        let base_class_name = base_class_name.into();

        validate_identifier("class name", &class_name)?;
        validate_identifier("base class name", &base_class_name)?;

        let core_derived = base_class_name.len() > CORE_PREFIX.len()
            && base_class_name.starts_with(CORE_PREFIX);

        Ok(Self {
            class_name,
            base_class_name,
            core_derived,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Base class exactly as written in the source, prefix included.
    pub fn base_class_name(&self) -> &str {
        &self.base_class_name
    }

    pub fn is_core_derived(&self) -> bool {
        self.core_derived
    }

    /// Base class with the core prefix removed, e.g. `binance` for `ccxt.binance`.
    pub fn local_base_name(&self) -> &str {
        if self.core_derived {
            &self.base_class_name[CORE_PREFIX.len()..]
        } else {
            &self.base_class_name
        }
    }
}

fn validate_identifier(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TetherError::Config(format!("{} must not be empty", what)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(TetherError::Config(format!(
            "{} '{}' contains whitespace",
            what, value
        )));
    }
    Ok(())
}

/// Ordered `class name -> base class name` table built over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    entries: IndexMap<String, String>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a class. Returns the previous base class if the name was already present.
    pub fn insert(&mut self, inheritance: &Inheritance) -> Option<String> {
        self.entries.insert(
            inheritance.class_name().to_string(),
            inheritance.base_class_name().to_string(),
        )
    }

    pub fn get(&self, class_name: &str) -> Option<&str> {
        self.entries.get(class_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A fully assembled output file for one class in one language.
#[derive(Debug, Clone)]
pub struct TargetArtifact {
    pub language: Language,
    /// Banner, namespace and import lines.
    pub header: String,
    /// Class declaration followed by the translated body.
    pub body: String,
    /// Where the artifact is written.
    pub path: PathBuf,
}

impl TargetArtifact {
    /// Full file contents, always newline terminated.
    pub fn contents(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.body.len() + 4);
        out.push_str(&self.header);
        out.push_str(self.language.header_separator());
        out.push_str(&self.body);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
