//! Bulk transpilation of every derived class file.

use tether_core::{ClassMap, GenerationOptions, Inheritance, Result, TetherError};

use crate::artifact::assemble;
use crate::discovery::discover_classes;
use crate::fs::overwrite_file;
use crate::rewrite::{RewriteEngine, TranslateOptions};

/// Discover, translate and write every derived class selected by `options`.
///
/// Writes one file per class per configured target. Returns `None` when nothing was
/// transpiled.
pub fn transpile_derived_files(
    engine: &dyn RewriteEngine,
    options: &GenerationOptions,
) -> Result<Option<ClassMap>> {
    let units = discover_classes(&options.source_dir, &options.filter)?;
    let mut classes = ClassMap::new();

    for unit in units {
        let inheritance = Inheritance::new(&unit.class_name, &unit.base_class_name)?;
        if let Some(previous) = classes.get(inheritance.class_name()) {
            return Err(TetherError::Config(format!(
                "Class {} in {} is already defined (extends {})",
                inheritance.class_name(),
                unit.source_path.display(),
                previous
            )));
        }

        let translation = engine.translate(&unit.source_body, &TranslateOptions::default())?;

        for target in &options.targets {
            let artifact = assemble(
                target.language,
                &inheritance,
                translation.body(target.language),
                &target.dir,
            );
            overwrite_file(&artifact.path, &artifact.contents())?;
            tracing::debug!(
                class = inheritance.class_name(),
                language = %target.language,
                file = %artifact.path.display(),
                "Wrote artifact"
            );
        }

        tracing::info!(
            "{} → {}",
            unit.source_path.display(),
            inheritance.class_name()
        );
        classes.insert(&inheritance);
    }

    if classes.is_empty() {
        Ok(None)
    } else {
        Ok(Some(classes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::RuleEngine;
    use std::path::Path;
    use tempfile::tempdir;
    use tether_core::{Language, NameFilter, TargetDir};

    fn write_source(dir: &Path, name: &str, base: &str) {
        let source = format!(
            "'use strict';\n\nmodule.exports = class {} extends {} {{\n    describe () {{\n        return {{}};\n    }}\n}};\n",
            name, base
        );
        std::fs::write(dir.join(format!("{}.js", name)), source).unwrap();
    }

    fn options(root: &Path, filter: NameFilter) -> GenerationOptions {
        GenerationOptions {
            source_dir: root.join("js"),
            targets: vec![
                TargetDir {
                    language: Language::Python,
                    dir: root.join("python"),
                },
                TargetDir {
                    language: Language::Php,
                    dir: root.join("php"),
                },
            ],
            filter,
        }
    }

    #[test]
    fn test_one_artifact_per_class_per_target() {
        let root = tempdir().unwrap();
        let js = root.path().join("js");
        std::fs::create_dir(&js).unwrap();
        write_source(&js, "binance", "ccxt.binance");
        write_source(&js, "kraken", "ccxt.kraken");

        let classes = transpile_derived_files(&RuleEngine::new(), &options(root.path(), NameFilter::All))
            .unwrap()
            .unwrap();

        assert_eq!(classes.len(), 2);
        assert_eq!(classes.get("binance"), Some("ccxt.binance"));

        for dir in ["python", "php"] {
            let count = std::fs::read_dir(root.path().join(dir)).unwrap().count();
            assert_eq!(count, 2, "{}", dir);
        }

        let python = std::fs::read_to_string(root.path().join("python/kraken.py")).unwrap();
        assert!(python.contains("class kraken(Exchange, ccxt.kraken):"));
        assert!(python.contains("    def describe(self):"));

        let php = std::fs::read_to_string(root.path().join("php/kraken.php")).unwrap();
        assert!(php.contains("class kraken extends \\ccxt\\kraken {"));
        assert!(php.contains("public function describe() {"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let root = tempdir().unwrap();
        let js = root.path().join("js");
        std::fs::create_dir(&js).unwrap();
        write_source(&js, "binance", "ccxt.binance");

        let filter = NameFilter::parse(Some("^zzz")).unwrap();
        let result = transpile_derived_files(&RuleEngine::new(), &options(root.path(), filter)).unwrap();
        assert!(result.is_none());
        assert!(!root.path().join("python").exists());
    }

    #[test]
    fn test_duplicate_class_names_rejected() {
        let root = tempdir().unwrap();
        let js = root.path().join("js");
        std::fs::create_dir(&js).unwrap();
        write_source(&js, "binance", "ccxt.binance");
        std::fs::write(
            js.join("binance2.js"),
            "class binance extends Exchange {\n}\n",
        )
        .unwrap();

        let err = transpile_derived_files(&RuleEngine::new(), &options(root.path(), NameFilter::All))
            .unwrap_err();
        assert!(matches!(err, TetherError::Config(_)));
    }

    #[test]
    fn test_empty_class_body_is_valid_python() {
        let root = tempdir().unwrap();
        let js = root.path().join("js");
        std::fs::create_dir(&js).unwrap();
        std::fs::write(
            js.join("empty.js"),
            "'use strict';\n\nmodule.exports = class empty extends ccxt.empty {};\n",
        )
        .unwrap();

        let classes = transpile_derived_files(&RuleEngine::new(), &options(root.path(), NameFilter::All))
            .unwrap()
            .unwrap();
        assert_eq!(classes.get("empty"), Some("ccxt.empty"));

        let python = std::fs::read_to_string(root.path().join("python/empty.py")).unwrap();
        assert!(python.ends_with("class empty(Exchange, ccxt.empty):\n\n    pass\n"));

        let php = std::fs::read_to_string(root.path().join("php/empty.php")).unwrap();
        assert!(php.trim_end().ends_with('}'));
    }
}
