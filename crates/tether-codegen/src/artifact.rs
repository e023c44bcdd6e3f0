//! Assembly of one output file from a declaration, a header and a translated body.

use std::path::Path;

use tether_core::{Inheritance, Language, TargetArtifact};

use crate::declaration::build_declaration;
use crate::header::build_header;

/// Assemble the artifact for one class in one language, to be written under `dir`.
pub fn assemble(
    language: Language,
    inheritance: &Inheritance,
    translated_body: &str,
    dir: &Path,
) -> TargetArtifact {
    let header = build_header(language, inheritance, language.is_async(), translated_body);
    let declaration = build_declaration(language, inheritance);

    let mut body = String::with_capacity(declaration.len() + translated_body.len() + 8);
    body.push_str(&declaration);
    body.push_str("\n\n");
    match language {
        Language::Python | Language::Python2 if translated_body.trim().is_empty() => {
            body.push_str("    pass\n");
        }
        _ => {
            body.push_str(translated_body.trim_end());
            body.push('\n');
        }
    }
    if language == Language::Php {
        body.push_str("}\n");
    }

    TargetArtifact {
        language,
        header: header.join("\n"),
        body,
        path: dir.join(format!("{}.{}", inheritance.class_name(), language.extension())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_artifact_layout() {
        let inheritance = Inheritance::new("btcbox", "ccxt.btcbox").unwrap();
        let artifact = assemble(
            Language::Python,
            &inheritance,
            "    def describe(self):\n        return 1\n",
            Path::new("out"),
        );

        assert_eq!(artifact.path, Path::new("out").join("btcbox.py"));
        let contents = artifact.contents();
        assert!(contents.starts_with("# -*- coding: utf-8 -*-\n"));
        assert!(contents.contains(
            "import ccxt.async_support as ccxt\n\n\nclass btcbox(Exchange, ccxt.btcbox):\n\n    def describe(self):"
        ));
        assert!(contents.ends_with("return 1\n"));
    }

    #[test]
    fn test_php_artifact_closes_class() {
        let inheritance = Inheritance::new("btcbox", "ccxt.btcbox").unwrap();
        let artifact = assemble(
            Language::Php,
            &inheritance,
            "    public function describe() {\n    }\n",
            Path::new("php"),
        );

        assert_eq!(artifact.path, Path::new("php").join("btcbox.php"));
        let contents = artifact.contents();
        assert!(contents.contains("use Exception; // a common import\n\nclass btcbox extends \\ccxt\\btcbox {"));
        assert!(contents.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_header_precedes_class_content() {
        let inheritance = Inheritance::new("foo", "bar").unwrap();
        for language in [Language::Python, Language::Python2, Language::Php] {
            let artifact = assemble(language, &inheritance, "", Path::new("."));
            let contents = artifact.contents();
            let class_at = contents.find("class foo").unwrap();
            let last_import = contents
                .rfind("import")
                .or_else(|| contents.rfind("use "))
                .unwrap();
            assert!(last_import < class_at, "{}", language);
        }
    }

    #[test]
    fn test_empty_python_class_gets_pass() {
        let inheritance = Inheritance::new("empty", "ccxt.empty").unwrap();
        for language in [Language::Python, Language::Python2] {
            let contents = assemble(language, &inheritance, "\n  \n", Path::new(".")).contents();
            assert!(
                contents.ends_with("class empty(Exchange, ccxt.empty):\n\n    pass\n"),
                "{}",
                language
            );
        }

        let php = assemble(Language::Php, &inheritance, "", Path::new(".")).contents();
        assert!(php.ends_with("    use ClientTrait;\n\n\n}\n"));
    }
}
