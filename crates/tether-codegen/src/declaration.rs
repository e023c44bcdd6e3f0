//! Class declaration lines per target language.

use tether_core::{Inheritance, Language};

/// Root abstract type every core-derived Python class also extends.
const PYTHON_ROOT_BASE: &str = "Exchange";

/// Trait mixed into every core-derived PHP class.
const PHP_CLIENT_TRAIT: &str = "ClientTrait";

/// Build the class declaration for `inheritance` in `language`.
///
/// The returned text opens the class body; for PHP the caller closes it.
pub fn build_declaration(language: Language, inheritance: &Inheritance) -> String {
    match language {
        Language::Python | Language::Python2 => python_declaration(inheritance),
        Language::Php => php_declaration(inheritance),
    }
}

fn python_declaration(inheritance: &Inheritance) -> String {
    let bases = if inheritance.is_core_derived() {
        format!("{}, {}", PYTHON_ROOT_BASE, inheritance.base_class_name())
    } else {
        inheritance.base_class_name().to_string()
    };
    format!("class {}({}):", inheritance.class_name(), bases)
}

fn php_declaration(inheritance: &Inheritance) -> String {
    if inheritance.is_core_derived() {
        format!(
            "class {} extends \\ccxt\\{} {{\n\n    use {};",
            inheritance.class_name(),
            inheritance.local_base_name(),
            PHP_CLIENT_TRAIT
        )
    } else {
        format!(
            "class {} extends {} {{",
            inheritance.class_name(),
            inheritance.base_class_name()
        )
    }
}
