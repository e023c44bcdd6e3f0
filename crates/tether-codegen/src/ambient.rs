//! Regeneration of the ambient TypeScript declarations.
//!
//! The generated region is the first run of `    export declare class X extends Y {}` lines
//! that directly follows a blank line. It has no markers of its own, so a file whose layout no
//! longer contains such a run is reported as drift.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tether_core::{ClassMap, Result, TetherError};

use crate::fs::replace_in_file;

static GENERATED_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\n(?:    export declare class \S+ extends \S+ \{\}\r?\n)+").unwrap()
});

/// Render the generated region for `classes`, including the leading blank line.
pub fn render_declarations(classes: &ClassMap) -> String {
    let mut out = String::from("\n\n");
    for (class_name, base_class) in classes.iter() {
        out.push_str(&format!(
            "    export declare class {} extends {} {{}}\n",
            class_name, base_class
        ));
    }
    out
}

/// Replace the generated region of `path` with declarations for `classes`.
pub fn export_declarations(path: &Path, classes: &ClassMap) -> Result<()> {
    if classes.is_empty() {
        return Err(TetherError::Config(format!(
            "Refusing to export an empty class map to {}",
            path.display()
        )));
    }

    tracing::info!("Exporting TypeScript declarations → {}", path.display());
    replace_in_file(path, &GENERATED_REGION, &render_declarations(classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DECLARATIONS: &str = "declare module 'ccxt.pro' {

    export const version: string;

    // ---------------------------------------------------------------------------

    export declare class binance extends Exchange {}
    export declare class old extends Exchange {}

    export declare class Exchange extends ccxt.Exchange {
        watchTicker (symbol: string): Promise<Ticker>;
    }
}
";

    fn classes() -> ClassMap {
        [("A", "X"), ("B", "Y")].into_iter().collect()
    }

    #[test]
    fn test_render_in_map_order() {
        assert_eq!(
            render_declarations(&classes()),
            "\n\n    export declare class A extends X {}\n    export declare class B extends Y {}\n"
        );
    }

    #[test]
    fn test_export_replaces_region() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ccxt.pro.d.ts");
        std::fs::write(&file, DECLARATIONS).unwrap();

        export_declarations(&file, &classes()).unwrap();

        let output = std::fs::read_to_string(&file).unwrap();
        assert!(output.contains(
            "// ---------------------------------------------------------------------------\n\n    export declare class A extends X {}\n    export declare class B extends Y {}\n\n    export declare class Exchange extends ccxt.Exchange {\n"
        ));
        assert!(!output.contains("binance"));
        assert!(!output.contains("class old"));
        assert_eq!(output.matches("export declare class").count(), 3);
    }

    #[test]
    fn test_export_is_idempotent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ccxt.pro.d.ts");
        std::fs::write(&file, DECLARATIONS).unwrap();

        export_declarations(&file, &classes()).unwrap();
        let first = std::fs::read(&file).unwrap();
        export_declarations(&file, &classes()).unwrap();
        let second = std::fs::read(&file).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_crlf_region_is_matched() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.d.ts");
        std::fs::write(&file, "x\n\n    export declare class a extends b {}\r\n}\n").unwrap();

        export_declarations(&file, &classes()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "x\n\n    export declare class A extends X {}\n    export declare class B extends Y {}\n}\n"
        );
    }

    #[test]
    fn test_missing_anchor_is_drift() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ccxt.pro.d.ts");
        let drifted = DECLARATIONS.replace(
            "\n\n    export declare class binance",
            "\n    export declare class binance",
        );
        std::fs::write(&file, &drifted).unwrap();

        let err = export_declarations(&file, &classes()).unwrap_err();
        assert!(err.is_drift());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), drifted);
    }

    #[test]
    fn test_empty_map_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ccxt.pro.d.ts");
        std::fs::write(&file, DECLARATIONS).unwrap();

        let err = export_declarations(&file, &ClassMap::new()).unwrap_err();
        assert!(matches!(err, TetherError::Config(_)));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), DECLARATIONS);
    }
}
