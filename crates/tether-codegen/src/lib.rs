pub mod ambient;
pub mod artifact;
pub mod declaration;
pub mod derived;
pub mod discovery;
pub mod fs;
pub mod header;
pub mod order_book;
pub mod rewrite;
pub mod transpiler;

pub use ambient::export_declarations;
pub use declaration::build_declaration;
pub use derived::transpile_derived_files;
pub use header::build_header;
pub use order_book::OrderBookTestTranspiler;
pub use rewrite::{RewriteEngine, RuleEngine, TranslateOptions, Translation};
pub use transpiler::{Outcome, Transpiler};
