//! Run driver: setup, transpile, export.

use std::path::PathBuf;

use tether_core::{ClassMap, GenerationOptions, NameFilter, Result, TetherConfig};

use crate::ambient::export_declarations;
use crate::derived::transpile_derived_files;
use crate::fs::create_folder_recursively;
use crate::order_book::OrderBookTestTranspiler;
use crate::rewrite::RewriteEngine;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No source file produced a class; declarations were left untouched.
    NothingToDo,
    /// Classes were transpiled and declarations exported.
    Transpiled { classes: ClassMap },
}

/// Drives one transpilation run.
pub struct Transpiler<E> {
    engine: E,
    options: GenerationOptions,
    order_book: OrderBookTestTranspiler,
    declarations: PathBuf,
}

impl<E: RewriteEngine> Transpiler<E> {
    pub fn new(
        engine: E,
        options: GenerationOptions,
        order_book: OrderBookTestTranspiler,
        declarations: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            options,
            order_book,
            declarations: declarations.into(),
        }
    }

    /// Build a transpiler from configuration and a file-name filter.
    pub fn from_config(engine: E, config: &TetherConfig, filter: NameFilter) -> Self {
        Self::new(
            engine,
            config.generation_options(filter),
            OrderBookTestTranspiler::from_config(&config.fixtures),
            &config.declarations.file,
        )
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Run every phase in order, stopping at the first fatal error.
    pub fn run(&self) -> Result<Outcome> {
        self.setup()?;

        let Some(classes) = self.transpile()? else {
            tracing::info!("0 files transpiled");
            return Ok(Outcome::NothingToDo);
        };

        export_declarations(&self.declarations, &classes)?;
        tracing::info!(classes = classes.len(), "Transpiled successfully");

        Ok(Outcome::Transpiled { classes })
    }

    fn setup(&self) -> Result<()> {
        for target in &self.options.targets {
            create_folder_recursively(&target.dir)?;
        }
        Ok(())
    }

    fn transpile(&self) -> Result<Option<ClassMap>> {
        self.order_book.transpile(&self.engine)?;
        transpile_derived_files(&self.engine, &self.options)
    }
}
