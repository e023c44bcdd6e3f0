use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Locations of the order-book test fixture and its generated counterparts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Hand-written order-book test.
    #[serde(default = "default_order_book")]
    pub order_book: PathBuf,

    #[serde(default = "default_python_output")]
    pub python_output: PathBuf,

    #[serde(default = "default_php_output")]
    pub php_output: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            order_book: default_order_book(),
            python_output: default_python_output(),
            php_output: default_php_output(),
        }
    }
}

fn default_order_book() -> PathBuf {
    PathBuf::from("./js/test/base/test.OrderBook.js")
}

fn default_python_output() -> PathBuf {
    PathBuf::from("./python/test/test_order_book.py")
}

fn default_php_output() -> PathBuf {
    PathBuf::from("./php/test/OrderBook.php")
}
