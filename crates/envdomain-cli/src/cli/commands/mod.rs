//! CLI command handlers, one per file.

mod classify;
mod plaza;
mod rewrite;
mod table;

pub use classify::run_classify;
pub use plaza::run_plaza;
pub use rewrite::run_rewrite;
pub use table::run_table;
