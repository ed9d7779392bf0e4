//! CLI command handlers. Each command is in its own file.

mod output;
mod parse;
mod send;
mod url;

pub use parse::run_parse;
pub use send::run_send;
pub use url::run_url;
