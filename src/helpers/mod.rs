//! Helper functions shared by page assembly and the CLI

mod date;
mod url;

pub use date::*;
pub use url::*;
