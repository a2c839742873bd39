//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::LettersConfig;
pub use site::SiteConfig;
