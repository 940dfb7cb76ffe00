//! Terminal interaction: warnings and line-based prompts.

pub mod prompt;
pub mod warn;
