//! Command implementations
//!
//! Every command is an `impl Repository` block writing to the repository's
//! writer:
//!
//! - `porcelain`: the browsing views (`tree`, `log`, `summary`)

pub mod porcelain;
