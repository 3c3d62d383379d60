//! # sqltpl
//!
//! Build MySQL statements from templates with typed placeholders.
//!
//! ## Features
//!
//! - **Typed placeholders**: `?` (by value), `?d` (integer), `?f` (float),
//!   `?a` (list or `key = value` pairs), `?#` (identifiers)
//! - **Injection-safe escaping**: string literals and backtick identifiers
//!   are escaped, never concatenated raw
//! - **Conditional blocks**: `{ ... }` is dropped when its argument is [`skip()`]
//! - **No connection**: the output is a plain `String` for any MySQL driver
//!
//! ```ignore
//! use sqltpl::{args, build_query, skip};
//!
//! let sql = build_query(
//!     "SELECT ?# FROM users WHERE user_id = ?d{ AND block = ?d}",
//!     &args![vec!["name", "email"], 2, skip()],
//! )?;
//! assert_eq!(sql, "SELECT `name`, `email` FROM users WHERE user_id = 2");
//! ```

pub mod config;
mod cursor;
pub mod database;
pub mod error;
pub mod escape;
pub mod render;
pub mod template;
pub mod value;

#[cfg(feature = "tracing")]
mod trace;

pub use config::BuildConfig;
pub use database::{Database, QueryBuilder};
pub use error::{BuildError, BuildResult};
pub use escape::{quote_ident, quote_literal};
pub use render::Rendered;
pub use value::{Value, skip};

/// Substitute `args` into `template` with the default [`BuildConfig`].
///
/// See [`template`] for the placeholder syntax.
pub fn build_query(template: &str, args: &[Value]) -> BuildResult<String> {
    Database::new().build_query(template, args)
}
