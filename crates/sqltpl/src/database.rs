//! The query builder entry point.
//!
//! [`Database`] turns a template plus arguments into a MySQL string. It never
//! holds a connection: the caller hands the result to whatever driver it
//! already uses.
//!
//! # Example
//!
//! ```ignore
//! use sqltpl::{args, BuildConfig, Database, QueryBuilder};
//!
//! let db = Database::with_config(BuildConfig::new().with_strict_arguments());
//! let sql = db.build_query(
//!     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!     &args!["user_id", vec![1, 2, 3], db.skip()],
//! )?;
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)");
//! ```

use crate::config::BuildConfig;
use crate::error::BuildResult;
use crate::render;
use crate::value::Value;

/// Builds SQL strings from templates.
pub trait QueryBuilder {
    /// Substitute `args` into `template`.
    fn build_query(&self, template: &str, args: &[Value]) -> BuildResult<String>;

    /// The value that drops the conditional block it is passed to.
    fn skip(&self) -> Value {
        Value::Skip
    }
}

/// Template-based MySQL query builder.
#[derive(Debug, Clone, Default)]
pub struct Database {
    config: BuildConfig,
}

impl Database {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }
}

impl QueryBuilder for Database {
    fn build_query(&self, template: &str, args: &[Value]) -> BuildResult<String> {
        match render::build(template, args, &self.config) {
            Ok(rendered) => {
                #[cfg(feature = "tracing")]
                crate::trace::built(&self.config, args.len(), &rendered);
                Ok(rendered.sql)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                crate::trace::failed(&self.config, template, args.len(), &err);
                Err(err)
            }
        }
    }
}

impl<T: QueryBuilder + ?Sized> QueryBuilder for &T {
    fn build_query(&self, template: &str, args: &[Value]) -> BuildResult<String> {
        (**self).build_query(template, args)
    }

    fn skip(&self) -> Value {
        (**self).skip()
    }
}
