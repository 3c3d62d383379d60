//! `tracing` events for built statements.
//!
//! Enable via the crate feature: `sqltpl = { features = ["tracing"] }`.

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::render::Rendered;

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn truncate_sql(config: &BuildConfig, sql: &str) -> String {
    match config.max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

pub(crate) fn built(config: &BuildConfig, arg_count: usize, rendered: &Rendered) {
    tracing::debug!(
        target: "sqltpl.sql",
        arg_count,
        consumed = rendered.consumed,
        sql = %truncate_sql(config, &rendered.sql),
    );
}

pub(crate) fn failed(config: &BuildConfig, template: &str, arg_count: usize, err: &BuildError) {
    tracing::debug!(
        target: "sqltpl.error",
        arg_count,
        offset = err.offset(),
        template = %truncate_sql(config, template),
        error = %err,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_backs_off_to_char_boundary() {
        assert_eq!(truncate_sql_bytes("abc", 10), "abc");
        assert_eq!(truncate_sql_bytes("abcdef", 3), "abc");
        // 'é' is two bytes; cutting inside it must not panic.
        assert_eq!(truncate_sql_bytes("aé", 2), "a");
    }

    #[test]
    fn truncate_respects_config() {
        let config = BuildConfig::new().max_sql_length(4);
        assert_eq!(truncate_sql(&config, "SELECT 1"), "SELE...");
        assert_eq!(truncate_sql(&config.no_truncate(), "SELECT 1"), "SELECT 1");
    }
}
