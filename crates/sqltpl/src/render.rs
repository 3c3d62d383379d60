//! Placeholder substitution.

use crate::config::BuildConfig;
use crate::cursor::Cursor;
use crate::error::{BuildError, BuildResult};
use crate::escape::{self, NULL};
use crate::template::{self, Placeholder, PlaceholderKind, Resolved};
use crate::value::Value;

/// Output of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub sql: String,
    /// Number of arguments consumed, including those of dropped blocks.
    pub consumed: usize,
}

/// Scan, resolve and render `template` against `args`.
pub fn build(template: &str, args: &[Value], config: &BuildConfig) -> BuildResult<Rendered> {
    let tokens = template::scan(template)?;
    let resolved = template::resolve(&tokens, args);
    render(&resolved, args, config, template.len())
}

/// Render a resolved token stream.
///
/// `end_offset` is reported when strict mode rejects surplus arguments.
pub fn render(
    resolved: &[Resolved<'_>],
    args: &[Value],
    config: &BuildConfig,
    end_offset: usize,
) -> BuildResult<Rendered> {
    let mut cursor = Cursor::new(args);
    let mut sql = String::with_capacity(end_offset + 8 * args.len());

    for token in resolved {
        match token {
            Resolved::Text(text) => sql.push_str(text),
            Resolved::Placeholder(p) => write_placeholder(&mut sql, *p, &mut cursor)?,
            Resolved::Null(_) => sql.push_str(NULL),
            Resolved::Discard { args, .. } => cursor.advance(*args),
        }
    }

    if config.strict_arguments && cursor.remaining() > 0 {
        return Err(BuildError::argument(
            end_offset,
            format!(
                "{} argument(s) supplied but only {} used",
                args.len(),
                cursor.consumed()
            ),
        ));
    }

    Ok(Rendered {
        sql,
        consumed: cursor.consumed(),
    })
}

fn write_placeholder(
    out: &mut String,
    p: Placeholder,
    cursor: &mut Cursor<'_>,
) -> BuildResult<()> {
    let value = cursor.take_next(p.offset, p.kind.as_str())?;
    reject_skip(value, p)?;

    match p.kind {
        PlaceholderKind::Generic => escape::write_scalar(out, value, p.offset),
        PlaceholderKind::Int | PlaceholderKind::SkipInt => {
            escape::write_int(out, value);
            Ok(())
        }
        PlaceholderKind::Float | PlaceholderKind::SkipFloat => {
            escape::write_float(out, value, p.offset)
        }
        PlaceholderKind::Array => escape::write_array(out, value, p.offset),
        PlaceholderKind::Ident => escape::write_idents(out, value, p.offset),
    }
}

/// The skip sentinel only means something as the argument of a block marker.
fn reject_skip(value: &Value, p: Placeholder) -> BuildResult<()> {
    if value.is_skip() {
        return Err(BuildError::type_mismatch(
            p.offset,
            format!(
                "skip sentinel passed to '{}' outside a conditional block",
                p.kind.as_str()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::skip;

    fn ph(kind: PlaceholderKind, offset: usize) -> Placeholder {
        Placeholder { kind, offset }
    }

    #[test]
    fn discard_advances_without_rendering() {
        let resolved = [
            Resolved::Text("a="),
            Resolved::Discard {
                marker: ph(PlaceholderKind::Int, 2),
                args: 1,
            },
            Resolved::Text(" b="),
            Resolved::Placeholder(ph(PlaceholderKind::Int, 7)),
        ];
        let args = [skip(), Value::Int(5)];
        let out = render(&resolved, &args, &BuildConfig::default(), 9).unwrap();
        assert_eq!(out.sql, "a= b=5");
        assert_eq!(out.consumed, 2);
    }

    #[test]
    fn skip_marker_renders_like_its_real_marker() {
        let resolved = [Resolved::Placeholder(ph(PlaceholderKind::SkipFloat, 0))];
        let out = render(&resolved, &[Value::from("2.5")], &BuildConfig::default(), 3).unwrap();
        assert_eq!(out.sql, "2.5");
    }

    #[test]
    fn build_reports_consumed_count() {
        let args = [Value::Int(1), skip(), Value::Int(3), Value::Int(4)];
        let out = build("?d{ ??d} ?", &args, &BuildConfig::default()).unwrap();
        assert_eq!(out.sql, "1 3");
        assert_eq!(out.consumed, 3);
    }

    #[test]
    fn discard_advances_past_every_block_argument() {
        let resolved = [
            Resolved::Discard {
                marker: ph(PlaceholderKind::SkipInt, 0),
                args: 2,
            },
            Resolved::Null(ph(PlaceholderKind::Generic, 12)),
            Resolved::Placeholder(ph(PlaceholderKind::Int, 14)),
        ];
        let args = [Value::Int(1), skip(), Value::Int(3)];
        let out = render(&resolved, &args, &BuildConfig::default(), 16).unwrap();
        assert_eq!(out.sql, "NULL3");
        assert_eq!(out.consumed, 3);
    }

    #[test]
    fn bare_marker_yields_to_later_typed_marker() {
        let out = build("?, ?d", &[Value::Int(5)], &BuildConfig::default()).unwrap();
        assert_eq!(out.sql, "NULL, 5");
        assert_eq!(out.consumed, 1);
    }

    #[test]
    fn strict_mode_reports_end_offset() {
        let config = BuildConfig::new().with_strict_arguments();
        let err = build("SELECT 1", &[Value::Null], &config).unwrap_err();
        assert!(err.is_argument());
        assert_eq!(err.offset(), 8);
    }
}
