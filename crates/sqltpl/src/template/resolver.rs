use super::{Block, Placeholder, Token, typed_markers};
use crate::cursor::Cursor;
use crate::value::Value;

/// A token after block resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Text(&'a str),
    /// A placeholder whose argument is next at the cursor.
    Placeholder(Placeholder),
    /// A bare `?` left without an argument; renders `NULL`.
    Null(Placeholder),
    /// A dropped block, governed by `marker`. Its `args` arguments are
    /// consumed but nothing is rendered.
    Discard { marker: Placeholder, args: usize },
}

/// Decide which blocks survive, which `?` take an argument, and flatten the
/// token tree.
///
/// Walks the tokens with a copy of the cursor the renderer will use, advancing
/// it exactly as rendering does, so each block peeks at the argument that
/// belongs to its own governing marker:
///
/// - a typed marker always takes one argument;
/// - a bare `?` takes one only while more arguments remain than the typed
///   markers after it need, and becomes [`Resolved::Null`] otherwise;
/// - a block whose governing argument is [`Value::Skip`] becomes a single
///   [`Resolved::Discard`] covering every argument the block would take;
/// - any other block is kept, with `??d` / `??f` rewritten to `?d` / `?f`.
///
/// A kept block whose argument is missing is left for the renderer to report.
pub fn resolve<'a>(tokens: &[Token<'a>], args: &[Value]) -> Vec<Resolved<'a>> {
    let mut resolver = Resolver {
        cursor: Cursor::new(args),
        demand: typed_markers(tokens),
    };
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        resolver.token(token, &mut out);
    }
    out
}

struct Resolver<'v> {
    cursor: Cursor<'v>,
    /// Typed markers not yet passed; each will need one argument.
    demand: usize,
}

impl Resolver<'_> {
    fn token<'a>(&mut self, token: &Token<'a>, out: &mut Vec<Resolved<'a>>) {
        match token {
            Token::Text(text) => out.push(Resolved::Text(*text)),
            Token::Placeholder(p) => out.push(self.placeholder(*p)),
            Token::Block(block) => self.block(block, out),
        }
    }

    fn placeholder<'a>(&mut self, p: Placeholder) -> Resolved<'a> {
        if p.kind.is_typed() {
            self.demand = self.demand.saturating_sub(1);
        } else if self.cursor.remaining() <= self.demand {
            return Resolved::Null(p);
        }
        self.cursor.advance(1);
        Resolved::Placeholder(Placeholder {
            kind: p.kind.unskipped(),
            offset: p.offset,
        })
    }

    fn block<'a>(&mut self, block: &Block<'a>, out: &mut Vec<Resolved<'a>>) {
        let governing = block.marker();
        let start = self.cursor.consumed();
        let mut skipped = false;
        let mut kept = Vec::with_capacity(block.tokens.len());

        for token in &block.tokens {
            match token {
                Token::Placeholder(p) if Some(*p) == governing => {
                    let arg_is_skip = self.cursor.peek().is_some_and(Value::is_skip);
                    let resolved = self.placeholder(*p);
                    skipped = arg_is_skip && matches!(resolved, Resolved::Placeholder(_));
                    kept.push(resolved);
                }
                token => self.token(token, &mut kept),
            }
        }

        match governing {
            Some(marker) if skipped => out.push(Resolved::Discard {
                marker,
                args: self.cursor.consumed() - start,
            }),
            _ => out.extend(kept),
        }
    }
}
