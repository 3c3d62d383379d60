//! Query template parsing.
//!
//! A template is plain SQL with embedded markers:
//!
//! | marker | consumes |
//! |---|---|
//! | `?` | the next argument if one is left over, rendered by its own kind |
//! | `?d` / `?f` | one argument, cast to integer / float |
//! | `?a` | one sequence or mapping |
//! | `?#` | one identifier or list of identifiers |
//! | `??d` / `??f` | like `?d` / `?f`, only valid inside `{ ... }` |
//!
//! A bare `?` never takes an argument that a later typed marker needs: it
//! only consumes when more arguments remain than the typed markers after it
//! (in blocks or not) will take, and renders `NULL` otherwise.
//!
//! `{ ... }` is a conditional block holding at most one `??d` / `??f`. The
//! block is governed by that skip marker, or failing one by its only
//! placeholder; when the governing argument is
//! [`Value::Skip`](crate::Value::Skip) the whole block is dropped. A block with
//! several placeholders and no skip marker is always kept.
//!
//! Templates go through two passes before rendering: [`scan`] builds a token
//! tree and [`resolve`] flattens it, deciding which blocks survive.

mod resolver;
mod scanner;


pub use resolver::{Resolved, resolve};
pub use scanner::scan;

/// Kind of a placeholder marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `?`
    Generic,
    /// `?d`
    Int,
    /// `?f`
    Float,
    /// `?a`
    Array,
    /// `?#`
    Ident,
    /// `??d`
    SkipInt,
    /// `??f`
    SkipFloat,
}

impl PlaceholderKind {
    /// The marker as written in a template.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "?",
            Self::Int => "?d",
            Self::Float => "?f",
            Self::Array => "?a",
            Self::Ident => "?#",
            Self::SkipInt => "??d",
            Self::SkipFloat => "??f",
        }
    }

    /// Byte length of the marker.
    pub fn width(self) -> usize {
        self.as_str().len()
    }

    /// Whether the marker is only valid inside a block.
    pub fn is_skip_marker(self) -> bool {
        matches!(self, Self::SkipInt | Self::SkipFloat)
    }

    /// The marker a kept block renders its skip marker as.
    pub fn unskipped(self) -> Self {
        match self {
            Self::SkipInt => Self::Int,
            Self::SkipFloat => Self::Float,
            other => other,
        }
    }

    /// Whether the marker always takes one argument. Only `?` may go without.
    pub fn is_typed(self) -> bool {
        self != Self::Generic
    }
}

/// A placeholder marker and its byte offset in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub offset: usize,
}

/// A `{ ... }` span. Holds only text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Offset of the opening brace.
    pub offset: usize,
    pub tokens: Vec<Token<'a>>,
}

impl Block<'_> {
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Placeholder(p) => Some(*p),
            _ => None,
        })
    }

    /// The `??d` / `??f` marker of the block, if any.
    pub fn skip_marker(&self) -> Option<Placeholder> {
        self.placeholders().find(|p| p.kind.is_skip_marker())
    }

    /// The marker that decides whether the block is kept: its skip marker,
    /// else its only placeholder. `None` means the block is always kept.
    pub fn marker(&self) -> Option<Placeholder> {
        if let Some(marker) = self.skip_marker() {
            return Some(marker);
        }
        let mut placeholders = self.placeholders();
        match (placeholders.next(), placeholders.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

/// Number of typed markers in `tokens`, blocks included.
pub(crate) fn typed_markers(tokens: &[Token<'_>]) -> usize {
    tokens
        .iter()
        .map(|t| match t {
            Token::Text(_) => 0,
            Token::Placeholder(p) => usize::from(p.kind.is_typed()),
            Token::Block(block) => typed_markers(&block.tokens),
        })
        .sum()
}

/// A scanned template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Placeholder(Placeholder),
    Block(Block<'a>),
}
