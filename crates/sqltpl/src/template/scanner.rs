use super::{Block, Placeholder, PlaceholderKind, Token};
use crate::error::{BuildError, BuildResult};

/// Split a template into text, placeholders and blocks.
///
/// Markers are ASCII, so scanning bytes keeps every slice on a char boundary.
pub fn scan(template: &str) -> BuildResult<Vec<Token<'_>>> {
    Scanner::new(template).run()
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    /// Start of the literal text not yet emitted.
    text_start: usize,
    tokens: Vec<Token<'a>>,
    /// The block currently open, if any.
    block: Option<Block<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            text_start: 0,
            tokens: Vec::new(),
            block: None,
        }
    }

    fn run(mut self) -> BuildResult<Vec<Token<'a>>> {
        let input = self.input;
        let bytes = input.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b'?' => {
                    let kind = self.marker_kind()?;
                    self.flush_text();
                    let placeholder = Placeholder {
                        kind,
                        offset: self.pos,
                    };
                    self.pos += kind.width();
                    self.text_start = self.pos;
                    self.push_placeholder(placeholder)?;
                }
                b'{' => {
                    if let Some(open) = &self.block {
                        return Err(BuildError::template(
                            self.pos,
                            format!(
                                "nested block (enclosing block opened at offset {})",
                                open.offset
                            ),
                        ));
                    }
                    self.flush_text();
                    self.block = Some(Block {
                        offset: self.pos,
                        tokens: Vec::new(),
                    });
                    self.pos += 1;
                    self.text_start = self.pos;
                }
                b'}' => {
                    self.flush_text();
                    let Some(block) = self.block.take() else {
                        return Err(BuildError::template(self.pos, "unmatched '}'"));
                    };
                    self.tokens.push(Token::Block(block));
                    self.pos += 1;
                    self.text_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }

        if let Some(block) = &self.block {
            return Err(BuildError::template(block.offset, "unclosed block"));
        }
        self.flush_text();
        Ok(self.tokens)
    }

    /// Classify the marker starting at `self.pos` (which holds `?`).
    fn marker_kind(&self) -> BuildResult<PlaceholderKind> {
        let bytes = self.input.as_bytes();
        let kind = match bytes.get(self.pos + 1) {
            Some(b'd') => PlaceholderKind::Int,
            Some(b'f') => PlaceholderKind::Float,
            Some(b'a') => PlaceholderKind::Array,
            Some(b'#') => PlaceholderKind::Ident,
            Some(b'?') => match bytes.get(self.pos + 2) {
                Some(b'd') => PlaceholderKind::SkipInt,
                Some(b'f') => PlaceholderKind::SkipFloat,
                _ => {
                    return Err(BuildError::template(
                        self.pos,
                        "malformed skip marker, expected '??d' or '??f'",
                    ));
                }
            },
            _ => PlaceholderKind::Generic,
        };
        Ok(kind)
    }

    fn push_placeholder(&mut self, placeholder: Placeholder) -> BuildResult<()> {
        match &mut self.block {
            Some(block) => {
                // Typed markers may repeat; only the skip marker must be unique.
                let previous = block
                    .skip_marker()
                    .filter(|_| placeholder.kind.is_skip_marker());
                if let Some(first) = previous {
                    return Err(BuildError::template(
                        placeholder.offset,
                        format!(
                            "block opened at offset {} already has skip marker '{}' at offset {}",
                            block.offset,
                            first.kind.as_str(),
                            first.offset
                        ),
                    ));
                }
                block.tokens.push(Token::Placeholder(placeholder));
            }
            None => {
                if placeholder.kind.is_skip_marker() {
                    return Err(BuildError::template(
                        placeholder.offset,
                        format!(
                            "'{}' is only allowed inside a block",
                            placeholder.kind.as_str()
                        ),
                    ));
                }
                self.tokens.push(Token::Placeholder(placeholder));
            }
        }
        Ok(())
    }

    fn flush_text(&mut self) {
        if self.pos == self.text_start {
            return;
        }
        let text = Token::Text(&self.input[self.text_start..self.pos]);
        match &mut self.block {
            Some(block) => block.tokens.push(text),
            None => self.tokens.push(text),
        }
    }
}
