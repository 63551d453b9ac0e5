//! # Markup Reader
//!
//! Parses prftree markup back into a [`ProofTree`]. This is the inverse of
//! the serializer up to identifiers and validity: every node and field gets
//! a fresh ID from the supplied generator and parent links are rebuilt.
//!
//! Grammar:
//!
//! ```text
//! node       := ("\prftree" option* | "\prfsummary" ("[" text "]")?) group+
//! option     := "[double]" | "[noline]" | "[dotted]" | "[dashed]"
//!             | "[l]" "{" text "}" | "[r]" "{" text "}"
//! group      := "{" node "}"            -- assumption
//!             | "{" text "}"            -- conclusion, must be last
//! ```

use crate::ast::{LineStyle, Node, NodeId, ProofTree};
use crate::error::{ParseError, ParseResult};
use crate::id_generator::IdGenerator;
use crate::lexer::{lex, SpannedToken, Token, TokenSpan};
use tracing::debug;

/// Parse markup into a tree, drawing IDs from `ids`
pub fn read_markup(source: &str, ids: &mut IdGenerator) -> ParseResult<ProofTree> {
    let mut tokens = Vec::new();
    for result in lex(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => {
                return Err(ParseError::LexError {
                    span: err.span,
                    message: err.message,
                })
            }
        }
    }

    let mut reader = Reader {
        source,
        tokens,
        pos: 0,
        ids,
    };

    let root = reader.parse_node(None)?;
    if let Some(extra) = reader.peek() {
        return Err(ParseError::UnexpectedToken {
            span: extra.span,
            expected: "end of input".to_string(),
            found: extra.token.to_string(),
        });
    }

    let tree = ProofTree::from_root(root);
    debug!(nodes = tree.node_count(), "Read prftree markup");
    Ok(tree)
}

struct Reader<'src, 'ids> {
    source: &'src str,
    tokens: Vec<SpannedToken<'src>>,
    pos: usize,
    ids: &'ids mut IdGenerator,
}

impl<'src, 'ids> Reader<'src, 'ids> {
    fn peek(&self) -> Option<&SpannedToken<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token<'src>> {
        self.peek().map(|t| t.token)
    }

    fn next(&mut self) -> Option<SpannedToken<'src>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token<'src>) -> ParseResult<TokenSpan> {
        match self.next() {
            Some(t) if t.token == expected => Ok(t.span),
            Some(t) => Err(ParseError::UnexpectedToken {
                span: t.span,
                expected: expected.to_string(),
                found: t.token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    fn parse_node(&mut self, parent_id: Option<NodeId>) -> ParseResult<Node> {
        let head = self.next().ok_or_else(|| ParseError::UnexpectedEof {
            expected: "\\prftree or \\prfsummary".to_string(),
        })?;

        let mut node = Node::blank(self.ids, parent_id);

        match head.token {
            Token::PrfTree => self.parse_tree_options(&mut node)?,
            Token::PrfSummary => {
                node.line_style = LineStyle::None;
                node.line_doubled = true;
                if self.peek_token() == Some(Token::LBracket) {
                    let (text, _) = self.bracketed()?;
                    node.rule_name.value = text.trim().to_string();
                }
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    span: head.span,
                    expected: "\\prftree or \\prfsummary".to_string(),
                    found: other.to_string(),
                })
            }
        }

        loop {
            let open = self.expect(Token::LBrace)?;

            if self.peek_token().is_some_and(|t| t.is_node_command()) {
                let child = self.parse_node(Some(node.id.clone()))?;
                self.expect(Token::RBrace)?;
                node.assumptions.push(child);
                continue;
            }

            let text = self.balanced_text(open)?;
            node.conclusion.value = strip_padding(text).to_string();
            break;
        }

        Ok(node)
    }

    fn parse_tree_options(&mut self, node: &mut Node) -> ParseResult<()> {
        while self.peek_token() == Some(Token::LBracket) {
            let (option, span) = self.bracketed()?;
            match option.trim() {
                "double" => node.line_doubled = true,
                "noline" => node.line_style = LineStyle::None,
                "dotted" => node.line_style = LineStyle::Dotted,
                "dashed" => node.line_style = LineStyle::Dashed,
                "l" => {
                    let open = self.expect(Token::LBrace)?;
                    node.label.value = self.balanced_text(open)?.to_string();
                }
                "r" => {
                    let open = self.expect(Token::LBrace)?;
                    node.rule_name.value = self.balanced_text(open)?.to_string();
                }
                other => {
                    return Err(ParseError::UnknownOption {
                        span,
                        option: other.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Read `[ ... ]` and return its raw contents and full span
    fn bracketed(&mut self) -> ParseResult<(&'src str, TokenSpan)> {
        let source = self.source;
        let open = self.expect(Token::LBracket)?;
        let mut depth = 0usize;

        while let Some(t) = self.next() {
            match t.token {
                Token::LBrace => depth += 1,
                Token::RBrace if depth == 0 => {
                    return Err(ParseError::UnexpectedToken {
                        span: t.span,
                        expected: "]".to_string(),
                        found: t.token.to_string(),
                    })
                }
                Token::RBrace => depth -= 1,
                Token::RBracket if depth == 0 => {
                    let span = TokenSpan {
                        start: open.start,
                        end: t.span.end,
                    };
                    return Ok((&source[open.end..t.span.start], span));
                }
                _ => {}
            }
        }

        Err(ParseError::UnexpectedEof {
            expected: "]".to_string(),
        })
    }

    /// Consume tokens up to the brace matching `open` and return the raw text between
    fn balanced_text(&mut self, open: TokenSpan) -> ParseResult<&'src str> {
        let source = self.source;
        let mut depth = 0usize;

        while let Some(t) = self.next() {
            match t.token {
                Token::LBrace => depth += 1,
                Token::RBrace if depth == 0 => {
                    return Ok(&source[open.end..t.span.start]);
                }
                Token::RBrace => depth -= 1,
                Token::PrfTree | Token::PrfSummary => {
                    return Err(ParseError::UnexpectedToken {
                        span: t.span,
                        expected: "text".to_string(),
                        found: t.token.to_string(),
                    })
                }
                _ => {}
            }
        }

        Err(ParseError::UnexpectedEof {
            expected: "}".to_string(),
        })
    }
}

/// Drop the single space the serializer puts on each side of a conclusion
fn strip_padding(text: &str) -> &str {
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.strip_suffix(' ').unwrap_or(text)
}
