//! Lexer for prftree markup using logos

use logos::Logos;
use std::fmt;

/// Token types for prftree markup
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'src> {
    #[token("\\prftree")]
    PrfTree,
    #[token("\\prfsummary")]
    PrfSummary,

    // Any other control word, kept verbatim inside field text
    #[regex(r"\\[a-zA-Z]+", |lex| lex.slice())]
    Command(&'src str),

    // Escaped symbol such as \{ or \\
    #[regex(r"\\[^a-zA-Z]", |lex| lex.slice())]
    Escape(&'src str),

    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[regex(r"[^\\\[\]{} \t\r\n]+", |lex| lex.slice())]
    Text(&'src str),
}

impl<'src> Token<'src> {
    /// Whether this token opens a node
    pub fn is_node_command(&self) -> bool {
        matches!(self, Token::PrfTree | Token::PrfSummary)
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::PrfTree => write!(f, "\\prftree"),
            Token::PrfSummary => write!(f, "\\prfsummary"),
            Token::Command(c) => write!(f, "command {}", c),
            Token::Escape(e) => write!(f, "escape {}", e),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Text(t) => write!(f, "text '{}'", t),
        }
    }
}

/// Span information for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

/// A token with its span
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone)]
pub struct LexError {
    pub span: TokenSpan,
    pub message: String,
}

/// Lex markup into tokens with spans
pub fn lex(source: &str) -> impl Iterator<Item = Result<SpannedToken<'_>, LexError>> + '_ {
    Token::lexer(source).spanned().map(|(result, span)| {
        let span = TokenSpan {
            start: span.start,
            end: span.end,
        };
        match result {
            Ok(token) => Ok(SpannedToken { token, span }),
            Err(_) => Err(LexError {
                span,
                message: "Dangling backslash".to_string(),
            }),
        }
    })
}
