// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The parsed command: an ordered token list plus the flattened
//! `{path, command, pparams, kparams}` view the dispatcher and
//! completion engine both work from.

use crate::lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// One keyword parameter as `(keyword, value)`, with the span covering
/// the whole `keyword=value` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordParam {
    pub keyword: String,
    pub value: String,
    pub span: Span,
}

/// An immutable record produced by [`parse`]: the ordered token spans
/// over the input, plus the flattened view used by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub tokens: Vec<Token>,
    pub path: Option<Token>,
    pub command: Option<Token>,
    pub pparams: Vec<Token>,
    pub kparams: Vec<Token>,
    /// Byte offset of the first byte `tokenize` could not classify, if
    /// the line was only a valid prefix.
    pub unparsed_offset: Option<usize>,
}

impl ParsedCommand {
    pub fn path_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.path.as_ref().map(|t| t.text(source))
    }

    pub fn command_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.command.as_ref().map(|t| t.text(source))
    }

    pub fn pparam_texts<'a>(&self, source: &'a str) -> Vec<&'a str> {
        self.pparams.iter().map(|t| t.text(source)).collect()
    }

    pub fn kparams_parsed<'a>(&self, source: &'a str) -> Vec<KeywordParam> {
        self.kparams
            .iter()
            .map(|t| {
                let TokenKind::KParam { keyword_end } = t.kind else {
                    unreachable!("kparams only ever holds KParam tokens")
                };
                let keyword = source[t.span.start..keyword_end].to_string();
                let value = source[keyword_end + 1..t.span.end].to_string();
                KeywordParam {
                    keyword,
                    value,
                    span: t.span,
                }
            })
            .collect()
    }

    /// The token whose span is exactly `[start, end)`, if any — used by
    /// the completion engine to locate the token under the cursor.
    pub fn token_at(&self, start: usize, end: usize) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.span.start == start && t.span.end == end)
    }
}

/// Tokenize `input` into a [`ParsedCommand`].
///
/// An empty token list on a non-empty line means "no actionable
/// command" — callers should treat it the same as an empty line.
pub fn parse(input: &str) -> ParsedCommand {
    let (tokens, unparsed_offset) = lexer::tokenize(input);

    let mut path = None;
    let mut command = None;
    let mut pparams = Vec::new();
    let mut kparams = Vec::new();

    for token in &tokens {
        match token.kind {
            TokenKind::Path => path = Some(token.clone()),
            TokenKind::Command => command = Some(token.clone()),
            TokenKind::PParam => pparams.push(token.clone()),
            TokenKind::KParam { .. } => kparams.push(token.clone()),
        }
    }

    ParsedCommand {
        tokens,
        path,
        command,
        pparams,
        kparams,
        unparsed_offset,
    }
}

#[cfg(test)]
#[path = "ast_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "ast_properties_tests.rs"]
mod properties_tests;
