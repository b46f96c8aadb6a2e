//! throbac-ast — Arbre syntaxique Throbac et son frontal.
//!
//! ## Modules
//! - `tree`   : arène de nœuds (`Tree`, `NodeId`, `NodeKind`).
//! - `lexer`  : tokens (numéraux pointés, chaînes `^…^`, mots-clés latins).
//! - `parser` : descente récursive depuis n’importe quelle règle d’entrée (`StartRule`).
//! - `walk`   : parcours post-ordre + trait `Listener`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use thiserror::Error;

pub mod lexer;
pub mod parser;
pub mod tree;
pub mod walk;

pub use parser::{parse, StartRule};
pub use tree::{Node, NodeId, NodeKind, Span, Tree};
pub use walk::{walk, walk_from, Listener};

/// Première erreur de lexing/parsing rencontrée (pas de reprise).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{span}: {message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self { span, message: message.into() }
    }
}
