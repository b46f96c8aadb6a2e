//! error.rs — Erreurs du traducteur.
//!
//! Hors `Parse`, ce sont des erreurs de cohérence interne : l’arbre est supposé
//! valide, donc les voir remonter signale un défaut (ordre de parcours violé,
//! grammaire et traducteur désynchronisés).

use thiserror::Error;
use throbac_ast::{NodeId, ParseError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Source invalide (lexing/parsing).
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Fragment d’un enfant lu avant d’avoir été synthétisé.
    #[error("fragment du nœud {node} ({kind}) lu avant d’avoir été calculé")]
    MissingFragment { node: NodeId, kind: &'static str },

    /// Un nœud ne reçoit qu’un seul fragment par passe.
    #[error("fragment du nœud {node} ({kind}) écrit deux fois")]
    DuplicateFragment { node: NodeId, kind: &'static str },

    #[error("mot-chiffre inconnu `{0}` dans un numéral")]
    UnknownDigit(String),

    /// Orthographe hors de l’ensemble fermé attendu par une règle.
    #[error("orthographe inconnue pour {what}: `{spelling}`")]
    UnknownSpelling { what: &'static str, spelling: String },

    #[error("configuration invalide: {0}")]
    Config(String),
}

impl TranslateError {
    pub(crate) fn spelling(what: &'static str, spelling: &str) -> Self {
        Self::UnknownSpelling { what, spelling: spelling.to_string() }
    }
}

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;
