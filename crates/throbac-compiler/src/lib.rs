//! throbac-compiler — Traduction dirigée par la syntaxe Throbac → C.
//!
//! Pipeline : source → `throbac_ast::parse` (règle d’entrée au choix) → parcours
//! post-ordre → un fragment de C par nœud (attribut synthétisé) → fragment racine.
//!
//! ## Modules
//! - `attrs`      : table des fragments, indexée par `NodeId`.
//! - `config`     : `TranslateConfig` (indentation, helper de concaténation, includes).
//! - `error`      : `TranslateError`.
//! - `rules`      : règles pures par famille (littéraux, expressions, instructions, déclarations).
//! - `translator` : `Listener` qui applique les règles.
//! - `runtime`    : `throbac.h` / `throbac.c` livrés avec le compilateur.
//!
//! API publique : `translate_str` / `translate_file` / `as_c`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;

pub mod attrs;
pub mod config;
pub mod error;
pub mod rules;
pub mod runtime;
pub mod translator;

pub use attrs::Attributes;
pub use config::{CliOverrides, TranslateConfig, DEFAULT_CAT_HELPER};
pub use error::{Result, TranslateError};
pub use throbac_ast::{NodeId, ParseError, StartRule};
pub use translator::{translate, translate_tree, Translation};

/// Rendu de `as_c` quand la racine n’a pas de fragment.
pub const NO_TRANSLATION: &str = "No generated C found";

/* ─────────────────────────── API ─────────────────────────── */

/// Parse `source` depuis `rule` puis traduit tout l’arbre.
pub fn translate_str(source: &str, rule: StartRule, config: &TranslateConfig) -> Result<Translation> {
    config.validate()?;
    debug!("règle d’entrée `{}`, {} octets de source", rule.rule_name(), source.len());
    let tree = throbac_ast::parse(source, rule)?;
    let out = translate(tree, config)?;
    debug!("{} octets de C pour la racine", out.root_fragment().map_or(0, str::len));
    Ok(out)
}

/// Traduit un fichier `.throbac` entier (règle `script`) en programme C.
pub fn translate_file(path: impl AsRef<Path>, config: &TranslateConfig) -> anyhow::Result<String> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let out = translate_str(&src, StartRule::Script, config)
        .with_context(|| format!("Traduction de {} échouée", path.display()))?;
    Ok(out.rendered().to_string())
}

/// Fragment racine avec la configuration par défaut, ou `NO_TRANSLATION`.
pub fn as_c(source: &str, rule: StartRule) -> Result<String> {
    let out = translate_str(source, rule, &TranslateConfig::default())?;
    Ok(out.rendered().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_surface_as_translate_errors() {
        let err = as_c("a ADDO", StartRule::Expr).unwrap_err();
        assert!(matches!(err, TranslateError::Parse(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_parsing() {
        let cfg = TranslateConfig { concat_helper: "not valid".into(), ..TranslateConfig::default() };
        let err = translate_str("a", StartRule::Expr, &cfg).unwrap_err();
        assert!(matches!(err, TranslateError::Config(_)));
    }
}
