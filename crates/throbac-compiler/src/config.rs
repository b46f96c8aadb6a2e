//! config.rs — Configuration de la traduction Throbac → C.
//!
//! - Defaults sûrs (`TranslateConfig::default()`)
//! - Lecture **ENV** (préfixe `THROBAC_...`) via `TranslateConfig::from_env()`
//! - **Overrides CLI** via `CliOverrides` (appliqués avec `apply_cli_overrides`)
//! - `validate()` avant usage
//!
//! ENV supportés (tous facultatifs) :
//!   THROBAC_INDENT=tab|<nombre d’espaces>
//!   THROBAC_CAT_HELPER=<identifiant C>
//!
//! NB: pas de parsing TOML ici ; les outils désérialisent via la feature `serde`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError};

/// Nom du helper de concaténation fourni par le runtime C.
pub const DEFAULT_CAT_HELPER: &str = "__throbac_cat";

/// Paramétrage de la génération de C.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TranslateConfig {
    /// Unité d’indentation d’un niveau de bloc.
    pub indent: String,
    /// Fonction C à deux arguments utilisée pour `IUNGO`.
    pub concat_helper: String,
    /// Cibles des `#include` en tête de programme, dans l’ordre.
    pub includes: Vec<String>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            concat_helper: DEFAULT_CAT_HELPER.to_string(),
            includes: vec![
                "<stdio.h>".to_string(),
                "<stdbool.h>".to_string(),
                "\"throbac.h\"".to_string(),
            ],
        }
    }
}

/// Surcharges venant de la ligne de commande (priment sur l’ENV).
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub indent: Option<String>,
    pub concat_helper: Option<String>,
}

impl TranslateConfig {
    /// Defaults + variables d’environnement `THROBAC_*`.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Applique les `THROBAC_*` présentes par-dessus la config courante (ex. lue d’un fichier).
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("THROBAC_INDENT") {
            self.indent = parse_indent(&v)?;
        }
        if let Ok(v) = std::env::var("THROBAC_CAT_HELPER") {
            self.concat_helper = v;
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, o: &CliOverrides) -> Result<()> {
        if let Some(i) = &o.indent {
            self.indent = parse_indent(i)?;
        }
        if let Some(h) = &o.concat_helper {
            self.concat_helper = h.clone();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(TranslateError::Config(format!(
                "indentation invalide {:?} (espaces ou tabulations uniquement)",
                self.indent
            )));
        }
        if !is_c_identifier(&self.concat_helper) {
            return Err(TranslateError::Config(format!(
                "helper de concaténation `{}` n’est pas un identifiant C",
                self.concat_helper
            )));
        }
        Ok(())
    }
}

/// `tab` → `\t`, `4` → quatre espaces, sinon la valeur brute.
pub fn parse_indent(v: &str) -> Result<String> {
    let v = v.trim_matches(|c| c == '"' || c == '\'');
    if v.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    if let Ok(n) = v.parse::<usize>() {
        if n == 0 || n > 16 {
            return Err(TranslateError::Config(format!("largeur d’indentation hors bornes: {n}")));
        }
        return Ok(" ".repeat(n));
    }
    Ok(v.to_string())
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TranslateConfig::default();
        cfg.validate().expect("defaults valides");
        assert_eq!(cfg.indent, "\t");
        assert_eq!(cfg.includes.len(), 3);
    }

    #[test]
    fn indent_spellings() {
        assert_eq!(parse_indent("tab").unwrap(), "\t");
        assert_eq!(parse_indent("4").unwrap(), "    ");
        assert_eq!(parse_indent("  ").unwrap(), "  ");
        assert!(parse_indent("0").is_err());
    }

    #[test]
    fn cli_overrides_win_and_are_validated() {
        let mut cfg = TranslateConfig::default();
        cfg.apply_cli_overrides(&CliOverrides {
            indent: Some("2".into()),
            concat_helper: Some("my_cat".into()),
        })
        .unwrap();
        assert_eq!(cfg.indent, "  ");
        assert_eq!(cfg.concat_helper, "my_cat");
        cfg.validate().unwrap();

        cfg.concat_helper = "9lives".into();
        assert!(matches!(cfg.validate(), Err(TranslateError::Config(_))));
        cfg.concat_helper = "ok".into();
        cfg.indent = "x".into();
        assert!(cfg.validate().is_err());
    }
}
