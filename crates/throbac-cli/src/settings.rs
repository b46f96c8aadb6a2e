//! settings.rs — Lecture de `throbac.toml` + ENV → `TranslateConfig`.
//!
//! ```toml
//! [translate]
//! indent = "4"            # "tab", un nombre d’espaces, ou la chaîne brute
//! concat_helper = "__throbac_cat"
//! includes = ["<stdio.h>", "<stdbool.h>", "\"throbac.h\""]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use throbac_compiler::config::parse_indent;
use throbac_compiler::TranslateConfig;

/// Cherché dans le répertoire courant quand `--config` est absent.
pub const CONFIG_FILE: &str = "throbac.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    translate: TranslateConfig,
}

/// Config effective : fichier (explicite, sinon `./throbac.toml` s’il existe) puis ENV.
pub fn load(explicit: Option<&Path>) -> Result<TranslateConfig> {
    let path = match explicit {
        Some(p) => {
            let p = to_utf8(p)?;
            if !p.is_file() {
                bail!("fichier de config introuvable: {p}");
            }
            Some(p)
        }
        None => Some(Utf8PathBuf::from(CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let mut cfg = match &path {
        Some(p) => read_config(p)?,
        None => TranslateConfig::default(),
    };
    cfg.apply_env().context("variables THROBAC_* invalides")?;
    Ok(cfg)
}

/// Table `[translate]` d’un fichier ; les clés absentes gardent leur défaut.
pub fn read_config(path: &Utf8Path) -> Result<TranslateConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("lecture {path}"))?;
    let cfg = parse_config(&s).with_context(|| format!("config invalide: {path}"))?;
    debug!("config lue depuis {path}");
    Ok(cfg)
}

pub fn parse_config(s: &str) -> Result<TranslateConfig> {
    let mut cfg = toml::from_str::<ConfigFile>(s).context("TOML invalide")?.translate;
    // même syntaxe que THROBAC_INDENT / --indent
    cfg.indent = parse_indent(&cfg.indent)?;
    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn to_utf8(p: &Path) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(p.to_path_buf()).map_err(|p| anyhow!("chemin non UTF-8: {}", p.display()))
}
