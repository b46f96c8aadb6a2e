use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use log::info;
use throbac_ast::StartRule;
use throbac_compiler::{translate_str, CliOverrides, TranslateConfig};

use crate::settings::to_utf8;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Fichier source Throbac (`-` : stdin ; exclu si --inline est fourni)
    #[arg(conflicts_with = "inline")]
    pub input: Option<PathBuf>,

    /// Source inline à traduire (sinon lire depuis `input`)
    #[arg(long)]
    pub inline: Option<String>,

    /// Règle d’entrée (script, funcDef, main, body, varBlock, varDec, nameDef, block, statement, expr, funcCall)
    #[arg(long, default_value = "script")]
    pub rule: StartRule,

    /// Fichier C de sortie (défaut: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indentation d’un niveau : `tab` ou un nombre d’espaces
    #[arg(long)]
    pub indent: Option<String>,

    /// Fonction C utilisée pour la concaténation
    #[arg(long)]
    pub cat_helper: Option<String>,
}

pub fn exec(args: Args, mut config: TranslateConfig) -> Result<()> {
    config.apply_cli_overrides(&CliOverrides {
        indent: args.indent.clone(),
        concat_helper: args.cat_helper.clone(),
    })?;

    let (source, origin) = read_source(&args)?;
    let out = translate_str(&source, args.rule, &config)
        .with_context(|| format!("traduction de {origin} (règle `{}`)", args.rule.rule_name()))?;
    let c = out.rendered();

    match &args.output {
        Some(path) => {
            let path = to_utf8(path)?;
            let mut text = c.to_string();
            if !text.is_empty() {
                text.push('\n');
            }
            fs::write(&path, text).with_context(|| format!("écriture {path}"))?;
            info!("{origin} → {path}");
            println!("{path}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{c}")?;
        }
    }
    Ok(())
}

/// Source + nom lisible pour les messages.
fn read_source(args: &Args) -> Result<(String, String)> {
    if let Some(src) = &args.inline {
        return Ok((src.clone(), "<inline>".to_string()));
    }
    match &args.input {
        Some(p) if p.as_os_str() == "-" => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).context("lecture stdin")?;
            Ok((s, "<stdin>".to_string()))
        }
        Some(p) => {
            let p = to_utf8(p)?;
            let s = fs::read_to_string(&p).with_context(|| format!("Impossible de lire {p}"))?;
            Ok((s, p.to_string()))
        }
        None => bail!("précise un fichier .throbac, `-` ou --inline"),
    }
}
