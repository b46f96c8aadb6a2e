use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use throbac_compiler::runtime;

use crate::settings::to_utf8;

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Dossier de sortie pour throbac.h / throbac.c (défaut: .)
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn exec(args: Args) -> Result<()> {
    let dir = to_utf8(&args.out_dir)?;
    let written = runtime::write_runtime(&dir).with_context(|| format!("écriture du runtime dans {dir}"))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
