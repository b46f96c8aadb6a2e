//! runtime.rs — Runtime C embarqué (`throbac.h`, `throbac.c`).
//!
//! Le C généré inclut `"throbac.h"` et appelle `__throbac_cat` ; les deux fichiers
//! sont à compiler avec lui.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

pub const HEADER_NAME: &str = "throbac.h";
pub const SOURCE_NAME: &str = "throbac.c";

pub const HEADER: &str = include_str!("../runtime/throbac.h");
pub const SOURCE: &str = include_str!("../runtime/throbac.c");

/// Écrit `throbac.h` et `throbac.c` dans `dir` (créé au besoin) ; écrase l’existant.
pub fn write_runtime(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(2);
    for (name, content) in [(HEADER_NAME, HEADER), (SOURCE_NAME, SOURCE)] {
        let path = dir.join(name);
        fs::write(&path, content)?;
        info!("runtime écrit: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_runtime_declares_the_helpers() {
        for f in ["__throbac_cat", "stringlength", "substring"] {
            assert!(HEADER.contains(f), "{f} absent du header");
            assert!(SOURCE.contains(&format!("{f}(")), "{f} absent du source");
        }
        assert!(SOURCE.contains("#include \"throbac.h\""));
    }
}
