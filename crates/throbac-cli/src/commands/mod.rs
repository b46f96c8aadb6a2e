//! Sous-commandes de `throbac2c` : une `Args` clap + une fonction `exec` chacune.

pub mod runtime;
pub mod translate;
