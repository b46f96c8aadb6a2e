//! throbac2c — point d’entrée ; toute la logique vit dans `throbac_cli`.

fn main() -> anyhow::Result<()> {
    throbac_cli::run()
}
