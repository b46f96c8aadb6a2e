//! rules — Règles de synthèse, une famille par module.
//!
//! Chaque règle est une fonction pure : fragments des enfants (+ texte brut du
//! nœud) → fragment du nœud. Aucune ne touche à l’arbre ni à la table.

pub mod decl;
pub mod expr;
pub mod literals;
pub mod stmt;

/// Entoure `text` d’accolades en indentant chaque ligne d’un niveau.
/// Les lignes vides restent vides ; un texte vide donne `{` + saut + `}`.
pub fn c_block(text: &str, indent: &str) -> String {
    if text.is_empty() {
        return "{\n}".to_string();
    }
    let body: Vec<String> = text
        .split('\n')
        .map(|line| if line.is_empty() { String::new() } else { format!("{indent}{line}") })
        .collect();
    format!("{{\n{}\n}}", body.join("\n"))
}
