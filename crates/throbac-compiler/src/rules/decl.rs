//! decl.rs — Déclarations, corps de fonctions, `main` et assemblage du programme.

use super::c_block;
use crate::error::{Result, TranslateError};

/* ─────────────────────────── Types déclarés ─────────────────────────── */

/// Type sémantique porté par une déclaration (lu sur son mot-clé).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    Number,
    Text,
    Boolean,
}

impl DeclaredType {
    pub fn from_keyword(kw: &str) -> Result<Self> {
        match kw {
            "NUMERUS" => Ok(Self::Number),
            "LOCUTIO" => Ok(Self::Text),
            "VERITAS" => Ok(Self::Boolean),
            other => Err(TranslateError::spelling("un type", other)),
        }
    }

    pub fn c_type(self) -> &'static str {
        match self {
            Self::Number => "int",
            Self::Text => "char*",
            Self::Boolean => "bool",
        }
    }

    /// Valeur initiale d’une variable `MUTABILIS`.
    pub fn default_init(self) -> &'static str {
        match self {
            Self::Number => "0",
            Self::Text => "NULL",
            Self::Boolean => "false",
        }
    }
}

/* ─────────────────────────── Déclarations ─────────────────────────── */

pub fn name_def(name: &str, ty: DeclaredType) -> String {
    format!("{} {name}", ty.c_type())
}

pub fn var_dec(name_def: &str, ty: DeclaredType) -> String {
    format!("{name_def} = {};", ty.default_init())
}

pub fn var_block(decs: &[&str]) -> String {
    decs.join("\n")
}

/// Déclarations puis instructions ; le saut de ligne n’apparaît que si les deux existent.
pub fn body(var_block: &str, block: &str) -> String {
    match (var_block.is_empty(), block.is_empty()) {
        (false, false) => format!("{var_block}\n{block}"),
        (false, true) => var_block.to_string(),
        (true, _) => block.to_string(),
    }
}

/// `RET name(params) { body }` ; `void` sans `PRAEBET`.
pub fn func_def(ret: Option<DeclaredType>, name: &str, params: &[&str], body: &str, indent: &str) -> String {
    let ret = ret.map_or("void", DeclaredType::c_type);
    format!("{ret} {name}({}) {}", params.join(", "), c_block(body, indent))
}

/// Ligne de signature de la définition, terminée par `;` au lieu de `{`.
pub fn forward_declaration(func_def: &str) -> String {
    let signature = func_def.lines().next().unwrap_or_default();
    let signature = signature.strip_suffix('{').unwrap_or(signature).trim_end();
    format!("{signature};")
}

/* ─────────────────────────── Point d’entrée & programme ─────────────────────────── */

fn is_return_line(line: &str) -> bool {
    let line = line.trim_start();
    line == "return;" || line.starts_with("return ")
}

/// `int main() { … }` ; `return 0;` ajouté si la dernière ligne n’est pas un retour.
pub fn main(body: &str, indent: &str) -> String {
    if body.is_empty() {
        return "int main() {\n}".to_string();
    }
    let ends_with_return = body.lines().last().is_some_and(is_return_line);
    let body = if ends_with_return { body.to_string() } else { format!("{body}\nreturn 0;") };
    format!("int main() {}", c_block(&body, indent))
}

/// En-têtes, déclarations anticipées, `main`, puis les définitions dans l’ordre source.
///
/// Un programme sans aucune instruction (ni dans `main`, ni dans une fonction) se
/// traduit par "", même s’il déclare des variables ou des fonctions.
pub fn script(includes: &[String], funcs: &[&str], main: &str, has_statements: bool) -> String {
    if !has_statements {
        return String::new();
    }
    let mut out = String::new();
    for inc in includes {
        out.push_str(&format!("#include {inc}\n"));
    }
    out.push('\n');
    for f in funcs {
        out.push_str(&forward_declaration(f));
        out.push('\n');
    }
    out.push_str(main);
    for f in funcs {
        out.push('\n');
        out.push_str(f);
    }
    out
}
