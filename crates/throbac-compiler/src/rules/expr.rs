//! expr.rs — Parenthèses, négations, opérateurs binaires, concaténation, appels.

use throbac_ast::NodeKind;

use crate::error::{Result, TranslateError};

pub fn parens(inner: &str) -> String {
    format!("({inner})")
}

/// `NI` → `!(x)` ; `NEGANS` → `-x` sur un atome, `-(x)` sinon.
///
/// Les signes ne se replient jamais : `NEGANS NEGANS .VII.` donne `-(-7)`,
/// trois niveaux donnent `-(-(-7))`.
pub fn negation(op: &str, operand: &NodeKind, inner: &str) -> Result<String> {
    match op {
        "NI" => Ok(format!("!({inner})")),
        "NEGANS" if is_atom(operand) => Ok(format!("-{inner}")),
        "NEGANS" => Ok(format!("-({inner})")),
        other => Err(TranslateError::spelling("un opérateur unaire", other)),
    }
}

/// Opérande qui se lit d’un bloc derrière un `-` préfixe.
fn is_atom(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Number { .. } | NodeKind::Variable { .. } | NodeKind::Parens { .. } | NodeKind::FuncCallExpr { .. }
    )
}

pub fn compare(op: &str, lhs: &str, rhs: &str) -> Result<String> {
    let c_op = match op {
        "IDEM" => "==",
        "NI.IDEM" => "!=",
        "INFRA" => "<",
        "INFRA.IDEM" => "<=",
        "SUPRA" => ">",
        "SUPRA.IDEM" => ">=",
        other => return Err(TranslateError::spelling("une comparaison", other)),
    };
    Ok(format!("{lhs} {c_op} {rhs}"))
}

pub fn add_sub(op: &str, lhs: &str, rhs: &str) -> Result<String> {
    let c_op = match op {
        "ADDO" => "+",
        "ADIMO" => "-",
        other => return Err(TranslateError::spelling("une addition/soustraction", other)),
    };
    Ok(format!("{lhs} {c_op} {rhs}"))
}

pub fn mul_div(op: &str, lhs: &str, rhs: &str) -> Result<String> {
    let c_op = match op {
        "CONGERO" => "*",
        "PARTIO" => "/",
        other => return Err(TranslateError::spelling("une multiplication/division", other)),
    };
    Ok(format!("{lhs} {c_op} {rhs}"))
}

/// `helper(lhs, rhs)` ; les concaténations imbriquées restent imbriquées.
pub fn concatenation(helper: &str, lhs: &str, rhs: &str) -> String {
    format!("{helper}({lhs}, {rhs})")
}

pub fn func_call(name: &str, args: &[&str]) -> String {
    format!("{name}({})", args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num() -> NodeKind {
        NodeKind::Number { text: ".VII.".into() }
    }

    #[test]
    fn comparison_spellings_are_distinct() {
        let ops = ["IDEM", "NI.IDEM", "INFRA", "INFRA.IDEM", "SUPRA", "SUPRA.IDEM"];
        let mut seen: Vec<String> = ops.iter().map(|op| compare(op, "a", "b").unwrap()).collect();
        assert_eq!(seen[0], "a == b");
        assert_eq!(seen[5], "a >= b");
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), ops.len());
        assert!(compare("AEQUUS", "a", "b").is_err());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(add_sub("ADDO", "2", "16").unwrap(), "2 + 16");
        assert_eq!(add_sub("ADIMO", "x", "1").unwrap(), "x - 1");
        assert_eq!(mul_div("CONGERO", "8", "13").unwrap(), "8 * 13");
        assert_eq!(mul_div("PARTIO", "5", "9").unwrap(), "5 / 9");
        assert!(mul_div("ADDO", "5", "9").is_err());
    }

    #[test]
    fn negation_wraps_non_atoms() {
        assert_eq!(negation("NEGANS", &num(), "7").unwrap(), "-7");
        let mut tree = throbac_ast::Tree::new();
        let seven = tree.push(num(), Default::default());
        let neg = NodeKind::Negation { op: "NEGANS".into(), expr: seven };
        assert_eq!(negation("NEGANS", &neg, "-7").unwrap(), "-(-7)");
        assert_eq!(negation("NI", &num(), "true").unwrap(), "!(true)");
        assert!(negation("NON", &num(), "x").is_err());
    }

    #[test]
    fn calls_and_concat() {
        assert_eq!(func_call("f", &[]), "f()");
        assert_eq!(func_call("countdown", &["10", "announce"]), "countdown(10, announce)");
        assert_eq!(concatenation("__throbac_cat", "a", "b"), "__throbac_cat(a, b)");
    }
}
