//! stmt.rs — Affectation, conditionnelle, boucle, impressions, retour, appels, blocs.

use super::c_block;

pub fn assignment(name: &str, expr: &str) -> String {
    format!("{name} = {expr};")
}

pub fn if_else(cond: &str, then_block: &str, else_block: Option<&str>, indent: &str) -> String {
    let mut out = format!("if ({cond}) {}", c_block(then_block, indent));
    if let Some(other) = else_block {
        out.push_str(" else ");
        out.push_str(&c_block(other, indent));
    }
    out
}

pub fn while_loop(cond: &str, body: &str, indent: &str) -> String {
    format!("while ({cond}) {}", c_block(body, indent))
}

pub fn print_number(expr: &str) -> String {
    format!("printf(\"%d\", {expr});")
}

pub fn print_string(expr: &str) -> String {
    format!("printf(\"%s\", {expr});")
}

/// Le booléen est imprimé comme texte : son fragment est recité entre guillemets.
/// Une variable ou une comparaison imprime donc son texte C, pas sa valeur.
pub fn print_bool(expr: &str) -> String {
    format!("printf(\"%s\", \"{expr}\");")
}

pub fn return_stmt(expr: Option<&str>) -> String {
    match expr {
        Some(e) => format!("return {e};"),
        None => "return;".to_string(),
    }
}

pub fn func_call_stmt(call: &str) -> String {
    format!("{call};")
}

/// Instructions dans l’ordre de la source, une par ligne ; vide → "".
pub fn block(stmts: &[&str]) -> String {
    stmts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_without_else_has_no_else_clause() {
        assert_eq!(
            if_else("false", "less = 10 + 10;", None, "\t"),
            "if (false) {\n\tless = 10 + 10;\n}"
        );
        assert_eq!(
            if_else("a", "return a;", Some("return b;"), "\t"),
            "if (a) {\n\treturn a;\n} else {\n\treturn b;\n}"
        );
    }

    #[test]
    fn nested_loops_indent_once_per_level() {
        let inner = while_loop("true", "printf(\"%s\", \"true\");", "\t");
        let outer = while_loop("true", &inner, "\t");
        assert_eq!(outer, "while (true) {\n\twhile (true) {\n\t\tprintf(\"%s\", \"true\");\n\t}\n}");
        assert_eq!(while_loop("x", "", "\t"), "while (x) {\n}");
    }

    #[test]
    fn prints_and_returns() {
        assert_eq!(print_number("20"), "printf(\"%d\", 20);");
        assert_eq!(print_string("\"S\""), "printf(\"%s\", \"S\");");
        assert_eq!(print_bool("!(true)"), "printf(\"%s\", \"!(true)\");");
        assert_eq!(return_stmt(None), "return;");
        assert_eq!(return_stmt(Some("x")), "return x;");
        assert_eq!(block(&[]), "");
        assert_eq!(block(&["a;", "b;"]), "a;\nb;");
    }
}
