//! translator.rs — Synthèse ascendante : un fragment de C par nœud, en post-ordre.
//!
//! Le parcours (`throbac_ast::walk`) appelle `exit` une fois par nœud, après ses
//! enfants. `exit` lit les fragments des enfants dans la table, applique la règle
//! du genre de nœud (match exhaustif) et écrit le fragment du nœud.

use log::{debug, trace};
use throbac_ast::{walk, Listener, NodeId, NodeKind, Tree};

use crate::attrs::Attributes;
use crate::config::TranslateConfig;
use crate::error::{Result, TranslateError};
use crate::NO_TRANSLATION;
use crate::rules::{decl, expr, literals, stmt};
use crate::rules::decl::DeclaredType;

/* ─────────────────────────── Résultat d’une passe ─────────────────────────── */

/// Arbre traduit + fragments de tous ses nœuds.
#[derive(Debug, Clone)]
pub struct Translation {
    tree: Tree,
    attrs: Attributes,
}

impl Translation {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Fragment d’un nœud ; `None` si aucune règle ne l’a produit.
    pub fn fragment(&self, id: NodeId) -> Option<&str> {
        self.attrs.get(id)
    }

    /// Fragment de la règle d’entrée.
    pub fn root_fragment(&self) -> Option<&str> {
        self.tree.root().and_then(|r| self.attrs.get(r))
    }

    /// Fragment racine, ou `NO_TRANSLATION` s’il n’existe pas.
    pub fn rendered(&self) -> &str {
        self.root_fragment().unwrap_or(NO_TRANSLATION)
    }
}

/// Traduit tout l’arbre (depuis sa racine) et garde l’arbre avec ses fragments.
pub fn translate(tree: Tree, config: &TranslateConfig) -> Result<Translation> {
    let attrs = translate_tree(&tree, config)?;
    Ok(Translation { tree, attrs })
}

/// Passe unique sur `tree` ; la table est créée fraîche.
pub fn translate_tree(tree: &Tree, config: &TranslateConfig) -> Result<Attributes> {
    config.validate()?;
    debug!("traduction: {} nœuds", tree.len());
    let mut t = Translator { config, attrs: Attributes::for_tree(tree) };
    walk(tree, &mut t)?;
    debug!("traduction: {} fragments produits", t.attrs.filled());
    Ok(t.attrs)
}

/* ─────────────────────────── Listener ─────────────────────────── */

struct Translator<'c> {
    config: &'c TranslateConfig,
    attrs: Attributes,
}

impl Listener for Translator<'_> {
    type Error = TranslateError;

    fn exit(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        let kind = tree.kind(id);
        let fragment = Ctx { tree, attrs: &self.attrs, config: self.config }.synthesize(kind)?;
        trace!("{id} {} -> {fragment:?}", kind.name());
        self.attrs.set(id, kind.name(), fragment)
    }
}

/// Vue en lecture seule pendant la synthèse d’un nœud.
struct Ctx<'a> {
    tree: &'a Tree,
    attrs: &'a Attributes,
    config: &'a TranslateConfig,
}

impl<'a> Ctx<'a> {
    fn frag(&self, id: NodeId) -> Result<&'a str> {
        self.attrs.get(id).ok_or_else(|| TranslateError::MissingFragment {
            node: id,
            kind: self.tree.kind(id).name(),
        })
    }

    fn frags(&self, ids: &[NodeId]) -> Result<Vec<&'a str>> {
        ids.iter().map(|id| self.frag(*id)).collect()
    }

    /// Type déclaré lu sur le terminal d’un `NameDef`.
    fn declared_type(&self, name_def: NodeId) -> Result<DeclaredType> {
        match self.tree.kind(name_def) {
            NodeKind::NameDef { ty, .. } => DeclaredType::from_keyword(ty),
            other => Err(TranslateError::spelling("une déclaration", other.name())),
        }
    }

    fn synthesize(&self, kind: &NodeKind) -> Result<String> {
        let indent = self.config.indent.as_str();
        Ok(match kind {
            // Feuilles
            NodeKind::Number { text } => literals::number(text)?,
            NodeKind::Str { text } => literals::string(text),
            NodeKind::Bool { text } => literals::boolean(text)?,
            NodeKind::Variable { name } => literals::variable(name),

            // Expressions
            NodeKind::Parens { expr: e } => expr::parens(self.frag(*e)?),
            NodeKind::Negation { op, expr: e } => expr::negation(op, self.tree.kind(*e), self.frag(*e)?)?,
            NodeKind::Compare { op, lhs, rhs } => expr::compare(op, self.frag(*lhs)?, self.frag(*rhs)?)?,
            NodeKind::AddSub { op, lhs, rhs } => expr::add_sub(op, self.frag(*lhs)?, self.frag(*rhs)?)?,
            NodeKind::MulDiv { op, lhs, rhs } => expr::mul_div(op, self.frag(*lhs)?, self.frag(*rhs)?)?,
            NodeKind::Concatenation { lhs, rhs } => {
                expr::concatenation(&self.config.concat_helper, self.frag(*lhs)?, self.frag(*rhs)?)
            }
            NodeKind::FuncCall { name, args } => expr::func_call(name, &self.frags(args)?),
            NodeKind::FuncCallExpr { call } => self.frag(*call)?.to_string(),

            // Instructions
            NodeKind::FuncCallStmt { call } => stmt::func_call_stmt(self.frag(*call)?),
            NodeKind::Assignment { name, expr: e } => stmt::assignment(name, self.frag(*e)?),
            NodeKind::While { cond, body } => stmt::while_loop(self.frag(*cond)?, self.frag(*body)?, indent),
            NodeKind::If { cond, then_block, else_block } => {
                let other = match else_block {
                    Some(b) => Some(self.frag(*b)?),
                    None => None,
                };
                stmt::if_else(self.frag(*cond)?, self.frag(*then_block)?, other, indent)
            }
            NodeKind::PrintNumber { expr: e } => stmt::print_number(self.frag(*e)?),
            NodeKind::PrintString { expr: e } => stmt::print_string(self.frag(*e)?),
            NodeKind::PrintBool { expr: e } => stmt::print_bool(self.frag(*e)?),
            NodeKind::Return { expr: e } => {
                let value = match e {
                    Some(e) => Some(self.frag(*e)?),
                    None => None,
                };
                stmt::return_stmt(value)
            }
            NodeKind::Block { stmts } => stmt::block(&self.frags(stmts)?),

            // Déclarations
            NodeKind::NameDef { name, ty } => decl::name_def(name, DeclaredType::from_keyword(ty)?),
            NodeKind::VarDec { name_def } => decl::var_dec(self.frag(*name_def)?, self.declared_type(*name_def)?),
            NodeKind::VarBlock { decs } => decl::var_block(&self.frags(decs)?),
            NodeKind::Body { var_block, block } => decl::body(self.frag(*var_block)?, self.frag(*block)?),
            NodeKind::Main { body } => decl::main(self.frag(*body)?, indent),
            NodeKind::FuncDef { params, name, ret, body } => {
                let ret = ret.as_deref().map(DeclaredType::from_keyword).transpose()?;
                decl::func_def(ret, name, &self.frags(params)?, self.frag(*body)?, indent)
            }
            NodeKind::Script { funcs, main } => {
                let has_statements = contains_statement(self.tree, *main)
                    || funcs.iter().any(|f| contains_statement(self.tree, *f));
                decl::script(&self.config.includes, &self.frags(funcs)?, self.frag(*main)?, has_statements)
            }
        })
    }
}

/// Vrai si un `Block` non vide apparaît sous `id` (lui compris).
fn contains_statement(tree: &Tree, id: NodeId) -> bool {
    let mut stack = vec![id];
    while let Some(n) = stack.pop() {
        match tree.kind(n) {
            NodeKind::Block { stmts } if !stmts.is_empty() => return true,
            kind => stack.extend(kind.children()),
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use throbac_ast::{walk_from, Span};

    #[test]
    fn parent_before_child_is_a_missing_fragment() {
        let mut tree = Tree::new();
        let v = tree.push(NodeKind::Variable { name: "x".into() }, Span::default());
        let p = tree.push(NodeKind::Parens { expr: v }, Span::default());
        let cfg = TranslateConfig::default();
        let attrs = Attributes::for_tree(&tree);
        let err = Ctx { tree: &tree, attrs: &attrs, config: &cfg }
            .synthesize(tree.kind(p))
            .unwrap_err();
        assert_eq!(err, TranslateError::MissingFragment { node: v, kind: "Variable" });
    }

    #[test]
    fn walking_a_subtree_twice_is_a_duplicate() {
        let mut tree = Tree::new();
        let v = tree.push(NodeKind::Variable { name: "x".into() }, Span::default());
        tree.set_root(v);
        let cfg = TranslateConfig::default();
        let mut t = Translator { config: &cfg, attrs: Attributes::for_tree(&tree) };
        walk_from(&tree, v, &mut t).unwrap();
        assert!(matches!(
            walk_from(&tree, v, &mut t),
            Err(TranslateError::DuplicateFragment { .. })
        ));
    }

    #[test]
    fn unmapped_operator_spelling_is_fatal() {
        let mut tree = Tree::new();
        let a = tree.push(NodeKind::Variable { name: "a".into() }, Span::default());
        let b = tree.push(NodeKind::Variable { name: "b".into() }, Span::default());
        let c = tree.push(NodeKind::Compare { op: "AEQUUS".into(), lhs: a, rhs: b }, Span::default());
        tree.set_root(c);
        let err = translate(tree, &TranslateConfig::default()).unwrap_err();
        assert_eq!(err, TranslateError::UnknownSpelling { what: "une comparaison", spelling: "AEQUUS".into() });
    }

    #[test]
    fn tree_without_root_has_no_translation() {
        let out = translate(Tree::new(), &TranslateConfig::default()).unwrap();
        assert_eq!(out.root_fragment(), None);
        assert_eq!(out.rendered(), NO_TRANSLATION);
    }
}
