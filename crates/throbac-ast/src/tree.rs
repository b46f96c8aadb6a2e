//! tree.rs — Arbre syntaxique Throbac, stocké en arène.
//!
//! Chaque nœud est identifié par un `NodeId` stable (indice dans l’arène) :
//! l’identité d’un nœud n’est jamais une égalité de valeur. Les nœuds sont
//! immuables une fois poussés ; un enfant est toujours poussé avant son parent.

use std::fmt;

/* ─────────────────────────── Identité & position ─────────────────────────── */

/// Identifiant stable d’un nœud dans un `Tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Indice dans l’arène (utile pour des tables annexes indexées par nœud).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position (1-based) du premier token d’un nœud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/* ─────────────────────────── Genres de nœuds ─────────────────────────── */

/// Genre de règle de grammaire instancié par un nœud, avec ses enfants nommés.
///
/// Les champs `String` portent le texte brut des terminaux (identifiants,
/// orthographe des opérateurs, littéraux) tel qu’il apparaît dans la source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // Feuilles
    Number { text: String },
    Str { text: String },
    Bool { text: String },
    Variable { name: String },

    // Expressions
    Parens { expr: NodeId },
    Negation { op: String, expr: NodeId },
    Compare { op: String, lhs: NodeId, rhs: NodeId },
    AddSub { op: String, lhs: NodeId, rhs: NodeId },
    MulDiv { op: String, lhs: NodeId, rhs: NodeId },
    Concatenation { lhs: NodeId, rhs: NodeId },
    FuncCall { name: String, args: Vec<NodeId> },
    FuncCallExpr { call: NodeId },

    // Instructions
    FuncCallStmt { call: NodeId },
    Assignment { name: String, expr: NodeId },
    While { cond: NodeId, body: NodeId },
    If { cond: NodeId, then_block: NodeId, else_block: Option<NodeId> },
    PrintNumber { expr: NodeId },
    PrintString { expr: NodeId },
    PrintBool { expr: NodeId },
    Return { expr: Option<NodeId> },
    Block { stmts: Vec<NodeId> },

    // Déclarations
    NameDef { name: String, ty: String },
    VarDec { name_def: NodeId },
    VarBlock { decs: Vec<NodeId> },
    Body { var_block: NodeId, block: NodeId },
    Main { body: NodeId },
    FuncDef { params: Vec<NodeId>, name: String, ret: Option<String>, body: NodeId },
    Script { funcs: Vec<NodeId>, main: NodeId },
}

impl NodeKind {
    /// Nom de la règle (celui qu’on lit dans les logs et les erreurs).
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Number { .. } => "Number",
            NodeKind::Str { .. } => "String",
            NodeKind::Bool { .. } => "Bool",
            NodeKind::Variable { .. } => "Variable",
            NodeKind::Parens { .. } => "Parens",
            NodeKind::Negation { .. } => "Negation",
            NodeKind::Compare { .. } => "Compare",
            NodeKind::AddSub { .. } => "AddSub",
            NodeKind::MulDiv { .. } => "MulDiv",
            NodeKind::Concatenation { .. } => "Concatenation",
            NodeKind::FuncCall { .. } => "FuncCall",
            NodeKind::FuncCallExpr { .. } => "FuncCallExpr",
            NodeKind::FuncCallStmt { .. } => "FuncCallStmt",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::While { .. } => "While",
            NodeKind::If { .. } => "If",
            NodeKind::PrintNumber { .. } => "PrintNumber",
            NodeKind::PrintString { .. } => "PrintString",
            NodeKind::PrintBool { .. } => "PrintBool",
            NodeKind::Return { .. } => "Return",
            NodeKind::Block { .. } => "Block",
            NodeKind::NameDef { .. } => "NameDef",
            NodeKind::VarDec { .. } => "VarDec",
            NodeKind::VarBlock { .. } => "VarBlock",
            NodeKind::Body { .. } => "Body",
            NodeKind::Main { .. } => "Main",
            NodeKind::FuncDef { .. } => "FuncDef",
            NodeKind::Script { .. } => "Script",
        }
    }

    /// Enfants dans l’ordre de la source (paramètres, instructions, arguments…).
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Number { .. }
            | NodeKind::Str { .. }
            | NodeKind::Bool { .. }
            | NodeKind::Variable { .. }
            | NodeKind::NameDef { .. } => Vec::new(),

            NodeKind::Parens { expr }
            | NodeKind::Negation { expr, .. }
            | NodeKind::Assignment { expr, .. }
            | NodeKind::PrintNumber { expr }
            | NodeKind::PrintString { expr }
            | NodeKind::PrintBool { expr } => vec![*expr],

            NodeKind::Compare { lhs, rhs, .. }
            | NodeKind::AddSub { lhs, rhs, .. }
            | NodeKind::MulDiv { lhs, rhs, .. }
            | NodeKind::Concatenation { lhs, rhs } => vec![*lhs, *rhs],

            NodeKind::FuncCall { args, .. } => args.clone(),
            NodeKind::FuncCallExpr { call } | NodeKind::FuncCallStmt { call } => vec![*call],
            NodeKind::While { cond, body } => vec![*cond, *body],
            NodeKind::If { cond, then_block, else_block } => {
                let mut v = vec![*cond, *then_block];
                v.extend(*else_block);
                v
            }
            NodeKind::Return { expr } => expr.iter().copied().collect(),
            NodeKind::Block { stmts } => stmts.clone(),
            NodeKind::VarDec { name_def } => vec![*name_def],
            NodeKind::VarBlock { decs } => decs.clone(),
            NodeKind::Body { var_block, block } => vec![*var_block, *block],
            NodeKind::Main { body } => vec![*body],
            NodeKind::FuncDef { params, body, .. } => {
                let mut v = params.clone();
                v.push(*body);
                v
            }
            NodeKind::Script { funcs, main } => {
                let mut v = funcs.clone();
                v.push(*main);
                v
            }
        }
    }
}

/// Un nœud : son genre et la position de son premier token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/* ─────────────────────────── Arène ─────────────────────────── */

/// Arbre syntaxique : arène de nœuds + racine (la règle d’entrée).
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un nœud. Les enfants référencés doivent déjà être dans l’arène.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        debug_assert!(
            kind.children().iter().all(|c| *c < id),
            "enfant poussé après son parent"
        );
        self.nodes.push(Node { kind, span });
        id
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Racine : le nœud de la règle d’entrée (None tant que rien n’a été parsé).
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Tous les nœuds, dans l’ordre de création.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_follow_source_order() {
        let mut t = Tree::new();
        let p1 = t.push(NodeKind::NameDef { name: "a".into(), ty: "NUMERUS".into() }, Span::default());
        let p2 = t.push(NodeKind::NameDef { name: "b".into(), ty: "LOCUTIO".into() }, Span::default());
        let vb = t.push(NodeKind::VarBlock { decs: vec![] }, Span::default());
        let bl = t.push(NodeKind::Block { stmts: vec![] }, Span::default());
        let body = t.push(NodeKind::Body { var_block: vb, block: bl }, Span::default());
        let f = t.push(
            NodeKind::FuncDef { params: vec![p1, p2], name: "f".into(), ret: None, body },
            Span::default(),
        );
        assert_eq!(t.kind(f).children(), vec![p1, p2, body]);
        assert_eq!(t.kind(f).name(), "FuncDef");
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn optional_children_are_skipped() {
        let mut t = Tree::new();
        assert!(t.is_empty());
        let r = t.push(NodeKind::Return { expr: None }, Span::default());
        assert!(t.kind(r).children().is_empty());
        assert!(!t.is_empty());
        assert_eq!(r.to_string(), "#0");
    }
}
