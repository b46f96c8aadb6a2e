//! parser.rs — Descente récursive (déclarations, instructions) + précédences (expressions).
//!
//! Grammaire :
//!   script    = funcDef* main EOF
//!   funcDef   = [ "APUD" nameDef { "," nameDef } ] "DEFINITIO" ID [ "PRAEBET" TYPE ] ">" body "<"
//!   main      = body
//!   body      = varBlock block
//!   varBlock  = varDec*
//!   varDec    = nameDef "MUTABILIS"
//!   nameDef   = ID ":" TYPE
//!   block     = statement*
//!   statement = ID expr "VALORUM"
//!             | expr "DUM" ">" block "<"
//!             | expr "SI" ">" block "<" [ "ALUID" ">" block "<" ]
//!             | expr ( "NUMERUS.IMPRIMO" | "LOCUTIO.IMPRIMO" | "VERITAS.IMPRIMO" )
//!             | [ expr ] "REDEO"
//!             | funcCall
//!   expr      = ("NI" | "NEGANS") expr
//!             | expr ("CONGERO" | "PARTIO") expr
//!             | expr ("ADDO" | "ADIMO") expr
//!             | expr "IUNGO" expr
//!             | expr ("IDEM" | "NI.IDEM" | "INFRA" | "INFRA.IDEM" | "SUPRA" | "SUPRA.IDEM") expr
//!             | "(" expr ")" | funcCall | NUMBER | STRING | BOOL | ID
//!   funcCall  = [ "APUD" expr { "," expr } ] "VOCO" ID
//!
//! Sans argument, un appel s’écrit `VOCO f` : après `APUD` vient toujours au moins
//! une expression, donc `APUD VOCO f VOCO g` est `g(f())`.
//!
//! Précédences (de la plus faible à la plus forte) : comparaisons < IUNGO < ADDO/ADIMO
//! < CONGERO/PARTIO < préfixes. Tous les binaires sont associatifs à gauche.

use std::str::FromStr;

use crate::lexer::{Keyword, Lexer, TokKind, Token};
use crate::tree::{NodeId, NodeKind, Span, Tree};
use crate::ParseError;

/* ─────────────────────────── Règles d’entrée ─────────────────────────── */

/// Règle de grammaire utilisée pour parser un fragment de source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartRule {
    Script,
    FuncDef,
    Main,
    Body,
    VarBlock,
    VarDec,
    NameDef,
    Block,
    Statement,
    Expr,
    FuncCall,
}

impl StartRule {
    pub const ALL: [StartRule; 11] = [
        StartRule::Script,
        StartRule::FuncDef,
        StartRule::Main,
        StartRule::Body,
        StartRule::VarBlock,
        StartRule::VarDec,
        StartRule::NameDef,
        StartRule::Block,
        StartRule::Statement,
        StartRule::Expr,
        StartRule::FuncCall,
    ];

    /// Nom de la règle tel qu’écrit dans la grammaire (`funcDef`, `varBlock`…).
    pub fn rule_name(self) -> &'static str {
        match self {
            StartRule::Script => "script",
            StartRule::FuncDef => "funcDef",
            StartRule::Main => "main",
            StartRule::Body => "body",
            StartRule::VarBlock => "varBlock",
            StartRule::VarDec => "varDec",
            StartRule::NameDef => "nameDef",
            StartRule::Block => "block",
            StartRule::Statement => "statement",
            StartRule::Expr => "expr",
            StartRule::FuncCall => "funcCall",
        }
    }
}

impl FromStr for StartRule {
    type Err = String;

    /// Accepte le nom de la grammaire, insensible à la casse (`funcDef`, `funcdef`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.rule_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|r| r.rule_name()).collect();
                format!("règle inconnue `{s}` (attendu: {})", names.join(", "))
            })
    }
}

/// Parse `source` à partir de `rule` ; toute la source doit être consommée.
pub fn parse(source: &str, rule: StartRule) -> Result<Tree, ParseError> {
    let tokens = Lexer::new(source).lex_all()?;
    let mut p = Parser::new(tokens);
    let root = match rule {
        StartRule::Script => p.script()?,
        StartRule::FuncDef => p.func_def()?,
        StartRule::Main => p.main()?,
        StartRule::Body => p.body()?,
        StartRule::VarBlock => p.var_block()?,
        StartRule::VarDec => p.var_dec()?,
        StartRule::NameDef => p.name_def()?,
        StartRule::Block => p.block()?,
        StartRule::Statement => p.statement()?,
        StartRule::Expr => p.expr()?,
        StartRule::FuncCall => p.func_call()?,
    };
    if p.peek().kind != TokKind::Eof {
        let t = p.peek();
        return Err(ParseError::new(t.span, format!("fin de source attendue, trouvé `{}`", t.text)));
    }
    let mut tree = p.tree;
    tree.set_root(root);
    Ok(tree)
}

/* ─────────────────────────── Parser ─────────────────────────── */

type PResult<T> = Result<T, ParseError>;

#[derive(Clone, Copy)]
enum BinClass {
    Compare,
    Concat,
    AddSub,
    MulDiv,
}

/// Puissance de liaison des opérateurs binaires.
fn binary_op(kind: &TokKind) -> Option<(u8, BinClass)> {
    let TokKind::Kw(k) = kind else { return None };
    Some(match k {
        Keyword::Idem
        | Keyword::NiIdem
        | Keyword::Infra
        | Keyword::InfraIdem
        | Keyword::Supra
        | Keyword::SupraIdem => (1, BinClass::Compare),
        Keyword::Iungo => (2, BinClass::Concat),
        Keyword::Addo | Keyword::Adimo => (3, BinClass::AddSub),
        Keyword::Congero | Keyword::Partio => (4, BinClass::MulDiv),
        _ => return None,
    })
}

fn starts_expr(kind: &TokKind) -> bool {
    matches!(
        kind,
        TokKind::Number
            | TokKind::Str
            | TokKind::Ident
            | TokKind::LParen
            | TokKind::Kw(
                Keyword::Verum | Keyword::Falsum | Keyword::Ni | Keyword::Negans | Keyword::Apud | Keyword::Voco
            )
    )
}

/// Mots-clés qui terminent une instruction introduite par une expression.
fn is_statement_suffix(kind: &TokKind) -> bool {
    matches!(
        kind,
        TokKind::Kw(
            Keyword::Dum
                | Keyword::Si
                | Keyword::NumerusImprimo
                | Keyword::LocutioImprimo
                | Keyword::VeritasImprimo
                | Keyword::Redeo
        )
    )
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    tree: Tree,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, tree: Tree::new() }
    }

    // ---- déclarations ----

    fn script(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let mut funcs = Vec::new();
        while self.at_func_def() {
            funcs.push(self.func_def()?);
        }
        let main = self.main()?;
        Ok(self.push(NodeKind::Script { funcs, main }, span))
    }

    fn at_func_def(&self) -> bool {
        match self.peek().kind {
            TokKind::Kw(Keyword::Definitio) => true,
            TokKind::Kw(Keyword::Apud) => {
                self.peek_at(1).kind == TokKind::Ident && self.peek_at(2).kind == TokKind::Colon
            }
            _ => false,
        }
    }

    fn func_def(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let mut params = Vec::new();
        if self.eat_kw(Keyword::Apud) {
            params.push(self.name_def()?);
            while self.eat(&TokKind::Comma) {
                params.push(self.name_def()?);
            }
        }
        self.expect_kw(Keyword::Definitio)?;
        let name = self.expect(&TokKind::Ident, "nom de fonction")?.text;
        let ret = if self.eat_kw(Keyword::Praebet) { Some(self.expect_type()?.text) } else { None };
        self.expect(&TokKind::Open, "`>`")?;
        let body = self.body()?;
        self.expect(&TokKind::Close, "`<`")?;
        Ok(self.push(NodeKind::FuncDef { params, name, ret, body }, span))
    }

    fn main(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let body = self.body()?;
        Ok(self.push(NodeKind::Main { body }, span))
    }

    fn body(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let var_block = self.var_block()?;
        let block = self.block()?;
        Ok(self.push(NodeKind::Body { var_block, block }, span))
    }

    fn var_block(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let mut decs = Vec::new();
        while self.peek().kind == TokKind::Ident && self.peek_at(1).kind == TokKind::Colon {
            decs.push(self.var_dec()?);
        }
        Ok(self.push(NodeKind::VarBlock { decs }, span))
    }

    fn var_dec(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let name_def = self.name_def()?;
        self.expect_kw(Keyword::Mutabilis)?;
        Ok(self.push(NodeKind::VarDec { name_def }, span))
    }

    fn name_def(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let name = self.expect(&TokKind::Ident, "identifiant")?.text;
        self.expect(&TokKind::Colon, "`:`")?;
        let ty = self.expect_type()?.text;
        Ok(self.push(NodeKind::NameDef { name, ty }, span))
    }

    // ---- instructions ----

    fn block(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let mut stmts = Vec::new();
        while !matches!(self.peek().kind, TokKind::Close | TokKind::Eof) {
            stmts.push(self.statement()?);
        }
        Ok(self.push(NodeKind::Block { stmts }, span))
    }

    /// Bloc délimité `> … <` (corps de boucle, branches de conditionnelle).
    fn delimited_block(&mut self) -> PResult<NodeId> {
        self.expect(&TokKind::Open, "`>`")?;
        let block = self.block()?;
        self.expect(&TokKind::Close, "`<`")?;
        Ok(block)
    }

    fn statement(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;

        if self.eat_kw(Keyword::Redeo) {
            return Ok(self.push(NodeKind::Return { expr: None }, span));
        }

        if self.peek().kind == TokKind::Ident && starts_expr(&self.peek_at(1).kind) {
            let name = self.bump().text;
            let expr = self.expr()?;
            self.expect_kw(Keyword::Valorum)?;
            return Ok(self.push(NodeKind::Assignment { name, expr }, span));
        }

        if matches!(self.peek().kind, TokKind::Kw(Keyword::Apud | Keyword::Voco)) {
            let call = self.func_call()?;
            let next = &self.peek().kind;
            if binary_op(next).is_none() && !is_statement_suffix(next) {
                return Ok(self.push(NodeKind::FuncCallStmt { call }, span));
            }
            let lhs = self.push(NodeKind::FuncCallExpr { call }, span);
            let expr = self.expr_continue(lhs, 0)?;
            return self.statement_suffix(expr, span);
        }

        let expr = self.expr()?;
        self.statement_suffix(expr, span)
    }

    fn statement_suffix(&mut self, expr: NodeId, span: Span) -> PResult<NodeId> {
        let t = self.bump();
        let kind = match t.kind {
            TokKind::Kw(Keyword::Dum) => {
                let body = self.delimited_block()?;
                NodeKind::While { cond: expr, body }
            }
            TokKind::Kw(Keyword::Si) => {
                let then_block = self.delimited_block()?;
                let else_block = if self.eat_kw(Keyword::Aluid) { Some(self.delimited_block()?) } else { None };
                NodeKind::If { cond: expr, then_block, else_block }
            }
            TokKind::Kw(Keyword::NumerusImprimo) => NodeKind::PrintNumber { expr },
            TokKind::Kw(Keyword::LocutioImprimo) => NodeKind::PrintString { expr },
            TokKind::Kw(Keyword::VeritasImprimo) => NodeKind::PrintBool { expr },
            TokKind::Kw(Keyword::Redeo) => NodeKind::Return { expr: Some(expr) },
            _ => {
                return Err(ParseError::new(
                    t.span,
                    format!("instruction attendue après l’expression, trouvé `{}`", t.text),
                ))
            }
        };
        Ok(self.push(kind, span))
    }

    // ---- expressions ----

    fn expr(&mut self) -> PResult<NodeId> {
        let lhs = self.unary()?;
        self.expr_continue(lhs, 0)
    }

    /// Precedence climbing à partir d’un opérande gauche déjà construit.
    fn expr_continue(&mut self, mut lhs: NodeId, min_bp: u8) -> PResult<NodeId> {
        while let Some((bp, class)) = binary_op(&self.peek().kind) {
            if bp < min_bp {
                break;
            }
            let op = self.bump().text;
            let first = self.unary()?;
            let rhs = self.expr_continue(first, bp + 1)?;
            let span = self.tree.node(lhs).span;
            let kind = match class {
                BinClass::Compare => NodeKind::Compare { op, lhs, rhs },
                BinClass::Concat => NodeKind::Concatenation { lhs, rhs },
                BinClass::AddSub => NodeKind::AddSub { op, lhs, rhs },
                BinClass::MulDiv => NodeKind::MulDiv { op, lhs, rhs },
            };
            lhs = self.push(kind, span);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> PResult<NodeId> {
        if matches!(self.peek().kind, TokKind::Kw(Keyword::Ni | Keyword::Negans)) {
            let t = self.bump();
            let expr = self.unary()?;
            return Ok(self.push(NodeKind::Negation { op: t.text, expr }, t.span));
        }
        self.primary()
    }

    fn primary(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        match self.peek().kind {
            TokKind::Kw(Keyword::Apud | Keyword::Voco) => {
                let call = self.func_call()?;
                return Ok(self.push(NodeKind::FuncCallExpr { call }, span));
            }
            TokKind::LParen => {
                self.bump();
                let expr = self.expr()?;
                self.expect(&TokKind::RParen, "`)`")?;
                return Ok(self.push(NodeKind::Parens { expr }, span));
            }
            _ => {}
        }
        let t = self.bump();
        let kind = match t.kind {
            TokKind::Number => NodeKind::Number { text: t.text },
            TokKind::Str => NodeKind::Str { text: t.text },
            TokKind::Kw(Keyword::Verum | Keyword::Falsum) => NodeKind::Bool { text: t.text },
            TokKind::Ident => NodeKind::Variable { name: t.text },
            _ => return Err(ParseError::new(t.span, format!("expression attendue, trouvé `{}`", t.text))),
        };
        Ok(self.push(kind, span))
    }

    fn func_call(&mut self) -> PResult<NodeId> {
        let span = self.peek().span;
        let mut args = Vec::new();
        if self.eat_kw(Keyword::Apud) {
            args.push(self.expr()?);
            while self.eat(&TokKind::Comma) {
                args.push(self.expr()?);
            }
        }
        self.expect_kw(Keyword::Voco)?;
        let name = self.expect(&TokKind::Ident, "nom de fonction")?.text;
        Ok(self.push(NodeKind::FuncCall { name, args }, span))
    }

    // ---- utilitaires ----

    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.tree.push(kind, span)
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    fn bump(&mut self) -> Token {
        let t = self.peek().clone();
        if t.kind != TokKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, kind: &TokKind) -> bool {
        if &self.peek().kind == kind {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_kw(&mut self, k: Keyword) -> bool {
        self.eat(&TokKind::Kw(k))
    }

    fn expect(&mut self, kind: &TokKind, what: &str) -> PResult<Token> {
        if &self.peek().kind == kind {
            Ok(self.bump())
        } else {
            let t = self.peek();
            Err(ParseError::new(t.span, format!("{what} attendu, trouvé `{}`", t.text)))
        }
    }

    fn expect_kw(&mut self, k: Keyword) -> PResult<Token> {
        self.expect(&TokKind::Kw(k), &format!("`{}`", k.spelling()))
    }

    fn expect_type(&mut self) -> PResult<Token> {
        match self.peek().kind {
            TokKind::Kw(k) if k.is_type() => Ok(self.bump()),
            _ => {
                let t = self.peek();
                Err(ParseError::new(
                    t.span,
                    format!("type attendu (NUMERUS, LOCUTIO, VERITAS), trouvé `{}`", t.text),
                ))
            }
        }
    }
}
