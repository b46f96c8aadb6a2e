//! lexer.rs — Découpage d’une source Throbac en tokens.
//!
//! Lexèmes reconnus :
//!   - numéraux   `.I.NIL.VII.` (mots-chiffres séparés et encadrés par des points)
//!   - chaînes    `^HELLO+WORLD^`
//!   - identifiants en minuscules `countdown`, `some_var2`
//!   - mots-clés en majuscules, y compris les composés pointés (`NI.IDEM`, `NUMERUS.IMPRIMO`…)
//!   - ponctuation `: , ( ) > <`
//!
//! Le lexer valide la *forme* d’un numéral ; la validité de chaque mot-chiffre
//! est vérifiée par le traducteur.

use crate::tree::Span;
use crate::ParseError;

/* ─────────────────────────── Mots-clés ─────────────────────────── */

/// Mots-clés (orthographe exacte, sensible à la casse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Verum,
    Falsum,
    Ni,
    Negans,
    Congero,
    Partio,
    Addo,
    Adimo,
    Iungo,
    Idem,
    NiIdem,
    Infra,
    InfraIdem,
    Supra,
    SupraIdem,
    Apud,
    Voco,
    Valorum,
    Dum,
    Si,
    Aluid,
    NumerusImprimo,
    LocutioImprimo,
    VeritasImprimo,
    Redeo,
    Numerus,
    Locutio,
    Veritas,
    Mutabilis,
    Definitio,
    Praebet,
}

impl Keyword {
    const ALL: [Keyword; 31] = [
        Keyword::Verum,
        Keyword::Falsum,
        Keyword::Ni,
        Keyword::Negans,
        Keyword::Congero,
        Keyword::Partio,
        Keyword::Addo,
        Keyword::Adimo,
        Keyword::Iungo,
        Keyword::Idem,
        Keyword::NiIdem,
        Keyword::Infra,
        Keyword::InfraIdem,
        Keyword::Supra,
        Keyword::SupraIdem,
        Keyword::Apud,
        Keyword::Voco,
        Keyword::Valorum,
        Keyword::Dum,
        Keyword::Si,
        Keyword::Aluid,
        Keyword::NumerusImprimo,
        Keyword::LocutioImprimo,
        Keyword::VeritasImprimo,
        Keyword::Redeo,
        Keyword::Numerus,
        Keyword::Locutio,
        Keyword::Veritas,
        Keyword::Mutabilis,
        Keyword::Definitio,
        Keyword::Praebet,
    ];

    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::Verum => "VERUM",
            Keyword::Falsum => "FALSUM",
            Keyword::Ni => "NI",
            Keyword::Negans => "NEGANS",
            Keyword::Congero => "CONGERO",
            Keyword::Partio => "PARTIO",
            Keyword::Addo => "ADDO",
            Keyword::Adimo => "ADIMO",
            Keyword::Iungo => "IUNGO",
            Keyword::Idem => "IDEM",
            Keyword::NiIdem => "NI.IDEM",
            Keyword::Infra => "INFRA",
            Keyword::InfraIdem => "INFRA.IDEM",
            Keyword::Supra => "SUPRA",
            Keyword::SupraIdem => "SUPRA.IDEM",
            Keyword::Apud => "APUD",
            Keyword::Voco => "VOCO",
            Keyword::Valorum => "VALORUM",
            Keyword::Dum => "DUM",
            Keyword::Si => "SI",
            Keyword::Aluid => "ALUID",
            Keyword::NumerusImprimo => "NUMERUS.IMPRIMO",
            Keyword::LocutioImprimo => "LOCUTIO.IMPRIMO",
            Keyword::VeritasImprimo => "VERITAS.IMPRIMO",
            Keyword::Redeo => "REDEO",
            Keyword::Numerus => "NUMERUS",
            Keyword::Locutio => "LOCUTIO",
            Keyword::Veritas => "VERITAS",
            Keyword::Mutabilis => "MUTABILIS",
            Keyword::Definitio => "DEFINITIO",
            Keyword::Praebet => "PRAEBET",
        }
    }

    pub fn from_spelling(s: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|k| k.spelling() == s)
    }

    /// Mot-clé de type déclaré (`NUMERUS`, `LOCUTIO`, `VERITAS`).
    pub fn is_type(self) -> bool {
        matches!(self, Keyword::Numerus | Keyword::Locutio | Keyword::Veritas)
    }
}

/* ─────────────────────────── Tokens ─────────────────────────── */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokKind {
    Number,
    Str,
    Ident,
    Kw(Keyword),
    Colon,
    Comma,
    LParen,
    RParen,
    /// `>` : ouvre un bloc
    Open,
    /// `<` : ferme un bloc
    Close,
    Eof,
}

/// Token + texte brut tel qu’écrit dans la source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokKind,
    pub text: String,
    pub span: Span,
}

/* ─────────────────────────── Lexer ─────────────────────────── */

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    /// Tokenise toute la source ; le dernier token est toujours `Eof`.
    pub fn lex_all(mut self) -> Result<Vec<Token>, ParseError> {
        let mut out = Vec::new();
        loop {
            let t = self.next_token()?;
            let eof = t.kind == TokKind::Eof;
            out.push(t);
            if eof {
                break;
            }
        }
        Ok(out)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
        let span = Span { line: self.line, col: self.col };
        let start = self.pos;

        let Some(c) = self.bump() else {
            return Ok(Token { kind: TokKind::Eof, text: String::new(), span });
        };

        let kind = match c {
            ':' => TokKind::Colon,
            ',' => TokKind::Comma,
            '(' => TokKind::LParen,
            ')' => TokKind::RParen,
            '>' => TokKind::Open,
            '<' => TokKind::Close,
            '^' => {
                loop {
                    match self.bump() {
                        Some('^') => break,
                        Some(_) => {}
                        None => return Err(ParseError::new(span, "chaîne non terminée (`^` attendu)")),
                    }
                }
                TokKind::Str
            }
            '.' => {
                self.eat_while(|ch| matches!(ch, 'N' | 'I' | 'L' | 'V' | 'X' | '.'));
                let text = &self.src[start..self.pos];
                if text.len() < 3 || !text.ends_with('.') || text.contains("..") {
                    return Err(ParseError::new(span, format!("numéral mal formé: `{text}`")));
                }
                TokKind::Number
            }
            ch if ch.is_ascii_lowercase() || ch == '_' => {
                self.eat_while(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_');
                TokKind::Ident
            }
            ch if ch.is_ascii_uppercase() => {
                self.eat_while(|ch| ch.is_ascii_uppercase());
                self.try_dotted_compound(start);
                let word = &self.src[start..self.pos];
                match Keyword::from_spelling(word) {
                    Some(k) => TokKind::Kw(k),
                    None => return Err(ParseError::new(span, format!("mot-clé inconnu: `{word}`"))),
                }
            }
            other => return Err(ParseError::new(span, format!("caractère inattendu: {other:?}"))),
        };

        Ok(Token { kind, text: self.src[start..self.pos].to_string(), span })
    }

    /// `NI` + `.IDEM` → `NI.IDEM` si le composé existe ; sinon on ne consomme rien.
    fn try_dotted_compound(&mut self, start: usize) {
        let rest = &self.src[self.pos..];
        let Some(after_dot) = rest.strip_prefix('.') else { return };
        let len = after_dot
            .find(|ch: char| !ch.is_ascii_uppercase())
            .unwrap_or(after_dot.len());
        if len == 0 {
            return;
        }
        let candidate = &self.src[start..self.pos + 1 + len];
        if Keyword::from_spelling(candidate).is_some() {
            for _ in 0..=len {
                self.bump();
            }
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokKind> {
        Lexer::new(src)
            .lex_all()
            .expect("lex ok")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn dotted_compounds_win_over_prefix_words() {
        assert_eq!(
            kinds("a NI.IDEM b"),
            vec![TokKind::Ident, TokKind::Kw(Keyword::NiIdem), TokKind::Ident, TokKind::Eof]
        );
        assert_eq!(
            kinds("NI VERUM"),
            vec![TokKind::Kw(Keyword::Ni), TokKind::Kw(Keyword::Verum), TokKind::Eof]
        );
        assert_eq!(
            kinds(".I. NUMERUS.IMPRIMO"),
            vec![TokKind::Number, TokKind::Kw(Keyword::NumerusImprimo), TokKind::Eof]
        );
    }

    #[test]
    fn numeral_stops_before_comma() {
        let toks = Lexer::new("APUD .I.NIL., announce VOCO countdown").lex_all().expect("lex ok");
        assert_eq!(toks[1].text, ".I.NIL.");
        assert_eq!(toks[2].kind, TokKind::Comma);
    }

    #[test]
    fn string_keeps_delimiters_and_spans_track_lines() {
        let toks = Lexer::new("x\n  ^YO+^").lex_all().expect("lex ok");
        assert_eq!(toks[1].text, "^YO+^");
        assert_eq!(toks[1].span, Span { line: 2, col: 3 });
    }

    #[test]
    fn errors_carry_position() {
        let err = Lexer::new("^open").lex_all().unwrap_err();
        assert_eq!(err.span, Span { line: 1, col: 1 });
        assert!(Lexer::new("FOO").lex_all().is_err());
        assert!(Lexer::new(".I..II.").lex_all().is_err());
    }
}
