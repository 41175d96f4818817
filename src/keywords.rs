use std::collections::HashMap;
use std::sync::OnceLock;

use crate::scanner::token::TokenType;

/// The reserved-word table. Built on first use and never mutated afterwards,
/// so every scanner in the process shares the same lookup.
pub fn reserved_words() -> &'static HashMap<&'static str, TokenType> {
    static KEYWORDS: OnceLock<HashMap<&'static str, TokenType>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        HashMap::from([
            ("and", TokenType::And),
            ("class", TokenType::Class),
            ("else", TokenType::Else),
            ("false", TokenType::False),
            ("fun", TokenType::Fun),
            ("for", TokenType::For),
            ("if", TokenType::If),
            ("nil", TokenType::Nil),
            ("or", TokenType::Or),
            ("print", TokenType::Print),
            ("return", TokenType::Return),
            ("super", TokenType::Super),
            ("this", TokenType::This),
            ("true", TokenType::True),
            ("var", TokenType::Var),
            ("while", TokenType::While),
        ])
    })
}
