use crate::ast::Location;
use logos::Logos;

/// Token types for the supported Java subset
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("new")]
    New,
    #[token("public")]
    Public,
    #[token("protected")]
    Protected,
    #[token("private")]
    Private,
    #[token("static")]
    Static,
    #[token("final")]
    Final,
    #[token("void")]
    Void,
    #[token("boolean")]
    Boolean,
    #[token("byte")]
    Byte,
    #[token("short")]
    Short,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("char")]
    Char,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("!")]
    Bang,
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    PipePipe,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Literals
    #[regex(r#""([^"\\]|\\u[0-9a-fA-F]{4}|\\.)*""#)]
    StringLiteral,
    #[regex(r"'([^'\\]|\\u[0-9a-fA-F]{4}|\\.)'")]
    CharLiteral,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    FloatLiteral,
    #[regex(r"[0-9][0-9_]*")]
    DecimalInteger,

    // Identifiers
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    // Comments and whitespace
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 2)]
    BlockComment,
    #[regex(r"[ \t\n\r]+", priority = 2)]
    Whitespace,
}

impl Token {
    /// Check if this token starts a primitive type
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            Token::Boolean
                | Token::Byte
                | Token::Short
                | Token::Int
                | Token::Long
                | Token::Char
                | Token::Float
                | Token::Double
        )
    }

    /// Check if this token is a modifier
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Token::Public | Token::Protected | Token::Private | Token::Static | Token::Final
        )
    }
}

/// Lexical token with location information
#[derive(Debug, Clone)]
pub struct LexicalToken {
    pub token: Token,
    pub lexeme: String,
    pub location: Location,
}

impl LexicalToken {
    pub fn new(token: Token, lexeme: String, location: Location) -> Self {
        Self { token, lexeme, location }
    }

    pub fn token_type(&self) -> &Token {
        &self.token
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Check if this token matches the given token type
    pub fn is(&self, token_type: &Token) -> bool {
        std::mem::discriminant(&self.token) == std::mem::discriminant(token_type)
    }
}

/// Lexer producing located tokens from Java source text
pub struct Lexer<'a> {
    lexer: logos::Lexer<'a, Token>,
    current_line: usize,
    current_column: usize,
    current_offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Token::lexer(source),
            current_line: 1,
            current_column: 1,
            current_offset: 0,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Option<Result<LexicalToken, String>> {
        let token = self.lexer.next()?;

        match token {
            Ok(token) => {
                let lexeme = self.lexer.slice().to_string();
                let location = Location::new(
                    self.current_line,
                    self.current_column,
                    self.current_offset,
                );

                self.update_position(&lexeme);

                Some(Ok(LexicalToken::new(token, lexeme, location)))
            }
            Err(_) => Some(Err(format!(
                "unrecognized input at {}:{}",
                self.current_line, self.current_column
            ))),
        }
    }

    /// Update the current position based on the lexeme
    fn update_position(&mut self, lexeme: &str) {
        for ch in lexeme.chars() {
            if ch == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
            self.current_offset += ch.len_utf8();
        }
    }

    /// Get all tokens from the source, skipping whitespace and comments
    pub fn tokenize(mut self) -> Result<Vec<LexicalToken>, String> {
        let mut tokens = Vec::new();

        while let Some(result) = self.next_token() {
            match result {
                Ok(token) => {
                    if !matches!(
                        token.token,
                        Token::Whitespace | Token::LineComment | Token::BlockComment
                    ) {
                        tokens.push(token);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_keywords() {
        let source = "public class Foo extends Object";
        let tokens = Lexer::new(source).tokenize().expect("Failed to tokenize");

        assert_eq!(tokens.len(), 5);
        assert!(tokens[0].is(&Token::Public));
        assert!(tokens[1].is(&Token::Class));
        assert!(tokens[2].is(&Token::Identifier));
        assert!(tokens[3].is(&Token::Extends));
        assert!(tokens[4].is(&Token::Identifier));
    }

    #[test]
    fn test_lexer_literals() {
        let source = r#"42 "hello" 'a' 3.14 true false null"#;
        let tokens = Lexer::new(source).tokenize().expect("Failed to tokenize");

        assert_eq!(tokens.len(), 7);
        assert!(tokens[0].is(&Token::DecimalInteger));
        assert!(tokens[1].is(&Token::StringLiteral));
        assert!(tokens[2].is(&Token::CharLiteral));
        assert!(tokens[3].is(&Token::FloatLiteral));
        assert!(tokens[4].is(&Token::True));
        assert!(tokens[5].is(&Token::False));
        assert!(tokens[6].is(&Token::Null));
    }

    #[test]
    fn test_lexer_for_header_operators() {
        let source = "x-- , y *= 2 && ||";
        let tokens = Lexer::new(source).tokenize().expect("Failed to tokenize");

        assert!(tokens[1].is(&Token::Dec));
        assert!(tokens[4].is(&Token::MulAssign));
        assert!(tokens[6].is(&Token::AndAnd));
        assert!(tokens[7].is(&Token::PipePipe));
    }

    #[test]
    fn test_lexer_comments_skipped() {
        let source = "// line\n/* block */ x";
        let tokens = Lexer::new(source).tokenize().expect("Failed to tokenize");

        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is(&Token::Identifier));
    }

    #[test]
    fn test_lexer_tracks_locations() {
        let source = "for\n  (;;)";
        let tokens = Lexer::new(source).tokenize().expect("Failed to tokenize");

        assert_eq!(tokens[0].location().line, 1);
        assert_eq!(tokens[1].location().line, 2);
        assert_eq!(tokens[1].location().column, 3);
    }
}
