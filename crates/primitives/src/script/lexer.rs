//! Tokenizer for update scripts

use super::ScriptError;

/// Script token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (`ctx`, `_source`, `in_stock`, ...)
    Ident(String),
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// Quoted string literal
    Str(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `if`
    If,
    /// `else`
    Else,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `.`
    Dot,
    /// `;`
    Semi,
    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// End of input
    Eof,
}

/// Token with its byte offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    /// The token
    pub token: Token,
    /// Byte offset of the first character
    pub pos: usize,
}

/// Split script source into tokens
///
/// Skips whitespace, `// line` and `/* block */` comments. The returned
/// vector always ends with `Token::Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ScriptError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    let peek = |i: usize| chars.get(i).map(|(_, c)| *c);

    while i < chars.len() {
        let (pos, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Comments
        if c == '/' && peek(i + 1) == Some('/') {
            while i < chars.len() && chars[i].1 != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && peek(i + 1) == Some('*') {
            i += 2;
            loop {
                match peek(i) {
                    None => return Err(ScriptError::parse(pos, "unterminated comment")),
                    Some('*') if peek(i + 1) == Some('/') => {
                        i += 2;
                        break;
                    }
                    Some(_) => i += 1,
                }
            }
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while peek(i).is_some_and(|c| c.is_ascii_digit()) {
                i += 1;
            }
            let is_float =
                peek(i) == Some('.') && peek(i + 1).is_some_and(|c| c.is_ascii_digit());
            if is_float {
                i += 1;
                while peek(i).is_some_and(|c| c.is_ascii_digit()) {
                    i += 1;
                }
            }
            let text: String = chars[start..i].iter().map(|(_, c)| c).collect();
            let token = if is_float {
                text.parse::<f64>()
                    .map(Token::Float)
                    .map_err(|_| ScriptError::parse(pos, format!("invalid number '{}'", text)))?
            } else {
                text.parse::<i64>()
                    .map(Token::Int)
                    .map_err(|_| ScriptError::parse(pos, format!("integer out of range '{}'", text)))?
            };
            tokens.push(Spanned { token, pos });
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while peek(i).is_some_and(|c| c.is_alphanumeric() || c == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().map(|(_, c)| c).collect();
            let token = match word.as_str() {
                "true" => Token::True,
                "false" => Token::False,
                "null" => Token::Null,
                "if" => Token::If,
                "else" => Token::Else,
                _ => Token::Ident(word),
            };
            tokens.push(Spanned { token, pos });
            continue;
        }

        if c == '\'' || c == '"' {
            let quote = c;
            i += 1;
            let mut text = String::new();
            loop {
                match peek(i) {
                    None => return Err(ScriptError::parse(pos, "unterminated string")),
                    Some(ch) if ch == quote => {
                        i += 1;
                        break;
                    }
                    Some('\\') => {
                        let escaped = match peek(i + 1) {
                            Some('n') => '\n',
                            Some('t') => '\t',
                            Some(other @ ('\\' | '\'' | '"')) => other,
                            _ => {
                                return Err(ScriptError::parse(
                                    chars[i].0,
                                    "invalid escape sequence",
                                ))
                            }
                        };
                        text.push(escaped);
                        i += 2;
                    }
                    Some(ch) => {
                        text.push(ch);
                        i += 1;
                    }
                }
            }
            tokens.push(Spanned {
                token: Token::Str(text),
                pos,
            });
            continue;
        }

        let next = peek(i + 1);
        let (token, width) = match (c, next) {
            ('+', Some('+')) => (Token::PlusPlus, 2),
            ('+', Some('=')) => (Token::PlusAssign, 2),
            ('-', Some('-')) => (Token::MinusMinus, 2),
            ('-', Some('=')) => (Token::MinusAssign, 2),
            ('*', Some('=')) => (Token::StarAssign, 2),
            ('/', Some('=')) => (Token::SlashAssign, 2),
            ('=', Some('=')) => (Token::EqEq, 2),
            ('!', Some('=')) => (Token::NotEq, 2),
            ('<', Some('=')) => (Token::Le, 2),
            ('>', Some('=')) => (Token::Ge, 2),
            ('&', Some('&')) => (Token::AndAnd, 2),
            ('|', Some('|')) => (Token::OrOr, 2),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Star, 1),
            ('/', _) => (Token::Slash, 1),
            ('%', _) => (Token::Percent, 1),
            ('=', _) => (Token::Assign, 1),
            ('!', _) => (Token::Bang, 1),
            ('<', _) => (Token::Lt, 1),
            ('>', _) => (Token::Gt, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            ('{', _) => (Token::LBrace, 1),
            ('}', _) => (Token::RBrace, 1),
            ('[', _) => (Token::LBracket, 1),
            (']', _) => (Token::RBracket, 1),
            ('.', _) => (Token::Dot, 1),
            (';', _) => (Token::Semi, 1),
            _ => {
                return Err(ScriptError::parse(
                    pos,
                    format!("unexpected character '{}'", c),
                ))
            }
        };
        tokens.push(Spanned { token, pos });
        i += width;
    }

    tokens.push(Spanned {
        token: Token::Eof,
        pos: source.len(),
    });
    Ok(tokens)
}
