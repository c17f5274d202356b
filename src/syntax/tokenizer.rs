//! Breaks source text into Springboard tokens for use in the parser.
//!
//! This module works by splitting the input string with a regular expression
//! designed to find entire, non-overlapping patterns: comments, quoted import
//! paths, identifiers, and single instruction or punctuation characters.
//! Comments run from `#` to end of line and are discarded here, before the
//! parser ever sees them.

use std::fmt;

use regex::Regex;

use crate::error::*;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A symbol identifier, `[A-Za-z0-9_]+`. This includes `import`, which
    /// is only special to the parser at the head of a file.
    TIdent(String),
    /// A double-quoted import path, quotes stripped, no escape processing.
    TStringLiteral(String),
    /// One of the non-bracket alphabet characters: `+ - . , < >`.
    TInstruction(char),
    TOpenBracket,  // [
    TCloseBracket, // ]
    TColon,        // :
    TSemicolon,    // ;
    TEndOfInput,
}

/// Break up a string into tokens.
pub fn tokenize(input: &str) -> SpringboardResult<Vec<Token>> {
    lazy_static! {
        // Regular expression for splitting up tokens. Quoted strings win over
        // everything so instruction characters inside a path are not split.
        static ref TOKEN_RE: Regex = Regex::new(concat!(
            "(?m)#.*$|",
            r#""[^"\n]*"|"[^"\n]*|"#,
            r"[A-Za-z0-9_]+|[-+.,<>\[\]:;]|\S"
        ))
        .unwrap();

        static ref COMMENT_RE: Regex = Regex::new("^#").unwrap();
        static ref STRLIT_RE: Regex = Regex::new(r#"^"[^"]*"$"#).unwrap();
        static ref IDENT_RE: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    }

    use self::Token::*;

    let mut tokens: Vec<Token> = Vec::new();

    for cap in TOKEN_RE.captures_iter(input) {
        let text = cap.get(0).map(|m| m.as_str()).unwrap_or("");
        if COMMENT_RE.is_match(text) {
            // Do nothing - skips the comment.
        } else if STRLIT_RE.is_match(text) {
            // Trim off quotes before tokenizing.
            tokens.push(TStringLiteral(text.trim_matches('"').to_string()));
        } else if text.starts_with('"') {
            return compile_err!(Parse, "Unterminated import path: {}", text);
        } else if IDENT_RE.is_match(text) {
            tokens.push(TIdent(text.to_string()));
        } else {
            tokens.push(match text {
                "+" => TInstruction('+'),
                "-" => TInstruction('-'),
                "." => TInstruction('.'),
                "," => TInstruction(','),
                "<" => TInstruction('<'),
                ">" => TInstruction('>'),
                "[" => TOpenBracket,
                "]" => TCloseBracket,
                ":" => TColon,
                ";" => TSemicolon,
                _ => return compile_err!(Parse, "Invalid input token: {}", text),
            });
        }
    }
    tokens.push(TEndOfInput);
    Ok(tokens)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Token::*;
        match *self {
            TIdent(ref name) => write!(f, "{}", name),
            TStringLiteral(ref path) => write!(f, "\"{}\"", path),
            TInstruction(c) => write!(f, "{}", c),
            TOpenBracket => write!(f, "["),
            TCloseBracket => write!(f, "]"),
            TColon => write!(f, ":"),
            TSemicolon => write!(f, ";"),
            TEndOfInput => write!(f, "<END>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Token::*;
    use super::*;

    #[test]
    fn basic_tokenize() {
        assert_eq!(
            tokenize("+-.,<>[]").unwrap(),
            vec![
                TInstruction('+'),
                TInstruction('-'),
                TInstruction('.'),
                TInstruction(','),
                TInstruction('<'),
                TInstruction('>'),
                TOpenBracket,
                TCloseBracket,
                TEndOfInput
            ]
        );
        assert_eq!(
            tokenize(": inc2 ++ ;").unwrap(),
            vec![
                TColon,
                TIdent("inc2".into()),
                TInstruction('+'),
                TInstruction('+'),
                TSemicolon,
                TEndOfInput
            ]
        );
        assert_eq!(
            tokenize("import \"lib/std.sb\"").unwrap(),
            vec![
                TIdent("import".into()),
                TStringLiteral("lib/std.sb".into()),
                TEndOfInput
            ]
        );
    }

    #[test]
    fn idents_and_runs() {
        // Identifiers and instructions interleave freely; no whitespace needed
        // between instructions.
        assert_eq!(
            tokenize("a0+b_1").unwrap(),
            vec![
                TIdent("a0".into()),
                TInstruction('+'),
                TIdent("b_1".into()),
                TEndOfInput
            ]
        );
        // "import" is not special here; the parser decides by position.
        assert_eq!(
            tokenize("import").unwrap(),
            vec![TIdent("import".into()), TEndOfInput]
        );
    }

    #[test]
    fn comments_discarded() {
        assert_eq!(
            tokenize("+ # everything here is ignored +++\n-").unwrap(),
            vec![TInstruction('+'), TInstruction('-'), TEndOfInput]
        );
        assert_eq!(tokenize("# only a comment").unwrap(), vec![TEndOfInput]);
    }

    #[test]
    fn invalid_tokens() {
        assert!(tokenize("+ @ -").is_err());
        assert!(tokenize("{").is_err());
        let err = tokenize("import \"unterminated").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
