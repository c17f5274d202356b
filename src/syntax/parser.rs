//! Top-down recursive descent parser for Springboard.
//!
//! The grammar is parseable in one left-to-right pass through the input
//! without backtracking, so we simply track a position as we go and keep
//! incrementing it. The precedence rule between plain runs and bracket
//! blocks is trivial: a block is attempted only when the next token is a
//! literal `[`, otherwise instructions and identifiers are accepted greedily.

use std::cmp::min;

use crate::error::*;
use crate::util::colors::*;

use super::program::*;
use super::tokenizer::Token::*;
use super::tokenizer::*;

/// Bracket blocks past this depth fail rather than risk the call stack.
const MAX_BLOCK_DEPTH: usize = 512;

/// Returns a formatted parse error if the parse failed, or returns the `res`.
macro_rules! check_parse_error {
    ($parser:expr, $res:expr) => {{
        if $res.is_ok() && !$parser.is_done() {
            return compile_err!(
                Parse,
                "Unexpected token {} at {}",
                $parser.peek(),
                $parser.error_context()
            );
        } else if let Err(e) = $res {
            return Err($crate::error::SpringboardError::new(
                e.kind(),
                format!("{} (at {})", e.message(), $parser.error_context()),
            ));
        } else {
            $res
        }
    }};
}

/// Parse the complete input string as a Springboard program.
pub fn parse_program(input: &str) -> SpringboardResult<Program> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(&tokens);
    let res = parser.program();

    check_parse_error!(parser, res)
}

/// Parse the complete input string as a bare code section.
pub fn parse_code(input: &str) -> SpringboardResult<CodeSequence> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(&tokens);
    let res = parser.code_section(0);

    check_parse_error!(parser, res)
}

/// A stateful object that parses a sequence of tokens, tracking its position
/// at each point. Assumes that the tokens end with a TEndOfInput.
struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &[Token]) -> Parser {
        Parser {
            tokens,
            position: 0,
        }
    }

    /// Look at the next token to be parsed.
    fn peek(&self) -> &'t Token {
        &self.tokens[self.position]
    }

    /// Returns a string representing a context in the input.
    fn error_context(&self) -> String {
        let length = 10;
        let mut string = String::from("");
        let context_length = if self.position >= length {
            string.push_str("...");
            length
        } else {
            self.position
        };

        let end = min(self.position + length, self.tokens.len() - 1);
        for i in (self.position - context_length)..end {
            let token_str = format!("{}", &self.tokens[i]);
            if i == self.position {
                string.push_str(format_color(Color::BoldRed, token_str.as_str()).as_str());
            } else {
                string.push_str(token_str.as_str());
            }
            string.push(' ');
        }

        if end < self.tokens.len() - 1 {
            string.push_str("...");
        }

        string
    }

    /// Consume and return the next token.
    fn next(&mut self) -> &'t Token {
        let token = &self.tokens[self.position];
        self.position += 1;
        token
    }

    /// Consume the next token and check that it equals `expected`. If not,
    /// return an Err.
    fn consume(&mut self, expected: Token) -> SpringboardResult<()> {
        if *self.next() != expected {
            compile_err!(Parse, "Expected '{}'", expected)
        } else {
            Ok(())
        }
    }

    /// Are we done parsing all the input?
    fn is_done(&self) -> bool {
        self.position == self.tokens.len() || *self.peek() == TEndOfInput
    }

    /// Parse a program (imports, then definitions, then one code section)
    /// starting at the current position.
    fn program(&mut self) -> SpringboardResult<Program> {
        let imports = self.imports()?;
        let defs = self.symbol_defs()?;
        let code = self.code_section(0)?;
        Ok(Program {
            imports,
            defs,
            code,
        })
    }

    /// Parse a list of import statements starting at the current position.
    /// `import` is a keyword only here, at the head of the file; in
    /// definitions and code it is an ordinary identifier.
    fn imports(&mut self) -> SpringboardResult<Vec<String>> {
        let mut res: Vec<String> = Vec::new();
        loop {
            match *self.peek() {
                TIdent(ref name) if name == "import" => {
                    self.next();
                    if let TStringLiteral(ref path) = *self.next() {
                        res.push(path.clone());
                    } else {
                        return compile_err!(Parse, "Expected a quoted path after 'import'");
                    }
                }
                _ => return Ok(res),
            }
        }
    }

    /// Parse a list of symbol definitions starting at the current position.
    fn symbol_defs(&mut self) -> SpringboardResult<Vec<SymbolDef>> {
        let mut res: Vec<SymbolDef> = Vec::new();
        while *self.peek() == TColon {
            res.push(self.symbol_def()?);
        }
        Ok(res)
    }

    /// Parse a single `: name code ;` definition starting at the current
    /// position.
    fn symbol_def(&mut self) -> SpringboardResult<SymbolDef> {
        self.consume(TColon)?;
        let name = if let TIdent(ref name) = *self.next() {
            name.clone()
        } else {
            return compile_err!(Parse, "Expected an identifier after ':'");
        };
        let body = self.code_section(0)?;
        if self.consume(TSemicolon).is_err() {
            return compile_err!(Parse, "Unterminated definition of symbol {}", name);
        }
        Ok(SymbolDef { name, body })
    }

    /// Parse a code section starting at the current position: a free
    /// interleaving of instruction/identifier runs and bracket blocks, any
    /// number of times, including zero.
    fn code_section(&mut self, depth: usize) -> SpringboardResult<CodeSequence> {
        let mut seq: CodeSequence = Vec::new();
        loop {
            match *self.peek() {
                TInstruction(c) => {
                    self.next();
                    seq.push(Atom::Literal(c));
                }
                TIdent(ref name) => {
                    self.next();
                    seq.push(Atom::Reference(name.clone()));
                }
                TOpenBracket => {
                    self.block(&mut seq, depth)?;
                }
                _ => return Ok(seq),
            }
        }
    }

    /// Parse a bracket block into `seq`. The brackets stay in the output as
    /// literal atoms; only their nesting is checked here.
    fn block(&mut self, seq: &mut CodeSequence, depth: usize) -> SpringboardResult<()> {
        if depth >= MAX_BLOCK_DEPTH {
            return compile_err!(NestingTooDeep, "Blocks nested past {} levels", MAX_BLOCK_DEPTH);
        }
        self.consume(TOpenBracket)?;
        seq.push(Atom::Literal('['));
        let mut inner = self.code_section(depth + 1)?;
        seq.append(&mut inner);
        if self.consume(TCloseBracket).is_err() {
            return compile_err!(Parse, "Unmatched '['");
        }
        seq.push(Atom::Literal(']'));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_program() {
        let program = parse_program("import \"std.sb\"\n: inc2 ++ ;\ninc2 .").unwrap();
        assert_eq!(program.imports, vec!["std.sb".to_string()]);
        assert_eq!(program.defs.len(), 1);
        assert_eq!(program.defs[0].name, "inc2");
        assert_eq!(
            program.defs[0].body,
            vec![Atom::Literal('+'), Atom::Literal('+')]
        );
        assert_eq!(
            program.code,
            vec![Atom::Reference("inc2".into()), Atom::Literal('.')]
        );
    }

    #[test]
    fn empty_sections() {
        let program = parse_program("").unwrap();
        assert!(program.imports.is_empty());
        assert!(program.defs.is_empty());
        assert!(program.code.is_empty());

        // A program may be all imports, all definitions, or all code.
        assert!(parse_program("import \"a.sb\" import \"b.sb\"").is_ok());
        assert!(parse_program(": a + ; : b - ;").is_ok());
        assert!(parse_program("+++").is_ok());
    }

    #[test]
    fn nested_blocks() {
        let code = parse_code("+[>[-]<]").unwrap();
        assert_eq!(sequence_to_string(&code), "+[>[-]<]");

        // References may appear inside nested brackets.
        let code = parse_code("[a[b]]").unwrap();
        assert_eq!(
            code,
            vec![
                Atom::Literal('['),
                Atom::Reference("a".into()),
                Atom::Literal('['),
                Atom::Reference("b".into()),
                Atom::Literal(']'),
                Atom::Literal(']'),
            ]
        );
    }

    #[test]
    fn unmatched_brackets() {
        let err = parse_code("[+").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().contains("Unmatched"));

        // A stray close bracket terminates the code section; the trailing
        // input check reports it.
        let err = parse_code("+]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().contains("Unexpected token"));
    }

    #[test]
    fn unterminated_definition() {
        let err = parse_program(": a ++").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().contains("Unterminated definition"));
    }

    #[test]
    fn malformed_statements() {
        assert!(parse_program("import std.sb").is_err());
        assert!(parse_program(": ; +").is_err());
        assert!(parse_program("; +").is_err());
    }

    #[test]
    fn import_allowed_as_symbol_name() {
        // Outside the imports section, "import" is an ordinary identifier.
        let program = parse_program(": import ++ ;\nimport .").unwrap();
        assert_eq!(program.defs[0].name, "import");
        assert_eq!(
            program.code,
            vec![Atom::Reference("import".into()), Atom::Literal('.')]
        );

        // At the head of the file it still introduces an import statement.
        let program = parse_program("import \"std.sb\"\n: import + ;").unwrap();
        assert_eq!(program.imports, vec!["std.sb".to_string()]);
        assert_eq!(program.defs[0].name, "import");
    }

    #[test]
    fn definitions_after_code_rejected() {
        // The section order is fixed: imports, definitions, code.
        assert!(parse_program("+ : a + ;").is_err());
        assert!(parse_program(": a + ; import \"x.sb\"").is_err());
    }

    #[test]
    fn deep_nesting_guard() {
        let mut source = String::new();
        for _ in 0..600 {
            source.push('[');
        }
        for _ in 0..600 {
            source.push(']');
        }
        let err = parse_code(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    }
}
