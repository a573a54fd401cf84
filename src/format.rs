//! CSS pretty-printing.
//!
//! Chunks handed to the formatter are arbitrary slices of a stylesheet: they
//! can start in the middle of a block, stop halfway through a declaration or
//! contain a stray `}`. [`PrettyCss`] therefore works on the token stream
//! and never rejects input. Output uses one tab per nesting level, puts each
//! declaration on its own line as `property: value;`, separates top-level
//! rules with a blank line and has no trailing newline.
use cssparser::{ParseError, Parser, ParserInput, Token};

/// Reformats a fragment of CSS. Implementations must be deterministic and
/// must not drop or reorder content; they may change whitespace and line
/// breaks.
pub trait CssFormatter {
    fn format(&self, css: &str) -> String;
}

impl<F> CssFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format(&self, css: &str) -> String {
        self(css)
    }
}

/// Default, fragment-tolerant formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyCss;

impl CssFormatter for PrettyCss {
    fn format(&self, css: &str) -> String {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut printer = Printer::default();
        format_block(&mut parser, &mut printer, 0);
        printer.finish()
    }
}

#[derive(Default)]
struct Printer {
    lines: Vec<String>,
    /// A top-level block was just closed; the next top-level line gets a
    /// blank line in front of it.
    rule_closed: bool,
}

impl Printer {
    fn line(&mut self, depth: usize, text: &str) {
        if self.rule_closed && depth == 0 {
            self.lines.push(String::new());
        }
        self.rule_closed = false;
        self.lines.push(format!("{}{}", "\t".repeat(depth), text));
    }

    fn comment(&mut self, depth: usize, text: &str) {
        self.rule_closed = false;
        self.line(depth, text);
    }

    /// Returns the line count after the header, to detect empty blocks.
    fn open(&mut self, depth: usize, header: &str) -> usize {
        self.line(depth, header);
        self.lines.len()
    }

    fn close(&mut self, depth: usize, opened_at: usize) {
        if self.lines.len() == opened_at {
            if let Some(header) = self.lines.last_mut() {
                header.push('}');
            }
        } else {
            self.line(depth, "}");
        }
        self.rule_closed = depth == 0;
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Text of the statement being collected: a declaration, an at-rule
/// statement or a block prelude.
#[derive(Default)]
struct Statement {
    text: String,
    /// Byte index of the first top-level `:` in `text`.
    colon: Option<usize>,
}

impl Statement {
    fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn push(&mut self, s: &str) {
        self.text.push_str(s);
    }

    fn space(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with(' ') {
            self.text.push(' ');
        }
    }

    fn colon(&mut self) {
        if self.colon.is_none() {
            self.colon = Some(self.text.len());
        }
        self.text.push(':');
    }

    /// Take the statement as a declaration, normalized to `name: value`.
    fn take_declaration(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        match self.colon.take() {
            Some(i) => {
                let name = text[..i].trim();
                let value = text[i + 1..].trim();
                if value.is_empty() {
                    format!("{name}:")
                } else {
                    format!("{name}: {value}")
                }
            }
            None => text.trim().to_string(),
        }
    }

    /// Take the statement verbatim, e.g. a selector or at-rule prelude.
    fn take_raw(&mut self) -> String {
        self.colon = None;
        std::mem::take(&mut self.text).trim().to_string()
    }
}

fn format_block<'i>(parser: &mut Parser<'i, '_>, printer: &mut Printer, depth: usize) {
    let mut statement = Statement::default();

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => statement.space(),
            Token::Comment(_) => {
                let comment = parser.slice_from(start);
                if statement.is_empty() {
                    printer.comment(depth, comment);
                } else {
                    statement.push(comment);
                }
            }
            Token::Colon => statement.colon(),
            Token::Semicolon => {
                if !statement.is_empty() {
                    let declaration = statement.take_declaration();
                    printer.line(depth, &format!("{declaration};"));
                }
            }
            Token::CurlyBracketBlock => {
                let prelude = statement.take_raw();
                let header = if prelude.is_empty() {
                    "{".to_string()
                } else {
                    format!("{prelude} {{")
                };
                let opened_at = printer.open(depth, &header);
                let _ = parser.parse_nested_block(|nested| {
                    format_block(nested, printer, depth + 1);
                    Ok::<(), ParseError<'i, ()>>(())
                });
                printer.close(depth, opened_at);
            }
            Token::CloseCurlyBracket => {
                // Unbalanced: the fragment started inside a block.
                if !statement.is_empty() {
                    let declaration = statement.take_declaration();
                    printer.line(depth + 1, &format!("{declaration};"));
                }
                printer.close(depth, usize::MAX);
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let _ = parser.parse_nested_block(|_| Ok::<(), ParseError<'i, ()>>(()));
                statement.push(parser.slice_from(start));
            }
            _ => statement.push(parser.slice_from(start)),
        }
    }

    // Unterminated trailing statement. Outside a block only a `name: value`
    // shape is read as a declaration.
    if !statement.is_empty() {
        if depth > 0 || statement.colon.is_some() {
            let declaration = statement.take_declaration();
            printer.line(depth, &format!("{declaration};"));
        } else {
            let rest = statement.take_raw();
            printer.line(depth, &rest);
        }
    }
}
