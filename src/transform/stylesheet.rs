//! Minimal stylesheet reader for CSS inlining.
//!
//! Only what an inliner needs: top-level style rules split into individual
//! selectors and declarations, with at-rules kept verbatim. Nested blocks
//! inside at-rules are never inspected.
//!
//! Tokenizing is done by Mozilla's cssparser, so commas inside attribute
//! selectors or functional pseudo-classes, comment openers inside strings,
//! and semicolons inside `url(...)` are all handled the way a browser does.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, SourcePosition, Token};

/// A single `name: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name
    pub name: String,
    /// Value with any `!important` marker removed
    pub value: String,
    /// Whether the declaration was marked `!important`
    pub important: bool,
}

impl Declaration {
    /// Render as `name: value;`.
    pub fn to_css(&self) -> String {
        if self.important {
            format!("{}: {} !important;", self.name, self.value)
        } else {
            format!("{}: {};", self.name, self.value)
        }
    }
}

/// A `selectors { declarations }` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Individual selectors of the rule's selector list, e.g. `p.ft01` and `td`
    pub selectors: Vec<String>,
    /// Parsed declarations in source order
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Render the rule back to CSS.
    pub fn to_css(&self) -> String {
        let body: Vec<String> = self.declarations.iter().map(Declaration::to_css).collect();
        format!("{} {{ {} }}", self.selectors.join(", "), body.join(" "))
    }
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Plain style rules in source order
    pub rules: Vec<StyleRule>,
    /// At-rules (`@media`, `@font-face`, `@import`, ...) as written
    pub at_rules: Vec<String>,
}

impl Stylesheet {
    /// Parse CSS text. A rule whose block is never opened is dropped; an
    /// unclosed block runs to the end of the input.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut sheet = Stylesheet::default();

        loop {
            parser.skip_whitespace();
            let start = parser.position();
            let token = match parser.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };

            match token {
                Token::CDO | Token::CDC | Token::Semicolon | Token::CloseCurlyBracket => continue,
                Token::AtKeyword(_) => {
                    skip_at_rule(&mut parser);
                    sheet.at_rules.push(parser.slice_from(start).trim().to_string());
                }
                token => {
                    if let Some(rule) = parse_style_rule(&mut parser, start, token) {
                        sheet.rules.push(rule);
                    }
                }
            }
        }

        sheet
    }
}

/// Parse a declaration block (the inside of `{ }` or a `style` attribute).
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(block);
    let mut parser = Parser::new(&mut input);
    parse_declaration_list(&mut parser)
}

/// Read a style rule whose first token has already been consumed. The
/// selector list is split on top-level commas only.
fn parse_style_rule<'i>(
    parser: &mut Parser<'i, '_>,
    start: SourcePosition,
    first: Token<'i>,
) -> Option<StyleRule> {
    let mut selectors = Vec::new();
    let mut selector_start = start;
    let mut before = start;
    let mut token = first;

    loop {
        match token {
            Token::Comma => {
                push_selector(&mut selectors, parser.slice(selector_start..before));
                selector_start = parser.position();
            }
            Token::CurlyBracketBlock => {
                push_selector(&mut selectors, parser.slice(selector_start..before));
                let declarations = parser
                    .parse_nested_block(|input| Ok::<_, ParseError<()>>(parse_declaration_list(input)))
                    .unwrap_or_default();
                if selectors.is_empty() {
                    return None;
                }
                return Some(StyleRule {
                    selectors,
                    declarations,
                });
            }
            ref opener if is_block_opener(opener) => consume_block(parser),
            _ => {}
        }

        before = parser.position();
        token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return None,
        };
    }
}

fn push_selector(selectors: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        selectors.push(text.to_string());
    }
}

/// Consume an at-rule up to its `;` or the end of its block.
fn skip_at_rule(parser: &mut Parser) {
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Semicolon => break,
            Token::CurlyBracketBlock => {
                consume_block(parser);
                break;
            }
            ref opener if is_block_opener(opener) => consume_block(parser),
            _ => {}
        }
    }
}

fn parse_declaration_list(input: &mut Parser) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    while !input.is_exhausted() {
        let parsed = input.parse_until_after(Delimiter::Semicolon, |input| parse_declaration(input));
        if let Ok(Some(declaration)) = parsed {
            declarations.push(declaration);
        }
    }

    declarations
}

/// Parse one `name: value [!important]` declaration. Empty values yield
/// `None`.
fn parse_declaration<'i>(input: &mut Parser<'i, '_>) -> Result<Option<Declaration>, ParseError<'i, ()>> {
    let name = input.expect_ident()?.to_ascii_lowercase();
    input.expect_colon()?;

    let start = input.position();
    let mut end = start;
    let mut important = false;

    loop {
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Delim('!') => {
                important = matches!(
                    input.next(),
                    Ok(Token::Ident(ident)) if ident.eq_ignore_ascii_case("important")
                );
                if !important {
                    end = input.position();
                }
            }
            token => {
                if is_block_opener(&token) {
                    consume_block(input);
                }
                end = input.position();
                important = false;
            }
        }
    }

    let value = input.slice(start..end).trim();
    if value.is_empty() {
        return Ok(None);
    }

    Ok(Some(Declaration {
        name,
        value: value.to_string(),
        important,
    }))
}

fn is_block_opener(token: &Token) -> bool {
    matches!(
        token,
        Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock
    )
}

/// Skip the rest of the block just opened, including its closing token.
fn consume_block(parser: &mut Parser) {
    let _ = parser.parse_nested_block(|_| Ok::<(), ParseError<()>>(()));
}
