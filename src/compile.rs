use crate::{
    ast::{self, precedence::PrecedenceTable, Parser},
    ir,
    lexer::Token,
};
use log::{debug, warn};

/// Compile a whole source text, one top-level item at a time.
///
/// Each item is parsed and immediately lowered before the next one is read,
/// so a `binary` definition's precedence is live for everything after it.
/// A malformed item costs one discarded token and compilation resumes; a
/// definition whose body fails to lower is dropped whole. Either way the
/// remaining items still compile.
pub fn from_source(source: &str) -> Vec<ir::FunctionDefinition> {
    let mut parser = Parser::new(source);
    let mut precedence = PrecedenceTable::default();
    let mut context = ir::IRGeneratingContext::new();
    let mut compiled = Vec::new();
    loop {
        match parser.current() {
            Token::Eof => break,
            Token::Char(';') => {
                parser.advance();
            }
            _ => match ast::parse_item(&mut parser, &precedence) {
                Some(item) => {
                    match ir::function::from_ast(&item, &mut context, &mut precedence) {
                        Ok(function) => {
                            debug!("lowered `{}`", function.header.name);
                            compiled.push(function);
                        }
                        Err(error) => {
                            warn!("discarding `{}`: {}", item.prototype.name, error);
                        }
                    }
                }
                None => {
                    warn!("parse failure; skipping one token");
                    parser.advance();
                }
            },
        }
    }
    compiled
}
