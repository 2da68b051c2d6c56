/// Definitions of AST nodes and their parser.
pub mod ast;
/// The single-pass driver loop: parse one item, lower it, repeat.
pub mod compile;
/// Definitions of IR nodes and their parser, the ir generator, the verifier
/// and the executor.
pub mod ir;
/// The lexer: characters to tokens, one at a time.
pub mod lexer;
/// Utilities shared among modules.
pub mod utility;
