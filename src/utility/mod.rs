/// Data types shared between the ast and the ir.
pub mod data_type;
/// Parsing utilities shared among modules.
pub mod parsing;
