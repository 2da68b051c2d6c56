/// A reference to a named value: a parameter or a loop variable.
///
/// Resolution happens at lowering time against the live symbol table;
/// parsing cannot tell a sound reference from a dangling one.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct VariableRef(pub String);
