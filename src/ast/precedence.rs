use std::collections::HashMap;

/// Precedence a `binary` definition gets when it does not declare one.
pub const DEFAULT_BINARY_PRECEDENCE: i32 = 30;

/// The precedence of every operator symbol currently known to the parser.
///
/// Seeded with the built-in arithmetic operators and grown (never shrunk)
/// whenever a user `binary` definition is lowered. A symbol that is absent is
/// "not an operator at all", which is different from having precedence 0.
///
/// The table is passed by reference through the parse and lowering call
/// chains, so independent compilations never share state.
#[derive(Debug, Clone)]
pub struct PrecedenceTable {
    entries: HashMap<char, i32>,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self {
            entries: HashMap::from([('<', 0), ('-', 1), ('+', 2), ('/', 3), ('*', 4)]),
        }
    }
}

impl PrecedenceTable {
    /// Precedence of `symbol`, or `None` if it is not an operator.
    pub fn get(&self, symbol: char) -> Option<i32> {
        self.entries.get(&symbol).copied()
    }

    /// Insert or overwrite the entry for `symbol`.
    pub fn set(&mut self, symbol: char, precedence: i32) {
        self.entries.insert(symbol, precedence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_builtins() {
        let table = PrecedenceTable::default();
        assert_eq!(table.get('<'), Some(0));
        assert_eq!(table.get('*'), Some(4));
        assert!(table.get('*') > table.get('/'));
        assert!(table.get('/') > table.get('+'));
        assert!(table.get('+') > table.get('-'));
        assert!(table.get('-') > table.get('<'));
    }

    #[test]
    fn unknown_is_not_an_operator() {
        let table = PrecedenceTable::default();
        assert_eq!(table.get('%'), None);
    }

    #[test]
    fn set_overwrites() {
        let mut table = PrecedenceTable::default();
        table.set('%', 40);
        assert_eq!(table.get('%'), Some(40));
        table.set('%', 7);
        assert_eq!(table.get('%'), Some(7));
    }
}
