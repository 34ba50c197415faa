//! Variable table mapping identifiers to stable slot indices.

/// An ordered list of variable names, compiled against by [`compile`] and
/// indexed into by [`Program::eval`].
///
/// Slot `i` of the evaluation array corresponds to the `i`-th name pushed.
/// Binding by index rather than by address means a compiled program can
/// never dangle: rebuilding the parameter storage only requires refilling
/// the slot array, and a reshaped parameter *set* requires recompiling.
///
/// [`compile`]: crate::compile
/// [`Program::eval`]: crate::Program::eval
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarTable {
    names: Vec<String>,
}

impl VarTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a name, returning its slot index, or `None` if the name is
    /// already present (duplicate bindings would be ambiguous).
    pub fn push(&mut self, name: impl Into<String>) -> Option<usize> {
        let name = name.into();
        if self.slot(&name).is_some() {
            return None;
        }
        self.names.push(name);
        Some(self.names.len() - 1)
    }

    /// Slot index of `name`, if bound.
    pub fn slot(&self, name: &str) -> Option<usize> {
        // Tables hold a handful of parameters; a linear scan at compile
        // time beats hashing.
        self.names.iter().position(|n| n == name)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The bound names in slot order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for VarTable {
    /// Collect names into a table. Later duplicates are silently dropped;
    /// use [`VarTable::push`] when duplicates must be detected.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for name in iter {
            let _ = table.push(name);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_sequential_slots() {
        let mut table = VarTable::new();
        assert_eq!(table.push("du"), Some(0));
        assert_eq!(table.push("dv"), Some(1));
        assert_eq!(table.push("x"), Some(2));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn duplicate_push_is_rejected() {
        let mut table = VarTable::new();
        assert_eq!(table.push("b"), Some(0));
        assert_eq!(table.push("b"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn slot_lookup() {
        let table: VarTable = ["b", "d", "x", "y"].into_iter().collect();
        assert_eq!(table.slot("d"), Some(1));
        assert_eq!(table.slot("y"), Some(3));
        assert_eq!(table.slot("z"), None);
    }
}
