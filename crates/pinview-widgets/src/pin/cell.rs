#![forbid(unsafe_code)]

//! Cell store: the ordered single-character slots of a field.

/// One single-character slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    index: usize,
    /// At most one grapheme cluster.
    value: Option<String>,
    enabled: bool,
}

impl Cell {
    fn new(index: usize) -> Self {
        Self {
            index,
            value: None,
            enabled: index == 0,
        }
    }

    /// Position of this cell in the field.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Stored (unmasked) value, if any.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Whether the cell currently accepts interaction.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Ordered sequence of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStore {
    cells: Vec<Cell>,
}

impl CellStore {
    /// Create `len` empty cells with only cell 0 enabled.
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(Cell::new).collect(),
        }
    }

    /// Rebuild to `len` empty cells. Previous values are discarded.
    pub fn resize(&mut self, len: usize) {
        *self = Self::new(len);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Index of the first cell without a value.
    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(Cell::is_empty)
    }

    /// True when the field has at least one cell and every cell holds a value.
    pub fn is_full(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| !c.is_empty())
    }

    /// Store a grapheme in a cell. Returns `true` if the value changed.
    pub(crate) fn set(&mut self, index: usize, grapheme: &str) -> bool {
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        if cell.value.as_deref() == Some(grapheme) {
            return false;
        }
        cell.value = Some(grapheme.to_owned());
        true
    }

    /// Empty a cell. Returns `true` if it held a value.
    pub(crate) fn clear(&mut self, index: usize) -> bool {
        self.cells
            .get_mut(index)
            .and_then(|cell| cell.value.take())
            .is_some()
    }

    /// Replace every value at once; `values` must have one slot per cell.
    pub(crate) fn assign(&mut self, values: Vec<Option<String>>) {
        debug_assert_eq!(values.len(), self.cells.len());
        for (cell, value) in self.cells.iter_mut().zip(values) {
            cell.value = value;
        }
    }

    /// Enable cells up to `max(0, focus)` and disable the rest.
    pub(crate) fn apply_enabled(&mut self, focus: Option<usize>) {
        let limit = focus.unwrap_or(0);
        for cell in &mut self.cells {
            cell.enabled = cell.index <= limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_only_first_enabled() {
        let store = CellStore::new(4);
        assert_eq!(store.len(), 4);
        let enabled: Vec<bool> = store.iter().map(Cell::is_enabled).collect();
        assert_eq!(enabled, vec![true, false, false, false]);
        assert!(store.iter().all(Cell::is_empty));
        assert_eq!(store.get(2).map(Cell::index), Some(2));
    }

    #[test]
    fn empty_store_is_never_full() {
        let store = CellStore::new(0);
        assert!(store.is_empty());
        assert!(!store.is_full());
        assert_eq!(store.first_empty(), None);
    }

    #[test]
    fn set_and_clear_report_changes() {
        let mut store = CellStore::new(2);
        assert!(store.set(0, "7"));
        assert!(!store.set(0, "7"));
        assert!(store.set(0, "8"));
        assert_eq!(store.get(0).and_then(Cell::value), Some("8"));
        assert!(store.clear(0));
        assert!(!store.clear(0));
        assert!(!store.set(5, "1"));
        assert!(!store.clear(5));
    }

    #[test]
    fn first_empty_and_full() {
        let mut store = CellStore::new(3);
        store.set(0, "a");
        store.set(2, "c");
        assert_eq!(store.first_empty(), Some(1));
        assert!(!store.is_full());
        store.set(1, "b");
        assert_eq!(store.first_empty(), None);
        assert!(store.is_full());
    }

    #[test]
    fn apply_enabled_tracks_focus() {
        let mut store = CellStore::new(4);
        store.apply_enabled(Some(2));
        let enabled: Vec<bool> = store.iter().map(Cell::is_enabled).collect();
        assert_eq!(enabled, vec![true, true, true, false]);
        store.apply_enabled(None);
        let enabled: Vec<bool> = store.iter().map(Cell::is_enabled).collect();
        assert_eq!(enabled, vec![true, false, false, false]);
    }

    #[test]
    fn resize_discards_values() {
        let mut store = CellStore::new(2);
        store.set(0, "1");
        store.apply_enabled(Some(1));
        store.resize(5);
        assert_eq!(store.len(), 5);
        assert!(store.iter().all(Cell::is_empty));
        assert_eq!(store.iter().filter(|c| c.is_enabled()).count(), 1);
    }
}
