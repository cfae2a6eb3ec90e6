use crate::runtime::task::Completion;

/// Where a child sits in its source collection.
///
/// The slot kind follows the adapter: mapping keys, sequence indices
/// (0-based), or tuple positions (declaration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<K> {
    Key(K),
    Index(usize),
    Position(usize),
}

impl<K> Slot<K> {
    /// Short name of the slot kind, used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Key(_) => "key",
            Slot::Index(_) => "index",
            Slot::Position(_) => "position",
        }
    }
}

/// One registry entry: a slot and the child awaited for it.
pub struct Entry<'a, K> {
    pub slot: Slot<&'a K>,
    pub handle: &'a dyn Completion,
}

/// The children of one join, in canonical order.
///
/// Canonical order is the order entries were pushed: insertion order for
/// mappings and sequences, declaration order for tuples. It is fixed when
/// the registry is built and is the order results are extracted in, no
/// matter in which order the children complete.
pub struct Registry<'a, K> {
    entries: Vec<Entry<'a, K>>,
}

impl<'a, K> Registry<'a, K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a child at the end of the canonical order.
    pub fn push(&mut self, slot: Slot<&'a K>, handle: &'a dyn Completion) {
        self.entries.push(Entry { slot, handle });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<'a, K>> {
        self.entries.iter()
    }
}

impl<K> Default for Registry<'_, K> {
    fn default() -> Self {
        Self::new()
    }
}
