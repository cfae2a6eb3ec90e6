use super::gather::{Adapter, extract_child};
use super::registry::{Registry, Slot};
use crate::runtime::task::TaskHandle;

use indexmap::IndexMap;
use std::hash::Hash;

/// Joins handles keyed by `K`, keeping their insertion order.
///
/// A key that appears twice keeps its first position and its last handle,
/// as when collecting into a map; the replaced handle is not awaited.
pub struct MapAdapter<K, V, E> {
    handles: IndexMap<K, TaskHandle<V, E>>,
}

impl<K, V, E> MapAdapter<K, V, E>
where
    K: Hash + Eq,
{
    pub fn new<I>(handles: I) -> Self
    where
        I: IntoIterator<Item = (K, TaskHandle<V, E>)>,
    {
        Self {
            handles: handles.into_iter().collect(),
        }
    }
}

impl<K, V, E> Adapter for MapAdapter<K, V, E>
where
    K: Hash + Eq,
    V: Clone,
    E: Clone,
{
    type Key = K;
    type Output = IndexMap<K, V>;
    type Error = E;

    fn registry(&self) -> Registry<'_, K> {
        let mut registry = Registry::with_capacity(self.handles.len());

        for (key, handle) in &self.handles {
            registry.push(Slot::Key(key), handle);
        }

        registry
    }

    fn extract(self) -> Result<IndexMap<K, V>, E> {
        let mut results = IndexMap::with_capacity(self.handles.len());

        for (key, handle) in self.handles {
            let value = extract_child(Slot::Key(&key), &handle)?;
            results.insert(key, value);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_keep_first_position_and_last_handle() {
        let adapter = MapAdapter::new([
            ("a", TaskHandle::<i32, ()>::succeeded(1)),
            ("b", TaskHandle::succeeded(2)),
            ("a", TaskHandle::succeeded(3)),
        ]);

        assert_eq!(adapter.registry().len(), 2);

        let results = adapter.extract().unwrap();
        let pairs: Vec<_> = results.into_iter().collect();
        assert_eq!(pairs, vec![("a", 3), ("b", 2)]);
    }
}
