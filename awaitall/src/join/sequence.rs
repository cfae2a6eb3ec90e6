use super::gather::{Adapter, extract_child};
use super::registry::{Registry, Slot};
use crate::runtime::task::TaskHandle;

/// Joins an ordered sequence of handles.
pub struct SequenceAdapter<V, E> {
    handles: Vec<TaskHandle<V, E>>,
}

impl<V, E> SequenceAdapter<V, E> {
    pub fn new<I>(handles: I) -> Self
    where
        I: IntoIterator<Item = TaskHandle<V, E>>,
    {
        Self {
            handles: handles.into_iter().collect(),
        }
    }
}

impl<V, E> Adapter for SequenceAdapter<V, E>
where
    V: Clone,
    E: Clone,
{
    type Key = ();
    type Output = Vec<V>;
    type Error = E;

    fn registry(&self) -> Registry<'_, ()> {
        let mut registry = Registry::with_capacity(self.handles.len());

        for (index, handle) in self.handles.iter().enumerate() {
            registry.push(Slot::Index(index), handle);
        }

        registry
    }

    fn extract(self) -> Result<Vec<V>, E> {
        self.handles
            .iter()
            .enumerate()
            .map(|(index, handle)| extract_child(Slot::<&()>::Index(index), handle))
            .collect()
    }
}
