use super::gather::{Adapter, extract_child};
use super::registry::{Registry, Slot};
use crate::runtime::task::TaskHandle;

use std::convert::Infallible;

/// Joins a fixed-arity tuple of handles with heterogeneous value types.
///
/// Implemented for tuples of up to twelve handles sharing one error type,
/// and for `()`, which joins nothing and cannot fail. The [`join!`] macro
/// covers any arity.
///
/// [`join!`]: crate::join!
pub struct TupleAdapter<H> {
    handles: H,
}

impl<H> TupleAdapter<H> {
    pub fn new(handles: H) -> Self {
        Self { handles }
    }
}

impl Adapter for TupleAdapter<()> {
    type Key = ();
    type Output = ();
    type Error = Infallible;

    fn registry(&self) -> Registry<'_, ()> {
        Registry::new()
    }

    fn extract(self) -> Result<(), Infallible> {
        Ok(())
    }
}

macro_rules! tuple_adapter {
    ($len:expr; $($T:ident $idx:tt),+) => {
        impl<E: Clone, $($T: Clone),+> Adapter for TupleAdapter<($(TaskHandle<$T, E>,)+)> {
            type Key = ();
            type Output = ($($T,)+);
            type Error = E;

            fn registry(&self) -> Registry<'_, ()> {
                let mut registry = Registry::with_capacity($len);
                $(registry.push(Slot::Position($idx), &self.handles.$idx);)+
                registry
            }

            fn extract(self) -> Result<Self::Output, E> {
                Ok(($(extract_child(Slot::<&()>::Position($idx), &self.handles.$idx)?,)+))
            }
        }
    };
}

tuple_adapter!(1; A 0);
tuple_adapter!(2; A 0, B 1);
tuple_adapter!(3; A 0, B 1, C 2);
tuple_adapter!(4; A 0, B 1, C 2, D 3);
tuple_adapter!(5; A 0, B 1, C 2, D 3, F 4);
tuple_adapter!(6; A 0, B 1, C 2, D 3, F 4, G 5);
tuple_adapter!(7; A 0, B 1, C 2, D 3, F 4, G 5, H 6);
tuple_adapter!(8; A 0, B 1, C 2, D 3, F 4, G 5, H 6, I 7);
tuple_adapter!(9; A 0, B 1, C 2, D 3, F 4, G 5, H 6, I 7, J 8);
tuple_adapter!(10; A 0, B 1, C 2, D 3, F 4, G 5, H 6, I 7, J 8, K 9);
tuple_adapter!(11; A 0, B 1, C 2, D 3, F 4, G 5, H 6, I 7, J 8, K 9, L 10);
tuple_adapter!(12; A 0, B 1, C 2, D 3, F 4, G 5, H 6, I 7, J 8, K 9, L 10, M 11);
