//! Identifiers and a simple allocator for decorated elements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host-side element handle. Opaque to the core; hosts may mint their own or
/// let [`IdAllocator`] hand out dense ids.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Monotonic allocator for ElementId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_element: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element = self.next_element.wrapping_add(1);
        id
    }

    /// Skip past a host-supplied id so later allocations cannot collide with it.
    #[inline]
    pub fn reserve(&mut self, id: ElementId) {
        if id.0 >= self.next_element {
            self.next_element = id.0.wrapping_add(1);
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_element(), ElementId(0));
        assert_eq!(alloc.alloc_element(), ElementId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_element(), ElementId(0));
    }

    #[test]
    fn reserve_skips_host_ids() {
        let mut alloc = IdAllocator::new();
        alloc.reserve(ElementId(7));
        assert_eq!(alloc.alloc_element(), ElementId(8));
        alloc.reserve(ElementId(2));
        assert_eq!(alloc.alloc_element(), ElementId(9));
    }
}
