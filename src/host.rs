//! Hosts that widget roots are attached to.
//!
//! A widget that owns a root (see [`PaginationButtons`](crate::PaginationButtons))
//! is attached to a host exactly once. The host only records which roots it
//! holds and in what order; the owning model decides what to draw for each.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ROOT: AtomicU64 = AtomicU64::new(1);

/// Identity of a widget root. Every widget instance gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(u64);

impl RootId {
    /// Allocates a new, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_ROOT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Something a widget root can be attached to.
pub trait Host {
    /// Appends a root. Attaching the same root twice appends it twice.
    fn attach(&mut self, root: RootId);

    /// Removes a root. Returns false if it was not attached.
    fn detach(&mut self, root: RootId) -> bool;

    /// Whether the root is currently attached.
    fn contains(&self, root: RootId) -> bool;
}

/// An ordered list of attached roots.
#[derive(Debug, Clone, Default)]
pub struct Container {
    roots: Vec<RootId>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached roots in attach order.
    pub fn roots(&self) -> &[RootId] {
        &self.roots
    }

    /// Number of attached roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// True when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl Host for Container {
    fn attach(&mut self, root: RootId) {
        self.roots.push(root);
    }

    fn detach(&mut self, root: RootId) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| *r != root);
        self.roots.len() != before
    }

    fn contains(&self, root: RootId) -> bool {
        self.roots.contains(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_ids_are_unique() {
        let a = RootId::next();
        let b = RootId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_attach_and_detach() {
        let mut host = Container::new();
        let root = RootId::next();
        assert!(host.is_empty());

        host.attach(root);
        assert!(host.contains(root));
        assert_eq!(host.roots(), &[root]);

        assert!(host.detach(root));
        assert!(!host.contains(root));
        assert!(!host.detach(root));
    }
}
