//! Draw list: the read-only view a canvas keeps of the geometries it renders.
//!
//! Items are snapshots keyed by `Geometry::identity_hash()` at insertion time.
//! Mutating the caller's geometry afterwards changes its identity, so removing
//! it by the new identity misses the stale snapshot.

use tracing::warn;

use crate::calc::BoundingBox;
use crate::gem::Geometry;

#[derive(Clone, Debug)]
struct Item {
    id: u64,
    gem: Geometry,
}

/// Ordered collection of geometry snapshots.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    items: Vec<Item>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot of `gem`.
    pub fn add(&mut self, gem: &Geometry) {
        self.items.push(Item {
            id: gem.identity_hash(),
            gem: gem.clone(),
        });
    }

    /// Remove the first snapshot with `gem`'s identity. Returns false (and
    /// warns) when there is none.
    pub fn remove(&mut self, gem: &Geometry) -> bool {
        let id = gem.identity_hash();
        match self.items.iter().position(|it| it.id == id) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => {
                warn!(kind = gem.kind(), "no such geometry in the draw list");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.items.iter().map(|it| &it.gem)
    }

    /// Union of the item boxes; `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.iter()
            .map(Geometry::bounding_box)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle};

    #[test]
    fn remove_by_identity() {
        let mut list = DrawList::new();
        let mut a = Geometry::new(&Rectangle::new(2.0, 2.0, 2)).unwrap();
        let b = a.copy();
        list.add(&a);
        list.add(&b);
        assert_eq!(list.len(), 2);

        // a moved: its identity no longer matches the stored snapshot
        a.translate(1.0, 0.0);
        assert!(!list.remove(&a));
        assert_eq!(list.len(), 2);

        assert!(list.remove(&b));
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().map(|g| g.coords()[0].x), Some(-1.0));
    }

    #[test]
    fn copies_from_a_clone_remove_only_themselves() {
        let mut list = DrawList::new();
        let a = Geometry::new(&Rectangle::new(2.0, 2.0, 2)).unwrap();
        let snap = a.clone();
        let b = a.copy();
        let c = snap.copy();
        list.add(&b);
        list.add(&c);
        assert!(list.remove(&c));
        assert!(!list.remove(&c));
        assert_eq!(
            list.iter().next().map(Geometry::identity_hash),
            Some(b.identity_hash())
        );
    }

    #[test]
    fn union_of_boxes() {
        let mut list = DrawList::new();
        assert!(list.bounding_box().is_none());
        let mut c = Geometry::new(&Circle {
            radius: 1.0,
            num_dot: 4,
        })
        .unwrap();
        c.translate(10.0, 10.0);
        list.add(&Geometry::new(&Rectangle::new(2.0, 4.0, 2)).unwrap());
        list.add(&c);
        let bb = list.bounding_box().unwrap();
        assert_eq!(bb.x_min, -2.0);
        assert_eq!(bb.y_min, -1.0);
        assert_eq!(bb.x_max, 11.0);
        assert_eq!(bb.y_max, 11.0);
        assert!(!list.is_empty());
    }
}
