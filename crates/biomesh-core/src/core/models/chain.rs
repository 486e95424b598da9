use super::atom::Atom;
use crate::core::spatial::bounding::BoundingVolume;
use nalgebra::Point3;
use std::cell::Cell;

/// The atoms sharing one chain identifier, in parse order.
///
/// The bounding box is computed on first access and cached; adding atoms or
/// handing out mutable access drops the cached value.
#[derive(Debug, Clone)]
pub struct Chain {
    id: String,
    atoms: Vec<Atom>,
    bounding_box: Cell<Option<BoundingVolume>>,
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.atoms == other.atoms
    }
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            atoms: Vec::new(),
            bounding_box: Cell::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
        self.invalidate_bounding_box();
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Mutable access to one atom. Invalidates the cached bounding box.
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.invalidate_bounding_box();
        self.atoms.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn clear(&mut self) {
        self.atoms.clear();
        self.invalidate_bounding_box();
    }

    pub fn invalidate_bounding_box(&self) {
        self.bounding_box.set(None);
    }

    pub fn bounding_box(&self) -> BoundingVolume {
        if let Some(cached) = self.bounding_box.get() {
            return cached;
        }
        let computed = BoundingVolume::from_atoms(&self.atoms);
        self.bounding_box.set(Some(computed));
        computed
    }

    /// Centre of the bounding box, or `None` for an empty chain.
    pub fn center(&self) -> Option<Point3<f64>> {
        self.bounding_box().center()
    }

    pub fn bounding_sphere_radius(&self) -> f64 {
        self.bounding_box().bounding_sphere_radius()
    }

    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        self.bounding_box().contains_point(point)
    }

    pub(crate) fn is_bounding_box_cached(&self) -> bool {
        self.bounding_box.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom_at(name: &str, x: f64, y: f64, z: f64) -> Atom {
        Atom::new(name, Point3::new(x, y, z))
    }

    #[test]
    fn new_chain_is_empty() {
        let chain = Chain::new("A");
        assert_eq!(chain.id(), "A");
        assert!(chain.is_empty());
        assert!(chain.bounding_box().is_empty());
        assert!(chain.center().is_none());
        assert_eq!(chain.bounding_sphere_radius(), 0.0);
    }

    #[test]
    fn atoms_keep_insertion_order() {
        let mut chain = Chain::new("B");
        chain.add_atom(atom_at("N", 0.0, 0.0, 0.0));
        chain.add_atom(atom_at("CA", 1.0, 0.0, 0.0));
        chain.add_atom(atom_at("C", 2.0, 0.0, 0.0));
        let names: Vec<_> = chain.atoms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["N", "CA", "C"]);
        assert_eq!(chain.atom(1).unwrap().name, "CA");
        assert!(chain.atom(3).is_none());
    }

    #[test]
    fn bounding_box_is_cached_until_invalidated() {
        let mut chain = Chain::new("A");
        chain.add_atom(atom_at("N", 0.0, 0.0, 0.0));
        assert!(!chain.is_bounding_box_cached());

        let first = chain.bounding_box();
        assert!(chain.is_bounding_box_cached());
        assert_eq!(first.volume(), 0.0);

        chain.add_atom(atom_at("C", 2.0, 2.0, 2.0));
        assert!(!chain.is_bounding_box_cached());
        assert!((chain.bounding_box().volume() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn mutable_access_forces_recomputation() {
        let mut chain = Chain::new("A");
        chain.add_atom(atom_at("N", 0.0, 0.0, 0.0));
        chain.add_atom(atom_at("C", 1.0, 1.0, 1.0));
        assert_eq!(chain.bounding_box().max(), Point3::new(1.0, 1.0, 1.0));

        chain.atom_mut(1).unwrap().position = Point3::new(4.0, 1.0, 1.0);
        assert_eq!(chain.bounding_box().max(), Point3::new(4.0, 1.0, 1.0));
    }

    #[test]
    fn center_and_sphere_radius_derive_from_box() {
        let mut chain = Chain::new("A");
        chain.add_atom(atom_at("N", -1.0, -1.0, -1.0));
        chain.add_atom(atom_at("C", 1.0, 1.0, 1.0));
        assert_eq!(chain.center(), Some(Point3::origin()));
        assert!((chain.bounding_sphere_radius() - 3.0_f64.sqrt()).abs() < 1e-12);
        assert!(chain.contains_point(&Point3::new(0.5, -0.5, 1.0)));
        assert!(!chain.contains_point(&Point3::new(0.5, -0.5, 1.5)));
    }

    #[test]
    fn clear_empties_chain_and_box() {
        let mut chain = Chain::new("A");
        chain.add_atom(atom_at("N", 3.0, 3.0, 3.0));
        let _ = chain.bounding_box();
        chain.clear();
        assert!(chain.is_empty());
        assert!(chain.bounding_box().is_empty());
    }

    #[test]
    fn equality_ignores_cache_state() {
        let mut a = Chain::new("A");
        a.add_atom(atom_at("N", 1.0, 2.0, 3.0));
        let b = a.clone();
        let _ = a.bounding_box();
        assert_eq!(a, b);
    }
}
