use super::atom::Atom;
use super::chain::Chain;
use crate::core::spatial::bounding::BoundingVolume;
use nalgebra::Point3;
use std::collections::HashMap;

/// Identification data from a HEADER record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub classification: String,
    pub deposition_date: String,
    pub id_code: String,
}

/// An ingested molecular structure: a flat atom list plus the same atoms
/// grouped by chain.
///
/// Chains are kept in the order their identifier first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    header: Option<Header>,
    atoms: Vec<Atom>,
    chains: Vec<Chain>,
    chain_index: HashMap<String, usize>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn set_header(&mut self, header: Header) {
        self.header = Some(header);
    }

    /// Appends an atom to the flat list and to its chain, creating the chain
    /// on first occurrence of its identifier.
    pub fn add_atom(&mut self, atom: Atom) {
        let idx = match self.chain_index.get(&atom.chain_id) {
            Some(&idx) => idx,
            None => {
                let idx = self.chains.len();
                self.chains.push(Chain::new(&atom.chain_id));
                self.chain_index.insert(atom.chain_id.clone(), idx);
                idx
            }
        };
        self.chains[idx].add_atom(atom.clone());
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chain_index.get(id).map(|&idx| &self.chains[idx])
    }

    pub fn chain_ids(&self) -> Vec<&str> {
        self.chains.iter().map(Chain::id).collect()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn has_data(&self) -> bool {
        !self.atoms.is_empty()
    }

    /// Bounding box over every atom of the structure.
    pub fn bounding_box(&self) -> BoundingVolume {
        BoundingVolume::from_atoms(&self.atoms)
    }

    /// Atom positions in parse order, as consumed by mesh generation.
    pub fn coordinates(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn clear(&mut self) {
        self.header = None;
        self.atoms.clear();
        self.chains.clear();
        self.chain_index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str, chain: &str, x: f64) -> Atom {
        let mut atom = Atom::new(name, Point3::new(x, 0.0, 0.0));
        atom.chain_id = chain.to_string();
        atom
    }

    #[test]
    fn add_atom_groups_by_chain_in_first_appearance_order() {
        let mut structure = Structure::new();
        structure.add_atom(atom("N", "B", 0.0));
        structure.add_atom(atom("N", "A", 1.0));
        structure.add_atom(atom("CA", "B", 2.0));

        assert_eq!(structure.atom_count(), 3);
        assert_eq!(structure.chain_ids(), ["B", "A"]);
        assert_eq!(structure.chain("B").unwrap().len(), 2);
        assert_eq!(structure.chain("A").unwrap().len(), 1);
        assert!(structure.chain("C").is_none());
        assert_eq!(structure.atoms()[1].chain_id, "A");
    }

    #[test]
    fn bounding_box_and_coordinates_span_all_atoms() {
        let mut structure = Structure::new();
        structure.add_atom(atom("N", "A", -2.0));
        structure.add_atom(atom("N", "B", 5.0));

        let bounds = structure.bounding_box();
        assert!((bounds.width() - 7.0).abs() < 1e-12);
        assert_eq!(
            structure.coordinates(),
            vec![Point3::new(-2.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn clear_removes_everything() {
        let mut structure = Structure::new();
        structure.set_header(Header {
            id_code: "1ABC".into(),
            ..Default::default()
        });
        structure.add_atom(atom("N", "A", 0.0));
        assert!(structure.has_data());

        structure.clear();
        assert!(!structure.has_data());
        assert_eq!(structure.chain_count(), 0);
        assert!(structure.header().is_none());
        assert!(structure.chain("A").is_none());
    }
}
