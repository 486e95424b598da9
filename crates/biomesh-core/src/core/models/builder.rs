use super::atom::Atom;
use super::element::ElementTable;
use crate::core::error::ErrorKind;
use nalgebra::Point3;
use phf::phf_set;
use thiserror::Error;

static TWO_LETTER_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "FE", "ZN", "MG", "CL", "NA", "CA",
};

static ONE_LETTER_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "C", "N", "O", "S", "P", "H", "K",
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementError {
    #[error("Unknown element '{0}': no entry in the element table")]
    UnknownElement(String),
}

impl ElementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElementError::UnknownElement(_) => ErrorKind::UnknownElement,
        }
    }
}

/// Infers an element symbol from a PDB-style atom name.
///
/// The two-letter symbols FE, ZN, MG, CL and NA are recognised from the first
/// two characters of the trimmed, upper-cased name. Otherwise the first
/// character is matched against C, N, O, S, P, H and K.
///
/// A name starting with "CA" resolves to carbon, not calcium: in protein
/// files "CA" is overwhelmingly the alpha-carbon. Calcium ions must carry an
/// explicit element (the element column of the record, or
/// [`AtomBuilder::element`]).
///
/// Returns `None` when no rule applies.
pub fn detect_element(atom_name: &str) -> Option<&'static str> {
    let name = atom_name.trim().to_ascii_uppercase();
    if name.is_empty() {
        return None;
    }

    if let Some(prefix) = name.get(0..2) {
        if let Some(&symbol) = TWO_LETTER_ELEMENTS.get_key(prefix) {
            return Some(if symbol == "CA" { "C" } else { symbol });
        }
    }

    name.get(0..1)
        .and_then(|first| ONE_LETTER_ELEMENTS.get_key(first))
        .copied()
}

/// Assembles one [`Atom`] field by field and resolves its element properties
/// against an [`ElementTable`].
///
/// Explicitly set radius and mass always take precedence over table values.
/// The builder can be [`reset`](Self::reset) and reused for the next atom.
pub struct AtomBuilder<'a> {
    table: &'a ElementTable,
    atom: Atom,
    element: Option<String>,
    radius: Option<f64>,
    mass: Option<f64>,
}

impl<'a> AtomBuilder<'a> {
    pub fn new(table: &'a ElementTable) -> Self {
        Self {
            table,
            atom: Atom::new("", Point3::origin()),
            element: None,
            radius: None,
            mass: None,
        }
    }

    pub fn serial(&mut self, serial: i32) -> &mut Self {
        self.atom.serial = serial;
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.atom.name = name.to_string();
        self
    }

    pub fn alt_loc(&mut self, alt_loc: Option<char>) -> &mut Self {
        self.atom.alt_loc = alt_loc;
        self
    }

    pub fn residue_name(&mut self, res_name: &str) -> &mut Self {
        self.atom.res_name = res_name.to_string();
        self
    }

    pub fn chain_id(&mut self, chain_id: &str) -> &mut Self {
        self.atom.chain_id = chain_id.to_string();
        self
    }

    pub fn residue_seq(&mut self, res_seq: i32) -> &mut Self {
        self.atom.res_seq = res_seq;
        self
    }

    pub fn insertion_code(&mut self, code: Option<char>) -> &mut Self {
        self.atom.insertion_code = code;
        self
    }

    pub fn position(&mut self, position: Point3<f64>) -> &mut Self {
        self.atom.position = position;
        self
    }

    pub fn coordinates(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.position(Point3::new(x, y, z))
    }

    pub fn occupancy(&mut self, occupancy: f64) -> &mut Self {
        self.atom.occupancy = occupancy;
        self
    }

    pub fn temp_factor(&mut self, temp_factor: f64) -> &mut Self {
        self.atom.temp_factor = temp_factor;
        self
    }

    pub fn charge(&mut self, charge: &str) -> &mut Self {
        self.atom.charge = charge.to_string();
        self
    }

    pub fn hetero(&mut self, hetero: bool) -> &mut Self {
        self.atom.hetero = hetero;
        self
    }

    /// Sets the element explicitly. A blank symbol leaves the element unset so
    /// that auto-detection still applies.
    pub fn element(&mut self, symbol: &str) -> &mut Self {
        let symbol = symbol.trim();
        self.element = (!symbol.is_empty()).then(|| symbol.to_ascii_uppercase());
        self
    }

    pub fn radius(&mut self, radius: f64) -> &mut Self {
        self.radius = Some(radius);
        self
    }

    pub fn mass(&mut self, mass: f64) -> &mut Self {
        self.mass = Some(mass);
        self
    }

    /// Infers the element from the atom name unless one was set explicitly.
    /// See [`detect_element`] for the rules.
    pub fn auto_detect_element(&mut self) -> &mut Self {
        if self.element.is_none() && !self.atom.name.is_empty() {
            self.element = detect_element(&self.atom.name).map(str::to_string);
        }
        self
    }

    /// Returns the finished atom.
    ///
    /// Explicit radius and mass take precedence over the element table, and a
    /// value that was not set explicitly is taken from the table. Radius and
    /// mass are kept only as a pair: if either one stays unresolved (for
    /// instance an explicit radius on an atom with an unknown element), both
    /// are left at 0.0. An unresolved element is not an error.
    pub fn build(&mut self) -> Atom {
        self.auto_detect_element();

        let mut atom = self.atom.clone();
        let spec = self.element.as_deref().and_then(|e| self.table.get(e));
        atom.element = self.element.clone().unwrap_or_default();
        let radius = self.radius.or(spec.map(|s| s.radius));
        let mass = self.mass.or(spec.map(|s| s.mass));
        (atom.radius, atom.mass) = match (radius, mass) {
            (Some(radius), Some(mass)) => (radius, mass),
            _ => (0.0, 0.0),
        };
        atom
    }

    pub fn reset(&mut self) -> &mut Self {
        self.atom = Atom::new("", Point3::origin());
        self.element = None;
        self.radius = None;
        self.mass = None;
        self
    }
}

/// Fills in radius and mass for a batch of atoms that already carry an
/// element, returning new atoms in the same order.
///
/// # Errors
///
/// Returns [`ElementError::UnknownElement`] for the first atom whose element
/// has no entry in `table`.
pub fn enhance_atoms(atoms: &[Atom], table: &ElementTable) -> Result<Vec<Atom>, ElementError> {
    atoms
        .iter()
        .map(|atom| {
            let spec = table
                .get(&atom.element)
                .ok_or_else(|| ElementError::UnknownElement(atom.element.clone()))?;
            Ok(Atom {
                element: spec.symbol.clone(),
                radius: spec.radius,
                mass: spec.mass,
                ..atom.clone()
            })
        })
        .collect()
}
