use nalgebra::Point3;

/// Represents a single atom parsed from a structure file, annotated with its
/// chemical element and physical constants.
///
/// Atoms are plain values: cloning one yields an independent copy. They are
/// produced by [`AtomBuilder`](super::builder::AtomBuilder) and are not meant
/// to be mutated once placed in a chain, although the fields stay public for
/// callers assembling atoms by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom serial number. Not guaranteed to be unique within a file.
    pub serial: i32,
    /// The name of the atom (e.g., "CA", "N", "O1").
    pub name: String,
    /// Alternate location indicator, if any.
    pub alt_loc: Option<char>,
    /// The residue name (e.g., "ALA", "HOH").
    pub res_name: String,
    /// The chain identifier. Empty when the record left it blank.
    pub chain_id: String,
    /// The residue sequence number.
    pub res_seq: i32,
    /// Residue insertion code, if any.
    pub insertion_code: Option<char>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Crystallographic occupancy, 1.0 when absent.
    pub occupancy: f64,
    /// Temperature (B) factor, 0.0 when absent.
    pub temp_factor: f64,
    /// Upper-case element symbol, or empty when unresolved.
    pub element: String,
    /// Formal charge text as written in the record (e.g., "2+"), or empty.
    pub charge: String,
    /// Whether the atom came from a HETATM record.
    pub hetero: bool,
    /// Atomic radius in Angstroms; 0.0 when unresolved.
    pub radius: f64,
    /// Atomic mass in atomic mass units; 0.0 when unresolved.
    pub mass: f64,
}

impl Atom {
    /// Creates a new `Atom` with default values for every field other than
    /// its name and position.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            alt_loc: None,
            res_name: String::new(),
            chain_id: String::new(),
            res_seq: 0,
            insertion_code: None,
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: String::new(),
            charge: String::new(),
            hetero: false,
            radius: 0.0,
            mass: 0.0,
        }
    }

    /// Euclidean distance to another atom in Angstroms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// Returns `true` once radius and mass have been resolved.
    pub fn has_properties(&self) -> bool {
        self.radius > 0.0 && self.mass > 0.0
    }
}
