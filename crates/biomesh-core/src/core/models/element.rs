use phf::phf_map;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Van der Waals radius (Å) and standard atomic mass (u) of the elements most
/// commonly found in biomolecular structures.
static DEFAULT_ELEMENTS: phf::Map<&'static str, (f64, f64)> = phf_map! {
    "C" => (1.70, 12.011),
    "N" => (1.55, 14.007),
    "O" => (1.52, 15.999),
    "S" => (1.80, 32.06),
    "P" => (1.80, 30.974),
    "H" => (1.20, 1.008),
    "CA" => (1.97, 40.078),
    "MG" => (1.73, 24.305),
    "K" => (2.75, 39.098),
    "NA" => (2.27, 22.990),
    "CL" => (1.75, 35.45),
    "FE" => (1.72, 55.845),
    "ZN" => (1.39, 65.38),
};

/// Physical constants associated with a chemical element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    /// Upper-case element symbol (e.g. "C", "FE").
    pub symbol: String,
    /// Atomic radius in Angstroms.
    pub radius: f64,
    /// Atomic mass in atomic mass units.
    pub mass: f64,
}

impl ElementSpec {
    pub fn new(symbol: &str, radius: f64, mass: f64) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            radius,
            mass,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawElementEntry {
    radius: f64,
    mass: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
struct RawElementRecord {
    symbol: String,
    radius: f64,
    mass: f64,
}

/// Lookup table from element symbol to [`ElementSpec`].
///
/// A table created with [`ElementTable::new`] starts from the default set of
/// biologically common elements and may then be extended, overwritten or
/// pruned. Symbols are case-insensitive: they are stored and looked up in
/// upper case.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    specs: HashMap<String, ElementSpec>,
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTable {
    /// Creates a table populated with the default element set.
    pub fn new() -> Self {
        let specs = DEFAULT_ELEMENTS
            .entries()
            .map(|(symbol, &(radius, mass))| {
                (symbol.to_string(), ElementSpec::new(symbol, radius, mass))
            })
            .collect();
        Self { specs }
    }

    /// Creates a table with no entries.
    pub fn empty() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// Adds a specification, returning the one it replaced, if any.
    pub fn insert(&mut self, spec: ElementSpec) -> Option<ElementSpec> {
        let key = normalize_symbol(&spec.symbol);
        let spec = ElementSpec {
            symbol: key.clone(),
            ..spec
        };
        self.specs.insert(key, spec)
    }

    pub fn get(&self, symbol: &str) -> Option<&ElementSpec> {
        self.specs.get(&normalize_symbol(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.specs.contains_key(&normalize_symbol(symbol))
    }

    pub fn remove(&mut self, symbol: &str) -> Option<ElementSpec> {
        self.specs.remove(&normalize_symbol(symbol))
    }

    pub fn clear(&mut self) {
        self.specs.clear();
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementSpec> {
        self.specs.values()
    }

    /// Merges the entries of a TOML element file into this table.
    ///
    /// The file maps each symbol to a table with `radius` and `mass` keys:
    ///
    /// ```toml
    /// [SE]
    /// radius = 1.90
    /// mass = 78.971
    /// ```
    ///
    /// Entries already present are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`TableLoadError::Io`] if the file cannot be read and
    /// [`TableLoadError::Toml`] if its content does not match the layout above.
    pub fn load_toml(&mut self, path: &Path) -> Result<usize, TableLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TableLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: HashMap<String, RawElementEntry> =
            toml::from_str(&content).map_err(|e| TableLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let count = raw.len();
        for (symbol, entry) in raw {
            self.insert(ElementSpec::new(&symbol, entry.radius, entry.mass));
        }
        Ok(count)
    }

    /// Merges the rows of a `symbol,radius,mass` CSV file into this table.
    ///
    /// # Errors
    ///
    /// Returns [`TableLoadError::Csv`] if the file cannot be opened or a row
    /// fails to deserialize.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize, TableLoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| TableLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut count = 0;
        for result in reader.deserialize::<RawElementRecord>() {
            let record = result.map_err(|e| TableLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            self.insert(ElementSpec::new(&record.symbol, record.radius, record.mass));
            count += 1;
        }
        Ok(count)
    }
}

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
