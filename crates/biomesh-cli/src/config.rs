use crate::cli::{InputArgs, PartitionArgs};
use crate::error::{CliError, Result};
use biomesh::core::io::pdb::config::{ParsePolicy, ReaderConfig};
use biomesh::core::models::element::ElementTable;
use biomesh::core::spatial::octree::OctreeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialReaderConfig {
    policy: Option<ParsePolicy>,
    #[serde(rename = "include-hetatm")]
    include_hetatm: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialPartitionConfig {
    #[serde(rename = "max-depth")]
    max_depth: Option<usize>,
    #[serde(rename = "min-atoms")]
    min_atoms: Option<usize>,
    margin: Option<f64>,
}

/// Settings read from a TOML config file. Every key is optional; command-line
/// flags take precedence over anything set here.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    reader: Option<PartialReaderConfig>,
    partition: Option<PartialPartitionConfig>,
    elements: Option<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Loads the config file named by `--config`, or an empty config.
    pub fn for_input(args: &InputArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn reader_config(&self, args: &InputArgs) -> ReaderConfig {
        let file = self.reader.clone().unwrap_or_default();

        let policy = if args.strict {
            ParsePolicy::FailFast
        } else {
            file.policy.unwrap_or_default()
        };
        let include_hetatm = args.include_hetatm || file.include_hetatm.unwrap_or(false);

        ReaderConfig::new()
            .with_policy(policy)
            .with_include_hetatm(include_hetatm)
    }

    pub fn octree_config(&self, args: &PartitionArgs) -> Result<OctreeConfig> {
        let file = self.partition.clone().unwrap_or_default();
        let defaults = OctreeConfig::default();

        let margin = args.margin.or(file.margin).unwrap_or(defaults.margin);
        if !margin.is_finite() {
            return Err(CliError::Config(format!(
                "partition margin must be a finite number, got {margin}"
            )));
        }

        Ok(defaults
            .with_max_depth(args.depth.or(file.max_depth).unwrap_or(defaults.max_depth))
            .with_min_atoms(args.min_atoms.or(file.min_atoms).unwrap_or(defaults.min_atoms))
            .with_margin(margin))
    }

    /// Path of the element table to merge, with the command-line flag taking
    /// precedence. A relative path from the config file is resolved against
    /// the config file's directory.
    pub fn elements_path(&self, args: &InputArgs) -> Option<PathBuf> {
        if let Some(path) = &args.elements {
            return Some(path.clone());
        }
        let path = self.elements.as_ref()?;
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// The default element table, extended with the configured file if any.
    pub fn element_table(&self, args: &InputArgs) -> Result<Arc<ElementTable>> {
        let mut table = ElementTable::new();
        if let Some(path) = self.elements_path(args) {
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            let added = if is_csv {
                table.load_csv(&path)?
            } else {
                table.load_toml(&path)?
            };
            debug!("Merged {} element(s) from {:?}", added, path);
        }
        Ok(Arc::new(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn input_args(input: &str) -> InputArgs {
        InputArgs {
            input: PathBuf::from(input),
            config: None,
            strict: false,
            include_hetatm: false,
            elements: None,
        }
    }

    fn partition_args() -> PartitionArgs {
        PartitionArgs {
            input: input_args("in.pdb"),
            depth: None,
            min_atoms: None,
            margin: None,
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("biomesh.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_config_gives_library_defaults() {
        let config = PartialConfig::default();
        assert_eq!(config.reader_config(&input_args("a.pdb")), ReaderConfig::default());
        assert_eq!(
            config.octree_config(&partition_args()).unwrap(),
            OctreeConfig::default()
        );
        assert!(config.elements_path(&input_args("a.pdb")).is_none());
    }

    #[test]
    fn file_values_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
elements = "tables/extra.toml"

[reader]
policy = "fail-fast"
include-hetatm = true

[partition]
max-depth = 3
min-atoms = 4
margin = 0.5
"#,
        );
        let config = PartialConfig::from_file(&path).unwrap();

        let reader = config.reader_config(&input_args("a.pdb"));
        assert_eq!(reader.policy, ParsePolicy::FailFast);
        assert!(reader.include_hetatm);

        let octree = config.octree_config(&partition_args()).unwrap();
        assert_eq!(octree.max_depth, 3);
        assert_eq!(octree.min_atoms, 4);
        assert_eq!(octree.margin, 0.5);

        assert_eq!(
            config.elements_path(&input_args("a.pdb")),
            Some(dir.path().join("tables/extra.toml"))
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[partition]\nmax-depth = 3\nmargin = 0.5\n");
        let config = PartialConfig::from_file(&path).unwrap();

        let mut args = partition_args();
        args.depth = Some(6);
        args.input.strict = true;
        args.input.elements = Some(PathBuf::from("/data/elements.csv"));

        let octree = config.octree_config(&args).unwrap();
        assert_eq!(octree.max_depth, 6);
        assert_eq!(octree.margin, 0.5);
        assert_eq!(config.reader_config(&args.input).policy, ParsePolicy::FailFast);
        assert_eq!(
            config.elements_path(&args.input),
            Some(PathBuf::from("/data/elements.csv"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[reader]\nstrict = true\n");
        let result = PartialConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PartialConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn non_finite_margin_is_rejected() {
        let mut args = partition_args();
        args.margin = Some(f64::NAN);
        let result = PartialConfig::default().octree_config(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn element_table_merges_csv_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("extra.csv");
        fs::write(&csv, "symbol,radius,mass\nSE,1.90,78.971\n").unwrap();

        let mut args = input_args("a.pdb");
        args.elements = Some(csv);
        let table = PartialConfig::default().element_table(&args).unwrap();
        assert!(table.contains("SE"));
        assert!(table.contains("C"));

        let toml_path = dir.path().join("extra.toml");
        fs::write(&toml_path, "[BR]\nradius = 1.85\nmass = 79.904\n").unwrap();
        args.elements = Some(toml_path);
        let table = PartialConfig::default().element_table(&args).unwrap();
        assert!(table.contains("BR"));
    }

    #[test]
    fn broken_element_table_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[SE]\nradius = \"big\"\n").unwrap();

        let mut args = input_args("a.pdb");
        args.elements = Some(bad);
        let result = PartialConfig::default().element_table(&args);
        assert!(matches!(result, Err(CliError::ElementTable(_))));
    }
}
