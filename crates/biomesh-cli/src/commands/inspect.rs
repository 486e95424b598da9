use super::{format_bounds, load_input};
use crate::cli::InspectArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use anyhow::Context;
use biomesh::workflows::load::LoadedStructure;
use std::fmt::{self, Write};
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let config = PartialConfig::for_input(&args.input)?;
    let loaded = load_input(&args.input, &config)?;

    info!("Rendering structure report.");
    let report =
        render_report(&loaded, args.atoms).context("Failed to render structure report")?;
    print!("{report}");
    Ok(())
}

pub(crate) fn render_report(
    loaded: &LoadedStructure,
    list_atoms: bool,
) -> std::result::Result<String, fmt::Error> {
    let structure = &loaded.structure;
    let mut out = String::new();

    if let Some(header) = structure.header() {
        writeln!(
            out,
            "Header:     {} {} {}",
            header.id_code, header.classification, header.deposition_date
        )?;
    }
    writeln!(out, "Lines read: {}", loaded.lines_processed)?;
    writeln!(out, "Atoms:      {}", structure.atom_count())?;
    writeln!(out, "Chains:     {}", structure.chain_count())?;
    writeln!(out, "Bounds:     {}", format_bounds(&structure.bounding_box()))?;

    for chain in structure.chains() {
        let label = if chain.id().is_empty() { "_" } else { chain.id() };
        writeln!(
            out,
            "  chain {:<2} {:>6} atom(s)  {}  r={:.3}",
            label,
            chain.len(),
            format_bounds(&chain.bounding_box()),
            chain.bounding_sphere_radius()
        )?;
    }

    if list_atoms {
        for atom in structure.atoms() {
            writeln!(
                out,
                "  {:>5} {:<4} {:>3} {:<1} {:>4} {:>8.3} {:>8.3} {:>8.3} {:<2} r={:.2} m={:.3}",
                atom.serial,
                atom.name,
                atom.res_name,
                atom.chain_id,
                atom.res_seq,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.element,
                atom.radius,
                atom.mass
            )?;
        }
    }

    let diagnostics = &loaded.diagnostics;
    if diagnostics.has_warnings() {
        writeln!(out, "Warnings ({}):", diagnostics.warnings.len())?;
        for warning in &diagnostics.warnings {
            writeln!(out, "  {warning}")?;
        }
    }
    if diagnostics.has_errors() {
        writeln!(out, "Errors ({}):", diagnostics.errors.len())?;
        for error in &diagnostics.errors {
            writeln!(out, "  {error}")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biomesh::core::io::pdb::config::ReaderConfig;
    use biomesh::workflows::load;

    const TEXT: &str = "\
HEADER    PLANT PROTEIN                           30-APR-81   1CRN
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
ATOM      2  CA  THR A   1      16.967  12.784   4.338  1.00 10.80           C
ATOM      3  C   THR A   1      15.685  12.75x   5.133  1.00  9.19           C
HETATM   50  O   HOH A 101      10.000  10.000  10.000  1.00 20.00           O
END
";

    #[test]
    fn report_lists_counts_chains_and_diagnostics() {
        let loaded = load::parse(TEXT, &ReaderConfig::default()).unwrap();
        let report = render_report(&loaded, false).unwrap();

        assert!(report.contains("Header:     1CRN PLANT PROTEIN 30-APR-81"));
        assert!(report.contains("Atoms:      2"));
        assert!(report.contains("Chains:     1"));
        assert!(report.contains("chain A       2 atom(s)"));
        assert!(report.contains("Warnings (1):\n  line 5: HETATM not supported"));
        assert!(report.contains("Errors (1):\n  line 4: Invalid number in field 'y'"));
    }

    #[test]
    fn atom_listing_is_optional() {
        let loaded = load::parse(TEXT, &ReaderConfig::default()).unwrap();
        assert!(!render_report(&loaded, false).unwrap().contains("m=14.007"));
        assert!(render_report(&loaded, true).unwrap().contains("m=14.007"));
    }
}
