use crate::cli::InputArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use biomesh::core::spatial::bounding::BoundingVolume;
use biomesh::workflows::load::{self, LoadedStructure};
use tracing::info;

pub mod inspect;
pub mod partition;

/// Loads the structure named on the command line using the merged settings.
pub(crate) fn load_input(args: &InputArgs, config: &PartialConfig) -> Result<LoadedStructure> {
    let reader_config = config.reader_config(args);
    let table = config.element_table(args)?;

    info!("Loading input structure from {:?}", &args.input);
    Ok(load::parse_file_with_table(&args.input, &reader_config, table)?)
}

pub(crate) fn format_bounds(bounds: &BoundingVolume) -> String {
    if bounds.is_empty() {
        return "(empty)".to_string();
    }
    let (min, max) = (bounds.min(), bounds.max());
    format!(
        "[{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
        min.x, min.y, min.z, max.x, max.y, max.z
    )
}
