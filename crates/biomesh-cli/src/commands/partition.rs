use super::{format_bounds, load_input};
use crate::cli::PartitionArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use anyhow::Context;
use biomesh::core::spatial::octree::Octree;
use biomesh::workflows::partition;
use std::fmt::{self, Write};
use tracing::{info, warn};

pub fn run(args: PartitionArgs) -> Result<()> {
    let config = PartialConfig::for_input(&args.input)?;
    let octree_config = config.octree_config(&args)?;
    let loaded = load_input(&args.input, &config)?;

    if !loaded.structure.has_data() {
        warn!("Input contains no atoms; the octree will be empty.");
    }

    info!("Invoking the partition workflow...");
    let octree = partition::partition(&loaded.structure, &octree_config);
    let summary = render_summary(&octree).context("Failed to render octree summary")?;
    print!("{summary}");
    Ok(())
}

pub(crate) fn render_summary(octree: &Octree) -> std::result::Result<String, fmt::Error> {
    let config = octree.config();
    let mut out = String::new();

    writeln!(out, "Root:            {}", format_bounds(octree.root().bounds()))?;
    writeln!(
        out,
        "Settings:        max-depth={} min-atoms={} margin={:.2}",
        config.max_depth, config.min_atoms, config.margin
    )?;
    writeln!(out, "Nodes:           {}", octree.node_count())?;
    writeln!(out, "Leaves:          {}", octree.leaves().count())?;
    writeln!(out, "Occupied leaves: {}", octree.occupied_leaves().count())?;
    writeln!(out, "Depth reached:   {}", octree.max_depth_reached())?;
    for (depth, count) in octree.leaf_counts_by_depth().into_iter().enumerate() {
        if count > 0 {
            writeln!(out, "  depth {depth}: {count} leaf(s)")?;
        }
    }
    Ok(out)
}
