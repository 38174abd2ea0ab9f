use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::common::Inputs;

pub fn run_tree(matches: &ArgMatches) -> Result<()> {
    let inputs = Inputs::from_matches(matches)?;
    let container = matches
        .get_one::<u32>("container")
        .ok_or_else(|| anyhow::anyhow!("A container id is required."))?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_tree(&inputs, *container, &mut writer)?;
    writer.flush()?;

    Ok(())
}

///
/// Write the tree in pre-order, one node per line, indented by depth.
///
/// JSON output is not indented and carries the depth as a field instead.
///
pub fn write_tree<W: Write>(inputs: &Inputs, container: u32, writer: &mut W) -> Result<()> {
    let root = inputs.annotation(container)?;
    let tree = inputs
        .index
        .tree(&root)
        .with_context(|| format!("Failed to build the tree under annotation {}", container))?;

    for node in tree.iter() {
        let line = inputs.format(node.annotation())?;
        if inputs.json {
            let mut value: serde_json::Value = serde_json::from_str(&line)?;
            value["depth"] = node.depth().into();
            writeln!(writer, "{}", value)?;
        } else {
            writeln!(writer, "{}{}", "  ".repeat(node.depth()), line)?;
        }
    }
    Ok(())
}
