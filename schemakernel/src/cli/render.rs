use anyhow::{Context, Result};
use log::info;
use schemakernel::{parse_script, Interpreter};
use schemakernel_layout::{DrawingSink, RenderConfig, Schematic};
use std::path::Path;

pub fn run(script: &Path, output: Option<&Path>, config: Option<&Path>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let source = std::fs::read_to_string(script)
        .with_context(|| format!("reading {}", script.display()))?;
    let instructions =
        parse_script(&source).with_context(|| format!("parsing {}", script.display()))?;
    info!("{}: {} instructions", script.display(), instructions.len());

    // Execute against a fresh engine
    let mut schematic = Schematic::from_config(&config);
    let summary = Interpreter::new(&mut schematic)
        .run(&instructions)
        .with_context(|| format!("running {}", script.display()))?;
    if summary.skipped > 0 {
        eprintln!("Warning: {} connection(s) could not be resolved", summary.skipped);
    }

    let rendered = if json {
        schematic.to_json().context("serializing snapshot")?
    } else {
        schematic.export()
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Output: {} ({} components, {} wires, {} primitives)",
                path.display(),
                schematic.len(),
                summary.connected,
                schematic.sink().primitives().len(),
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
