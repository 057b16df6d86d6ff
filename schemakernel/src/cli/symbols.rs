use anyhow::Result;
use schemakernel_layout::symbols::SYMBOL_TABLE;
use std::io::{self, Write};

/// Print every component type: tag, aliases, then each pin's local offset.
pub fn run() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in SYMBOL_TABLE {
        let symbol = (entry.build)();
        let aliases = entry.tags.get(1..).unwrap_or_default().join(", ");
        writeln!(out, "{:<16} {}", entry.kind.tag(), aliases)?;
        for pin in &symbol.pins {
            writeln!(out, "    {:<10} ({}, {})", pin.name, pin.offset.x, pin.offset.y)?;
        }
    }
    Ok(())
}
