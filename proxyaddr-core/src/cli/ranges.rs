use crate::trust::ranges;
use std::io::Write;

pub fn list_ranges(out: &mut impl Write) -> anyhow::Result<()> {
    for name in ranges::names() {
        let tokens = ranges::lookup(name).unwrap_or_default();
        writeln!(out, "{name:<12} {}", tokens.join(", "))?;
    }
    Ok(())
}
