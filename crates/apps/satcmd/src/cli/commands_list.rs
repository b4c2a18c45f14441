use anyhow::Result;

use satcmd_core::registry;

use crate::cli::app::RuntimeContext;

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let entries: Vec<_> = registry::iter().collect();
    ctx.output.emit_registry(&entries)
}
