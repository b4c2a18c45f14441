use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use satcmd_core::constants::IDENTIFIER_MAX;
use satcmd_core::registry;
use satcmd_core::{generate, CommandBuffer, InputProvider, Packet};

use crate::cli::app::{BuildArgs, RuntimeContext};
use crate::cli::console::ConsoleInput;

pub fn run<R: BufRead, W: Write>(
    ctx: &RuntimeContext,
    args: &BuildArgs,
    console: &mut ConsoleInput<R, W>,
) -> Result<Packet> {
    let index = match &args.command {
        Some(query) => registry::find(query)?.0,
        None => select_command(console)?,
    };
    let identifier = match args.id {
        Some(id) => id,
        None => {
            let id = console.request_integer("Command Id [0-255]:", 0, IDENTIFIER_MAX)?;
            u8::try_from(id).context("identifier does not fit in one byte")?
        }
    };

    let mut buffer = CommandBuffer::new();
    let packet = generate(index, identifier, console, &mut buffer)?;
    log::info!("built {} packet {}", packet.name, packet.to_hex());
    ctx.output.emit_packet(&packet)?;
    Ok(packet)
}

/// Print the registry menu and ask for a selection. Bounds come from the
/// registry itself.
fn select_command<R: BufRead, W: Write>(console: &mut ConsoleInput<R, W>) -> Result<usize> {
    console.show("Select a command:")?;
    for (index, descriptor) in registry::iter() {
        console.show(&format!("[{index}]. {}", descriptor.name))?;
    }
    let last = registry::len() - 1;
    let last_u32 = u32::try_from(last).context("registry too large")?;
    let choice = console.request_integer(&format!("Choose command [0-{last}]:"), 0, last_u32)?;
    usize::try_from(choice).context("selection does not fit in usize")
}
