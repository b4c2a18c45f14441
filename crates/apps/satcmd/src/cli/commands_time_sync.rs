use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};

use satcmd_core::{encode_time_sync, generate_time_sync, TimeSyncBuffer};

use crate::cli::app::{RuntimeContext, TimeSyncArgs};
use crate::cli::console::{now_unix_seconds, ConsoleInput};

pub fn run<R: BufRead, W: Write>(
    ctx: &RuntimeContext,
    args: &TimeSyncArgs,
    console: &mut ConsoleInput<R, W>,
) -> Result<TimeSyncBuffer> {
    let buffer = if let Some(timestamp) = args.timestamp {
        encode_time_sync(timestamp)
    } else if args.now {
        encode_time_sync(now_unix_seconds().map_err(|err| anyhow!(err))?)
    } else {
        generate_time_sync(console)?
    };
    ctx.output.emit_time_sync(&buffer)?;
    Ok(buffer)
}
