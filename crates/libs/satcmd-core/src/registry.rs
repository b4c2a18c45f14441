//! The selectable command table and the generation entry points.

use serde::Serialize;

use crate::buffer::{CommandBuffer, TimeSyncBuffer};
use crate::command::{CommandKind, CommandParams};
use crate::constants::PACKET_LEN;
use crate::error::CommandError;
use crate::input::InputProvider;

/// One selectable registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub opcode: u8,
    pub kind: CommandKind,
}

impl CommandDescriptor {
    const fn of(kind: CommandKind) -> Self {
        Self {
            name: kind.name(),
            opcode: kind.opcode(),
            kind,
        }
    }
}

/// Registry order is the selection index shown to the operator.
pub static REGISTRY: [CommandDescriptor; 8] = [
    CommandDescriptor::of(CommandKind::SetDuration),
    CommandDescriptor::of(CommandKind::SetScale),
    CommandDescriptor::of(CommandKind::RequestMeasurement),
    CommandDescriptor::of(CommandKind::RequestSelftest),
    CommandDescriptor::of(CommandKind::Reset),
    CommandDescriptor::of(CommandKind::Restart),
    CommandDescriptor::of(CommandKind::Save),
    CommandDescriptor::of(CommandKind::Stop),
];

pub fn len() -> usize {
    REGISTRY.len()
}

pub fn iter() -> impl Iterator<Item = (usize, &'static CommandDescriptor)> {
    REGISTRY.iter().enumerate()
}

pub fn descriptor(index: usize) -> Result<&'static CommandDescriptor, CommandError> {
    REGISTRY.get(index).ok_or(CommandError::UnknownCommand {
        index,
        count: REGISTRY.len(),
    })
}

/// Look up a command by index, slug (`set-scale`) or display name
/// (`Set scale`, case-insensitive).
pub fn find(query: &str) -> Result<(usize, &'static CommandDescriptor), CommandError> {
    let query = query.trim();
    if let Ok(index) = query.parse::<usize>() {
        return descriptor(index).map(|d| (index, d));
    }
    iter()
        .find(|(_, d)| d.kind.slug() == query || d.name.eq_ignore_ascii_case(query))
        .ok_or_else(|| CommandError::UnknownCommandName(query.to_string()))
}

/// A generated registry command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Packet {
    pub name: &'static str,
    pub opcode: u8,
    pub identifier: u8,
    pub params: CommandParams,
    pub bytes: [u8; PACKET_LEN],
}

impl Packet {
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

/// Select the command at `index`, collect and encode its fields, then stamp
/// opcode and identifier into cells 0 and 1.
///
/// On `Err` the buffer is left exactly as the caller passed it.
pub fn generate(
    index: usize,
    identifier: u8,
    input: &mut dyn InputProvider,
    buf: &mut CommandBuffer,
) -> Result<Packet, CommandError> {
    let descriptor = descriptor(index)?;
    log::debug!(
        "generate: [{index}] {} opcode=0x{:02x} id={identifier}",
        descriptor.name,
        descriptor.opcode
    );

    let params = CommandParams::collect(descriptor.kind, input)?;
    params.encode_into(buf)?;
    buf.set_header(descriptor.opcode, identifier);
    log::debug!("generate: {} -> {}", descriptor.name, buf.to_hex());

    Ok(Packet {
        name: descriptor.name,
        opcode: descriptor.opcode,
        identifier,
        params,
        bytes: *buf.as_bytes(),
    })
}

/// Prompt for a timestamp and build a time-sync packet.
///
/// Time sync is not in the registry and has no opcode or identifier.
pub fn generate_time_sync(input: &mut dyn InputProvider) -> Result<TimeSyncBuffer, CommandError> {
    input.announce("Timesync command");
    let timestamp = input.request_timestamp("Enter the timestamp")?;
    Ok(encode_time_sync(timestamp))
}

pub fn encode_time_sync(timestamp: u32) -> TimeSyncBuffer {
    log::debug!("time sync: timestamp={timestamp}");
    TimeSyncBuffer::new(timestamp)
}
