use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

use satcmd_core::{CommandDescriptor, Packet, TimeSyncBuffer};

/// Renders results to stdout.
///
/// `quiet` reduces packet output to the bare hex string so it can be piped.
#[derive(Debug, Clone)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    pub fn emit_packet(&self, packet: &Packet) -> Result<()> {
        println!("{}", self.render_packet(packet)?);
        Ok(())
    }

    pub fn render_packet(&self, packet: &Packet) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&json!({
                "name": packet.name,
                "opcode": packet.opcode,
                "identifier": packet.identifier,
                "params": packet.params,
                "bytes": packet.bytes,
                "hex": packet.to_hex(),
            }))?);
        }
        if self.quiet {
            return Ok(packet.to_hex());
        }
        Ok(format!(
            "{} (opcode 0x{:02X}, id {})\n{}",
            packet.name,
            packet.opcode,
            packet.identifier,
            cell_table(&packet.bytes)
        ))
    }

    pub fn emit_time_sync(&self, buffer: &TimeSyncBuffer) -> Result<()> {
        println!("{}", self.render_time_sync(buffer)?);
        Ok(())
    }

    pub fn render_time_sync(&self, buffer: &TimeSyncBuffer) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&json!({
                "timestamp": buffer.timestamp(),
                "bytes": buffer.as_bytes(),
                "hex": buffer.to_hex(),
            }))?);
        }
        if self.quiet {
            return Ok(buffer.to_hex());
        }
        Ok(format!(
            "Time sync (timestamp {})\n{}",
            buffer.timestamp(),
            cell_table(buffer.as_bytes())
        ))
    }

    pub fn emit_registry(&self, entries: &[(usize, &CommandDescriptor)]) -> Result<()> {
        if self.json {
            let list: Vec<_> = entries
                .iter()
                .map(|(index, d)| {
                    json!({
                        "index": index,
                        "name": d.name,
                        "slug": d.kind.slug(),
                        "opcode": d.opcode,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "command", "slug", "opcode"]);
        for (index, d) in entries {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(d.name),
                Cell::new(d.kind.slug()),
                Cell::new(format!("0x{:02X}", d.opcode)),
            ]);
        }
        println!("{table}");
        Ok(())
    }

    pub fn emit_status<T: Serialize>(&self, value: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", toml::to_string_pretty(value)?);
        }
        Ok(())
    }

    pub fn emit_message(&self, message: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        println!("{}", message.as_ref());
    }
}

fn cell_table(bytes: &[u8]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["cell", "hex", "bin"]);
    for (index, byte) in bytes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(format!("0x{byte:02X}")),
            Cell::new(format!("{byte:08b}")),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use satcmd_core::{generate, CommandBuffer, ScriptedInput};

    fn selftest_packet() -> Packet {
        let mut input = ScriptedInput::new([0x0102_0304]);
        let mut buffer = CommandBuffer::new();
        generate(3, 7, &mut input, &mut buffer).unwrap()
    }

    #[test]
    fn quiet_packet_is_bare_hex() {
        let out = Output::new(false, true).render_packet(&selftest_packet()).unwrap();
        assert_eq!(out, "06070403020100");
    }

    #[test]
    fn json_packet_carries_params_and_hex() {
        let out = Output::new(true, false).render_packet(&selftest_packet()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["opcode"], 6);
        assert_eq!(value["identifier"], 7);
        assert_eq!(value["params"]["command"], "request-selftest");
        assert_eq!(value["hex"], "06070403020100");
    }

    #[test]
    fn table_packet_lists_every_cell() {
        let out = Output::new(false, false).render_packet(&selftest_packet()).unwrap();
        assert!(out.starts_with("Request selftest (opcode 0x06, id 7)"));
        assert!(out.contains("0x04"));
        assert!(out.contains("00000110"));
    }

    #[test]
    fn time_sync_json() {
        let out = Output::new(true, false)
            .render_time_sync(&TimeSyncBuffer::new(0xAABB_CCDD))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["hex"], "ddccbbaa");
        assert_eq!(value["timestamp"], 0xAABB_CCDDu32);
    }
}
