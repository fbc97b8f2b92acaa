//! Datagram structure reports.

use wire::{decode_layer, CommandType, LayerHeader, Limits, WireResult};

/// Layout summary of one datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub header: LayerHeader,
    pub commands: Vec<CommandSummary>,
    /// Bytes left after the last command.
    pub trailing_bytes: usize,
}

/// Header fields of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub command_type: u8,
    pub kind: Option<CommandType>,
    pub channel_id: u8,
    pub flags: u8,
    pub length: i32,
    pub reliable_sequence_number: i32,
}

/// Decodes the framing of a datagram without interpreting any message.
///
/// # Errors
///
/// Returns the framing error if the datagram is malformed.
pub fn inspect_datagram(datagram: &[u8], limits: &Limits) -> WireResult<InspectReport> {
    let layer = decode_layer(datagram, limits)?;
    let commands = layer
        .commands
        .iter()
        .map(|command| CommandSummary {
            command_type: command.command_type,
            kind: command.kind(),
            channel_id: command.channel_id,
            flags: command.flags,
            length: command.length,
            reliable_sequence_number: command.reliable_sequence_number,
        })
        .collect();
    Ok(InspectReport {
        header: layer.header,
        commands,
        trailing_bytes: layer.payload.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytestream::ByteWriter;

    #[test]
    fn reports_header_and_commands() {
        let mut writer = ByteWriter::new();
        writer
            .write_u16(0x0102)
            .write_u8(1)
            .write_u8(2)
            .write_u32(1000)
            .write_i32(-5);
        writer
            .write_u8(CommandType::Ping.raw())
            .write_u8(0)
            .write_u8(1)
            .write_u8(0)
            .write_i32(12)
            .write_i32(3);
        writer
            .write_u8(0x42)
            .write_u8(2)
            .write_u8(0)
            .write_u8(0)
            .write_i32(14)
            .write_i32(4)
            .write_bytes(&[9, 9]);
        writer.write_bytes(&[0xEE]);

        let report = inspect_datagram(&writer.finish(), &Limits::default()).unwrap();
        assert_eq!(report.header.peer_id, 0x0102);
        assert!(report.header.has_crc());
        assert_eq!(report.header.challenge, -5);
        assert_eq!(report.commands.len(), 2);
        assert_eq!(report.commands[0].kind, Some(CommandType::Ping));
        assert_eq!(report.commands[1].kind, None);
        assert_eq!(report.commands[1].length, 14);
        assert_eq!(report.trailing_bytes, 1);
    }

    #[test]
    fn malformed_datagram_fails() {
        assert!(inspect_datagram(&[0; 4], &Limits::default()).is_err());
    }
}
