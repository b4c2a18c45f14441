//! Fixed-size output buffers.

use core::ops::Index;

use crate::constants::{PACKET_LEN, TIME_SYNC_LEN};

/// A registry command packet.
///
/// Cell 0 holds the opcode, cell 1 the identifier. Encoders only write
/// cells they own; anything else keeps whatever the caller put there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandBuffer {
    bytes: [u8; PACKET_LEN],
}

impl CommandBuffer {
    /// Zero-filled buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled by the caller.
    pub fn from_bytes(bytes: [u8; PACKET_LEN]) -> Self {
        Self { bytes }
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    pub fn identifier(&self) -> u8 {
        self.bytes[1]
    }

    pub fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub(crate) fn set_header(&mut self, opcode: u8, identifier: u8) {
        self.bytes[0] = opcode;
        self.bytes[1] = identifier;
    }

    pub(crate) fn put_u8(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }

    pub(crate) fn put_u16_be(&mut self, offset: usize, value: u16) {
        self.bytes[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }

    pub(crate) fn put_u32_le(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

impl Index<usize> for CommandBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

/// A time-sync packet: the timestamp little-endian, no header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSyncBuffer {
    bytes: [u8; TIME_SYNC_LEN],
}

impl TimeSyncBuffer {
    pub fn new(timestamp: u32) -> Self {
        Self {
            bytes: timestamp.to_le_bytes(),
        }
    }

    pub fn timestamp(&self) -> u32 {
        u32::from_le_bytes(self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TIME_SYNC_LEN] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}
