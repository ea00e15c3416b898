//! Command stream decoding for the decompressed replay payload.
//!
//! After the header block, the payload carries the command segment: a u32
//! length followed by a sequence of frame blocks. Each frame block is
//!
//! | Size | Field |
//! |------|-------|
//! | 4 | Frame number (u32) |
//! | 1 | Block length in bytes |
//! | .. | Commands |
//!
//! and each command inside a block is
//!
//! | Size | Field |
//! |------|-------|
//! | 1 | Owning slot id |
//! | 1 | Opcode |
//! | .. | Payload per the static opcode table |
//!
//! The decoder is a state machine over the byte stream: current offset,
//! current frame, remaining bytes in the open block. It consumes exactly
//! the bytes the opcode table declares. An opcode absent from the table
//! stops decoding with `UnknownOpcode`, since guessing a length would
//! desynchronize everything after it. Reaching the end of the segment on
//! a block boundary is success; every other exhaustion is
//! `TruncatedCommandStream`.
//!
//! # Example
//!
//! ```
//! use bwrep_parser::commands::parse_command_segment;
//!
//! // One frame block at frame 100: slot 0 issues Stop (0x1A, 1 payload byte)
//! let mut block = Vec::new();
//! block.extend_from_slice(&100u32.to_le_bytes());
//! block.push(3); // block length: slot + opcode + payload
//! block.extend_from_slice(&[0x00, 0x1A, 0x00]);
//!
//! let mut segment = (block.len() as u32).to_le_bytes().to_vec();
//! segment.extend_from_slice(&block);
//!
//! let commands = parse_command_segment(&segment, 0, 1000).unwrap();
//! assert_eq!(commands.len(), 1);
//! assert_eq!(commands[0].frame, 100);
//! assert_eq!(commands[0].opcode, 0x1A);
//! ```

pub mod opcodes;

pub use opcodes::{lookup, CommandClass, OpcodeInfo, PayloadShape, OPCODE_TABLE};

use serde::Serialize;

use crate::error::{DecodeError, Result};

/// One decoded command: the canonical event-log record.
///
/// Commands are produced in non-decreasing `frame` order and never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Simulation frame the command was issued on.
    pub frame: u32,

    /// Slot id of the issuing player.
    pub slot_id: u8,

    /// The command's opcode byte.
    pub opcode: u8,

    /// Raw payload bytes following the opcode.
    pub payload: Vec<u8>,
}

impl Command {
    /// Returns the opcode table entry for this command, if any.
    ///
    /// Always `Some` for commands produced by the decoder, since unknown
    /// opcodes abort decoding instead.
    #[must_use]
    pub fn info(&self) -> Option<&'static OpcodeInfo> {
        lookup(self.opcode)
    }
}

/// Iterator-style decoder over a command segment.
///
/// Yields `Result<Command>`; the first error ends iteration. Use
/// [`parse_command_segment`] for the common collect-or-fail path.
pub struct CommandIterator<'a> {
    /// The full decompressed payload (offsets in errors are payload-absolute).
    data: &'a [u8],

    /// Current read offset.
    offset: usize,

    /// End of the command segment within `data`.
    end: usize,

    /// Frame of the currently open block.
    current_frame: u32,

    /// Bytes remaining in the currently open block.
    block_remaining: usize,

    /// Frame count bound from the header.
    frame_count: u32,

    /// Whether iteration has finished (cleanly or by error).
    finished: bool,
}

impl<'a> CommandIterator<'a> {
    /// Creates a decoder over `data[start..end]`.
    ///
    /// # Arguments
    ///
    /// * `data` - The decompressed payload
    /// * `start` - Offset of the first frame block
    /// * `end` - Offset one past the last segment byte
    /// * `frame_count` - The header's frame count, the upper bound for all
    ///   command frames
    #[must_use]
    pub fn new(data: &'a [u8], start: usize, end: usize, frame_count: u32) -> Self {
        Self {
            data,
            offset: start,
            end,
            current_frame: 0,
            block_remaining: 0,
            frame_count,
            finished: false,
        }
    }

    /// Returns the current read offset within the payload.
    #[must_use]
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Opens the next frame block, enforcing ordering and the frame bound.
    fn open_block(&mut self) -> Result<()> {
        // Block header: u32 frame + u8 length
        if self.offset + 5 > self.end {
            return Err(DecodeError::TruncatedCommandStream {
                offset: self.offset,
            });
        }

        let frame = u32::from_le_bytes([
            self.data[self.offset],
            self.data[self.offset + 1],
            self.data[self.offset + 2],
            self.data[self.offset + 3],
        ]);

        if frame > self.frame_count {
            return Err(DecodeError::FrameOutOfBounds {
                frame,
                frame_count: self.frame_count,
                offset: self.offset,
            });
        }

        // A block that rewinds time means the cursor desynchronized
        // somewhere inside the previous block.
        if frame < self.current_frame {
            return Err(DecodeError::TruncatedCommandStream {
                offset: self.offset,
            });
        }

        let block_len = self.data[self.offset + 4] as usize;
        if self.offset + 5 + block_len > self.end {
            return Err(DecodeError::TruncatedCommandStream {
                offset: self.offset + 5,
            });
        }

        self.current_frame = frame;
        self.block_remaining = block_len;
        self.offset += 5;
        Ok(())
    }

    /// Decodes one command from the open block.
    fn parse_command(&mut self) -> Result<Command> {
        // Slot byte plus opcode byte
        if self.block_remaining < 2 {
            return Err(DecodeError::TruncatedCommandStream {
                offset: self.offset,
            });
        }

        let slot_id = self.data[self.offset];
        let opcode = self.data[self.offset + 1];
        let opcode_offset = self.offset + 1;

        let Some(info) = lookup(opcode) else {
            return Err(DecodeError::UnknownOpcode {
                opcode,
                offset: opcode_offset,
            });
        };

        let payload_start = self.offset + 2;
        let payload_len = match info.shape {
            PayloadShape::Fixed(len) => len,
            PayloadShape::CountPrefixed { item_size } => {
                if self.block_remaining < 3 {
                    return Err(DecodeError::TruncatedCommandStream {
                        offset: payload_start,
                    });
                }
                let count = self.data[payload_start] as usize;
                1 + count * item_size
            }
        };

        let consumed = 2 + payload_len;
        if consumed > self.block_remaining {
            return Err(DecodeError::TruncatedCommandStream {
                offset: self.offset,
            });
        }

        let payload = self.data[payload_start..payload_start + payload_len].to_vec();

        self.offset += consumed;
        self.block_remaining -= consumed;

        Ok(Command {
            frame: self.current_frame,
            slot_id,
            opcode,
            payload,
        })
    }

    fn next_result(&mut self) -> Option<Result<Command>> {
        while self.block_remaining == 0 {
            if self.offset == self.end {
                // Clean finish on a block boundary
                self.finished = true;
                return None;
            }
            if let Err(e) = self.open_block() {
                self.finished = true;
                return Some(Err(e));
            }
        }

        match self.parse_command() {
            Ok(command) => Some(Ok(command)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl Iterator for CommandIterator<'_> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.next_result()
    }
}

/// Parses the command segment that follows the header block.
///
/// The segment is introduced by a u32 little-endian byte length at
/// `segment_offset`.
///
/// # Errors
///
/// - `DecodeError::TruncatedCommandStream` if the declared segment length
///   exceeds the payload, a block or command is cut short, or a frame
///   block rewinds time
/// - `DecodeError::UnknownOpcode` for an opcode byte with no table entry
/// - `DecodeError::FrameOutOfBounds` if a frame block exceeds the header's
///   frame count
pub fn parse_command_segment(
    data: &[u8],
    segment_offset: usize,
    frame_count: u32,
) -> Result<Vec<Command>> {
    if segment_offset + 4 > data.len() {
        return Err(DecodeError::TruncatedCommandStream {
            offset: segment_offset,
        });
    }

    let declared = u32::from_le_bytes([
        data[segment_offset],
        data[segment_offset + 1],
        data[segment_offset + 2],
        data[segment_offset + 3],
    ]) as usize;

    let start = segment_offset + 4;
    let end = start + declared;
    if end > data.len() {
        return Err(DecodeError::TruncatedCommandStream {
            offset: data.len(),
        });
    }

    CommandIterator::new(data, start, end, frame_count).collect()
}
