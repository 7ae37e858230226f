use anyhow::{bail, Result};
use bytes::{Buf, BufMut, BytesMut};
use lodestone_protocol_core::{read_varint, varint_len, write_varint, PacketDirection};
use tracing::trace;

/// One recorded frame: which way it travelled, the packet id and the body.
#[derive(Debug)]
pub struct Record {
    pub direction: PacketDirection,
    pub id: i32,
    pub body: BytesMut,
}

/// Splits a capture buffer into records.
///
/// Each record is a direction byte (0 serverbound, 1 clientbound) followed by
/// an uncompressed frame: varint length, then varint packet id and body.
pub struct CaptureReader {
    buf: BytesMut,
    max_frame_size: usize,
    offset: usize,
}

impl CaptureReader {
    pub fn new(data: impl Into<BytesMut>, max_frame_size: usize) -> Self {
        Self {
            buf: data.into(),
            max_frame_size,
            offset: 0,
        }
    }

    /// Byte offset of the next record in the capture.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.buf.is_empty() {
            return Ok(None);
        }

        let mut peek = self.buf.clone();
        let direction = match peek.get_u8() {
            0 => PacketDirection::Serverbound,
            1 => PacketDirection::Clientbound,
            other => bail!("bad direction byte {} at offset {}", other, self.offset),
        };
        let length = match read_varint(&mut peek) {
            Ok(len) if len < 0 => bail!("negative frame length at offset {}", self.offset),
            Ok(len) => len as usize,
            Err(e) => bail!("truncated frame header at offset {}: {}", self.offset, e),
        };
        if length > self.max_frame_size {
            bail!(
                "frame of {} bytes at offset {} exceeds limit {}",
                length,
                self.offset,
                self.max_frame_size
            );
        }
        if peek.remaining() < length {
            bail!(
                "truncated frame at offset {}: need {} bytes, have {}",
                self.offset,
                length,
                peek.remaining()
            );
        }

        let header = self.buf.len() - peek.len();
        self.buf.advance(header);
        let mut body = self.buf.split_to(length);
        self.offset += header + length;

        let id = read_varint(&mut body)?;
        trace!("Read record {} id=0x{:02X} len={}", direction, id, body.len());

        Ok(Some(Record {
            direction,
            id,
            body,
        }))
    }
}

/// Append one record in capture format.
pub fn write_record(out: &mut BytesMut, direction: PacketDirection, id: i32, body: &[u8]) {
    out.put_u8(match direction {
        PacketDirection::Serverbound => 0,
        PacketDirection::Clientbound => 1,
    });
    write_varint(out, (varint_len(id) + body.len()) as i32);
    write_varint(out, id);
    out.put_slice(body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut capture = BytesMut::new();
        write_record(&mut capture, PacketDirection::Serverbound, 0x00, &[1, 2, 3]);
        write_record(&mut capture, PacketDirection::Clientbound, 0x1F, &[]);

        let mut reader = CaptureReader::new(capture, 1024);
        let first = reader.next_record().unwrap().unwrap();
        assert_eq!(first.direction, PacketDirection::Serverbound);
        assert_eq!(first.id, 0x00);
        assert_eq!(&first.body[..], &[1, 2, 3]);
        assert_eq!(reader.offset(), 6);

        let second = reader.next_record().unwrap().unwrap();
        assert_eq!(second.direction, PacketDirection::Clientbound);
        assert_eq!(second.id, 0x1F);
        assert!(second.body.is_empty());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_truncated_frame() {
        let mut capture = BytesMut::new();
        write_record(&mut capture, PacketDirection::Serverbound, 0x00, &[1, 2, 3]);
        capture.truncate(capture.len() - 1);
        let mut reader = CaptureReader::new(capture, 1024);
        assert!(reader.next_record().is_err());
    }

    #[test]
    fn test_frame_limit() {
        let mut capture = BytesMut::new();
        write_record(&mut capture, PacketDirection::Clientbound, 0x00, &[0; 64]);
        let mut reader = CaptureReader::new(capture, 16);
        let err = reader.next_record().unwrap_err();
        assert!(err.to_string().contains("exceeds limit"));
    }

    #[test]
    fn test_bad_direction() {
        let mut reader = CaptureReader::new(&[7u8, 1, 0][..], 16);
        assert!(reader.next_record().is_err());
    }
}
