use bytes::{BufMut, BytesMut};
use lodestone_protocol_core::*;
use lodestone_types::BlockPos;

use crate::data::{Sound, SoundCategory};

const MINECRAFT_NAMESPACE: &str = "minecraft:";

/// A one-shot world effect (particles, sounds, door creaks...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEvent {
    pub event: LevelEventType,
    pub position: BlockPos,
    pub data: i32,
    /// Play for every player regardless of distance.
    pub global: bool,
}

impl Packet for LevelEvent {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        buf.put_i32(self.event.id());
        write_position(buf, &self.position);
        buf.put_i32(self.data);
        buf.put_u8(self.global as u8);
        Ok(())
    }
}

impl PacketDecode for LevelEvent {
    fn decode(buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<Self> {
        Ok(Self {
            event: ctx.level_event(read_i32(buf)?),
            position: read_position(buf)?,
            data: read_i32(buf)?,
            global: read_bool(buf)?,
        })
    }
}

/// Plays a sound at a fixed position. Coordinates travel as eighths of a
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEffect {
    pub sound: Sound,
    /// Only custom sounds can carry a fixed audible range.
    pub fixed_range: Option<f32>,
    pub category: SoundCategory,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub volume: f32,
    pub pitch: f32,
    pub seed: i64,
}

impl Packet for SoundEffect {
    fn encode(&self, buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<()> {
        match &self.sound {
            Sound::Builtin(name) => {
                if self.fixed_range.is_some() {
                    return Err(CodecError::InvalidArgument(format!(
                        "built-in sound {name} can't have a fixed range"
                    )));
                }
                write_varint(buf, ctx.sound_id(name)? + 1);
            }
            Sound::Custom(name) => {
                write_varint(buf, 0);
                write_string(buf, name);
                match self.fixed_range {
                    Some(range) => {
                        buf.put_u8(1);
                        buf.put_f32(range);
                    }
                    None => buf.put_u8(0),
                }
            }
        }
        write_magic_varint(buf, self.category);
        buf.put_i32((self.x * 8.0) as i32);
        buf.put_i32((self.y * 8.0) as i32);
        buf.put_i32((self.z * 8.0) as i32);
        buf.put_f32(self.volume);
        buf.put_f32(self.pitch);
        buf.put_i64(self.seed);
        Ok(())
    }
}

impl PacketDecode for SoundEffect {
    fn decode(buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<Self> {
        // 0 means an inline custom sound, anything else is registry id + 1
        let id = read_varint(buf)?;
        let (sound, fixed_range) = if id == 0 {
            let name = read_string(buf, DEFAULT_MAX_STRING_LEN)?;
            let range = if read_bool(buf)? {
                Some(read_f32(buf)?)
            } else {
                None
            };
            (Sound::Custom(name), range)
        } else if id < 0 {
            return Err(CodecError::UnknownCode {
                domain: "sound",
                code: id,
            });
        } else {
            (Sound::Builtin(ctx.sound_name(id - 1)?.to_string()), None)
        };
        Ok(Self {
            sound,
            fixed_range,
            category: read_magic_varint(buf)?,
            x: read_i32(buf)? as f64 / 8.0,
            y: read_i32(buf)? as f64 / 8.0,
            z: read_i32(buf)? as f64 / 8.0,
            volume: read_f32(buf)?,
            pitch: read_f32(buf)?,
            seed: read_i64(buf)?,
        })
    }
}

/// Stops sounds on the client. With neither field set, every sound stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSound {
    pub category: Option<SoundCategory>,
    pub sound: Option<Sound>,
}

impl Packet for StopSound {
    fn encode(&self, buf: &mut BytesMut, _ctx: &CodecContext) -> CodecResult<()> {
        let mut flags = 0u8;
        if self.category.is_some() {
            flags |= 0x01;
        }
        if self.sound.is_some() {
            flags |= 0x02;
        }
        buf.put_u8(flags);
        if let Some(category) = self.category {
            write_magic_varint(buf, category);
        }
        match &self.sound {
            Some(Sound::Builtin(name)) => {
                write_string(buf, &format!("{MINECRAFT_NAMESPACE}{name}"));
            }
            Some(Sound::Custom(name)) => write_string(buf, name),
            None => {}
        }
        Ok(())
    }
}

impl PacketDecode for StopSound {
    fn decode(buf: &mut BytesMut, ctx: &CodecContext) -> CodecResult<Self> {
        let flags = read_u8(buf)?;
        let category = if flags & 0x01 != 0 {
            Some(read_magic_varint(buf)?)
        } else {
            None
        };
        let sound = if flags & 0x02 != 0 {
            let name = read_string(buf, DEFAULT_MAX_STRING_LEN)?;
            let short = name.strip_prefix(MINECRAFT_NAMESPACE).unwrap_or(&name);
            if ctx.is_builtin_sound(short) {
                Some(Sound::Builtin(short.to_string()))
            } else {
                Some(Sound::Custom(name))
            }
        } else {
            None
        };
        Ok(Self { category, sound })
    }
}
