use std::collections::HashMap;

use crate::codec::{CodecError, CodecResult};

/// A level event as seen on the wire. Ids missing from the table are kept as
/// raw values so newer servers don't break older codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelEventType {
    Known { id: i32, name: String },
    Unknown(i32),
}

impl LevelEventType {
    pub fn id(&self) -> i32 {
        match self {
            LevelEventType::Known { id, .. } => *id,
            LevelEventType::Unknown(id) => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            LevelEventType::Known { name, .. } => Some(name),
            LevelEventType::Unknown(_) => None,
        }
    }
}

/// Per-version lookup tables some packets need while decoding or encoding.
///
/// Built once when the codec is constructed and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct CodecContext {
    level_events: HashMap<i32, String>,
    sound_names: HashMap<String, i32>,
    sound_ids: HashMap<i32, String>,
}

impl CodecContext {
    pub fn new(level_events: HashMap<i32, String>, sound_names: HashMap<String, i32>) -> Self {
        let sound_ids = sound_names
            .iter()
            .map(|(name, id)| (*id, name.clone()))
            .collect();
        Self {
            level_events,
            sound_names,
            sound_ids,
        }
    }

    pub fn level_event(&self, id: i32) -> LevelEventType {
        match self.level_events.get(&id) {
            Some(name) => LevelEventType::Known {
                id,
                name: name.clone(),
            },
            None => LevelEventType::Unknown(id),
        }
    }

    /// Id of a built-in sound. Unknown names are rejected.
    pub fn sound_id(&self, name: &str) -> CodecResult<i32> {
        self.sound_names
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::InvalidArgument(format!("unknown sound name {name:?}")))
    }

    /// Name of a built-in sound by id.
    pub fn sound_name(&self, id: i32) -> CodecResult<&str> {
        self.sound_ids
            .get(&id)
            .map(String::as_str)
            .ok_or(CodecError::UnknownCode {
                domain: "sound",
                code: id,
            })
    }

    pub fn is_builtin_sound(&self, name: &str) -> bool {
        self.sound_names.contains_key(name)
    }

    pub fn level_event_count(&self) -> usize {
        self.level_events.len()
    }

    pub fn sound_count(&self) -> usize {
        self.sound_names.len()
    }
}
