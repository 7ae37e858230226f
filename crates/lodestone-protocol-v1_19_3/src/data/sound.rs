use lodestone_protocol_core::{magic_values, CodecContext};

magic_values! {
    /// Mixer channel a sound plays on.
    pub enum SoundCategory: "sound category" {
        Master = 0,
        Music = 1,
        Record = 2,
        Weather = 3,
        Block = 4,
        Hostile = 5,
        Neutral = 6,
        Player = 7,
        Ambient = 8,
        Voice = 9,
    }
}

/// A sound reference: either one of the game's registered sounds, or an
/// arbitrary resource-pack identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sound {
    Builtin(String),
    Custom(String),
}

impl Sound {
    /// Classify a sound name against the built-in table.
    pub fn resolve(name: impl Into<String>, ctx: &CodecContext) -> Self {
        let name = name.into();
        if ctx.is_builtin_sound(&name) {
            Sound::Builtin(name)
        } else {
            Sound::Custom(name)
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Sound::Builtin(name) | Sound::Custom(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_resolve() {
        let ctx = CodecContext::new(
            HashMap::new(),
            HashMap::from([("block.note_block.harp".to_string(), 0)]),
        );
        assert_eq!(
            Sound::resolve("block.note_block.harp", &ctx),
            Sound::Builtin("block.note_block.harp".into())
        );
        let custom = Sound::resolve("mypack:horn", &ctx);
        assert_eq!(custom, Sound::Custom("mypack:horn".into()));
        assert_eq!(custom.name(), "mypack:horn");
    }
}
