use lodestone_types::{GameProfile, TextComponent};

/// Everything a server-list ping reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatusInfo {
    pub version: VersionInfo,
    pub players: PlayerInfo,
    pub description: TextComponent,
    /// Raw PNG bytes of the server icon.
    pub icon_png: Option<Vec<u8>>,
    pub enforces_secure_chat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: String,
    pub protocol: i32,
}

impl VersionInfo {
    pub fn new(name: impl Into<String>, protocol: i32) -> Self {
        Self {
            name: name.into(),
            protocol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub max: i32,
    pub online: i32,
    /// Players shown in the hover list, in server order. Only name and id
    /// travel on the wire.
    pub sample: Vec<GameProfile>,
}

impl PlayerInfo {
    pub fn new(max: i32, online: i32) -> Self {
        Self {
            max,
            online,
            sample: Vec::new(),
        }
    }
}
