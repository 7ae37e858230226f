use lodestone_nbt::RootTag;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A block position in the world (x, y, z integers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Encode as a 64-bit long (protocol format).
    /// x: 26 bits, z: 26 bits, y: 12 bits
    pub fn encode(&self) -> u64 {
        ((self.x as u64 & 0x3FFFFFF) << 38)
            | ((self.z as u64 & 0x3FFFFFF) << 12)
            | (self.y as u64 & 0xFFF)
    }

    pub fn decode(val: u64) -> Self {
        let mut x = (val >> 38) as i32;
        let mut z = ((val >> 12) & 0x3FFFFFF) as i32;
        let mut y = (val & 0xFFF) as i32;
        if x >= 1 << 25 {
            x -= 1 << 26;
        }
        if z >= 1 << 25 {
            z -= 1 << 26;
        }
        if y >= 1 << 11 {
            y -= 1 << 12;
        }
        Self { x, y, z }
    }
}

/// A resource identifier (e.g., "minecraft:stone").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub namespace: String,
    pub path: String,
}

impl Identifier {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    pub fn minecraft(path: impl Into<String>) -> Self {
        Self::new("minecraft", path)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl std::str::FromStr for Identifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ns, path) = s.split_once(':').unwrap_or(("minecraft", s));
        if ns.is_empty() || path.is_empty() || path.contains(':') {
            return Err(format!("invalid identifier '{}'", s));
        }
        Ok(Self::new(ns, path))
    }
}

/// A player's game profile (UUID + name + properties).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProfile {
    pub uuid: Uuid,
    pub name: String,
    pub properties: Vec<ProfileProperty>,
}

impl GameProfile {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            properties: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    pub value: String,
    pub signature: Option<String>,
}

/// Text component for chat messages.
///
/// Accepts the three JSON shapes the game produces: a bare string, an object,
/// or an array whose first element is the parent of the rest. Always
/// serializes as an object. Keys without a typed field (`translate`, `with`,
/// `clickEvent`, `hoverEvent`, `font`...) are kept in `other` as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawComponent")]
pub struct TextComponent {
    pub text: String,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underlined: Option<bool>,
    pub strikethrough: Option<bool>,
    pub obfuscated: Option<bool>,
    pub extra: Vec<TextComponent>,
    pub other: Map<String, Value>,
}

/// Keys that give a component its content in place of `text`.
const CONTENT_KEYS: &[&str] = &["translate", "keybind", "score", "selector", "nbt"];

impl Serialize for TextComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let has_content = CONTENT_KEYS.iter().any(|key| self.other.contains_key(*key));
        if !self.text.is_empty() || !has_content {
            map.serialize_entry("text", &self.text)?;
        }
        if let Some(color) = &self.color {
            map.serialize_entry("color", color)?;
        }
        for (key, flag) in [
            ("bold", self.bold),
            ("italic", self.italic),
            ("underlined", self.underlined),
            ("strikethrough", self.strikethrough),
            ("obfuscated", self.obfuscated),
        ] {
            if let Some(flag) = flag {
                map.serialize_entry(key, &flag)?;
            }
        }
        if !self.extra.is_empty() {
            map.serialize_entry("extra", &self.extra)?;
        }
        for (key, value) in &self.other {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawComponent {
    Plain(String),
    List(Vec<TextComponent>),
    Full(FullComponent),
}

#[derive(Deserialize)]
struct FullComponent {
    #[serde(default)]
    text: String,
    color: Option<String>,
    bold: Option<bool>,
    italic: Option<bool>,
    underlined: Option<bool>,
    strikethrough: Option<bool>,
    obfuscated: Option<bool>,
    #[serde(default)]
    extra: Vec<TextComponent>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl From<RawComponent> for TextComponent {
    fn from(raw: RawComponent) -> Self {
        match raw {
            RawComponent::Plain(text) => TextComponent::plain(text),
            RawComponent::List(mut parts) => {
                if parts.is_empty() {
                    return TextComponent::plain("");
                }
                let mut head = parts.remove(0);
                head.extra.extend(parts);
                head
            }
            RawComponent::Full(full) => TextComponent {
                text: full.text,
                color: full.color,
                bold: full.bold,
                italic: full.italic,
                underlined: full.underlined,
                strikethrough: full.strikethrough,
                obfuscated: full.obfuscated,
                extra: full.extra,
                other: full.other,
            },
        }
    }
}

impl TextComponent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: None,
            italic: None,
            underlined: None,
            strikethrough: None,
            obfuscated: None,
            extra: Vec::new(),
            other: Map::new(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"text":""}"#.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The concatenated text of this component and all of its children.
    pub fn to_plain(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.extra {
            out.push_str(&child.to_plain());
        }
        out
    }
}

/// An item stack in an inventory slot. Empty slots are `None` at the use site.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    /// Item registry ID.
    pub item_id: i32,
    pub count: i8,
    /// Extra item data (enchantments, display name, damage...).
    pub nbt: Option<RootTag>,
}

impl ItemStack {
    pub fn new(item_id: i32, count: i8) -> Self {
        Self {
            item_id,
            count,
            nbt: None,
        }
    }

    pub fn with_nbt(mut self, nbt: impl Into<RootTag>) -> Self {
        self.nbt = Some(nbt.into());
        self
    }
}
