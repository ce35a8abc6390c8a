use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of renderable content stored in a slot.
///
/// On the wire a block is `{ "id", "type", "data" }`. Decoding never fails on
/// an unrecognised `type` or a malformed payload: such blocks become
/// [`BlockBody::Unknown`] and keep their raw data so they survive a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct ContentBlock {
    pub id: String,
    pub body: BlockBody,
}

/// Variant payload of a [`ContentBlock`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Text(TextData),
    Image(ImageData),
    Slider(SliderData),
    PostGrid(PostGridData),
    Unknown { type_name: String, data: Value },
}

/// The closed set of block variants offered by the creation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Text,
    Image,
    Slider,
    PostGrid,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Slider,
        BlockKind::PostGrid,
    ];

    /// Wire tag used in the `type` field.
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Slider => "slider",
            BlockKind::PostGrid => "post-grid",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Label shown in the creation menu.
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Text => "Text Block",
            BlockKind::Image => "Image Block",
            BlockKind::Slider => "Slider Block",
            BlockKind::PostGrid => "Post Grid Block",
        }
    }
}

/// Raw markup, rendered without sanitisation.
///
/// Every payload keeps keys it does not model in `extra`, so data written
/// by a newer editor survives a save from this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderData {
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One frame of a slider, holding its own nested block sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Listing of existing pages. Only `columns` is modelled; the cards come from
/// the page directory at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostGridData {
    #[serde(default = "default_columns")]
    pub columns: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PostGridData {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            extra: Map::new(),
        }
    }
}

fn default_columns() -> i64 {
    3
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, body: BlockBody) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockBody::Text(TextData {
                text: text.into(),
                ..Default::default()
            }),
        )
    }

    pub fn image(id: impl Into<String>, src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockBody::Image(ImageData {
                src: src.into(),
                alt: alt.into(),
                ..Default::default()
            }),
        )
    }

    /// The `type` tag this block serialises with.
    pub fn type_name(&self) -> &str {
        self.body.type_name()
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.body.kind()
    }
}

impl BlockBody {
    pub fn type_name(&self) -> &str {
        match self {
            BlockBody::Unknown { type_name, .. } => type_name.as_str(),
            known => known.kind().map(BlockKind::tag).unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            BlockBody::Text(_) => Some(BlockKind::Text),
            BlockBody::Image(_) => Some(BlockKind::Image),
            BlockBody::Slider(_) => Some(BlockKind::Slider),
            BlockBody::PostGrid(_) => Some(BlockKind::PostGrid),
            BlockBody::Unknown { .. } => None,
        }
    }

    fn decode(type_name: String, data: Value) -> Self {
        let Some(kind) = BlockKind::from_tag(&type_name) else {
            return BlockBody::Unknown { type_name, data };
        };

        // A missing payload decodes as an empty object so field defaults apply.
        let payload = if data.is_null() {
            Value::Object(Default::default())
        } else {
            data.clone()
        };
        let decoded = match kind {
            BlockKind::Text => serde_json::from_value(payload).map(BlockBody::Text),
            BlockKind::Image => serde_json::from_value(payload).map(BlockBody::Image),
            BlockKind::Slider => serde_json::from_value(payload).map(BlockBody::Slider),
            BlockKind::PostGrid => serde_json::from_value(payload).map(BlockBody::PostGrid),
        };

        decoded.unwrap_or_else(|err| {
            tracing::warn!(block_type = %type_name, error = %err, "malformed block data kept as unknown");
            BlockBody::Unknown { type_name, data }
        })
    }

    fn encode(&self) -> Value {
        let encoded = match self {
            BlockBody::Text(data) => serde_json::to_value(data),
            BlockBody::Image(data) => serde_json::to_value(data),
            BlockBody::Slider(data) => serde_json::to_value(data),
            BlockBody::PostGrid(data) => serde_json::to_value(data),
            BlockBody::Unknown { data, .. } => return data.clone(),
        };
        encoded.unwrap_or_default()
    }
}

/// Wire shape of a block.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type", default)]
    type_name: String,
    #[serde(default)]
    data: Value,
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        Self {
            id: raw.id,
            body: BlockBody::decode(raw.type_name, raw.data),
        }
    }
}

impl From<ContentBlock> for RawBlock {
    fn from(block: ContentBlock) -> Self {
        Self {
            data: block.body.encode(),
            type_name: block.body.type_name().to_string(),
            id: block.id,
        }
    }
}
