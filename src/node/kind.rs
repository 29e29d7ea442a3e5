use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// The canonical set of editor node types, plus a `Default` fallback for
/// anything the normalizer cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "flowStartNode")]
    FlowStart,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "media")]
    Media,
    #[serde(rename = "text-button")]
    TextButton,
    #[serde(rename = "media-button")]
    MediaButton,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "template")]
    Template,
    #[serde(rename = "single-product")]
    SingleProduct,
    #[serde(rename = "multi-product")]
    MultiProduct,
    #[serde(rename = "catalog")]
    Catalog,
    #[serde(rename = "ask-question")]
    AskQuestion,
    #[serde(rename = "ask-address")]
    AskAddress,
    #[serde(rename = "ask-location")]
    AskLocation,
    #[serde(rename = "set-variable")]
    SetVariable,
    #[serde(rename = "set-custom-field")]
    SetCustomField,
    #[serde(rename = "summary")]
    Summary,
    #[serde(rename = "add-tag")]
    AddTag,
    #[serde(rename = "default")]
    Default,
}

/// Alias table for historical type spellings, keyed by the squashed form
/// (lower-cased, non-alphanumerics stripped). Squashed canonical keys are
/// included so that any casing/punctuation variant of a canonical key also
/// resolves.
const TYPE_ALIASES: &[(&str, NodeKind)] = &[
    ("flowstartnode", NodeKind::FlowStart),
    ("flowstart", NodeKind::FlowStart),
    ("startnode", NodeKind::FlowStart),
    ("start", NodeKind::FlowStart),
    ("text", NodeKind::Text),
    ("textmessage", NodeKind::Text),
    ("message", NodeKind::Text),
    ("media", NodeKind::Media),
    ("mediamessage", NodeKind::Media),
    ("textbutton", NodeKind::TextButton),
    ("textbuttons", NodeKind::TextButton),
    ("interactivebuttons", NodeKind::TextButton),
    ("mediabutton", NodeKind::MediaButton),
    ("mediabuttons", NodeKind::MediaButton),
    ("interactivemediabuttons", NodeKind::MediaButton),
    ("list", NodeKind::List),
    ("listmessage", NodeKind::List),
    ("interactivelist", NodeKind::List),
    ("template", NodeKind::Template),
    ("templatemessage", NodeKind::Template),
    ("singleproduct", NodeKind::SingleProduct),
    ("multiproduct", NodeKind::MultiProduct),
    ("productlist", NodeKind::MultiProduct),
    ("catalog", NodeKind::Catalog),
    ("catalogmessage", NodeKind::Catalog),
    ("askquestion", NodeKind::AskQuestion),
    ("question", NodeKind::AskQuestion),
    ("askaddress", NodeKind::AskAddress),
    ("asklocation", NodeKind::AskLocation),
    ("setvariable", NodeKind::SetVariable),
    ("setcustomfield", NodeKind::SetCustomField),
    ("summary", NodeKind::Summary),
    ("addtag", NodeKind::AddTag),
];

fn alias_table() -> &'static AHashMap<&'static str, NodeKind> {
    static TABLE: OnceLock<AHashMap<&'static str, NodeKind>> = OnceLock::new();
    TABLE.get_or_init(|| TYPE_ALIASES.iter().copied().collect())
}

/// Lower-cases and strips everything that is not a letter or digit.
fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl NodeKind {
    /// Every canonical kind, excluding the `Default` fallback.
    pub const CANONICAL: [NodeKind; 17] = [
        NodeKind::FlowStart,
        NodeKind::Text,
        NodeKind::Media,
        NodeKind::TextButton,
        NodeKind::MediaButton,
        NodeKind::List,
        NodeKind::Template,
        NodeKind::SingleProduct,
        NodeKind::MultiProduct,
        NodeKind::Catalog,
        NodeKind::AskQuestion,
        NodeKind::AskAddress,
        NodeKind::AskLocation,
        NodeKind::SetVariable,
        NodeKind::SetCustomField,
        NodeKind::Summary,
        NodeKind::AddTag,
    ];

    /// The canonical type key as it appears in persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::FlowStart => "flowStartNode",
            NodeKind::Text => "text",
            NodeKind::Media => "media",
            NodeKind::TextButton => "text-button",
            NodeKind::MediaButton => "media-button",
            NodeKind::List => "list",
            NodeKind::Template => "template",
            NodeKind::SingleProduct => "single-product",
            NodeKind::MultiProduct => "multi-product",
            NodeKind::Catalog => "catalog",
            NodeKind::AskQuestion => "ask-question",
            NodeKind::AskAddress => "ask-address",
            NodeKind::AskLocation => "ask-location",
            NodeKind::SetVariable => "set-variable",
            NodeKind::SetCustomField => "set-custom-field",
            NodeKind::Summary => "summary",
            NodeKind::AddTag => "add-tag",
            NodeKind::Default => "default",
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, NodeKind::FlowStart)
    }

    /// Resolves a raw type string from persisted or imported data into a
    /// canonical kind.
    ///
    /// The input may use any of the historical naming conventions
    /// (`"TextButton"`, `"text_button"`, `"InteractiveButtons"`, ...). The
    /// lookup squashes the string and consults the alias table, which also
    /// covers case-insensitive matches against the canonical keys. Anything
    /// unresolved degrades to [`NodeKind::Default`]; this never fails.
    pub fn normalize(raw: Option<&str>) -> NodeKind {
        let Some(raw) = raw else {
            return NodeKind::Default;
        };
        let squashed = squash(raw);
        if squashed.is_empty() {
            return NodeKind::Default;
        }
        alias_table()
            .get(squashed.as_str())
            .copied()
            .unwrap_or(NodeKind::Default)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
