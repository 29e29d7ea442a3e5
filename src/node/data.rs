use crate::node::kind::NodeKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// WhatsApp's length limits for interactive message components.
pub const MAX_BUTTON_TEXT_LEN: usize = 20;
pub const MAX_SECTION_TITLE_LEN: usize = 24;
pub const MAX_ITEM_TITLE_LEN: usize = 24;
pub const MAX_ITEM_DESCRIPTION_LEN: usize = 72;

fn clamp(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// An interactive reply button embedded in text-button, media-button, and
/// template node data.
///
/// `node_result_id` is derived from the flow's edges; it is persisted
/// redundantly on save for the messaging backend, never read back as a
/// source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Button {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_result_id: Option<String>,
}

impl Button {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            text: String::new(),
            node_result_id: None,
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            id: fresh_id(),
            text: clamp(text, MAX_BUTTON_TEXT_LEN),
            node_result_id: None,
        }
    }

    /// The source-handle string an edge leaving this button carries.
    pub fn handle(&self) -> String {
        format!("btn-{}", self.id)
    }
}

/// A section of a list message, holding an ordered run of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListSection {
    pub id: String,
    pub title: String,
    pub items: Vec<ListItem>,
}

impl ListSection {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            title: String::new(),
            items: vec![ListItem::new()],
        }
    }

    pub fn with_title(title: &str) -> Self {
        Self {
            id: fresh_id(),
            title: clamp(title, MAX_SECTION_TITLE_LEN),
            items: vec![ListItem::new()],
        }
    }
}

/// A single row of a list message. Each item is independently an edge source
/// via its own handle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl ListItem {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            title: String::new(),
            description: String::new(),
        }
    }

    pub fn with_content(title: &str, description: &str) -> Self {
        Self {
            id: fresh_id(),
            title: clamp(title, MAX_ITEM_TITLE_LEN),
            description: clamp(description, MAX_ITEM_DESCRIPTION_LEN),
        }
    }

    /// The source-handle string an edge leaving this item carries.
    pub fn handle(&self) -> String {
        format!("item-{}-source", self.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    Audio,
    Document,
}

/// Validation applied to a collected answer before it is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationType {
    #[default]
    Text,
    Number,
    Email,
    Phone,
    Url,
    Date,
}

// Per-kind data payloads. Field names below are the persisted spellings
// (camelCase); aliases cover the legacy spellings older exports used.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartData {
    pub keywords: Vec<String>,
    #[serde(alias = "regexPattern")]
    pub regex: String,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextData {
    #[serde(alias = "text")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaData {
    #[serde(alias = "url")]
    pub media_url: String,
    pub media_type: MediaType,
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextButtonData {
    #[serde(alias = "text")]
    pub message: String,
    #[serde(rename = "interactiveButtonsItems", alias = "buttons")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaButtonData {
    #[serde(alias = "url")]
    pub media_url: String,
    pub media_type: MediaType,
    pub caption: String,
    #[serde(rename = "interactiveButtonsItems", alias = "buttons")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListData {
    pub header: String,
    #[serde(alias = "message")]
    pub body: String,
    #[serde(alias = "buttonLabel")]
    pub button_text: String,
    pub sections: Vec<ListSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateData {
    pub template_id: String,
    pub template_name: String,
    #[serde(rename = "interactiveButtonsItems", alias = "buttons")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleProductData {
    pub catalog_id: String,
    pub product_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiProductData {
    pub catalog_id: String,
    pub header: String,
    pub body: String,
    #[serde(alias = "products")]
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogData {
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AskQuestionData {
    #[serde(alias = "message")]
    pub question: String,
    #[serde(alias = "variableName")]
    pub variable: String,
    pub validation_type: ValidationType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AskAddressData {
    pub message: String,
    #[serde(alias = "variableName")]
    pub variable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AskLocationData {
    pub message: String,
    #[serde(alias = "variableName")]
    pub variable: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetVariableData {
    #[serde(alias = "variableName")]
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetCustomFieldData {
    pub field_name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryData {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddTagData {
    #[serde(alias = "tagName")]
    pub tag: String,
}

/// The per-node payload, tagged by [`NodeKind`].
///
/// Unknown node types keep their raw JSON untouched in the `Default` variant
/// so a fallback renderer can still show them and re-export loses nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    FlowStart(StartData),
    Text(TextData),
    Media(MediaData),
    TextButton(TextButtonData),
    MediaButton(MediaButtonData),
    List(ListData),
    Template(TemplateData),
    SingleProduct(SingleProductData),
    MultiProduct(MultiProductData),
    Catalog(CatalogData),
    AskQuestion(AskQuestionData),
    AskAddress(AskAddressData),
    AskLocation(AskLocationData),
    SetVariable(SetVariableData),
    SetCustomField(SetCustomFieldData),
    Summary(SummaryData),
    AddTag(AddTagData),
    Default(Value),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::FlowStart(_) => NodeKind::FlowStart,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Media(_) => NodeKind::Media,
            NodeData::TextButton(_) => NodeKind::TextButton,
            NodeData::MediaButton(_) => NodeKind::MediaButton,
            NodeData::List(_) => NodeKind::List,
            NodeData::Template(_) => NodeKind::Template,
            NodeData::SingleProduct(_) => NodeKind::SingleProduct,
            NodeData::MultiProduct(_) => NodeKind::MultiProduct,
            NodeData::Catalog(_) => NodeKind::Catalog,
            NodeData::AskQuestion(_) => NodeKind::AskQuestion,
            NodeData::AskAddress(_) => NodeKind::AskAddress,
            NodeData::AskLocation(_) => NodeKind::AskLocation,
            NodeData::SetVariable(_) => NodeKind::SetVariable,
            NodeData::SetCustomField(_) => NodeKind::SetCustomField,
            NodeData::Summary(_) => NodeKind::Summary,
            NodeData::AddTag(_) => NodeKind::AddTag,
            NodeData::Default(_) => NodeKind::Default,
        }
    }

    /// The minimal valid payload for a freshly created node of `kind`.
    ///
    /// This is the single source of truth for "what does an empty node of
    /// type X look like"; both node creation and duplication go through it.
    /// Nested items that need identities (buttons, list sections/items) get
    /// fresh UUIDs.
    pub fn fresh(kind: NodeKind) -> NodeData {
        match kind {
            NodeKind::FlowStart => NodeData::FlowStart(StartData::default()),
            NodeKind::Text => NodeData::Text(TextData::default()),
            NodeKind::Media => NodeData::Media(MediaData::default()),
            NodeKind::TextButton => NodeData::TextButton(TextButtonData {
                message: String::new(),
                buttons: vec![Button::new()],
            }),
            NodeKind::MediaButton => NodeData::MediaButton(MediaButtonData {
                buttons: vec![Button::new()],
                ..MediaButtonData::default()
            }),
            NodeKind::List => NodeData::List(ListData {
                sections: vec![ListSection::new()],
                ..ListData::default()
            }),
            NodeKind::Template => NodeData::Template(TemplateData::default()),
            NodeKind::SingleProduct => NodeData::SingleProduct(SingleProductData::default()),
            NodeKind::MultiProduct => NodeData::MultiProduct(MultiProductData::default()),
            NodeKind::Catalog => NodeData::Catalog(CatalogData::default()),
            NodeKind::AskQuestion => NodeData::AskQuestion(AskQuestionData::default()),
            NodeKind::AskAddress => NodeData::AskAddress(AskAddressData::default()),
            NodeKind::AskLocation => NodeData::AskLocation(AskLocationData::default()),
            NodeKind::SetVariable => NodeData::SetVariable(SetVariableData::default()),
            NodeKind::SetCustomField => NodeData::SetCustomField(SetCustomFieldData::default()),
            NodeKind::Summary => NodeData::Summary(SummaryData::default()),
            NodeKind::AddTag => NodeData::AddTag(AddTagData::default()),
            NodeKind::Default => NodeData::Default(Value::Null),
        }
    }

    /// The payload for a "clean duplicate" of this node: content fields are
    /// reset to their fresh defaults, but settings-like fields (`mediaType`,
    /// `validationType`) carry over.
    pub fn duplicate_defaults(&self) -> NodeData {
        match self {
            NodeData::Media(d) => NodeData::Media(MediaData {
                media_type: d.media_type,
                ..MediaData::default()
            }),
            NodeData::MediaButton(d) => NodeData::MediaButton(MediaButtonData {
                media_type: d.media_type,
                buttons: vec![Button::new()],
                ..MediaButtonData::default()
            }),
            NodeData::AskQuestion(d) => NodeData::AskQuestion(AskQuestionData {
                validation_type: d.validation_type,
                ..AskQuestionData::default()
            }),
            // No known shape to reset; the raw payload is carried as-is.
            NodeData::Default(raw) => NodeData::Default(raw.clone()),
            other => NodeData::fresh(other.kind()),
        }
    }

    /// Parses a raw `data` object for a node of the given kind.
    ///
    /// All payload fields are defaulted, so missing fields never fail; a
    /// structurally incompatible payload (wrong JSON types) is logged and
    /// replaced by the fresh default for that kind rather than aborting the
    /// import.
    pub fn from_value(kind: NodeKind, raw: &Value) -> NodeData {
        fn parse<T: for<'de> Deserialize<'de> + Default>(kind: NodeKind, raw: &Value) -> T {
            if raw.is_null() {
                return T::default();
            }
            match serde_json::from_value(raw.clone()) {
                Ok(data) => data,
                Err(err) => {
                    log::warn!("Discarding malformed '{kind}' node data: {err}");
                    T::default()
                }
            }
        }

        match kind {
            NodeKind::FlowStart => NodeData::FlowStart(parse(kind, raw)),
            NodeKind::Text => NodeData::Text(parse(kind, raw)),
            NodeKind::Media => NodeData::Media(parse(kind, raw)),
            NodeKind::TextButton => NodeData::TextButton(parse(kind, raw)),
            NodeKind::MediaButton => NodeData::MediaButton(parse(kind, raw)),
            NodeKind::List => NodeData::List(parse(kind, raw)),
            NodeKind::Template => NodeData::Template(parse(kind, raw)),
            NodeKind::SingleProduct => NodeData::SingleProduct(parse(kind, raw)),
            NodeKind::MultiProduct => NodeData::MultiProduct(parse(kind, raw)),
            NodeKind::Catalog => NodeData::Catalog(parse(kind, raw)),
            NodeKind::AskQuestion => NodeData::AskQuestion(parse(kind, raw)),
            NodeKind::AskAddress => NodeData::AskAddress(parse(kind, raw)),
            NodeKind::AskLocation => NodeData::AskLocation(parse(kind, raw)),
            NodeKind::SetVariable => NodeData::SetVariable(parse(kind, raw)),
            NodeKind::SetCustomField => NodeData::SetCustomField(parse(kind, raw)),
            NodeKind::Summary => NodeData::Summary(parse(kind, raw)),
            NodeKind::AddTag => NodeData::AddTag(parse(kind, raw)),
            NodeKind::Default => NodeData::Default(raw.clone()),
        }
    }

    /// Serializes the payload to the persisted `data` shape.
    pub fn to_value(&self) -> Value {
        fn ser<T: Serialize>(data: &T) -> Value {
            serde_json::to_value(data).unwrap_or(Value::Null)
        }

        match self {
            NodeData::FlowStart(d) => ser(d),
            NodeData::Text(d) => ser(d),
            NodeData::Media(d) => ser(d),
            NodeData::TextButton(d) => ser(d),
            NodeData::MediaButton(d) => ser(d),
            NodeData::List(d) => ser(d),
            NodeData::Template(d) => ser(d),
            NodeData::SingleProduct(d) => ser(d),
            NodeData::MultiProduct(d) => ser(d),
            NodeData::Catalog(d) => ser(d),
            NodeData::AskQuestion(d) => ser(d),
            NodeData::AskAddress(d) => ser(d),
            NodeData::AskLocation(d) => ser(d),
            NodeData::SetVariable(d) => ser(d),
            NodeData::SetCustomField(d) => ser(d),
            NodeData::Summary(d) => ser(d),
            NodeData::AddTag(d) => ser(d),
            NodeData::Default(raw) => raw.clone(),
        }
    }

    /// The buttons carried by this payload, if the kind has any.
    pub fn buttons(&self) -> Option<&[Button]> {
        match self {
            NodeData::TextButton(d) => Some(&d.buttons),
            NodeData::MediaButton(d) => Some(&d.buttons),
            NodeData::Template(d) => Some(&d.buttons),
            _ => None,
        }
    }

    pub(crate) fn buttons_mut(&mut self) -> Option<&mut Vec<Button>> {
        match self {
            NodeData::TextButton(d) => Some(&mut d.buttons),
            NodeData::MediaButton(d) => Some(&mut d.buttons),
            NodeData::Template(d) => Some(&mut d.buttons),
            _ => None,
        }
    }

    /// The list sections carried by this payload, if the kind has any.
    pub fn sections(&self) -> Option<&[ListSection]> {
        match self {
            NodeData::List(d) => Some(&d.sections),
            _ => None,
        }
    }
}
