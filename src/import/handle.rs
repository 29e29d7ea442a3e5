//! Decoder for composite edge endpoint strings.
//!
//! Early export formats concatenated the button or item handle onto the edge
//! `source`/`target` string instead of writing a separate field. This module
//! recovers the intended `(node id, handle)` pair. Decoding is pure and
//! deterministic; it never fails, it only degrades to "whole string is the
//! node id".

/// A decoded edge endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEndpoint {
    pub node_id: String,
    pub handle: Option<String>,
}

impl DecodedEndpoint {
    fn bare(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            handle: None,
        }
    }
}

/// Positional handle names some exports appended to the node id.
const HANDLE_SUFFIXES: [&str; 4] = [
    "left-handle",
    "right-handle",
    "top-handle",
    "bottom-handle",
];

/// Splits a composite endpoint string into node id and handle.
///
/// Rules, first match wins:
/// 1. contains `"btn-"`: the node id is everything before the first marker
///    (with one trailing `"btn"` stripped), the handle is `"btn-"` plus
///    everything after the last marker;
/// 2. ends with a known positional handle name: strip it (and the joining
///    `-`) to recover the node id;
/// 3. contains `"__"`: node id and handle, split at the separator;
/// 4. otherwise the whole string is a bare node id.
pub fn decode_endpoint(raw: &str) -> DecodedEndpoint {
    if let Some(first) = raw.find("btn-") {
        let prefix = &raw[..first];
        let node_id = prefix.strip_suffix("btn").unwrap_or(prefix);
        // `find` succeeded, so `rfind` cannot miss.
        let last = raw.rfind("btn-").unwrap_or(first);
        let suffix = &raw[last + "btn-".len()..];
        return DecodedEndpoint {
            node_id: node_id.to_string(),
            handle: Some(format!("btn-{suffix}")),
        };
    }

    for name in HANDLE_SUFFIXES {
        if let Some(prefix) = raw.strip_suffix(name) {
            let node_id = prefix.strip_suffix('-').unwrap_or(prefix);
            return DecodedEndpoint {
                node_id: node_id.to_string(),
                handle: Some(name.to_string()),
            };
        }
    }

    if let Some((node_id, handle)) = raw.split_once("__") {
        return DecodedEndpoint {
            node_id: node_id.to_string(),
            handle: (!handle.is_empty()).then(|| handle.to_string()),
        };
    }

    DecodedEndpoint::bare(raw)
}
