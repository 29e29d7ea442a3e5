use crate::graph::Position;
use rand::Rng;
use serde_json::Value;

/// Bounds for the randomized fallback placement. Only there so an imported
/// node without coordinates lands somewhere visible.
const FALLBACK_X: std::ops::Range<f64> = 80.0..640.0;
const FALLBACK_Y: std::ops::Range<f64> = 80.0..480.0;

/// Resolves a node's canvas position from whichever shape the document used.
///
/// Precedence: `position.{x,y}`, then the legacy `flowNodePosition.{posX,posY}`
/// (numbers or numeric strings), then a randomized fallback. Parse failures
/// and non-finite values count as absent, so the result is always finite.
pub fn resolve_position(raw_node: &Value) -> Position {
    if let Some(pos) = read_pair(raw_node.get("position"), "x", "y") {
        return pos;
    }
    if let Some(pos) = read_pair(raw_node.get("flowNodePosition"), "posX", "posY") {
        return pos;
    }
    random_position()
}

fn read_pair(container: Option<&Value>, x_key: &str, y_key: &str) -> Option<Position> {
    let container = container?;
    let x = coordinate(container.get(x_key)?)?;
    let y = coordinate(container.get(y_key)?)?;
    Some(Position::new(x, y))
}

/// Accepts a JSON number or a numeric string, rejecting NaN/infinities.
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

pub fn random_position() -> Position {
    let mut rng = rand::rng();
    Position::new(rng.random_range(FALLBACK_X), rng.random_range(FALLBACK_Y))
}
