//! Room label canonicalization.
//!
//! Rooms travel over the wire in two forms: a canonical label ("Room A") and
//! a short key ("A"). Either may be missing or free-form; this module keeps
//! the pair mutually derivable so normalizing from either form yields the
//! same canonical pair.

/// Default room assigned when a record carries neither a label nor a key.
pub const DEFAULT_ROOM_KEY: &str = "A";

/// Canonical `(label, key)` pair for a single room value, whichever form it
/// arrived in: "Room A", "A", and free-form names all normalize the same way.
pub fn canonicalize(value: &str) -> (String, String) {
    let key = key_from_label(value.trim());
    (label_from_key(&key), key)
}

/// Canonical pair from a record's `room` and `roomKey` fields. The label
/// takes precedence when both are present; both absent falls back to the
/// default room.
pub fn canonical_pair(room: Option<&str>, room_key: Option<&str>) -> (String, String) {
    let source = room
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| room_key.map(str::trim).filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_ROOM_KEY);
    canonicalize(source)
}

/// "Room A" -> "A"; values without the prefix map to themselves.
pub fn key_from_label(label: &str) -> String {
    label
        .strip_prefix("Room ")
        .unwrap_or(label)
        .trim()
        .to_string()
}

/// "A" -> "Room A". Only a single uppercase letter gets the prefix;
/// free-form keys are already labels.
pub fn label_from_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => format!("Room {}", c),
        _ => key.to_string(),
    }
}

/// Long-form display name for the known rooms, falling back to the canonical
/// label for anything unrecognized.
pub fn display_name(room_key: &str, room: &str) -> String {
    match room_key {
        "A" => "A- BLOCK A BOARDROOM".to_string(),
        "B" => "B- BLOCK C BOARDROOM".to_string(),
        "C" => "C-BLOCK D AUDITORIUM".to_string(),
        _ if !room.is_empty() => room.to_string(),
        _ => "Unknown Room".to_string(),
    }
}
