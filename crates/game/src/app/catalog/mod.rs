//! Room catalog: the ordered list of rooms a run draws from.
//!
//! Raw JSON is decoded into records, each record is validated, and only a fully valid,
//! non-empty list becomes a [`RoomCatalog`]. Index 0 is the starting room.

mod source;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub(crate) use source::{CatalogSource, PendingCatalog};

const ENVELOPE_KEY: &str = "record";

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Door {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Door {
    /// Doors on the left/right wall are drawn upright; all others lie flat.
    pub(crate) fn is_on_side_wall(&self, room_width: f32) -> bool {
        self.x == 0.0 || self.x == room_width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RoomDescriptor {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) doors: Vec<Door>,
    pub(crate) has_enemy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RoomCatalog {
    rooms: Vec<RoomDescriptor>,
}

impl RoomCatalog {
    /// `None` for an empty list.
    pub(crate) fn from_rooms(rooms: Vec<RoomDescriptor>) -> Option<Self> {
        if rooms.is_empty() {
            None
        } else {
            Some(Self { rooms })
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rooms.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&RoomDescriptor> {
        self.rooms.get(index)
    }

    pub(crate) fn start_room(&self) -> &RoomDescriptor {
        &self.rooms[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CatalogError {
    #[error("failed to fetch room catalog from {origin}: {reason}")]
    Fetch { origin: String, reason: String },
    #[error("invalid room catalog from {origin} at {path}: {message}")]
    Validation {
        origin: String,
        path: String,
        message: String,
    },
}

impl CatalogError {
    fn validation(origin: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            origin: origin.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomRecord {
    width: f32,
    height: f32,
    doors: Vec<[f32; 2]>,
    #[serde(alias = "hasEnemy")]
    enemy: bool,
}

/// Decodes a catalog document. Accepts a bare array of rooms or `{ "record": [...] }`.
pub(crate) fn parse_catalog(raw: &str, origin: &str) -> Result<RoomCatalog, CatalogError> {
    let document: Value = serde_json::from_str(raw).map_err(|error| CatalogError::Fetch {
        origin: origin.to_string(),
        reason: format!("response body is not JSON: {error}"),
    })?;

    let (rooms_value, path_prefix) = match document {
        Value::Object(mut map) if map.contains_key(ENVELOPE_KEY) => {
            (map.remove(ENVELOPE_KEY).unwrap_or(Value::Null), ENVELOPE_KEY)
        }
        other => (other, ""),
    };

    let records: Vec<RoomRecord> =
        serde_path_to_error::deserialize(rooms_value).map_err(|error| {
            let path = prefixed_path(path_prefix, &error.path().to_string());
            CatalogError::validation(origin, path, error.into_inner().to_string())
        })?;

    if records.is_empty() {
        return Err(CatalogError::validation(
            origin,
            prefixed_path(path_prefix, "."),
            "catalog contains no rooms",
        ));
    }

    let rooms = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            validate_record(index, record).map_err(|(field, message)| {
                let path = prefixed_path(path_prefix, &format!("[{index}].{field}"));
                CatalogError::validation(origin, path, message)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    RoomCatalog::from_rooms(rooms)
        .ok_or_else(|| CatalogError::validation(origin, ".", "catalog contains no rooms"))
}

/// Checks one decoded record. The error names the offending field relative to the record.
pub(crate) fn validate_record(
    index: usize,
    record: &RoomRecord,
) -> Result<RoomDescriptor, (String, String)> {
    if !record.width.is_finite() || record.width <= 0.0 {
        return Err((
            "width".to_string(),
            format!("room {index}: expected positive width, got {}", record.width),
        ));
    }
    if !record.height.is_finite() || record.height <= 0.0 {
        return Err((
            "height".to_string(),
            format!("room {index}: expected positive height, got {}", record.height),
        ));
    }

    let mut doors = Vec::with_capacity(record.doors.len());
    for (door_index, [x, y]) in record.doors.iter().copied().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err((
                format!("doors[{door_index}]"),
                format!("room {index}: door coordinates must be finite, got [{x}, {y}]"),
            ));
        }
        doors.push(Door { x, y });
    }

    Ok(RoomDescriptor {
        width: record.width,
        height: record.height,
        doors,
        has_enemy: record.enemy,
    })
}

fn prefixed_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path) {
        (true, _) => path.to_string(),
        (false, ".") => prefix.to_string(),
        (false, rest) if rest.starts_with('[') => format!("{prefix}{rest}"),
        (false, rest) => format!("{prefix}.{rest}"),
    }
}
