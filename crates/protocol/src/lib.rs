//! Data model shared by every roadcheck crate.
//!
//! The types here mirror the task board's JSON one-to-one. Fields the solver
//! does not interpret are captured in flattened `extra` maps so that payloads
//! round-trip unchanged and compare structurally: two fetches that return the
//! same content are the same scenario, whatever order the board happened to
//! emit its object keys in. That property is what the solver's scenario cache
//! keys on, so the equality semantics of these types are load-bearing:
//!
//! - sequences (`Vec`) compare order-sensitively,
//! - mappings (`IndexMap`, `serde_json::Map`) compare by key set, ignoring
//!   insertion order,
//! - every scalar participates.
//!
//! Iteration over a city's `distances` still follows document order (an
//! `IndexMap`), which keeps anomaly tie-breaking reproducible.

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod wire;

/// Grid coordinates of one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// One city in a question's grid.
///
/// `distances` maps neighbor city names to the distance the board *claims*
/// for that road. The mapping may name a city absent from the question's set;
/// consumers skip such entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub position: Position,
    pub distances: IndexMap<String, f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The `map` object of a question's params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMap {
    pub cities: Vec<City>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionParams {
    pub map: CityMap,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One grid-of-cities puzzle inside a task payload.
///
/// The `ID` is opaque: it is echoed back in the answer submission exactly as
/// received, so it stays a raw JSON value rather than an assumed type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "ID")]
    pub id: Value,
    pub params: QuestionParams,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A full unit of work as issued by the task board.
///
/// Equality is deep structural equality over every nested field: the cache
/// key is the content, not the identifier. Anything the board sends beyond
/// the fields the solver reads lands in `extra` and takes part in both the
/// comparison and the `original_data` echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    #[serde(rename = "ID")]
    pub id: Value,
    pub questions: Vec<Question>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Verdict for one question: the endpoints of the worst-deviation road, or
/// `None` when no claimed distance exceeds its true path length.
pub type Answer = Option<(String, String)>;

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
