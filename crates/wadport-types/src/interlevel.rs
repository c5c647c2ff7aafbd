//! Intermediate representation of an id24 interlevel document.
//!
//! Frames and condition lists are reference counted so that identical
//! fragments built for different anims share one node; the serializer
//! writes each shared node once per distinct value.

use std::rc::Rc;

use serde::{Serialize, Serializer};
use strum::{EnumCount, EnumIter, FromRepr};

/// The source engine runs at a fixed 35 tics per second.
pub const TICS_PER_SECOND: f64 = 35.0;

/// Condition codes of the interlevel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum ConditionCode {
    /// The current map number equals the parameter.
    Current = 2,
    /// The map with the parameter's number was visited.
    Visited = 3,
    /// Shown on the screen after finishing a map.
    Leaving = 6,
    /// Shown on the screen before starting a map.
    Entering = 7,
}

impl Serialize for ConditionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum DurationKind {
    Infinite = 1,
    Fixed = 2,
}

impl Serialize for DurationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Condition {
    #[serde(rename = "condition")]
    pub code: ConditionCode,
    pub param: u32,
}

impl Condition {
    pub fn current(map: u32) -> Self {
        Self {
            code: ConditionCode::Current,
            param: map,
        }
    }

    pub fn visited(map: u32) -> Self {
        Self {
            code: ConditionCode::Visited,
            param: map,
        }
    }

    pub fn entering() -> Self {
        Self {
            code: ConditionCode::Entering,
            param: 0,
        }
    }

    pub fn leaving() -> Self {
        Self {
            code: ConditionCode::Leaving,
            param: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub image: String,
    #[serde(rename = "type")]
    pub kind: DurationKind,
    /// Seconds; 0 for infinite frames.
    pub duration: f64,
    pub maxduration: u32,
}

impl Frame {
    pub fn infinite(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            kind: DurationKind::Infinite,
            duration: 0.0,
            maxduration: 0,
        }
    }

    pub fn fixed(image: impl Into<String>, seconds: f64) -> Self {
        Self {
            image: image.into(),
            kind: DurationKind::Fixed,
            duration: seconds,
            maxduration: 0,
        }
    }

    /// Convert tics to seconds rounded to two decimal places.
    pub fn tics_to_seconds(tics: u32) -> f64 {
        (f64::from(tics) / TICS_PER_SECOND * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Anim {
    pub x: i32,
    pub y: i32,
    pub frames: Vec<Rc<Frame>>,
    pub conditions: Option<Rc<[Condition]>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub anims: Vec<Anim>,
    pub conditions: Option<Rc<[Condition]>>,
}

/// The `data` object of an interlevel document.
#[derive(Debug, Clone, PartialEq)]
pub struct InterlevelData {
    pub music: Option<String>,
    pub background: Option<String>,
    /// `None` when the script declares neither spots nor animations; this
    /// is distinct from an empty list.
    pub layers: Option<Vec<Layer>>,
}
