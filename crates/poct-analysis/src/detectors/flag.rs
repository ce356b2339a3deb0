//! Flag types emitted by the detectors.

use std::fmt;

use poct_core::types::Event;
use serde::Serialize;

/// Same operator seen at a different device or location within the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionFlag<'a> {
    pub operator: &'a str,
    pub current: &'a Event,
    pub compare: &'a Event,
}

/// Event whose hour of day deviates from the operator's own distribution.
/// `mean` and `std_dev` are the operator partition's values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternFlag<'a> {
    pub operator: &'a str,
    pub event: &'a Event,
    pub mean: f64,
    pub std_dev: f64,
}

/// Event whose device/location pairing is rare for that device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardViolationFlag<'a> {
    pub event: &'a Event,
}

/// Discriminant of a [`Flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    Collision,
    Pattern,
    WardViolation,
}

impl FlagKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Collision => "collision",
            Self::Pattern => "pattern",
            Self::WardViolation => "ward_violation",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A read-only annotation on one or two events, for human review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Flag<'a> {
    Collision(CollisionFlag<'a>),
    Pattern(PatternFlag<'a>),
    WardViolation(WardViolationFlag<'a>),
}

impl<'a> Flag<'a> {
    pub fn kind(&self) -> FlagKind {
        match self {
            Self::Collision(_) => FlagKind::Collision,
            Self::Pattern(_) => FlagKind::Pattern,
            Self::WardViolation(_) => FlagKind::WardViolation,
        }
    }

    pub fn operator(&self) -> &'a str {
        match self {
            Self::Collision(f) => f.operator,
            Self::Pattern(f) => f.operator,
            Self::WardViolation(f) => f.event.operator.as_str(),
        }
    }

    /// Events this flag refers to, in the order they were compared.
    pub fn events(&self) -> Vec<&'a Event> {
        match self {
            Self::Collision(f) => vec![f.current, f.compare],
            Self::Pattern(f) => vec![f.event],
            Self::WardViolation(f) => vec![f.event],
        }
    }

    /// One-line description for a review table.
    pub fn describe(&self) -> String {
        match self {
            Self::Collision(f) => {
                format!("Collision at {} / {}", f.current.location, f.compare.location)
            }
            Self::Pattern(f) => format!("Unusual hour {}", f.event.timestamp.format("%H:%M")),
            Self::WardViolation(f) => format!(
                "Rare device/location pairing {} @ {}",
                f.event.device, f.event.location
            ),
        }
    }
}

impl<'a> From<CollisionFlag<'a>> for Flag<'a> {
    fn from(f: CollisionFlag<'a>) -> Self {
        Self::Collision(f)
    }
}

impl<'a> From<PatternFlag<'a>> for Flag<'a> {
    fn from(f: PatternFlag<'a>) -> Self {
        Self::Pattern(f)
    }
}

impl<'a> From<&'a Event> for Flag<'a> {
    fn from(event: &'a Event) -> Self {
        Self::WardViolation(WardViolationFlag { event })
    }
}
