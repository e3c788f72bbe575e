//! Domain model for a single crowdfunded game. Records are plain value types:
//! they are validated once when built (or deserialized) and never change
//! afterwards, so every other layer can read them without re-checking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// One game's funding data. Fields are private so the invariants checked by
/// [`GameRecord::new`] hold for every instance in the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGameRecord", into = "RawGameRecord")]
pub struct GameRecord {
    name: String,
    description: String,
    image_ref: String,
    pledged: f64,
    goal: f64,
    backers: u64,
}

impl GameRecord {
    /// Build a record, rejecting empty names, negative or non-finite pledges
    /// and goals that are not strictly positive.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
        pledged: f64,
        goal: f64,
        backers: u64,
    ) -> Result<Self, ViewError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ViewError::malformed(&name, "name must not be empty"));
        }
        if !pledged.is_finite() || pledged < 0.0 {
            return Err(ViewError::malformed(
                &name,
                format!("pledged must be a non-negative amount (got {pledged})"),
            ));
        }
        if !goal.is_finite() || goal <= 0.0 {
            return Err(ViewError::malformed(
                &name,
                format!("goal must be a positive amount (got {goal})"),
            ));
        }

        Ok(Self {
            name,
            description: description.into(),
            image_ref: image_ref.into(),
            pledged,
            goal,
            backers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reference to the game's artwork, usually a URL.
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn pledged(&self) -> f64 {
        self.pledged
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    pub fn backers(&self) -> u64 {
        self.backers
    }

    /// A game is funded once the pledged amount reaches its goal.
    pub fn is_funded(&self) -> bool {
        self.pledged >= self.goal
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Wire shape of a record in the data file. The artwork reference is stored
/// under `img`; `backers` is signed here so a negative count in the file
/// surfaces as a malformed record instead of a bare parse error.
#[derive(Serialize, Deserialize)]
struct RawGameRecord {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    img: String,
    pledged: f64,
    goal: f64,
    backers: i64,
}

impl TryFrom<RawGameRecord> for GameRecord {
    type Error = ViewError;

    fn try_from(raw: RawGameRecord) -> Result<Self, Self::Error> {
        let backers = u64::try_from(raw.backers).map_err(|_| {
            ViewError::malformed(
                &raw.name,
                format!("backers must not be negative (got {})", raw.backers),
            )
        })?;
        GameRecord::new(
            raw.name,
            raw.description,
            raw.img,
            raw.pledged,
            raw.goal,
            backers,
        )
    }
}

impl From<GameRecord> for RawGameRecord {
    fn from(record: GameRecord) -> Self {
        Self {
            name: record.name,
            description: record.description,
            img: record.image_ref,
            pledged: record.pledged,
            goal: record.goal,
            backers: i64::try_from(record.backers).unwrap_or(i64::MAX),
        }
    }
}
