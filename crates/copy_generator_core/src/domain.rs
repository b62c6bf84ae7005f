//! crates/copy_generator_core/src/domain.rs
//!
//! Defines the core data structures for the copy generator: the product form,
//! the request derived from it, and the records kept in history.
//! Serde attributes follow the wire and storage shapes used by the browser client.

use serde::{Deserialize, Serialize};

/// Largest number of bullet points a user may ask for.
pub const MAX_BULLET_COUNT: u8 = 6;

/// The voice the generated copy should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
    Playful,
    Bold,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Professional => "professional",
            Tone::Playful => "playful",
            Tone::Bold => "bold",
        }
    }
}

/// The preferred length of the generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl CopyLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyLength::Short => "short",
            CopyLength::Medium => "medium",
            CopyLength::Long => "long",
        }
    }

    /// The word-count guidance appended to the feature text.
    pub fn directive(&self) -> &'static str {
        match self {
            CopyLength::Short => "30–60 words",
            CopyLength::Medium => "60–120 words",
            CopyLength::Long => "120–180 words",
        }
    }
}

/// The product form as the user filled it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub audience: String,
    #[serde(rename = "bullets", default)]
    pub bullet_count: BulletCount,
    #[serde(default)]
    pub length: CopyLength,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            features: String::new(),
            tone: Tone::default(),
            audience: "general shoppers".to_string(),
            bullet_count: BulletCount::default(),
            length: CopyLength::default(),
        }
    }
}

impl FormState {
    /// Whether the product name holds anything other than whitespace.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Number of bullet points requested, always within `0..=MAX_BULLET_COUNT`.
///
/// Stored and submitted forms may carry any integer; it is clamped on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct BulletCount(u8);

impl BulletCount {
    pub fn new(count: i64) -> Self {
        Self(count.clamp(0, i64::from(MAX_BULLET_COUNT)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<i64> for BulletCount {
    fn from(count: i64) -> Self {
        Self::new(count)
    }
}

impl From<BulletCount> for u8 {
    fn from(count: BulletCount) -> Self {
        count.0
    }
}

/// The immutable snapshot sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub name: String,
    pub price: String,
    pub features: String,
    pub tone: Tone,
    pub audience: String,
    pub bullets: u8,
}

/// Identifier of a history entry: epoch milliseconds, strictly increasing.
pub type HistoryId = i64;

/// A record of one completed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    #[serde(flatten)]
    pub form: FormState,
    pub output: String,
}

impl HistoryEntry {
    /// Short label shown next to the product name in history lists.
    pub fn summary(&self) -> String {
        format!(
            "{} · {} · bullets: {}",
            self.form.tone.as_str(),
            self.form.length.as_str(),
            self.form.bullet_count.get()
        )
    }
}
