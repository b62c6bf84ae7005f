//! services/api/src/web/protocol.rs
//!
//! Defines the JSON bodies exchanged between the browser front end and the API.

use copy_generator_core::{AppController, BulletCount, CopyLength, FormState, HistoryEntry, Tone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Form
//=========================================================================================

/// Every field of the product form. Missing fields take their defaults and
/// `bullets` is clamped into 0..=6.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(default)]
pub struct FormView {
    #[schema(example = "Red Sprint Sneakers")]
    pub name: String,
    #[schema(example = "49.99")]
    pub price: String,
    #[schema(example = "breathable mesh, cushioned sole")]
    pub features: String,
    #[schema(value_type = String, example = "friendly")]
    pub tone: Tone,
    #[schema(example = "runners")]
    pub audience: String,
    #[schema(minimum = 0, maximum = 6)]
    pub bullets: i64,
    #[schema(value_type = String, example = "medium")]
    pub length: CopyLength,
}

impl Default for FormView {
    fn default() -> Self {
        Self::from(&FormState::default())
    }
}

impl From<&FormState> for FormView {
    fn from(form: &FormState) -> Self {
        Self {
            name: form.name.clone(),
            price: form.price.clone(),
            features: form.features.clone(),
            tone: form.tone,
            audience: form.audience.clone(),
            bullets: i64::from(form.bullet_count.get()),
            length: form.length,
        }
    }
}

impl From<FormView> for FormState {
    fn from(view: FormView) -> Self {
        FormState {
            name: view.name,
            price: view.price,
            features: view.features,
            tone: view.tone,
            audience: view.audience,
            bullet_count: BulletCount::new(view.bullets),
            length: view.length,
        }
    }
}

//=========================================================================================
// History and State
//=========================================================================================

/// One line of the history list.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct HistoryItemView {
    pub id: i64,
    pub name: String,
    /// e.g. `"friendly · short · bullets: 3"`
    pub summary: String,
}

impl From<&HistoryEntry> for HistoryItemView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.form.name.clone(),
            summary: entry.summary(),
        }
    }
}

/// Everything the front end needs to render itself.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct StateView {
    pub form: FormView,
    pub result: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub can_generate: bool,
    pub history: Vec<HistoryItemView>,
}

impl From<&AppController> for StateView {
    fn from(controller: &AppController) -> Self {
        Self {
            form: FormView::from(controller.form()),
            result: controller.result().map(str::to_string),
            loading: controller.loading(),
            error: controller.error().map(str::to_string),
            can_generate: controller.can_generate(),
            history: history_items(controller),
        }
    }
}

pub fn history_items(controller: &AppController) -> Vec<HistoryItemView> {
    controller
        .history()
        .entries()
        .iter()
        .map(HistoryItemView::from)
        .collect()
}

//=========================================================================================
// Free-form Prompt
//=========================================================================================

#[derive(Deserialize, Debug, ToSchema)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct PromptResponse {
    pub text: String,
}
