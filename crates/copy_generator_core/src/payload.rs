//! crates/copy_generator_core/src/payload.rs
//!
//! Turns the product form into the request sent to the generation service.

use crate::domain::{FormState, GenerationRequest};

/// Builds the generation request for `form`.
///
/// The only transformation is the length directive appended to the feature
/// text; every other field is copied as-is. Validation of the name is the
/// controller's job.
pub fn build_payload(form: &FormState) -> GenerationRequest {
    GenerationRequest {
        name: form.name.clone(),
        price: form.price.clone(),
        features: format!(
            "{}\n\nPreferred length: {}",
            form.features,
            form.length.directive()
        ),
        tone: form.tone,
        audience: form.audience.clone(),
        bullets: form.bullet_count.get(),
    }
}
