pub mod manifest;
pub mod boarding;

pub use boarding::{plan_boarding, sequence, sequence_text, BoardingPlan};
pub use manifest::{validate, CleanedManifest};
