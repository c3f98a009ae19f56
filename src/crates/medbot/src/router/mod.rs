//! Request routing
//!
//! Classifies a prompt into intent categories and plans which tools, if any,
//! should feed the generation context.

pub mod intent;
pub mod selection;

pub use intent::{IntentCategory, IntentClassifier, IntentScore};
pub use selection::{extract_drug_name, plan_tools, PlannedCall, KNOWN_DRUGS};
