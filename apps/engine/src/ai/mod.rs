//! AI consumers of the risk assessor.
//!
//! This module provides:
//! - [`AiPlayer`]: the trait an automated seat implements
//! - [`RandomPlayer`]: a seedable baseline that avoids risky plays

mod random;
mod trait_def;

pub use random::RandomPlayer;
use serde_json::Value as JsonValue;
pub use trait_def::{AiError, AiPlayer};

/// Create an AI player from an ai_type string and optional config.
///
/// Currently supports:
/// - "random": RandomPlayer with optional seed from config
///
/// Returns None if ai_type is unrecognized.
pub fn create_ai(ai_type: &str, config: Option<&JsonValue>) -> Option<Box<dyn AiPlayer>> {
    match ai_type {
        "random" => {
            let seed = config.and_then(|c| c.get("seed")).and_then(|s| s.as_u64());
            Some(Box::new(RandomPlayer::new(seed)))
        }
        _ => None,
    }
}
