//! Prompt assembly for generation requests.

use crate::catalog::Character;

/// Style tags appended to every generation prompt.
pub const QUALITY_SUFFIX: &str =
    "high quality, detailed, anime style, professional lighting, vibrant colors";

/// Combine the user's prompt with the character's fragment and the quality
/// suffix.
pub fn build_prompt(user_prompt: &str, character: &Character) -> String {
    let user_prompt = user_prompt.trim();
    let fragment = character.prompt_fragment();
    if user_prompt.is_empty() {
        format!("{fragment}, {QUALITY_SUFFIX}")
    } else {
        format!("{user_prompt}, {fragment}, {QUALITY_SUFFIX}")
    }
}
