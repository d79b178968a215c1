//! Prompt synthesis for catalog image generation

/// Build the generation prompt for a category label.
///
/// Deterministic: the same label always produces the same prompt. The
/// framing, lighting, and exclusions are fixed so generated images stay
/// visually consistent across the catalog.
pub fn build_prompt(category: &str) -> String {
    format!(
        "A professional studio photograph of a {category}, three-quarter front view, \
         soft diffused lighting, seamless light gray background, sharp focus, \
         photorealistic, high detail. No people, no text, no watermarks."
    )
}
