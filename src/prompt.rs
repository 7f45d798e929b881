use crate::models::{GenerationParams, RequestPart};

pub const LOGO_INSTRUCTION: &str = "Incorporate the provided logo naturally into the design.";
pub const DISTINCT_LAYOUT_INSTRUCTION: &str =
    "Please provide a distinctly different layout or color scheme from previous versions.";

/// Builds the request parts for one variation. Variation 0 is the baseline; later
/// variations only differ by a textual hint, not by looking at earlier outputs.
pub fn build_prompt(params: &GenerationParams, variation: usize) -> Vec<RequestPart> {
    let mut prompt = format!(
        "Create a professional, modern, and eye-catching marketing image for a brand named \"{}\".\n\
         The main tagline or text to feature is: \"{}\".\n\
         The desired style is: \"{}\".\n\
         The image should be suitable for a high-impact social media post.\n\
         Ensure the text is legible and well-integrated into the design.\n\
         The overall mood should be energetic and professional.",
        params.brand_name, params.tagline, params.style
    );

    if variation > 0 {
        prompt.push_str(&format!(
            "\nThis is variation {}. {}",
            variation + 1,
            DISTINCT_LAYOUT_INSTRUCTION
        ));
    }

    let mut parts = Vec::with_capacity(2);
    if let Some(logo) = &params.logo {
        parts.push(RequestPart::InlineImage {
            data: logo.data.clone(),
            mime_type: logo.mime_type.clone(),
        });
        prompt.push('\n');
        prompt.push_str(LOGO_INSTRUCTION);
    }

    parts.push(RequestPart::Text { content: prompt });
    parts
}
