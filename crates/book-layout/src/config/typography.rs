use crate::constants::{MAX_FONT_SIZE_PT, MAX_LINE_HEIGHT, MIN_FONT_SIZE_PT, MIN_LINE_HEIGHT};
use crate::types::clamp_finite;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Body and heading text styling
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Typography {
    pub body_font: String,
    /// Body size in points
    pub body_font_size: f32,
    /// Line height as a multiple of the body size
    pub line_height: f32,
    pub text_color: String,
    pub heading_font: String,
    /// Heading size in points
    pub heading_font_size: f32,
    pub heading_color: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            body_font: "Georgia".to_string(),
            body_font_size: 12.0,
            line_height: 1.5,
            text_color: "#1a1a1a".to_string(),
            heading_font: "Playfair Display".to_string(),
            heading_font_size: 24.0,
            heading_color: "#000000".to_string(),
        }
    }
}

impl Typography {
    /// Copy with sizes and line height pulled into their supported ranges
    pub fn clamped(&self) -> Self {
        Self {
            body_font_size: clamp_finite(self.body_font_size, MIN_FONT_SIZE_PT, MAX_FONT_SIZE_PT),
            heading_font_size: clamp_finite(
                self.heading_font_size,
                MIN_FONT_SIZE_PT,
                MAX_FONT_SIZE_PT,
            ),
            line_height: clamp_finite(self.line_height, MIN_LINE_HEIGHT, MAX_LINE_HEIGHT),
            ..self.clone()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let font_range = MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT;
        if !font_range.contains(&self.body_font_size) {
            return Err(format!("body font size {} out of range", self.body_font_size));
        }
        if !font_range.contains(&self.heading_font_size) {
            return Err(format!(
                "heading font size {} out of range",
                self.heading_font_size
            ));
        }
        if !(MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT).contains(&self.line_height) {
            return Err(format!("line height {} out of range", self.line_height));
        }
        Ok(())
    }
}
