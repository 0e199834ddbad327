//! Page background editor
//!
//! A background keeps one slot per kind and a discriminant naming the active
//! one. Switching kinds only moves the discriminant, so values typed into a
//! gradient survive a detour through the solid or image editors.

use crate::constants::PERCENT_MAX;
use crate::types::clamp_finite;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which background slot is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BackgroundKind {
    #[default]
    Solid,
    Gradient,
    Pattern,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// One color stop; `position` is a percentage along the gradient axis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientStop {
    pub color: String,
    pub position: f32,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, position: f32) -> Self {
        Self {
            color: color.into(),
            position: clamp_finite(position, 0.0, PERCENT_MAX),
        }
    }
}

/// Gradient fill. Stops are kept in the order given; they do not have to be
/// sorted by position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gradient {
    pub kind: GradientKind,
    /// Angle in degrees, only meaningful for linear gradients
    pub angle_deg: Option<f32>,
    pub stops: Vec<GradientStop>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            angle_deg: Some(180.0),
            stops: vec![
                GradientStop::new("#ffffff", 0.0),
                GradientStop::new("#e8e4dc", 100.0),
            ],
        }
    }
}

impl Gradient {
    /// Copy with every stop position clamped into `[0, 100]`
    pub fn clamped(&self) -> Self {
        Self {
            kind: self.kind,
            angle_deg: self.angle_deg,
            stops: self
                .stops
                .iter()
                .map(|s| GradientStop::new(s.color.clone(), s.position))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternKind {
    #[default]
    Dots,
    Lines,
    Grid,
    Diagonal,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    pub kind: PatternKind,
    pub color: String,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            kind: PatternKind::Dots,
            color: "#d0c8b8".to_string(),
            opacity: 0.3,
        }
    }
}

/// How a background image is fitted into the page box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Stretch,
    Tile,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BackgroundImage {
    pub url: String,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    pub fit: ImageFit,
}

impl Default for BackgroundImage {
    fn default() -> Self {
        Self {
            url: String::new(),
            opacity: 1.0,
            fit: ImageFit::Cover,
        }
    }
}

/// Background with one retained slot per kind
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Background {
    pub active: BackgroundKind,
    pub solid: Option<String>,
    pub gradient: Option<Gradient>,
    pub pattern: Option<Pattern>,
    pub image: Option<BackgroundImage>,
}

impl Default for Background {
    fn default() -> Self {
        Self::solid("#ffffff")
    }
}

/// The slot a renderer should paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundFill<'a> {
    Solid(&'a str),
    Gradient(&'a Gradient),
    Pattern(&'a Pattern),
    Image(&'a BackgroundImage),
}

impl Background {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            active: BackgroundKind::Solid,
            solid: Some(color.into()),
            gradient: None,
            pattern: None,
            image: None,
        }
    }

    /// Switch the active kind, keeping every slot.
    ///
    /// An empty target slot is seeded with that kind's default so the result
    /// always has something to paint.
    pub fn with_kind(&self, kind: BackgroundKind) -> Self {
        let mut next = self.clone();
        next.active = kind;
        match kind {
            BackgroundKind::Solid => {
                next.solid.get_or_insert_with(|| "#ffffff".to_string());
            }
            BackgroundKind::Gradient => {
                next.gradient.get_or_insert_with(Gradient::default);
            }
            BackgroundKind::Pattern => {
                next.pattern.get_or_insert_with(Pattern::default);
            }
            BackgroundKind::Image => {
                next.image.get_or_insert_with(BackgroundImage::default);
            }
        }
        next
    }

    pub fn with_solid(&self, color: impl Into<String>) -> Self {
        Self {
            solid: Some(color.into()),
            ..self.clone()
        }
    }

    pub fn with_gradient(&self, gradient: Gradient) -> Self {
        Self {
            gradient: Some(gradient.clamped()),
            ..self.clone()
        }
    }

    pub fn with_pattern(&self, pattern: Pattern) -> Self {
        Self {
            pattern: Some(Pattern {
                opacity: clamp_finite(pattern.opacity, 0.0, 1.0),
                ..pattern
            }),
            ..self.clone()
        }
    }

    pub fn with_image(&self, image: BackgroundImage) -> Self {
        Self {
            image: Some(BackgroundImage {
                opacity: clamp_finite(image.opacity, 0.0, 1.0),
                ..image
            }),
            ..self.clone()
        }
    }

    /// Resolve the active slot, if it holds a value
    pub fn active_fill(&self) -> Option<BackgroundFill<'_>> {
        match self.active {
            BackgroundKind::Solid => self.solid.as_deref().map(BackgroundFill::Solid),
            BackgroundKind::Gradient => self.gradient.as_ref().map(BackgroundFill::Gradient),
            BackgroundKind::Pattern => self.pattern.as_ref().map(BackgroundFill::Pattern),
            BackgroundKind::Image => self.image.as_ref().map(BackgroundFill::Image),
        }
    }

    /// Copy with every opacity and stop position pulled back into range
    pub fn normalized(&self) -> Self {
        let mut next = self.clone();
        if let Some(gradient) = &self.gradient {
            next.gradient = Some(gradient.clamped());
        }
        if let Some(pattern) = &mut next.pattern {
            pattern.opacity = clamp_finite(pattern.opacity, 0.0, 1.0);
        }
        if let Some(image) = &mut next.image {
            image.opacity = clamp_finite(image.opacity, 0.0, 1.0);
        }
        next
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if let Some(pattern) = &self.pattern
            && !in_unit(pattern.opacity)
        {
            return Err(format!("pattern opacity {} outside [0, 1]", pattern.opacity));
        }
        if let Some(image) = &self.image
            && !in_unit(image.opacity)
        {
            return Err(format!("image opacity {} outside [0, 1]", image.opacity));
        }
        if let Some(gradient) = &self.gradient
            && let Some(stop) = gradient
                .stops
                .iter()
                .find(|s| !(0.0..=PERCENT_MAX).contains(&s.position))
        {
            return Err(format!(
                "gradient stop position {} outside [0, 100]",
                stop.position
            ));
        }
        Ok(())
    }
}
