use serde::Deserialize;

/// How tightly cards are packed on the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// One row of small tiles (five per row).
    Compact,
    /// Larger tiles, three per row.
    #[default]
    Comfortable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationIntensity {
    None,
    #[default]
    Subtle,
    Lively,
}

/// Presentation knobs shared by every card and the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardStyle {
    pub density: Density,
    pub animation: AnimationIntensity,
}

impl CardStyle {
    pub fn columns(&self) -> usize {
        match self.density {
            Density::Compact => 5,
            Density::Comfortable => 3,
        }
    }

    /// Scale applied to a card's image while hovered.
    pub fn hover_scale(&self) -> f64 {
        match self.animation {
            AnimationIntensity::None => 1.0,
            AnimationIntensity::Subtle => 1.05,
            AnimationIntensity::Lively => 1.1,
        }
    }

    /// CSS transition length for hover effects, in milliseconds.
    pub fn transition_ms(&self) -> u32 {
        match self.animation {
            AnimationIntensity::None => 0,
            AnimationIntensity::Subtle => 300,
            AnimationIntensity::Lively => 400,
        }
    }

    pub fn grid_class(&self) -> &'static str {
        match self.density {
            Density::Compact => "grid grid-compact",
            Density::Comfortable => "grid grid-comfortable",
        }
    }
}
