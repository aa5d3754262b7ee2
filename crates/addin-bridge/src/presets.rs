use serde::{Deserialize, Serialize};

/// Fastener sizes the command's dropdown offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadPreset {
    /// Pad for an M6 fastener.
    #[default]
    M6,
    /// Pad for an M8 fastener.
    M8,
}

/// Concrete extents for a preset, in sketch units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PadDimensions {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

impl PadPreset {
    /// Text shown in the size dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            PadPreset::M6 => "M6",
            PadPreset::M8 => "M8",
        }
    }

    pub fn dimensions(&self) -> PadDimensions {
        match self {
            PadPreset::M6 => PadDimensions {
                width: 0.67,
                height: 0.67,
                corner_radius: 0.05,
            },
            PadPreset::M8 => PadDimensions {
                width: 0.88,
                height: 0.88,
                corner_radius: 0.05,
            },
        }
    }
}
