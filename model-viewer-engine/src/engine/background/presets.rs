use bevy::prelude::*;
use constants::background::{BACKGROUND_PRESETS, BackgroundDef};

/// One entry of the background cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundPreset {
    Color(Color),
    /// Vertical two-stop gradient, bottom to top.
    Gradient { bottom: Color, top: Color },
    Starfield,
}

impl BackgroundPreset {
    pub fn from_def(def: &BackgroundDef) -> Self {
        match *def {
            BackgroundDef::Color(value) => Self::Color(hex_color(value)),
            BackgroundDef::Gradient(bottom, top) => Self::Gradient {
                bottom: hex_color(bottom),
                top: hex_color(top),
            },
            BackgroundDef::Starfield => Self::Starfield,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Gradient { .. } => "gradient",
            Self::Starfield => "starfield",
        }
    }
}

/// Ordered, wrap-around list of background presets.
#[derive(Resource, Debug, Clone)]
pub struct BackgroundPresets(pub Vec<BackgroundPreset>);

impl Default for BackgroundPresets {
    fn default() -> Self {
        Self(BACKGROUND_PRESETS.iter().map(BackgroundPreset::from_def).collect())
    }
}

impl BackgroundPresets {
    pub fn get(&self, index: usize) -> Option<&BackgroundPreset> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn next_index(&self, index: usize) -> usize {
        if self.is_empty() {
            return 0;
        }
        (index + 1) % self.len()
    }
}

/// `0xRRGGBB` in sRGB to a Bevy colour.
pub fn hex_color(value: u32) -> Color {
    Color::srgb_u8(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cycle_order() {
        let presets = BackgroundPresets::default();
        let kinds: Vec<_> = presets.0.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec!["color", "color", "color", "gradient", "starfield"]
        );
        assert_eq!(presets.get(0), Some(&BackgroundPreset::Color(hex_color(0xf0f0f0))));
    }

    #[test]
    fn cycling_wraps_around() {
        let presets = BackgroundPresets::default();
        let mut index = 0;
        for _ in 0..presets.len() {
            index = presets.next_index(index);
        }
        assert_eq!(index, 0);
        assert_eq!(presets.next_index(presets.len() - 1), 0);
    }

    #[test]
    fn hex_colour_channels() {
        let Color::Srgba(srgba) = hex_color(0x1e90ff) else {
            panic!("expected sRGB colour");
        };
        assert_eq!(srgba, Srgba::rgb_u8(0x1e, 0x90, 0xff));
    }
}
