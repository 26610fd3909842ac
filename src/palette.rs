use image::Rgb;
use thiserror::Error;

use crate::ColorId;
use crate::rules::RuleTable;

/// Maps each [`ColorId`] to the RGB value it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Color {color} is outside the palette of {len} colors")]
pub struct PaletteError {
    pub color: ColorId,
    pub len: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(vec![
            Rgb([0, 0, 0]),
            Rgb([254, 209, 0]),
            Rgb([0, 125, 0]),
            Rgb([0, 0, 125]),
            Rgb([125, 0, 125]),
            Rgb([255, 255, 255]),
            Rgb([254, 208, 0]),
            Rgb([0, 155, 58]),
        ])
    }
}

impl Palette {
    pub fn new(colors: Vec<Rgb<u8>>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, color: ColorId) -> Option<Rgb<u8>> {
        self.colors.get(color as usize).copied()
    }

    /// Make sure every color `rules` can read or write has an entry, so that any grid the
    /// turmite produces can be drawn. A blank grid needs color `0`, so that one is always
    /// checked.
    pub fn check(&self, rules: &RuleTable) -> Result<(), PaletteError> {
        let color = rules.max_color().unwrap_or_default();

        if self.get(color).is_none() {
            return Err(PaletteError {
                color,
                len: self.len(),
            });
        }

        Ok(())
    }
}
