//! Species colour palettes
//!
//! Palette order is part of the generation contract: the generator picks by
//! index, so reordering changes every seed's creature.

/// RGBA colour
pub type Color = [u8; 4];

/// Build an opaque colour from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> Color {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]
}

/// Fixed colours shared by every creature
pub mod fixed {
    use super::{Color, hex};

    pub const EYE: Color = hex(0x111111);
    pub const BEAK: Color = hex(0xFF9800);
    pub const CHEST_PATCH: Color = hex(0xFFFFFF);
    pub const NOSTRIL: Color = hex(0x3E2723);
    pub const HOOF: Color = hex(0x3E2723);
    pub const SPOT: Color = hex(0x333333);
    pub const SHADOW: Color = [0, 0, 0, 51];
}

/// Chicken palette: body, wing/tail and comb colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChickenPalette {
    pub name: &'static str,
    pub body: Color,
    pub secondary: Color,
    pub comb: Color,
}

/// Pig palette: body, leg and snout colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PigPalette {
    pub name: &'static str,
    pub body: Color,
    pub secondary: Color,
    pub nose: Color,
}

pub const CHICKEN_PALETTES: &[ChickenPalette] = &[
    ChickenPalette {
        name: "Classic White",
        body: hex(0xFAFAFA),
        secondary: hex(0xE0E0E0),
        comb: hex(0xE53935),
    },
    ChickenPalette {
        name: "Golden Buff",
        body: hex(0xFFCC80),
        secondary: hex(0xFFB74D),
        comb: hex(0xD32F2F),
    },
    ChickenPalette {
        name: "Rhode Red",
        body: hex(0xA1502E),
        secondary: hex(0x7B3F1E),
        comb: hex(0xC62828),
    },
    ChickenPalette {
        name: "Midnight Black",
        body: hex(0x37474F),
        secondary: hex(0x263238),
        comb: hex(0xE53935),
    },
    ChickenPalette {
        name: "Silver Laced",
        body: hex(0xCFD8DC),
        secondary: hex(0x90A4AE),
        comb: hex(0xEF5350),
    },
];

pub const PIG_PALETTES: &[PigPalette] = &[
    PigPalette {
        name: "Pink Classic",
        body: hex(0xF8BBD0),
        secondary: hex(0xF48FB1),
        nose: hex(0xF06292),
    },
    PigPalette {
        name: "Spotted",
        body: hex(0xFCE4EC),
        secondary: hex(0xF8BBD0),
        nose: hex(0xF48FB1),
    },
    PigPalette {
        name: "Berkshire Black",
        body: hex(0x424242),
        secondary: hex(0x303030),
        nose: hex(0xF8BBD0),
    },
    PigPalette {
        name: "Ginger Tamworth",
        body: hex(0xE0A060),
        secondary: hex(0xC68040),
        nose: hex(0xF4A0A0),
    },
];

/// Pig palette that unlocks spot decorations
pub const SPOTTED_PALETTE: &str = "Spotted";

pub const CHICKEN_NAME_SUFFIXES: &[&str] = &["Clucker", "Pecker", "Wing", "Beak"];
pub const PIG_NAME_SUFFIXES: &[&str] = &["Oink", "Snort", "Truffle", "Porky", "Bacon"];

/// First word of a palette name, used as the default name prefix
pub fn name_prefix(palette_name: &str) -> &str {
    palette_name.split(' ').next().unwrap_or(palette_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colour() {
        assert_eq!(hex(0xFF9800), [255, 152, 0, 255]);
    }

    #[test]
    fn test_name_prefix() {
        assert_eq!(name_prefix("Silver Laced"), "Silver");
        assert_eq!(name_prefix("Spotted"), "Spotted");
    }

    #[test]
    fn test_spotted_palette_exists() {
        assert!(PIG_PALETTES.iter().any(|p| p.name == SPOTTED_PALETTE));
    }
}
