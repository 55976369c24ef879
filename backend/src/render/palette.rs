/// A named colour from the tab10 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl PaletteColor {
    pub const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name,
            rgb: (r, g, b),
        }
    }
}

pub const TAB_BLUE: PaletteColor = PaletteColor::new("tab:blue", 31, 119, 180);
pub const TAB_ORANGE: PaletteColor = PaletteColor::new("tab:orange", 255, 127, 14);
pub const TAB_GREEN: PaletteColor = PaletteColor::new("tab:green", 44, 160, 44);
pub const TAB_RED: PaletteColor = PaletteColor::new("tab:red", 214, 39, 40);
pub const TAB_PURPLE: PaletteColor = PaletteColor::new("tab:purple", 148, 103, 189);
pub const TAB_BROWN: PaletteColor = PaletteColor::new("tab:brown", 140, 86, 75);
pub const TAB_GREY: PaletteColor = PaletteColor::new("tab:grey", 127, 127, 127);

/// Trace colours, assigned to networks by position.
pub const DEFAULT_PALETTE: [PaletteColor; 6] = [
    TAB_BLUE, TAB_GREEN, TAB_ORANGE, TAB_PURPLE, TAB_RED, TAB_BROWN,
];

/// Shading for bands given as free text.
pub const FREE_TEXT_BAND_COLOR: PaletteColor = TAB_GREY;
/// Shading for bands given as a structured span.
pub const STRUCTURED_BAND_COLOR: PaletteColor = TAB_BLUE;
pub const BAND_ALPHA: f64 = 0.2;
