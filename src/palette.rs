// Customer Dashboard - Chart Palette
// Six base colours; fills are translucent, borders opaque

use serde::{Serialize, Serializer};
use std::fmt;

pub const FILL_ALPHA: f32 = 0.2;
pub const BORDER_ALPHA: f32 = 1.0;

const BASE_COLORS: [(u8, u8, u8); 6] = [
    (255, 99, 132),
    (54, 162, 235),
    (255, 206, 86),
    (75, 192, 192),
    (153, 102, 255),
    (255, 159, 64),
];

/// CSS `rgba(...)` colour. Serialises as the CSS string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn base(index: usize, a: f32) -> Rgba {
    let (r, g, b) = BASE_COLORS[index % BASE_COLORS.len()];
    Rgba { r, g, b, a }
}

/// Fill colours for `count` categories; the palette cycles past six.
pub fn fill_colors(count: usize) -> Vec<Rgba> {
    (0..count).map(|i| base(i, FILL_ALPHA)).collect()
}

/// Border colours matching `fill_colors`
pub fn border_colors(count: usize) -> Vec<Rgba> {
    (0..count).map(|i| base(i, BORDER_ALPHA)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_format() {
        assert_eq!(fill_colors(1)[0].to_string(), "rgba(255, 99, 132, 0.2)");
        assert_eq!(border_colors(1)[0].to_string(), "rgba(255, 99, 132, 1)");
    }

    #[test]
    fn test_sliced_to_category_count() {
        assert_eq!(fill_colors(3).len(), 3);
        assert_eq!(border_colors(0).len(), 0);
    }

    #[test]
    fn test_palette_cycles_past_six() {
        let fills = fill_colors(8);

        assert_eq!(fills.len(), 8);
        assert_eq!(fills[6], fills[0]);
        assert_eq!(fills[7], fills[1]);
        assert_ne!(fills[5], fills[0]);
    }

    #[test]
    fn test_serializes_as_css_string() {
        let json = serde_json::to_string(&border_colors(2)).unwrap();
        assert_eq!(json, r#"["rgba(255, 99, 132, 1)","rgba(54, 162, 235, 1)"]"#);
    }
}
