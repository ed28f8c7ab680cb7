//! Curated color categories for the Explore screen, with fuzzy search.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::color::Color;

pub struct Category {
    pub name: &'static str,
    pub colors: [Color; 6],
}

const fn rgb(hex: u32) -> Color {
    Color::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

macro_rules! category {
    ($name:literal, [$($hex:literal),* $(,)?]) => {
        Category { name: $name, colors: [$(rgb($hex)),*] }
    };
}

pub const CATEGORIES: &[Category] = &[
    category!("Pastels", [0xFFB7B2, 0xFFDAC1, 0xE2F0CB, 0xB5EAD7, 0xC7CEEA, 0xF3D1F4]),
    category!("Vibrant", [0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF]),
    category!("Minimal", [0xF5F5F5, 0xE0E0E0, 0x9E9E9E, 0x616161, 0x212121, 0xBDBDBD]),
    category!("Nature", [0x2E7D32, 0x558B2F, 0xF9A825, 0x4E342E, 0x00695C, 0x0277BD]),
    category!("Earth", [0xA1887F, 0x8D6E63, 0x795548, 0x6D4C41, 0x5D4037, 0x4E342E]),
    category!("Ocean", [0xE1F5FE, 0xB3E5FC, 0x81D4FA, 0x4FC3F7, 0x29B6F6, 0x039BE5]),
    category!("Sunset", [0xFF9100, 0xFF6D00, 0xFF3D00, 0xDD2C00, 0xFFAB40, 0xFFD180]),
    category!("Forest", [0x1B5E20, 0x2E7D32, 0x388E3C, 0x43A047, 0x4CAF50, 0x66BB6A]),
    category!("Cyberpunk", [0x00F5FF, 0xFF00FF, 0xFFD700, 0x000000, 0x39FF14, 0xBC13FE]),
    category!("Lavender", [0xE1BEE7, 0xCE93D8, 0xBA68C8, 0xAB47BC, 0x9C27B0, 0x8E24AA]),
    category!("Monochrome", [0x000000, 0x333333, 0x666666, 0x999999, 0xCCCCCC, 0xFFFFFF]),
    category!("Autumn", [0xBF360C, 0xD84315, 0xE64A19, 0xF4511E, 0xFF5722, 0xFF7043]),
    category!("Spring", [0xF0F4C3, 0xE6EE9C, 0xDCE775, 0xD4E157, 0xCDDC39, 0xC0CA33]),
    category!("Winter", [0xE3F2FD, 0xBBDEFB, 0x90CAF9, 0x64B5F6, 0x42A5F5, 0x2196F3]),
    category!("Caramel", [0xFFF3E0, 0xFFE0B2, 0xFFCC80, 0xFFB74D, 0xFFA726, 0xFF9800]),
    category!("Retro", [0xF44336, 0xE91E63, 0x9C27B0, 0x673AB7, 0x3F51B5, 0x2196F3]),
    category!("Luxury", [0xD4AF37, 0xC0C0C0, 0x000000, 0xFFFFFF, 0xFFD700, 0x2F2F2F]),
    category!("Industrial", [0x607D8B, 0x546E7A, 0x455A64, 0x37474F, 0x263238, 0x78909C]),
    category!("Zen", [0xDCEDC8, 0xC5E1A5, 0xAED581, 0x9CCC65, 0x8BC34A, 0x7CB342]),
    category!("Cosmic", [0x1A237E, 0x283593, 0x303F9F, 0x3949AB, 0x3F51B5, 0x5C6BC0]),
];

/// Indices into [`CATEGORIES`] matching `query`, best match first.
/// An empty query lists everything in catalog order.
pub fn filter_categories(query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..CATEGORIES.len()).collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = CATEGORIES
        .iter()
        .enumerate()
        .filter_map(|(i, c)| matcher.fuzzy_match(&c.name.to_lowercase(), &query).map(|s| (s, i)))
        .collect();
    // Stable sort keeps catalog order among equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, i)| i).collect()
}
