//! Typed color tables
//!
//! Every color the simulation hands to the renderer is an [`Rgb`]. String
//! lookups (skin names, hex literals) resolve through fixed tables here and
//! fall back to white rather than failing.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::hex)
    }

    /// Parse a hex color, falling back to white on malformed input
    pub fn from_hex_or_white(s: &str) -> Self {
        Self::from_hex(s).unwrap_or_else(|| {
            log::warn!("Unknown color {:?}, using white", s);
            WHITE
        })
    }

    /// Brighten each channel by `percent` of full scale
    pub fn lighten(self, percent: f32) -> Self {
        let amt = (2.55 * percent).round() as i32;
        self.shift(amt)
    }

    /// Darken each channel by `percent` of full scale
    pub fn darken(self, percent: f32) -> Self {
        let amt = (2.55 * percent).round() as i32;
        self.shift(-amt)
    }

    fn shift(self, amt: i32) -> Self {
        let ch = |c: u8| (c as i32 + amt).clamp(0, 255) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Attach an alpha channel
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            rgb: self,
            a: a.clamp(0.0, 1.0),
        }
    }
}

/// RGB plus straight alpha in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    /// CSS `rgba()` string for the canvas context
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }
}

pub const WHITE: Rgb = Rgb::hex(0xffffff);
pub const SHIELD_BLUE: Rgb = Rgb::hex(0x4169e1);
pub const DAMAGE_RED: Rgb = Rgb::hex(0xff4444);
pub const TIMEOUT_RED: Rgb = Rgb::hex(0xe74c3c);
pub const SUCCESS_GREEN: Rgb = Rgb::hex(0x2ecc71);
pub const KILL_ORANGE: Rgb = Rgb::hex(0xffaa00);
pub const POWERUP_BLAST: Rgb = Rgb::hex(0xff6347);
pub const LASER_CYAN: Rgb = Rgb::hex(0x00ffff);
pub const HOSTILE_GRAY: Rgb = Rgb::hex(0x5a6266);
pub const FRIENDLY_WHITE: Rgb = Rgb::hex(0xe0e0e0);
pub const OBSTACLE_GRAY: Rgb = Rgb::hex(0x7f8c8d);
pub const STAR_GOLD: Rgb = Rgb::hex(0xf39c12);
pub const CRYSTAL_BLUE: Rgb = Rgb::hex(0x3498db);
pub const SPEED_YELLOW: Rgb = Rgb::hex(0xffeb3b);
pub const UFO_GREEN: Rgb = Rgb::hex(0x00ff88);
pub const SPACE_TOP: Rgb = Rgb::hex(0x0a0e27);

/// Star tints used by the 5% of stars that are not white
pub const STAR_TINTS: [Rgb; 3] = [Rgb::hex(0xff6b9d), Rgb::hex(0x4a90e2), Rgb::hex(0x50e3c2)];
/// Background planet colors, one per planet
pub const BACKDROP_PLANETS: [Rgb; 4] = [
    Rgb::hex(0x8e44ad),
    Rgb::hex(0xe74c3c),
    Rgb::hex(0x3498db),
    Rgb::hex(0xf39c12),
];
/// Nebula tints (drawn at low alpha)
pub const NEBULA_TINTS: [Rgb; 3] = [Rgb::hex(0x8a2be2), Rgb::hex(0x1e90ff), Rgb::hex(0xff69b4)];

/// Collect mode round colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetColor {
    Blue,
    Red,
    Green,
    Yellow,
    Orange,
    Purple,
}

impl TargetColor {
    pub const ALL: [TargetColor; 6] = [
        TargetColor::Blue,
        TargetColor::Red,
        TargetColor::Green,
        TargetColor::Yellow,
        TargetColor::Orange,
        TargetColor::Purple,
    ];

    pub fn rgb(self) -> Rgb {
        match self {
            TargetColor::Blue => Rgb::new(52, 152, 219),
            TargetColor::Red => Rgb::new(231, 76, 60),
            TargetColor::Green => Rgb::new(46, 204, 113),
            TargetColor::Yellow => Rgb::new(241, 196, 15),
            TargetColor::Orange => Rgb::new(230, 126, 34),
            TargetColor::Purple => Rgb::new(155, 89, 182),
        }
    }

    /// Label shown in the round instruction
    pub fn name(self) -> &'static str {
        match self {
            TargetColor::Blue => "BLUE",
            TargetColor::Red => "RED",
            TargetColor::Green => "GREEN",
            TargetColor::Yellow => "YELLOW",
            TargetColor::Orange => "ORANGE",
            TargetColor::Purple => "PURPLE",
        }
    }
}

/// Player planet skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Skin {
    #[default]
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Neptune,
    Venus,
    Uranus,
    Ice,
    Lava,
    Asteroid,
    Rainbow,
    Golden,
}

impl Skin {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "earth" => Some(Skin::Earth),
            "mars" => Some(Skin::Mars),
            "jupiter" => Some(Skin::Jupiter),
            "saturn" => Some(Skin::Saturn),
            "neptune" => Some(Skin::Neptune),
            "venus" => Some(Skin::Venus),
            "uranus" => Some(Skin::Uranus),
            "ice" => Some(Skin::Ice),
            "lava" => Some(Skin::Lava),
            "asteroid" => Some(Skin::Asteroid),
            "rainbow" => Some(Skin::Rainbow),
            "golden" => Some(Skin::Golden),
            _ => None,
        }
    }

    /// Halo color used for the player glow and trail
    pub fn glow(self) -> Rgb {
        match self {
            Skin::Earth => Rgb::hex(0x1e90ff),
            Skin::Mars => Rgb::hex(0xff6b35),
            Skin::Jupiter | Skin::Saturn => Rgb::hex(0xdaa520),
            Skin::Neptune => Rgb::hex(0x4169e1),
            Skin::Venus => Rgb::hex(0xffa500),
            Skin::Uranus => Rgb::hex(0x20b2aa),
            Skin::Ice => Rgb::hex(0xb3e5fc),
            Skin::Lava => Rgb::hex(0xff4500),
            Skin::Asteroid => Rgb::hex(0x757575),
            Skin::Rainbow => WHITE,
            Skin::Golden => Rgb::hex(0xffd700),
        }
    }

    /// Base body color
    pub fn body(self) -> Rgb {
        match self {
            Skin::Earth => Rgb::hex(0x2980b9),
            Skin::Mars => Rgb::hex(0xd84315),
            Skin::Jupiter => Rgb::hex(0xcd853f),
            Skin::Saturn => Rgb::hex(0xf4e6c3),
            Skin::Neptune => Rgb::hex(0x1e3799),
            Skin::Venus => Rgb::hex(0xffa500),
            Skin::Uranus => Rgb::hex(0x7fffd4),
            Skin::Ice => Rgb::hex(0xb3e5fc),
            Skin::Lava => Rgb::hex(0xff4500),
            Skin::Asteroid => Rgb::hex(0x616161),
            Skin::Rainbow => Rgb::hex(0xff00ff),
            Skin::Golden => Rgb::hex(0xffd700),
        }
    }

}

/// Resolved player planet colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinColors {
    pub body: Rgb,
    pub glow: Rgb,
}

impl SkinColors {
    /// Resolve a skin setting: a skin name or a custom `#rrggbb` color.
    /// Anything else paints the planet white.
    pub fn resolve(name: &str) -> Self {
        match Skin::from_str(name.trim()) {
            Some(skin) => Self {
                body: skin.body(),
                glow: skin.glow(),
            },
            None => {
                let body = Rgb::from_hex_or_white(name.trim());
                Self {
                    body,
                    glow: body.lighten(20.0),
                }
            }
        }
    }
}

impl From<Skin> for SkinColors {
    fn from(skin: Skin) -> Self {
        Self {
            body: skin.body(),
            glow: skin.glow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#3498db"), Some(Rgb::new(0x34, 0x98, 0xdb)));
        assert_eq!(Rgb::from_hex("ff0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex("+fffff"), None);
        assert_eq!(Rgb::from_hex("#-12345"), None);
        assert_eq!(Rgb::from_hex_or_white("not a color"), WHITE);
    }

    #[test]
    fn test_lighten_darken_saturate() {
        let c = Rgb::new(250, 10, 128);
        assert_eq!(c.lighten(10.0), Rgb::new(255, 36, 154));
        assert_eq!(c.darken(10.0), Rgb::new(224, 0, 102));
    }

    #[test]
    fn test_skin_lookup_falls_back_to_white() {
        assert_eq!(SkinColors::resolve("MARS"), SkinColors::from(Skin::Mars));
        assert_eq!(SkinColors::resolve(" lava "), SkinColors::from(Skin::Lava));
        let custom = SkinColors::resolve("#102030");
        assert_eq!(custom.body, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(custom.glow, Rgb::new(0x10, 0x20, 0x30).lighten(20.0));
        let unknown = SkinColors::resolve("pluto");
        assert_eq!(unknown.body, WHITE);
        assert_eq!(unknown.glow, WHITE);
    }

    #[test]
    fn test_css_string() {
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.500)");
    }
}
