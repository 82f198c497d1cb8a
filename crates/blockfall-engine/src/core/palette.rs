use std::num::NonZeroU8;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// One of the five fixed palette colors.
///
/// The board encodes a color as its 1-based position in [`Color::ALL`];
/// `0` is reserved for an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    DenimBlue = 1,
    LimeGreen = 2,
    CyberYellow = 3,
    YellowOrange = 4,
    Scarlet = 5,
}

impl Distribution<Color> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::ALL[rng.random_range(0..Color::LEN)]
    }
}

impl Color {
    pub const LEN: usize = 5;

    pub const ALL: [Self; Self::LEN] = [
        Color::DenimBlue,
        Color::LimeGreen,
        Color::CyberYellow,
        Color::YellowOrange,
        Color::Scarlet,
    ];

    /// Returns the 1-based palette index stored in board cells.
    #[must_use]
    pub const fn index(self) -> NonZeroU8 {
        match NonZeroU8::new(self as u8) {
            Some(index) => index,
            None => unreachable!(),
        }
    }

    /// Looks up a color by its 1-based palette index.
    ///
    /// Returns `None` for `0` (empty) and for indices past the palette.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Color::DenimBlue),
            2 => Some(Color::LimeGreen),
            3 => Some(Color::CyberYellow),
            4 => Some(Color::YellowOrange),
            5 => Some(Color::Scarlet),
            _ => None,
        }
    }

    /// Returns the color as `(r, g, b)`.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::DenimBlue => (0x03, 0x41, 0xAE),
            Color::LimeGreen => (0x72, 0xCB, 0x3B),
            Color::CyberYellow => (0xFF, 0xD5, 0x00),
            Color::YellowOrange => (0xFF, 0x97, 0x1C),
            Color::Scarlet => (0xFF, 0x32, 0x13),
        }
    }

    /// Returns the CSS-style hex notation, e.g. `#0341AE`.
    #[must_use]
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}
