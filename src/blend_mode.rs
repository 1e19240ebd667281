// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::str::FromStr;

use crate::Error;

/// A blending mode.
///
/// Each mode combines straight (not premultiplied) source and destination
/// channels. The resulting alpha is always the product of both alphas.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BlendMode {
    /// Source replaces destination.
    Normal,
    /// Product of colors; darkens destination.
    Multiply,
    /// Multiply inverse of pixels, inverting result; brightens destination.
    Screen,
    /// Multiply or screen, depending on destination.
    Overlay,
    /// Darker of source and destination.
    Darken,
    /// Lighter of source and destination.
    Lighten,
    /// Absolute difference.
    Difference,
    /// Brighten destination to reflect source.
    ColorDodge,
    /// Darken destination to reflect source.
    ColorBurn,
    /// Multiply or screen, depending on source.
    HardLight,
    /// Lighten or darken, depending on source.
    SoftLight,
    /// Linear burn or linear dodge, depending on source.
    LinearLight,
    /// Sum of colors.
    LinearDodge,
    /// Sum of colors minus white.
    LinearBurn,
    /// Darken or lighten, depending on source.
    PinLight,
    /// Color burn or color dodge, depending on source.
    VividLight,
    /// Like difference, but with lower contrast.
    Exclusion,
    /// Vivid light thresholded to black or white.
    HardMix,
    /// Source subtracted from destination.
    Subtract,
    /// Destination divided by source.
    Divide,
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::Normal
    }
}

impl BlendMode {
    /// Combines a source channel `s` with a destination channel `d`.
    #[inline]
    pub fn apply(self, s: u8, d: u8) -> u8 {
        let f: fn(i32, i32) -> i32 = match self {
            BlendMode::Normal => normal,
            BlendMode::Multiply => multiply,
            BlendMode::Screen => screen,
            BlendMode::Overlay => overlay,
            BlendMode::Darken => darken,
            BlendMode::Lighten => lighten,
            BlendMode::Difference => difference,
            BlendMode::ColorDodge => color_dodge,
            BlendMode::ColorBurn => color_burn,
            BlendMode::HardLight => hard_light,
            BlendMode::SoftLight => soft_light,
            BlendMode::LinearLight => linear_light,
            BlendMode::LinearDodge => linear_dodge,
            BlendMode::LinearBurn => linear_burn,
            BlendMode::PinLight => pin_light,
            BlendMode::VividLight => vivid_light,
            BlendMode::Exclusion => exclusion,
            BlendMode::HardMix => hard_mix,
            BlendMode::Subtract => subtract,
            BlendMode::Divide => divide,
        };

        f(i32::from(s), i32::from(d)).max(0).min(255) as u8
    }
}

impl FromStr for BlendMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name: String = s.chars().filter(|c| *c != '-' && *c != '_').collect();
        let mode = match name.as_str() {
            "normal" => BlendMode::Normal,
            "multiply" => BlendMode::Multiply,
            "screen" => BlendMode::Screen,
            "overlay" => BlendMode::Overlay,
            "darken" => BlendMode::Darken,
            "lighten" => BlendMode::Lighten,
            "difference" => BlendMode::Difference,
            "colordodge" => BlendMode::ColorDodge,
            "colorburn" => BlendMode::ColorBurn,
            "hardlight" => BlendMode::HardLight,
            "softlight" => BlendMode::SoftLight,
            "linearlight" => BlendMode::LinearLight,
            "lineardodge" => BlendMode::LinearDodge,
            "linearburn" => BlendMode::LinearBurn,
            "pinlight" => BlendMode::PinLight,
            "vividlight" => BlendMode::VividLight,
            "exclusion" => BlendMode::Exclusion,
            "hardmix" => BlendMode::HardMix,
            "subtract" => BlendMode::Subtract,
            "divide" => BlendMode::Divide,
            _ => return Err(Error::UnknownBlendMode(s.to_string())),
        };

        Ok(mode)
    }
}

#[inline]
fn div255(n: i32) -> i32 {
    (n + 127) / 255
}

// Results are clamped by the caller.
macro_rules! blend_fn {
    ($name:ident, $f:expr) => {
        #[inline]
        fn $name(s: i32, d: i32) -> i32 {
            let f: fn(i32, i32) -> i32 = $f;
            f(s, d)
        }
    };
}

blend_fn!(normal,       |s, _| s);
blend_fn!(multiply,     |s, d| div255(s * d));
blend_fn!(screen,       |s, d| 255 - div255((255 - s) * (255 - d)));
blend_fn!(darken,       |s, d| s.min(d));
blend_fn!(lighten,      |s, d| s.max(d));
blend_fn!(difference,   |s, d| (s - d).abs());
blend_fn!(linear_dodge, |s, d| s + d);
blend_fn!(linear_burn,  |s, d| s + d - 255);
blend_fn!(linear_light, |s, d| d + 2 * s - 255);
blend_fn!(exclusion,    |s, d| s + d - 2 * div255(s * d));
blend_fn!(subtract,     |s, d| d - s);

blend_fn!(overlay, |s, d| {
    if d < 128 {
        div255(2 * s * d)
    } else {
        255 - div255(2 * (255 - s) * (255 - d))
    }
});

blend_fn!(hard_light, |s, d| overlay(d, s));

blend_fn!(soft_light, |s, d| {
    // Pegtop's formula, which is continuous at s == 128.
    div255(div255((255 - 2 * s) * d * d) + 2 * s * d)
});

blend_fn!(color_dodge, |s, d| {
    if s >= 255 {
        255
    } else {
        (d * 255 / (255 - s)).min(255)
    }
});

blend_fn!(color_burn, |s, d| {
    if s <= 0 {
        0
    } else {
        255 - ((255 - d) * 255 / s).min(255)
    }
});

blend_fn!(vivid_light, |s, d| {
    if s < 128 {
        color_burn(2 * s, d)
    } else {
        color_dodge(2 * s - 255, d)
    }
});

blend_fn!(pin_light, |s, d| {
    if s < 128 {
        d.min(2 * s)
    } else {
        d.max(2 * s - 255)
    }
});

blend_fn!(hard_mix, |s, d| if vivid_light(s, d) < 128 { 0 } else { 255 });

blend_fn!(divide, |s, d| {
    if s == 0 {
        255
    } else {
        (d * 255 / s).min(255)
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities() {
        for &v in &[0u8, 1, 64, 127, 128, 200, 255] {
            assert_eq!(BlendMode::Normal.apply(v, 17), v);
            assert_eq!(BlendMode::Multiply.apply(255, v), v);
            assert_eq!(BlendMode::Screen.apply(0, v), v);
            assert_eq!(BlendMode::Darken.apply(255, v), v);
            assert_eq!(BlendMode::Lighten.apply(0, v), v);
            assert_eq!(BlendMode::Difference.apply(0, v), v);
            assert_eq!(BlendMode::LinearDodge.apply(0, v), v);
            assert_eq!(BlendMode::Subtract.apply(0, v), v);
            assert_eq!(BlendMode::Divide.apply(255, v), v);
            assert_eq!(BlendMode::Exclusion.apply(0, v), v);
        }
    }

    #[test]
    fn saturation() {
        assert_eq!(BlendMode::LinearDodge.apply(200, 200), 255);
        assert_eq!(BlendMode::LinearBurn.apply(10, 10), 0);
        assert_eq!(BlendMode::Subtract.apply(200, 100), 0);
        assert_eq!(BlendMode::ColorDodge.apply(255, 0), 255);
        assert_eq!(BlendMode::ColorBurn.apply(0, 255), 0);
        assert_eq!(BlendMode::Divide.apply(0, 0), 255);
    }

    #[test]
    fn contrast_modes() {
        assert_eq!(BlendMode::Overlay.apply(255, 0), 0);
        assert_eq!(BlendMode::Overlay.apply(0, 255), 255);
        assert_eq!(BlendMode::HardLight.apply(0, 255), 0);
        assert_eq!(BlendMode::HardLight.apply(255, 0), 255);
        assert_eq!(BlendMode::SoftLight.apply(0, 255), 255);
        assert_eq!(BlendMode::SoftLight.apply(255, 0), 0);
        assert_eq!(BlendMode::HardMix.apply(200, 200), 255);
        assert_eq!(BlendMode::HardMix.apply(20, 20), 0);
        assert_eq!(BlendMode::PinLight.apply(0, 100), 0);
        assert_eq!(BlendMode::PinLight.apply(255, 100), 255);
        assert_eq!(BlendMode::PinLight.apply(128, 100), 100);
        assert_eq!(BlendMode::PinLight.apply(255, 0), 255);
        assert_eq!(BlendMode::VividLight.apply(255, 1), 255);
    }

    #[test]
    fn parse() {
        assert_eq!("color-dodge".parse::<BlendMode>().unwrap(), BlendMode::ColorDodge);
        assert_eq!("softlight".parse::<BlendMode>().unwrap(), BlendMode::SoftLight);
        assert_eq!("hard_mix".parse::<BlendMode>().unwrap(), BlendMode::HardMix);
        assert!("dissolve".parse::<BlendMode>().is_err());
    }
}
