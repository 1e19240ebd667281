// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use strict_num::NormalizedF32;

/// 8-bit type for an alpha value. 255 is 100% opaque, zero is 100% transparent.
pub type AlphaU8 = u8;

/// Represents fully transparent AlphaU8 value.
pub const ALPHA_U8_TRANSPARENT: AlphaU8 = 0x00;

/// Represents fully opaque AlphaU8 value.
pub const ALPHA_U8_OPAQUE: AlphaU8 = 0xFF;

/// A raw picture pixel.
///
/// Four 8-bit channels packed into a single word, so whole pixels
/// can be copied and compared at once.
/// Whether the color channels are premultiplied is a property of the
/// picture that owns the pixel, not of the pixel itself.
///
/// Byteorder: ABGR
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel(u32);

unsafe impl bytemuck::Zeroable for Pixel {}
unsafe impl bytemuck::Pod for Pixel {}

impl Pixel {
    /// A transparent black pixel.
    pub const TRANSPARENT: Self = Pixel::from_rgba(0, 0, 0, 0);

    /// Creates a new pixel.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel(pack_rgba(r, g, b, a))
    }

    /// Returns pixel's red component.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns pixel's green component.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns pixel's blue component.
    #[inline]
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns pixel's alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Returns a copy of the pixel with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Pixel((self.0 & 0x00FF_FFFF) | ((a as u32) << 24))
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Creates a pixel from a primitive type.
    #[inline]
    pub const fn from_u32(n: u32) -> Self {
        Pixel(n)
    }

    /// Returns channels as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Checks that the pixel is opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha() == ALPHA_U8_OPAQUE
    }

    /// Checks that all color channels are equal.
    #[inline]
    pub fn is_grey(&self) -> bool {
        self.red() == self.green() && self.green() == self.blue()
    }

    /// Multiplies color channels by alpha.
    #[inline]
    pub fn associate(self) -> Self {
        let a = self.alpha();
        match a {
            ALPHA_U8_OPAQUE => self,
            ALPHA_U8_TRANSPARENT => Pixel::TRANSPARENT,
            _ => Pixel::from_rgba(
                premultiply_u8(self.red(), a),
                premultiply_u8(self.green(), a),
                premultiply_u8(self.blue(), a),
                a,
            ),
        }
    }

    /// Divides color channels by alpha.
    #[inline]
    pub fn unassociate(self) -> Self {
        let a = self.alpha();
        match a {
            ALPHA_U8_OPAQUE => self,
            ALPHA_U8_TRANSPARENT => Pixel::TRANSPARENT,
            _ => Pixel::from_rgba(
                demultiply_u8(self.red(), a),
                demultiply_u8(self.green(), a),
                demultiply_u8(self.blue(), a),
                a,
            ),
        }
    }
}

impl From<ColorU8> for Pixel {
    #[inline]
    fn from(c: ColorU8) -> Self {
        Pixel(c.0)
    }
}

impl From<PremultipliedColorU8> for Pixel {
    #[inline]
    fn from(c: PremultipliedColorU8) -> Self {
        Pixel(c.0)
    }
}

impl core::fmt::Debug for Pixel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pixel")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}


/// A 32-bit RGBA color value.
///
/// Byteorder: ABGR
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColorU8(u32);

impl ColorU8 {
    /// A transparent color.
    pub const TRANSPARENT: Self = ColorU8::from_rgba(0, 0, 0, 0);
    /// A black color.
    pub const BLACK: Self = ColorU8::from_rgba(0, 0, 0, 255);
    /// A white color.
    pub const WHITE: Self = ColorU8::from_rgba(255, 255, 255, 255);

    /// Creates a new color.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8(pack_rgba(r, g, b, a))
    }

    /// Creates a new opaque color.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8(pack_rgba(r, g, b, ALPHA_U8_OPAQUE))
    }

    /// Returns color's red component.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns color's green component.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns color's blue component.
    #[inline]
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns color's alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Check that color is opaque.
    ///
    /// Alpha == 255
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha() == ALPHA_U8_OPAQUE
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Converts into a premultiplied color.
    #[inline]
    pub fn premultiply(&self) -> PremultipliedColorU8 {
        PremultipliedColorU8(Pixel(self.0).associate().0)
    }
}

impl core::fmt::Debug for ColorU8 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}


/// A 32-bit premultiplied RGBA color value.
///
/// Byteorder: ABGR
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PremultipliedColorU8(u32);

impl PremultipliedColorU8 {
    /// A transparent color.
    pub const TRANSPARENT: Self = PremultipliedColorU8::from_rgba_unchecked(0, 0, 0, 0);

    /// Creates a new premultiplied color.
    ///
    /// RGB components must be <= alpha.
    #[inline]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Option<Self> {
        if r <= a && g <= a && b <= a {
            Some(PremultipliedColorU8(pack_rgba(r, g, b, a)))
        } else {
            None
        }
    }

    /// Creates a new color without checking the premultiplied invariant.
    #[inline]
    pub(crate) const fn from_rgba_unchecked(r: u8, g: u8, b: u8, a: u8) -> Self {
        PremultipliedColorU8(pack_rgba(r, g, b, a))
    }

    /// Wraps a pixel that is already known to be premultiplied.
    #[inline]
    pub(crate) const fn from_pixel_unchecked(p: Pixel) -> Self {
        PremultipliedColorU8(p.0)
    }

    /// Returns color's red component.
    ///
    /// The value is <= alpha.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns color's green component.
    ///
    /// The value is <= alpha.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns color's blue component.
    ///
    /// The value is <= alpha.
    #[inline]
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns color's alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Check that color is opaque.
    ///
    /// Alpha == 255
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha() == ALPHA_U8_OPAQUE
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Scales all channels by `opacity / 255`.
    #[inline]
    pub fn scale(self, opacity: u8) -> Self {
        match opacity {
            ALPHA_U8_OPAQUE => self,
            ALPHA_U8_TRANSPARENT => PremultipliedColorU8::TRANSPARENT,
            _ => PremultipliedColorU8::from_rgba_unchecked(
                premultiply_u8(self.red(), opacity),
                premultiply_u8(self.green(), opacity),
                premultiply_u8(self.blue(), opacity),
                premultiply_u8(self.alpha(), opacity),
            ),
        }
    }

    /// Returns a demultiplied color.
    #[inline]
    pub fn demultiply(&self) -> ColorU8 {
        ColorU8(Pixel(self.0).unassociate().0)
    }
}

impl core::fmt::Debug for PremultipliedColorU8 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PremultipliedColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}


/// RGBA color value, holding four floating point components.
///
/// The container guarantees that all components are in a 0..=1 range.
/// Used for interpolation, where 8-bit precision is not enough.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color {
    r: NormalizedF32,
    g: NormalizedF32,
    b: NormalizedF32,
    a: NormalizedF32,
}

impl Color {
    /// A transparent color.
    pub const TRANSPARENT: Color = Color {
        r: NormalizedF32::ZERO,
        g: NormalizedF32::ZERO,
        b: NormalizedF32::ZERO,
        a: NormalizedF32::ZERO,
    };

    /// Creates a new color from 4 components.
    ///
    /// All values must be in 0..=1 range.
    #[inline]
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Option<Self> {
        Some(Color {
            r: NormalizedF32::new(r)?,
            g: NormalizedF32::new(g)?,
            b: NormalizedF32::new(b)?,
            a: NormalizedF32::new(a)?,
        })
    }

    /// Creates a new color from 4 components, clamping them to 0..=1 range.
    #[inline]
    pub fn from_rgba_clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color {
            r: NormalizedF32::new_clamped(r),
            g: NormalizedF32::new_clamped(g),
            b: NormalizedF32::new_clamped(b),
            a: NormalizedF32::new_clamped(a),
        }
    }

    /// Creates a new color from 4 components.
    ///
    /// u8 will be divided by 255 to get the float component.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::from_rgba_clamped(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Returns color's red component.
    #[inline]
    pub fn red(&self) -> f32 {
        self.r.get()
    }

    /// Returns color's green component.
    #[inline]
    pub fn green(&self) -> f32 {
        self.g.get()
    }

    /// Returns color's blue component.
    #[inline]
    pub fn blue(&self) -> f32 {
        self.b.get()
    }

    /// Returns color's alpha component.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.a.get()
    }

    /// Linearly interpolates between two colors.
    ///
    /// `t` is clamped to 0..=1.
    #[inline]
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.max(0.0).min(1.0);
        Color::from_rgba_clamped(
            self.red() + (other.red() - self.red()) * t,
            self.green() + (other.green() - self.green()) * t,
            self.blue() + (other.blue() - self.blue()) * t,
            self.alpha() + (other.alpha() - self.alpha()) * t,
        )
    }

    /// Converts into `ColorU8`.
    #[inline]
    pub fn to_color_u8(&self) -> ColorU8 {
        ColorU8::from_rgba(
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            to_u8(self.a),
        )
    }
}

impl From<ColorU8> for Color {
    #[inline]
    fn from(c: ColorU8) -> Self {
        Color::from_rgba8(c.red(), c.green(), c.blue(), c.alpha())
    }
}

#[inline]
fn to_u8(n: NormalizedF32) -> u8 {
    (n.get() * 255.0 + 0.5) as u8
}

/// Return a*b/255, rounding any fractional bits.
#[inline]
pub fn premultiply_u8(c: u8, a: u8) -> u8 {
    let prod = u32::from(c) * u32::from(a) + 128;
    ((prod + (prod >> 8)) >> 8) as u8
}

/// Return c*255/a, rounded and clamped to 255.
///
/// `a` must be non-zero.
#[inline]
pub fn demultiply_u8(c: u8, a: u8) -> u8 {
    debug_assert_ne!(a, 0);
    let a = u32::from(a);
    let n = (u32::from(c) * 255 + a / 2) / a;
    n.min(255) as u8
}

#[inline]
const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiply_u8() {
        assert_eq!(
            ColorU8::from_rgba(10, 20, 30, 40).premultiply(),
            PremultipliedColorU8::from_rgba_unchecked(2, 3, 5, 40)
        );
    }

    #[test]
    fn premultiply_u8_opaque() {
        assert_eq!(
            ColorU8::from_rgba(10, 20, 30, 255).premultiply(),
            PremultipliedColorU8::from_rgba_unchecked(10, 20, 30, 255)
        );
    }

    #[test]
    fn demultiply_u8() {
        assert_eq!(
            PremultipliedColorU8::from_rgba_unchecked(2, 3, 5, 40).demultiply(),
            ColorU8::from_rgba(13, 19, 32, 40)
        );
    }

    #[test]
    fn demultiply_u8_transparent() {
        assert_eq!(
            PremultipliedColorU8::from_rgba_unchecked(0, 0, 0, 0).demultiply(),
            ColorU8::TRANSPARENT
        );
    }

    #[test]
    fn checked_premultiplied() {
        assert!(PremultipliedColorU8::from_rgba(10, 20, 30, 30).is_some());
        assert!(PremultipliedColorU8::from_rgba(10, 20, 31, 30).is_none());
    }

    #[test]
    fn pixel_channels() {
        let p = Pixel::from_rgba(1, 2, 3, 4);
        assert_eq!(p.to_array(), [1, 2, 3, 4]);
        assert_eq!(p.with_alpha(200).to_array(), [1, 2, 3, 200]);
        assert_eq!(p.get(), 0x04030201);
    }

    #[test]
    fn associate_is_bounded_by_alpha() {
        for a in 0..=255u8 {
            let p = Pixel::from_rgba(255, 128, 1, a).associate();
            assert!(p.red() <= a && p.green() <= a && p.blue() <= a);
        }
    }

    #[test]
    fn scale_opacity() {
        let c = PremultipliedColorU8::from_rgba_unchecked(100, 50, 0, 200);
        assert_eq!(c.scale(255), c);
        assert_eq!(c.scale(0), PremultipliedColorU8::TRANSPARENT);
        let half = c.scale(128);
        assert_eq!(half.alpha(), 100);
        assert_eq!(half.red(), 50);
    }

    #[test]
    fn lerp() {
        let a = Color::from_rgba8(0, 0, 0, 255);
        let b = Color::from_rgba8(255, 255, 255, 255);
        assert_eq!(a.lerp(&b, 0.5).to_color_u8(), ColorU8::from_rgba(128, 128, 128, 255));
        assert_eq!(a.lerp(&b, 2.0).to_color_u8(), ColorU8::WHITE);
    }
}
