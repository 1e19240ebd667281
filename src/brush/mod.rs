// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod conical_gradient;
mod gradient;
mod linear_gradient;
mod pattern;
mod radial_gradient;
mod ramp;
mod registry;
mod tile;

pub use conical_gradient::ConicalGradient;
pub use gradient::GradientColors;
pub use linear_gradient::LinearGradient;
pub use pattern::{Checker, Orientation, Stripe};
pub use radial_gradient::RadialGradient;
pub use ramp::{ColorRamp, GradientStop};
pub use registry::{BrushCallback, BrushRegistry, ClientKey};
pub use tile::Tile;

use std::str::FromStr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{ColorU8, Error, Jitter, PremultipliedColorU8};

use crate::scalar::Scalar;


/// A paint brush type.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BrushType {
    SolidColor,
    LinearGradient,
    RadialGradient,
    ConicalGradient,
    Tile,
    Stripe,
    Checker,
}

impl BrushType {
    /// Returns type's name as accepted by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            BrushType::SolidColor => "solid",
            BrushType::LinearGradient => "linear",
            BrushType::RadialGradient => "radial",
            BrushType::ConicalGradient => "conical",
            BrushType::Tile => "tile",
            BrushType::Stripe => "stripe",
            BrushType::Checker => "checker",
        }
    }
}

impl FromStr for BrushType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(BrushType::SolidColor),
            "linear" => Ok(BrushType::LinearGradient),
            "radial" => Ok(BrushType::RadialGradient),
            "conical" => Ok(BrushType::ConicalGradient),
            "tile" => Ok(BrushType::Tile),
            "stripe" => Ok(BrushType::Stripe),
            "checker" => Ok(BrushType::Checker),
            _ => Err(Error::UnknownBrushType(s.to_string())),
        }
    }
}


/// A gradient repeating mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RepeatMode {
    /// Clamp the parameter to the 0..=1 range, padding with edge colors.
    None,

    /// Repeat the gradient.
    Repeat,

    /// Repeat the gradient, reversing every other copy so that
    /// adjacent copies always seam.
    Reflect,
}

impl Default for RepeatMode {
    #[inline]
    fn default() -> Self {
        RepeatMode::None
    }
}

impl RepeatMode {
    /// Maps a gradient parameter into the 0..=1 range.
    pub fn apply(&self, t: f64) -> f64 {
        if !t.is_finite() {
            return 0.0;
        }

        match self {
            RepeatMode::None => t.bound(0.0, 1.0),
            RepeatMode::Repeat => t.fract_floor(),
            RepeatMode::Reflect => {
                let f = t.fract_floor();
                if (t.floor() as i64).rem_euclid(2) == 1 {
                    1.0 - f
                } else {
                    f
                }
            }
        }
    }
}

impl FromStr for RepeatMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" | "none" => Ok(RepeatMode::None),
            "yes" | "repeat" => Ok(RepeatMode::Repeat),
            "reversing" | "reflect" => Ok(RepeatMode::Reflect),
            _ => Err(Error::UnknownRepeatMode(s.to_string())),
        }
    }
}


/// Attributes shared by all brush types.
#[derive(Clone, PartialEq, Debug)]
pub struct BrushCommon {
    opacity: u8,

    /// Horizontal offset subtracted from painted coordinates.
    ///
    /// Default: 0
    pub origin_x: i32,

    /// Vertical offset subtracted from painted coordinates.
    ///
    /// Default: 0
    pub origin_y: i32,

    /// Noise added to the gradient parameter.
    ///
    /// Default: none
    pub jitter: Jitter,

    /// A color ramp that replaces low/high color interpolation.
    ///
    /// Default: None
    pub palette: Option<ColorRamp>,
}

impl Default for BrushCommon {
    fn default() -> Self {
        BrushCommon {
            opacity: crate::ALPHA_U8_OPAQUE,
            origin_x: 0,
            origin_y: 0,
            jitter: Jitter::NONE,
            palette: None,
        }
    }
}

impl BrushCommon {
    /// Returns brush opacity in the 0..=255 range.
    #[inline]
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Sets brush opacity from a percentage.
    ///
    /// `percent` must be in the 0..=100 range. Otherwise, the opacity is left unchanged.
    pub fn set_opacity(&mut self, percent: f64) -> Result<(), Error> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(Error::OpacityOutOfRange(percent));
        }

        self.opacity = (percent * 255.0 / 100.0 + 0.5) as u8;
        Ok(())
    }
}


/// A brush-specific payload.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum BrushKind {
    SolidColor(ColorU8),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    ConicalGradient(ConicalGradient),
    Tile(Tile),
    Stripe(Stripe),
    Checker(Checker),
}


/// A procedural color source.
///
/// Before painting, a brush must be configured for the size of a target region.
/// After that, `color_at` is a pure function of region-relative coordinates.
#[derive(Clone, PartialEq, Debug)]
pub struct PaintBrush {
    /// Shared attributes.
    pub common: BrushCommon,
    /// Brush payload.
    pub kind: BrushKind,
}

impl PaintBrush {
    /// Creates a new brush with default attributes.
    pub fn new(kind: BrushKind) -> Self {
        PaintBrush {
            common: BrushCommon::default(),
            kind,
        }
    }

    /// Creates a solid color brush.
    pub fn solid(color: ColorU8) -> Self {
        Self::new(BrushKind::SolidColor(color))
    }

    /// Creates a brush of the specified type with default geometry.
    ///
    /// Returns `None` for `BrushType::Tile`, which requires a source picture.
    pub fn from_type(kind: BrushType) -> Option<Self> {
        let kind = match kind {
            BrushType::SolidColor => BrushKind::SolidColor(ColorU8::BLACK),
            BrushType::LinearGradient => BrushKind::LinearGradient(LinearGradient::default()),
            BrushType::RadialGradient => BrushKind::RadialGradient(RadialGradient::default()),
            BrushType::ConicalGradient => BrushKind::ConicalGradient(ConicalGradient::default()),
            BrushType::Tile => return None,
            BrushType::Stripe => BrushKind::Stripe(Stripe::default()),
            BrushType::Checker => BrushKind::Checker(Checker::default()),
        };

        Some(Self::new(kind))
    }

    /// Returns brush's type.
    pub fn brush_type(&self) -> BrushType {
        match self.kind {
            BrushKind::SolidColor(_) => BrushType::SolidColor,
            BrushKind::LinearGradient(_) => BrushType::LinearGradient,
            BrushKind::RadialGradient(_) => BrushType::RadialGradient,
            BrushKind::ConicalGradient(_) => BrushType::ConicalGradient,
            BrushKind::Tile(_) => BrushType::Tile,
            BrushKind::Stripe(_) => BrushType::Stripe,
            BrushKind::Checker(_) => BrushType::Checker,
        }
    }

    /// Recomputes derived geometry for a target region.
    ///
    /// Must be called after any geometry change and before painting.
    pub fn configure(&mut self, width: u32, height: u32) {
        let width = f64::from(width);
        let height = f64::from(height);
        match self.kind {
            BrushKind::LinearGradient(ref mut g) => g.configure(width, height),
            BrushKind::RadialGradient(ref mut g) => g.configure(width, height),
            BrushKind::ConicalGradient(ref mut g) => g.configure(width, height),
            BrushKind::SolidColor(_)
            | BrushKind::Tile(_)
            | BrushKind::Stripe(_)
            | BrushKind::Checker(_) => {}
        }
    }

    /// Returns a premultiplied color at a region-relative position.
    pub fn color_at(&self, x: i32, y: i32) -> PremultipliedColorU8 {
        let x = x.wrapping_sub(self.common.origin_x);
        let y = y.wrapping_sub(self.common.origin_y);
        let c = &self.common;
        match self.kind {
            BrushKind::SolidColor(color) => color.premultiply().scale(c.opacity),
            BrushKind::LinearGradient(ref g) => g.colors.shade(g.param_at(x, y), c, x, y),
            BrushKind::RadialGradient(ref g) => g.colors.shade(g.param_at(x, y), c, x, y),
            BrushKind::ConicalGradient(ref g) => g.colors.shade(g.param_at(x, y), c, x, y),
            BrushKind::Tile(ref t) => t.color_at(x, y).scale(c.opacity),
            BrushKind::Stripe(ref s) => s.colors.shade(s.param_at(x, y), c, x, y),
            BrushKind::Checker(ref s) => s.colors.shade(s.param_at(x, y), c, x, y),
        }
    }

    /// Checks that the brush produces only opaque colors.
    pub fn is_opaque(&self) -> bool {
        if self.common.opacity != crate::ALPHA_U8_OPAQUE {
            return false;
        }

        match self.kind {
            BrushKind::SolidColor(color) => color.is_opaque(),
            BrushKind::Tile(ref t) => t.is_opaque(),
            BrushKind::LinearGradient(ref g) => g.colors.is_opaque(&self.common),
            BrushKind::RadialGradient(ref g) => g.colors.is_opaque(&self.common),
            BrushKind::ConicalGradient(ref g) => g.colors.is_opaque(&self.common),
            BrushKind::Stripe(ref s) => s.colors.is_opaque(&self.common),
            BrushKind::Checker(ref s) => s.colors.is_opaque(&self.common),
        }
    }
}


/// A paint brush with shared ownership.
///
/// Cloning produces a new handle to the same brush.
/// The brush is released when the last handle is dropped.
#[derive(Clone, Debug)]
pub struct SharedBrush(Arc<RwLock<PaintBrush>>);

impl SharedBrush {
    /// Wraps a brush.
    pub fn new(brush: PaintBrush) -> Self {
        SharedBrush(Arc::new(RwLock::new(brush)))
    }

    /// Locks the brush for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, PaintBrush> {
        // A panic inside a writer can't leave a brush half-updated,
        // since `BrushRegistry::configure` swaps whole values.
        self.0.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Locks the brush for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, PaintBrush> {
        self.0.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Configures the brush for a target region.
    pub fn configure(&self, width: u32, height: u32) {
        self.write().configure(width, height);
    }

    /// Returns a premultiplied color at a region-relative position.
    pub fn color_at(&self, x: i32, y: i32) -> PremultipliedColorU8 {
        self.read().color_at(x, y)
    }

    /// Returns a copy of the current brush state.
    pub fn snapshot(&self) -> PaintBrush {
        self.read().clone()
    }

    /// Returns the number of live handles.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Checks that both handles point to the same brush.
    pub fn ptr_eq(&self, other: &SharedBrush) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_types() {
        assert_eq!("linear".parse::<BrushType>().unwrap(), BrushType::LinearGradient);
        assert_eq!("checker".parse::<BrushType>().unwrap(), BrushType::Checker);
        assert!("lineal".parse::<BrushType>().is_err());
        for t in &[BrushType::SolidColor, BrushType::ConicalGradient, BrushType::Tile] {
            assert_eq!(t.name().parse::<BrushType>().unwrap(), *t);
        }
    }

    #[test]
    fn parse_repeat() {
        assert_eq!("no".parse::<RepeatMode>().unwrap(), RepeatMode::None);
        assert_eq!("yes".parse::<RepeatMode>().unwrap(), RepeatMode::Repeat);
        assert_eq!("reversing".parse::<RepeatMode>().unwrap(), RepeatMode::Reflect);
        assert!("maybe".parse::<RepeatMode>().is_err());
    }

    #[test]
    fn repeat_modes() {
        assert_eq!(RepeatMode::None.apply(-0.5), 0.0);
        assert_eq!(RepeatMode::None.apply(1.5), 1.0);
        assert_eq!(RepeatMode::Repeat.apply(1.25), 0.25);
        assert_eq!(RepeatMode::Repeat.apply(-0.25), 0.75);
        assert_eq!(RepeatMode::Reflect.apply(1.25), 0.75);
        assert_eq!(RepeatMode::Reflect.apply(2.25), 0.25);
        assert_eq!(RepeatMode::Reflect.apply(-0.25), 0.25);
        assert_eq!(RepeatMode::None.apply(std::f64::NAN), 0.0);
    }

    #[test]
    fn opacity_validation() {
        let mut common = BrushCommon::default();
        assert!(common.set_opacity(101.0).is_err());
        assert!(common.set_opacity(-1.0).is_err());
        assert_eq!(common.opacity(), 255);
        common.set_opacity(50.0).unwrap();
        assert_eq!(common.opacity(), 128);
        common.set_opacity(0.0).unwrap();
        assert_eq!(common.opacity(), 0);
    }

    #[test]
    fn solid_with_opacity() {
        let mut brush = PaintBrush::solid(ColorU8::from_rgb(255, 0, 0));
        assert!(brush.is_opaque());
        brush.common.set_opacity(50.0).unwrap();
        assert!(!brush.is_opaque());
        let c = brush.color_at(3, 7);
        assert_eq!(c.alpha(), 128);
        assert_eq!(c.red(), 128);
        assert_eq!(c.green(), 0);
    }

    #[test]
    fn tile_requires_picture() {
        assert!(PaintBrush::from_type(BrushType::Tile).is_none());
        let brush = PaintBrush::from_type(BrushType::Stripe).unwrap();
        assert_eq!(brush.brush_type(), BrushType::Stripe);
    }

    #[test]
    fn shared_handles() {
        let a = SharedBrush::new(PaintBrush::solid(ColorU8::WHITE));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.handle_count(), 2);
        b.write().common.set_opacity(0.0).unwrap();
        assert_eq!(a.color_at(0, 0), PremultipliedColorU8::TRANSPARENT);
        drop(b);
        assert_eq!(a.handle_count(), 1);
    }
}
