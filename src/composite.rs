// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::str::FromStr;

use crate::{BlendMode, ColorU8, Error, IntRect, Picture, PictureFlags, Pixel};

use crate::fixed_point::mul_255;
use crate::picture::clip_regions;

/// Source over destination for premultiplied pixels.
#[inline]
pub(crate) fn over(src: Pixel, dest: Pixel) -> Pixel {
    let sa = src.alpha();
    if sa == crate::ALPHA_U8_TRANSPARENT {
        return dest;
    }

    if sa == crate::ALPHA_U8_OPAQUE || dest.alpha() == crate::ALPHA_U8_TRANSPARENT {
        return src;
    }

    let inv_sa = u32::from(255 - sa);
    let ch = |s: u8, d: u8| (u32::from(s) + mul_255(u32::from(d), inv_sa)).min(255) as u8;
    Pixel::from_rgba(
        ch(src.red(), dest.red()),
        ch(src.green(), dest.green()),
        ch(src.blue(), dest.blue()),
        ch(sa, dest.alpha()),
    )
}

/// Draws a region of `src` over `dest` at the specified position.
///
/// `dest` is converted into premultiplied colors first. `src` is left as is
/// and its pixels are premultiplied on the fly when needed.
///
/// The region is clipped to both pictures. Nothing happens when they don't overlap.
pub fn composite_over(dest: &mut Picture, src: &Picture, src_rect: IntRect, dest_x: i32, dest_y: i32) {
    let (s, d) = match clip_regions(src, src_rect, dest, dest_x, dest_y) {
        Some(v) => v,
        None => {
            log::warn!("composited regions do not overlap");
            return;
        }
    };

    dest.associate();
    let src_associated = src.is_associated();
    for dy in 0..d.height() {
        let src_row = &src.row(s.y() as u32 + dy)[s.left() as usize..s.right() as usize];
        let dest_row = dest.row_mut(d.y() as u32 + dy);
        let dest_row = &mut dest_row[d.left() as usize..d.right() as usize];
        for (dp, sp) in dest_row.iter_mut().zip(src_row) {
            let sp = if src_associated { *sp } else { sp.associate() };
            *dp = over(sp, *dp);
        }
    }

    if !src.flags().contains(PictureFlags::GREYSCALE) {
        dest.remove_flags(PictureFlags::GREYSCALE);
    }
}

/// Blends `src` into `dest` using a blending mode.
///
/// Both pictures are aligned at the top-left corner and only their overlap
/// is affected. `dest` keeps its association state.
pub fn blend(dest: &mut Picture, src: &Picture, mode: BlendMode) {
    let region = match dest.bounds().intersect(&src.bounds()) {
        Some(v) => v,
        None => return,
    };

    let dest_associated = dest.is_associated();
    let src_associated = src.is_associated();
    let width = region.width() as usize;
    for y in 0..region.height() {
        let src_row = &src.row(y)[..width];
        let dest_row = &mut dest.row_mut(y)[..width];
        for (dp, sp) in dest_row.iter_mut().zip(src_row) {
            let s = if src_associated { sp.unassociate() } else { *sp };
            let d = if dest_associated { dp.unassociate() } else { *dp };
            let p = Pixel::from_rgba(
                mode.apply(s.red(), d.red()),
                mode.apply(s.green(), d.green()),
                mode.apply(s.blue(), d.blue()),
                mul_255(u32::from(s.alpha()), u32::from(d.alpha())) as u8,
            );
            *dp = if dest_associated { p.associate() } else { p };
        }
    }

    dest.remove_flags(PictureFlags::GREYSCALE);
    if !src.is_opaque() {
        dest.set_translucency(true);
    }
}

/// Linearly interpolates between two pictures.
///
/// `opacity` of 0 gives `from`, and 1 gives `to`. Interpolation happens on
/// straight colors and the result is fully opaque.
/// Only the overlap of all three pictures, aligned at the top-left corner, is written.
pub fn cross_fade(dest: &mut Picture, from: &Picture, to: &Picture, opacity: f64) {
    let region = dest
        .bounds()
        .intersect(&from.bounds())
        .and_then(|r| r.intersect(&to.bounds()));
    let region = match region {
        Some(v) => v,
        None => return,
    };

    let w = if opacity.is_finite() { (opacity.max(0.0).min(1.0) * 255.0 + 0.5) as u32 } else { 0 };
    let inv_w = 255 - w;
    let lerp = |a: u8, b: u8| ((u32::from(a) * inv_w + u32::from(b) * w + 127) / 255) as u8;

    let width = region.width() as usize;
    for y in 0..region.height() {
        let from_row = &from.row(y)[..width];
        let to_row = &to.row(y)[..width];
        let from_associated = from.is_associated();
        let to_associated = to.is_associated();
        let dest_row = &mut dest.row_mut(y)[..width];
        for ((dp, fp), tp) in dest_row.iter_mut().zip(from_row).zip(to_row) {
            let f = if from_associated { fp.unassociate() } else { *fp };
            let t = if to_associated { tp.unassociate() } else { *tp };
            // Opaque pixels are the same in both association states.
            *dp = Pixel::from_rgba(
                lerp(f.red(), t.red()),
                lerp(f.green(), t.green()),
                lerp(f.blue(), t.blue()),
                crate::ALPHA_U8_OPAQUE,
            );
        }
    }

    if !(from.flags() & to.flags()).contains(PictureFlags::GREYSCALE) {
        dest.remove_flags(PictureFlags::GREYSCALE);
    }
}


/// A per-channel arithmetic operation.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ArithmeticOp {
    /// Saturating sum.
    Add,
    /// Saturating difference, `dest - src`.
    Subtract,
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Min,
    Max,
}

impl ArithmeticOp {
    /// Combines a destination channel `d` with a source channel `s`.
    #[inline]
    pub fn apply(self, d: u8, s: u8) -> u8 {
        match self {
            ArithmeticOp::Add => d.saturating_add(s),
            ArithmeticOp::Subtract => d.saturating_sub(s),
            ArithmeticOp::And => d & s,
            ArithmeticOp::Or => d | s,
            ArithmeticOp::Nand => !(d & s),
            ArithmeticOp::Nor => !(d | s),
            ArithmeticOp::Xor => d ^ s,
            ArithmeticOp::Min => d.min(s),
            ArithmeticOp::Max => d.max(s),
        }
    }

    #[inline]
    fn apply_pixel(self, d: Pixel, s: Pixel) -> Pixel {
        Pixel::from_rgba(
            self.apply(d.red(), s.red()),
            self.apply(d.green(), s.green()),
            self.apply(d.blue(), s.blue()),
            self.apply(d.alpha(), s.alpha()),
        )
    }
}

impl FromStr for ArithmeticOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ArithmeticOp::Add),
            "subtract" => Ok(ArithmeticOp::Subtract),
            "and" => Ok(ArithmeticOp::And),
            "or" => Ok(ArithmeticOp::Or),
            "nand" => Ok(ArithmeticOp::Nand),
            "nor" => Ok(ArithmeticOp::Nor),
            "xor" => Ok(ArithmeticOp::Xor),
            "min" => Ok(ArithmeticOp::Min),
            "max" => Ok(ArithmeticOp::Max),
            _ => Err(Error::UnknownArithmeticOp(s.to_string())),
        }
    }
}

/// Combines `src` into `dest` channel by channel, including alpha.
///
/// Both pictures are aligned at the top-left corner and only their overlap
/// is affected. The operation works on straight colors, so `dest`
/// is unassociated first.
pub fn apply_arithmetic(dest: &mut Picture, src: &Picture, op: ArithmeticOp) {
    let region = match dest.bounds().intersect(&src.bounds()) {
        Some(v) => v,
        None => return,
    };

    dest.unassociate();
    let src_associated = src.is_associated();
    let width = region.width() as usize;
    for y in 0..region.height() {
        let src_row = &src.row(y)[..width];
        let dest_row = &mut dest.row_mut(y)[..width];
        for (dp, sp) in dest_row.iter_mut().zip(src_row) {
            let s = if src_associated { sp.unassociate() } else { *sp };
            *dp = op.apply_pixel(*dp, s);
        }
    }

    dest.analyze();
}

/// Combines every `dest` pixel with a color, channel by channel.
///
/// `dest` is unassociated first.
pub fn apply_arithmetic_scalar(dest: &mut Picture, color: ColorU8, op: ArithmeticOp) {
    dest.unassociate();
    let s = Pixel::from(color);
    for y in 0..dest.height() {
        for dp in dest.row_mut(y).iter_mut() {
            *dp = op.apply_pixel(*dp, s);
        }
    }

    dest.analyze();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_fast_paths() {
        let dest = Pixel::from_rgba(10, 20, 30, 40);
        assert_eq!(over(Pixel::TRANSPARENT, dest), dest);
        let src = Pixel::from_rgba(1, 2, 3, 255);
        assert_eq!(over(src, dest), src);
        let src = Pixel::from_rgba(1, 2, 3, 4);
        assert_eq!(over(src, Pixel::TRANSPARENT), src);
    }

    #[test]
    fn over_half() {
        let dest = Pixel::from_rgba(0, 0, 255, 255);
        let src = Pixel::from_rgba(128, 0, 0, 128);
        let p = over(src, dest);
        assert_eq!(p, Pixel::from_rgba(128, 0, 127, 255));
    }

    #[test]
    fn arithmetic_ops() {
        assert_eq!(ArithmeticOp::Add.apply(200, 100), 255);
        assert_eq!(ArithmeticOp::Subtract.apply(100, 200), 0);
        assert_eq!(ArithmeticOp::Nand.apply(0xF0, 0xFF), 0x0F);
        assert_eq!(ArithmeticOp::Nor.apply(0xF0, 0x0F), 0x00);
        assert_eq!(ArithmeticOp::Xor.apply(0xFF, 0x0F), 0xF0);
        assert_eq!("max".parse::<ArithmeticOp>().unwrap(), ArithmeticOp::Max);
        assert!("pow".parse::<ArithmeticOp>().is_err());
    }
}
