// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::convert::TryFrom;

use crate::LengthU32;

/// An integer rectangle.
///
/// Used to describe picture regions. Regions passed to compositing
/// and painting functions are clipped against picture bounds,
/// so coordinates can be negative.
///
/// # Guarantees
///
/// - Width and height are in 1..=i32::MAX range.
/// - x+width and y+height does not overflow.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct IntRect {
    x: i32,
    y: i32,
    width: LengthU32,
    height: LengthU32,
}

impl IntRect {
    /// Creates a new `IntRect`.
    #[inline]
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        x.checked_add(i32::try_from(width).ok()?)?;
        y.checked_add(i32::try_from(height).ok()?)?;

        Some(IntRect {
            x,
            y,
            width: LengthU32::new(width)?,
            height: LengthU32::new(height)?,
        })
    }

    /// Creates a rect at (0, 0) with the given size.
    pub(crate) fn from_size(width: LengthU32, height: LengthU32) -> Self {
        IntRect { x: 0, y: 0, width, height }
    }

    /// Creates a new `IntRect`.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Option<Self> {
        let width = u32::try_from(right.checked_sub(left)?).ok()?;
        let height = u32::try_from(bottom.checked_sub(top)?).ok()?;
        IntRect::from_xywh(left, top, width, height)
    }

    /// Returns rect's X position.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Returns rect's Y position.
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns rect's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Returns rect's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Returns rect's left edge.
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Returns rect's top edge.
    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Returns rect's right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        // No overflow is guaranteed by constructors.
        self.x + self.width.get() as i32
    }

    /// Returns rect's bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        // No overflow is guaranteed by constructors.
        self.y + self.height.get() as i32
    }

    /// Checks that the rect completely includes `other` rect.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.x <= other.x &&
        self.y <= other.y &&
        self.right() >= other.right() &&
        self.bottom() >= other.bottom()
    }

    /// Checks that the point is inside the rect.
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Returns an intersection of two rectangles.
    ///
    /// Returns `None` when rects do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);

        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        let w = u32::try_from(right.checked_sub(left)?).ok()?;
        let h = u32::try_from(bottom.checked_sub(top)?).ok()?;

        IntRect::from_xywh(left, top, w, h)
    }

    /// Returns a rect moved by the specified offset.
    pub fn translate(&self, tx: i32, ty: i32) -> Option<Self> {
        IntRect::from_xywh(
            self.x.checked_add(tx)?,
            self.y.checked_add(ty)?,
            self.width(),
            self.height(),
        )
    }
}
