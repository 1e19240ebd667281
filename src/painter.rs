// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{IntRect, PaintBrush, Picture, PictureFlags, Pixel};

use crate::composite::over;

/// Provides a high-level painting API.
pub trait Painter {
    /// Paints a rectangle with a brush.
    ///
    /// The brush must be configured for the rect's size. Brush coordinates
    /// are relative to the rect's top-left corner, even when the rect is
    /// partially outside the picture.
    ///
    /// When `blend` is set, brush colors are drawn over existing pixels.
    /// Otherwise, they replace them.
    fn paint_rect(&mut self, rect: IntRect, brush: &PaintBrush, blend: bool);

    /// Paints the whole picture with a brush.
    ///
    /// A copy of the brush is configured for the picture's size,
    /// so the original brush is not modified.
    fn paint_picture(&mut self, brush: &PaintBrush);
}

impl Painter for Picture {
    fn paint_rect(&mut self, rect: IntRect, brush: &PaintBrush, blend: bool) {
        let clipped = match self.bounds().intersect(&rect) {
            Some(v) => v,
            None => {
                log::warn!("paint rect is outside the picture");
                return;
            }
        };

        self.associate();
        for y in clipped.top()..clipped.bottom() {
            let by = y - rect.y();
            let row = self.row_mut(y as u32);
            for x in clipped.left()..clipped.right() {
                let c = Pixel::from(brush.color_at(x - rect.x(), by));
                let p = &mut row[x as usize];
                *p = if blend { over(c, *p) } else { c };
            }
        }

        if !blend && !brush.is_opaque() {
            self.set_translucency(true);
        }

        self.remove_flags(PictureFlags::GREYSCALE);
    }

    fn paint_picture(&mut self, brush: &PaintBrush) {
        let mut brush = brush.clone();
        brush.configure(self.width(), self.height());
        let rect = self.bounds();
        self.paint_rect(rect, &brush, false);
        self.analyze();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorU8, LinearGradient, GradientColors, BrushKind};

    #[test]
    fn solid_region() {
        let mut picture = Picture::new(4, 4).unwrap();
        let brush = PaintBrush::solid(ColorU8::from_rgb(0, 255, 0));
        picture.paint_rect(IntRect::from_xywh(2, 2, 4, 4).unwrap(), &brush, false);
        assert_eq!(picture.pixel(1, 1).unwrap(), Pixel::TRANSPARENT);
        assert_eq!(picture.pixel(3, 3).unwrap(), Pixel::from_rgba(0, 255, 0, 255));
        assert!(!picture.flags().contains(PictureFlags::UNINITIALIZED));
    }

    #[test]
    fn relative_coordinates() {
        let mut brush = PaintBrush::new(BrushKind::LinearGradient(LinearGradient::new(
            (0.0, 0.5),
            (1.0, 0.5),
            GradientColors::default(),
        )));
        brush.configure(2, 1);

        let mut picture = Picture::new(8, 1).unwrap();
        picture.paint_rect(IntRect::from_xywh(4, 0, 2, 1).unwrap(), &brush, false);
        // t == 0.25 and t == 0.75
        assert_eq!(picture.pixel(4, 0).unwrap().red(), 64);
        assert_eq!(picture.pixel(5, 0).unwrap().red(), 191);
    }

    #[test]
    fn outside() {
        let mut picture = Picture::new(4, 4).unwrap();
        let brush = PaintBrush::solid(ColorU8::WHITE);
        picture.paint_rect(IntRect::from_xywh(10, 10, 4, 4).unwrap(), &brush, false);
        assert!(picture.flags().contains(PictureFlags::UNINITIALIZED));
    }

    #[test]
    fn blended() {
        let mut picture = Picture::new(1, 1).unwrap();
        picture.fill(ColorU8::from_rgb(0, 0, 255));
        let mut brush = PaintBrush::solid(ColorU8::from_rgb(255, 0, 0));
        brush.common.set_opacity(50.0).unwrap();
        picture.paint_rect(picture.bounds(), &brush, true);
        assert_eq!(picture.pixel(0, 0).unwrap(), Pixel::from_rgba(128, 0, 127, 255));
    }
}
