// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::sync::Arc;

use crate::{Picture, PremultipliedColorU8};

/// A brush that repeats a picture in both directions.
#[derive(Clone, PartialEq, Debug)]
pub struct Tile {
    picture: Arc<Picture>,
}

impl Tile {
    /// Creates a new tile brush.
    ///
    /// The picture is converted into premultiplied colors.
    pub fn new(mut picture: Picture) -> Self {
        picture.associate();
        picture.analyze();
        Tile {
            picture: Arc::new(picture),
        }
    }

    /// Returns the tile's source picture.
    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    pub(crate) fn color_at(&self, x: i32, y: i32) -> PremultipliedColorU8 {
        let x = x.rem_euclid(self.picture.width() as i32) as u32;
        let y = y.rem_euclid(self.picture.height() as i32) as u32;
        match self.picture.pixel(x, y) {
            Some(p) => PremultipliedColorU8::from_pixel_unchecked(p),
            None => PremultipliedColorU8::TRANSPARENT,
        }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.picture.is_opaque()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorU8;

    #[test]
    fn wraps_around() {
        let mut picture = Picture::new(2, 2).unwrap();
        picture.fill(ColorU8::BLACK);
        picture.set_pixel(1, 0, ColorU8::WHITE.into()).unwrap();
        let tile = Tile::new(picture);
        assert_eq!(tile.color_at(1, 0).red(), 255);
        assert_eq!(tile.color_at(3, 2).red(), 255);
        assert_eq!(tile.color_at(-1, -2).red(), 255);
        assert_eq!(tile.color_at(0, 0).red(), 0);
        assert!(tile.is_opaque());
    }

    #[test]
    fn straight_source_is_premultiplied() {
        let picture = Picture::from_rgba(1, 1, &[200, 100, 0, 128]).unwrap();
        let tile = Tile::new(picture);
        let c = tile.color_at(5, 5);
        assert_eq!(c.alpha(), 128);
        assert_eq!(c.red(), 100);
        assert!(!tile.is_opaque());
    }
}
