use tiny_picture::*;

fn translucent_picture() -> Picture {
    let mut data = Vec::new();
    for y in 0..8u32 {
        for x in 0..8u32 {
            data.extend_from_slice(&[(x * 31) as u8, (y * 29) as u8, 200, (128 + x * 8 + y) as u8]);
        }
    }

    Picture::from_rgba(8, 8, &data).unwrap()
}

#[test]
fn invalid_size() {
    assert!(Picture::new(0, 10).is_err());
    assert!(Picture::new(10, 0).is_err());
    assert!(Picture::new(MAX_DIMENSION + 1, 1).is_err());
    assert!(Picture::new(MAX_DIMENSION, 1).is_ok());
}

#[test]
fn new_is_transparent() {
    let pic = Picture::new(3, 2).unwrap();
    assert!(pic.pixels().all(|p| p == Pixel::TRANSPARENT));
    assert!(pic.flags().contains(PictureFlags::UNINITIALIZED));
    assert!(pic.stride() >= pic.width());
}

#[test]
fn data_length_is_checked() {
    assert!(Picture::from_rgba(2, 2, &[0; 15]).is_err());
    assert!(Picture::from_rgba(2, 2, &[0; 16]).is_ok());
}

#[test]
fn premultiplication_round_trip() {
    let original = translucent_picture();
    assert!(!original.is_associated());

    let mut pic = original.clone();
    pic.associate();
    assert!(pic.is_associated());
    for p in pic.pixels() {
        assert!(p.red() <= p.alpha() && p.green() <= p.alpha() && p.blue() <= p.alpha());
    }

    let mut twice = pic.clone();
    twice.associate();
    assert_eq!(twice, pic);

    pic.unassociate();
    for (a, b) in pic.pixels().zip(original.pixels()) {
        assert_eq!(a.alpha(), b.alpha());
        assert!((i32::from(a.red()) - i32::from(b.red())).abs() <= 1);
        assert!((i32::from(a.green()) - i32::from(b.green())).abs() <= 1);
        assert!((i32::from(a.blue()) - i32::from(b.blue())).abs() <= 1);
    }
}

#[test]
fn flags_are_analyzed() {
    let opaque = Picture::from_rgba(1, 2, &[10, 10, 10, 255, 20, 20, 20, 255]).unwrap();
    assert!(opaque.is_opaque());
    assert!(opaque.flags().contains(PictureFlags::GREYSCALE));

    let mask = Picture::from_rgba(1, 2, &[10, 20, 30, 255, 0, 0, 0, 0]).unwrap();
    assert!(mask.flags().contains(PictureFlags::MASK));
    assert!(!mask.flags().contains(PictureFlags::GREYSCALE));

    let translucent = translucent_picture();
    assert!(translucent.flags().contains(PictureFlags::COMPOSITE));
    assert!(!translucent.flags().contains(PictureFlags::MASK));
}

#[test]
fn resize_keeps_overlap() {
    let mut pic = Picture::new(4, 4).unwrap();
    pic.fill(ColorU8::from_rgb(0, 255, 0));
    assert!(pic.take_dirty());

    pic.resize(6, 2).unwrap();
    assert_eq!(pic.width(), 6);
    assert_eq!(pic.height(), 2);
    assert_eq!(pic.pixel(3, 1).unwrap(), Pixel::from_rgba(0, 255, 0, 255));
    assert_eq!(pic.pixel(4, 0).unwrap(), Pixel::TRANSPARENT);
    assert!(pic.take_dirty());
    assert!(!pic.is_opaque());
}

#[test]
fn clone_and_copy_rect() {
    let mut pic = Picture::new(4, 4).unwrap();
    pic.fill_rect(IntRect::from_xywh(1, 1, 2, 2).unwrap(), ColorU8::WHITE);

    let part = pic.clone_rect(IntRect::from_xywh(1, 1, 10, 10).unwrap()).unwrap();
    assert_eq!(part.width(), 3);
    assert_eq!(part.height(), 3);
    assert_eq!(part.pixel(0, 0).unwrap(), Pixel::from_rgba(255, 255, 255, 255));
    assert_eq!(part.pixel(2, 2).unwrap(), Pixel::TRANSPARENT);

    let mut other = Picture::new(2, 2).unwrap();
    other.copy_from(&pic, IntRect::from_xywh(0, 0, 4, 4).unwrap(), -1, -1);
    assert_eq!(other.pixel(0, 0).unwrap(), Pixel::from_rgba(255, 255, 255, 255));
    assert_eq!(other.pixel(1, 1).unwrap(), Pixel::from_rgba(255, 255, 255, 255));
}

#[test]
fn straight_export() {
    let data = [200, 100, 50, 128, 0, 0, 0, 0];
    let mut pic = Picture::from_rgba(2, 1, &data).unwrap();
    pic.associate();
    let out = pic.to_rgba();
    assert_eq!(out[3], 128);
    assert!((i32::from(out[0]) - 200).abs() <= 1);
    assert_eq!(&out[4..], &[0, 0, 0, 0]);
}

#[test]
fn flips() {
    let data = [1, 0, 0, 255, 2, 0, 0, 255, 3, 0, 0, 255, 4, 0, 0, 255];
    let mut pic = Picture::from_rgba(2, 2, &data).unwrap();
    pic.flip_horizontal();
    assert_eq!(pic.pixel(0, 0).unwrap().red(), 2);
    pic.flip_vertical();
    assert_eq!(pic.pixel(0, 0).unwrap().red(), 4);
}

#[test]
fn greyscale_and_fade() {
    let mut pic = Picture::new(2, 2).unwrap();
    pic.fill(ColorU8::from_rgb(255, 0, 0));
    pic.greyscale();
    assert!(pic.flags().contains(PictureFlags::GREYSCALE));
    assert!(pic.pixel(0, 0).unwrap().is_grey());

    pic.fade(128);
    assert_eq!(pic.pixel(1, 1).unwrap().alpha(), 128);
    assert!(!pic.is_opaque());
}
