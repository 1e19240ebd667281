use tiny_picture::*;

fn ramp(width: u32, height: u32) -> Picture {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 128, 255]);
        }
    }

    Picture::from_rgba(width, height, &data).unwrap()
}

#[test]
fn right_angles_are_lossless() {
    let src = ramp(5, 3);
    let bg = ColorU8::TRANSPARENT;

    assert_eq!(rotate(&src, 0.0, bg).unwrap(), src);
    assert_eq!(rotate(&src, 360.0, bg).unwrap(), src);
    assert_eq!(rotate(&src, 90.0, bg).unwrap(), rotate90(&src).unwrap());
    assert_eq!(rotate(&src, -90.0, bg).unwrap(), rotate270(&src).unwrap());
    assert_eq!(rotate(&src, 180.0, bg).unwrap(), rotate180(&src).unwrap());
    assert_eq!(rotate_with(&src, 270.0, RotateMethod::AreaMap, bg).unwrap(), rotate270(&src).unwrap());

    let mut pic = src.clone();
    for _ in 0..4 {
        pic = rotate90(&pic).unwrap();
    }
    assert_eq!(pic, src);
}

#[test]
fn quarter_turn_orientation() {
    let src = ramp(5, 3);
    let dest = rotate90(&src).unwrap();
    assert_eq!(dest.width(), 3);
    assert_eq!(dest.height(), 5);
    // Counter-clockwise: the top-right corner moves to the top-left.
    assert_eq!(dest.pixel(0, 0).unwrap(), src.pixel(4, 0).unwrap());
    assert_eq!(dest.pixel(2, 4).unwrap(), src.pixel(0, 2).unwrap());
}

fn assert_round_trip(method: RotateMethod, angle: f64) {
    let src = ramp(24, 24);
    let bg = ColorU8::TRANSPARENT;
    let rotated = rotate_with(&src, angle, method, bg).unwrap();
    let back = rotate_with(&rotated, -angle, method, bg).unwrap();

    let dx = (back.width() - src.width()) / 2;
    let dy = (back.height() - src.height()) / 2;
    for y in 8..16 {
        for x in 8..16 {
            let a = src.pixel(x, y).unwrap();
            let b = back.pixel(x + dx, y + dy).unwrap();
            for (ca, cb) in a.to_array().iter().zip(b.to_array().iter()) {
                assert!(
                    (i32::from(*ca) - i32::from(*cb)).abs() <= 4,
                    "{:?} at {}x{}: {:?} vs {:?}", method, x, y, a, b
                );
            }
        }
    }
}

#[test]
fn shear_round_trip() {
    assert_round_trip(RotateMethod::Shear, 30.0);
    assert_round_trip(RotateMethod::Shear, 135.0);
}

#[test]
fn area_map_round_trip() {
    assert_round_trip(RotateMethod::AreaMap, 30.0);
}

#[test]
fn rotated_size() {
    let src = ramp(24, 24);
    let dest = rotate(&src, 30.0, ColorU8::TRANSPARENT).unwrap();
    assert_eq!((dest.width(), dest.height()), (34, 34));
    assert!(!dest.is_opaque());
    assert_eq!(dest.pixel(0, 0).unwrap(), Pixel::TRANSPARENT);
}

#[test]
fn background_fill() {
    let src = ramp(10, 10);
    let dest = rotate(&src, 45.0, ColorU8::WHITE).unwrap();
    assert_eq!(dest.pixel(0, 0).unwrap(), Pixel::from_rgba(255, 255, 255, 255));
    assert!(dest.is_opaque());
}

#[test]
fn method_names() {
    assert_eq!("shear".parse::<RotateMethod>().unwrap(), RotateMethod::Shear);
    assert_eq!("area-map".parse::<RotateMethod>().unwrap(), RotateMethod::AreaMap);
    assert!("spin".parse::<RotateMethod>().is_err());
}
