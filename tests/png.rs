#![cfg(feature = "png-format")]

use tiny_picture::*;

#[test]
fn encode_decode() {
    let data = [
        255, 0, 0, 255,
        0, 255, 0, 128,
        0, 0, 0, 0,
        10, 20, 30, 255,
    ];
    let pic = Picture::from_rgba(2, 2, &data).unwrap();
    let png = pic.encode_png().unwrap();
    let decoded = Picture::decode_png(&png).unwrap();
    assert_eq!(decoded.width(), 2);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.to_rgba(), data.to_vec());
}

#[test]
fn associated_is_exported_straight() {
    let mut pic = Picture::new(1, 1).unwrap();
    pic.fill(ColorU8::from_rgba(255, 255, 255, 128));
    let decoded = Picture::decode_png(&pic.encode_png().unwrap()).unwrap();
    assert_eq!(decoded.to_rgba(), vec![255, 255, 255, 128]);
}

#[test]
fn invalid_data() {
    assert!(Picture::decode_png(&[1, 2, 3]).is_err());
}
