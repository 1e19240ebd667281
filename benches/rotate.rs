use bencher::{benchmark_group, benchmark_main, Bencher};

use tiny_picture::*;

fn source() -> Picture {
    let mut pic = Picture::new(500, 400).unwrap();
    pic.fill(ColorU8::from_rgb(50, 127, 150));
    pic.fill_rect(IntRect::from_xywh(100, 100, 200, 100).unwrap(), ColorU8::from_rgba(220, 140, 75, 180));
    pic
}

fn rotate_by(angle: f64, method: RotateMethod, bencher: &mut Bencher) {
    let src = source();
    bencher.iter(|| {
        rotate_with(&src, angle, method, ColorU8::TRANSPARENT).unwrap();
    });
}

fn right_angle(bencher: &mut Bencher)   { rotate_by(90.0, RotateMethod::Shear, bencher); }
fn shear_30(bencher: &mut Bencher)      { rotate_by(30.0, RotateMethod::Shear, bencher); }
fn shear_135(bencher: &mut Bencher)     { rotate_by(135.0, RotateMethod::Shear, bencher); }
fn area_map_30(bencher: &mut Bencher)   { rotate_by(30.0, RotateMethod::AreaMap, bencher); }

benchmark_group!(rotate_group, right_angle, shear_30, shear_135, area_map_30);
benchmark_main!(rotate_group);
