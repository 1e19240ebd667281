use tiny_picture::*;

fn gradient(width: u32, height: u32) -> Picture {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1)) as u8;
            data.extend_from_slice(&[v, (y * 3) as u8, 255 - v, 255]);
        }
    }

    Picture::from_rgba(width, height, &data).unwrap()
}

#[test]
fn deterministic() {
    let src = gradient(40, 30);
    let table = ApproxTable::with_levels(3).unwrap();
    let a = dither(&src, &table).unwrap();
    let b = dither(&src, &table).unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn only_table_levels() {
    let src = gradient(40, 30);
    let table = ApproxTable::from_intensities(&[0, 100, 255]).unwrap();
    let dest = dither(&src, &table).unwrap();
    for p in dest.pixels() {
        for c in &[p.red(), p.green(), p.blue()] {
            assert!(*c == 0 || *c == 100 || *c == 255, "{:?}", p);
        }
    }
}

#[test]
fn identity_table() {
    let src = gradient(16, 16);
    let dest = dither(&src, &ApproxTable::from_fn(|v| v)).unwrap();
    assert_eq!(dest, src);
}

#[test]
fn after_quantization() {
    let src = gradient(32, 32);
    let quantized = quantize(&src, 8).unwrap();
    let dest = dither(&quantized, &ApproxTable::with_levels(2).unwrap()).unwrap();
    assert_eq!(dest.width(), 32);
    assert!(dest.is_opaque());
}
