use tiny_picture::*;

fn ramp(width: u32, height: u32) -> Picture {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 13) as u8, (y * 7) as u8, ((x + y) * 5) as u8, 255]);
        }
    }

    Picture::from_rgba(width, height, &data).unwrap()
}

#[test]
fn box_identity() {
    let src = ramp(17, 9);
    let mut dest = Picture::new(17, 9).unwrap();
    resample(&src, &mut dest, Filter::Box, Filter::Box).unwrap();
    assert_eq!(dest, src);
}

#[test]
fn interpolating_identity() {
    let src = ramp(8, 8);
    for &f in &[Filter::Triangle, Filter::CatmullRom, Filter::Lanczos3] {
        let dest = src.resized(8, 8, f).unwrap();
        assert_eq!(dest, src, "{:?}", f);
    }
}

#[test]
fn solid_color_is_kept() {
    let mut src = Picture::new(20, 20).unwrap();
    src.fill(ColorU8::from_rgba(40, 80, 120, 200));
    let expected = Pixel::from(ColorU8::from_rgba(40, 80, 120, 200).premultiply());

    for &f in &[Filter::Box, Filter::Triangle, Filter::Mitchell, Filter::Lanczos3, Filter::Gaussian] {
        for &(w, h) in &[(7, 5), (33, 41)] {
            let dest = src.resized(w, h, f).unwrap();
            assert!(dest.is_associated());
            assert!(!dest.is_opaque());
            assert!(dest.pixels().all(|p| p == expected), "{:?} {}x{}", f, w, h);
        }
    }
}

#[test]
fn box_downsample_averages() {
    let src = Picture::from_rgba(2, 1, &[0, 0, 0, 255, 254, 254, 254, 255]).unwrap();
    let dest = src.resized(1, 1, Filter::Box).unwrap();
    assert_eq!(dest.pixel(0, 0).unwrap(), Pixel::from_rgba(127, 127, 127, 255));
    assert!(dest.flags().contains(PictureFlags::GREYSCALE));
}

#[test]
fn separate_filters() {
    let src = ramp(10, 10);
    let mut dest = Picture::new(5, 20).unwrap();
    resample(&src, &mut dest, Filter::Box, Filter::Triangle).unwrap();
    assert!(dest.is_opaque());
    assert!(dest.pixels().all(|p| p.alpha() == 255));
}

#[test]
fn weight_tables() {
    let table = WeightTable::new(3, 6, Filter::Triangle);
    assert_eq!(table.samples().len(), 6);
    for s in table.samples() {
        assert_eq!(s.weights.iter().sum::<FDot14>(), 1 << 14);
    }
}

#[test]
fn extreme_downsampling_weights() {
    for &src_size in &[1000, 25000, 32767] {
        let table = WeightTable::new(src_size, 1, Filter::Box);
        let weights = &table.samples()[0].weights;
        assert_eq!(weights.iter().sum::<FDot14>(), 1 << 14);
        assert!(weights.iter().all(|w| *w >= 0), "{}", src_size);
        let share = (1 << 14) as f64 / f64::from(src_size);
        assert!(weights.iter().all(|w| f64::from(*w) <= share + 1.0), "{}", src_size);
    }
}

#[test]
fn extreme_downsampling_averages() {
    let width = 25000;
    let mut data = Vec::with_capacity(width as usize * 4);
    for x in 0..width {
        let v = if x < width / 2 { 255 } else { 0 };
        data.extend_from_slice(&[v, v, v, 255]);
    }

    let src = Picture::from_rgba(width, 1, &data).unwrap();
    let dest = src.resized(1, 1, Filter::Box).unwrap();
    let p = dest.pixel(0, 0).unwrap();
    assert!((p.red() as i32 - 128).abs() <= 1, "{:?}", p);

    let mut data = vec![0u8; 1000 * 4];
    for a in data.iter_mut().skip(3).step_by(4) {
        *a = 255;
    }
    data[999 * 4..].copy_from_slice(&[255, 255, 255, 255]);

    let src = Picture::from_rgba(1000, 1, &data).unwrap();
    let dest = src.resized(1, 1, Filter::Box).unwrap();
    assert!(dest.pixel(0, 0).unwrap().red() <= 1);
}

#[test]
fn nearest_neighbor() {
    let src = ramp(4, 4);
    let dest = scale_nearest(&src, 2, 2).unwrap();
    assert_eq!(dest.pixel(0, 0).unwrap(), src.pixel(1, 1).unwrap());
    assert_eq!(dest.pixel(1, 1).unwrap(), src.pixel(3, 3).unwrap());
}

#[test]
fn filter_names() {
    assert_eq!(parse_filter("mitchell").unwrap(), Some(Filter::Mitchell));
    assert_eq!(parse_filter("none").unwrap(), None);
    assert!(parse_filter("bicubic").is_err());
}
