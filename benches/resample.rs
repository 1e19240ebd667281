use bencher::{benchmark_group, benchmark_main, Bencher};

use tiny_picture::*;

fn source() -> Picture {
    let mut data = Vec::with_capacity(512 * 512 * 4);
    for y in 0..512u32 {
        for x in 0..512u32 {
            data.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
        }
    }

    Picture::from_rgba(512, 512, &data).unwrap()
}

fn scale(filter: Filter, width: u32, height: u32, bencher: &mut Bencher) {
    let src = source();
    let mut dest = Picture::new(width, height).unwrap();
    bencher.iter(|| {
        resample(&src, &mut dest, filter, filter).unwrap();
    });
}

fn box_down(bencher: &mut Bencher)          { scale(Filter::Box, 200, 200, bencher); }
fn triangle_down(bencher: &mut Bencher)     { scale(Filter::Triangle, 200, 200, bencher); }
fn lanczos3_down(bencher: &mut Bencher)     { scale(Filter::Lanczos3, 200, 200, bencher); }
fn mitchell_up(bencher: &mut Bencher)       { scale(Filter::Mitchell, 1000, 1000, bencher); }
fn catrom_up(bencher: &mut Bencher)         { scale(Filter::CatmullRom, 1000, 1000, bencher); }

fn nearest_up(bencher: &mut Bencher) {
    let src = source();
    bencher.iter(|| {
        scale_nearest(&src, 1000, 1000).unwrap();
    });
}

benchmark_group!(resample_group, box_down, triangle_down, lanczos3_down, mitchell_up, catrom_up, nearest_up);
benchmark_main!(resample_group);
