use std::path::Path;

use fbpack::app::{convert_image, dump_bit_rows, ConvertOptions, DumpOptions};
use fbpack::imgproc::PixelFormat;
use fbpack::Error;

fn write_png(path: &Path, img: &image::RgbaImage) {
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn checkerboard(width: u32, height: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 255, 255, 0])
        } else {
            image::Rgba([0x12, 0xab, 0xf0, 255])
        }
    })
}

#[test]
fn convert_rgb444_native_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("raw_data.bin");
    write_png(&input, &checkerboard(4, 3));

    let summary = convert_image(&ConvertOptions {
        input,
        output: output.clone(),
        size: (4u32, 3u32).into(),
        format: PixelFormat::RGB444,
    })
    .unwrap();
    assert_eq!(summary.pixels, 12);
    assert_eq!(summary.bytes_written, 24);

    let raw = std::fs::read(&output).unwrap();
    assert_eq!(raw.len(), 24);
    // row-major: (0,0) white, (1,0) colored, ..., (0,1) colored
    assert_eq!(&raw[0..2], &[0x0f, 0xff]);
    assert_eq!(&raw[2..4], &[0x01, 0xaf]);
    assert_eq!(&raw[8..10], &[0x01, 0xaf]);
}

#[test]
fn convert_rgb332_native_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("raw_picture_data.bin");
    write_png(&input, &checkerboard(2, 2));

    let summary = convert_image(&ConvertOptions {
        input,
        output: output.clone(),
        size: (2u32, 2u32).into(),
        format: PixelFormat::RGB332,
    })
    .unwrap();
    assert_eq!(summary.bytes_written, 4);
    assert_eq!(std::fs::read(&output).unwrap(), vec![0xff, 23, 23, 0xff]);
}

#[test]
fn convert_resizes_to_target() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.bin");
    write_png(&input, &image::RgbaImage::from_pixel(13, 7, image::Rgba([0, 0, 0, 255])));

    for (format, bpp) in [(PixelFormat::RGB444, 2), (PixelFormat::RGB332, 1)] {
        let summary = convert_image(&ConvertOptions {
            input: input.clone(),
            output: output.clone(),
            size: (640u32, 480u32).into(),
            format,
        })
        .unwrap();
        assert_eq!(summary.pixels, 640 * 480);
        let raw = std::fs::read(&output).unwrap();
        assert_eq!(raw.len(), 640 * 480 * bpp);
        assert!(raw.iter().all(|b| *b == 0));
    }
}

#[test]
fn convert_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let res = convert_image(&ConvertOptions {
        input: dir.path().join("Memes.png"),
        output: dir.path().join("out.bin"),
        size: (640u32, 480u32).into(),
        format: PixelFormat::RGB332,
    });
    assert!(matches!(res, Err(Error::SourceNotFound(_))));
    assert!(!dir.path().join("out.bin").exists());
}

#[test]
fn convert_corrupt_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    std::fs::write(&input, b"\x89PNG but not really").unwrap();
    let res = convert_image(&ConvertOptions {
        input,
        output: dir.path().join("out.bin"),
        size: (640u32, 480u32).into(),
        format: PixelFormat::RGB444,
    });
    assert!(matches!(res, Err(Error::Decode { .. })));
}

#[test]
fn dump_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("EntireTestRaw.bin");
    let output = dir.path().join("EntireMemoryTestReadable.txt");
    std::fs::write(&input, [0b1011_0000u8, 0b0000_1111, 0xff]).unwrap();

    let summary = dump_bit_rows(&DumpOptions {
        input,
        output: output.clone(),
        row_width: 16,
    })
    .unwrap();
    assert_eq!(summary.bytes_read, 3);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "1011000000001111\n11111111\n"
    );
}

#[test]
fn dump_empty_and_missing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.bin");
    let output = dir.path().join("empty.txt");
    std::fs::write(&input, b"").unwrap();

    let summary = dump_bit_rows(&DumpOptions {
        input,
        output: output.clone(),
        row_width: 16,
    })
    .unwrap();
    assert_eq!(summary.rows_written, 0);
    assert_eq!(std::fs::read(&output).unwrap(), Vec::<u8>::new());

    let res = dump_bit_rows(&DumpOptions {
        input: dir.path().join("missing.bin"),
        output,
        row_width: 16,
    });
    assert!(matches!(res, Err(Error::SourceNotFound(_))));
}
