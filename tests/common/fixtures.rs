use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Build a zip archive in memory. Names ending in `/` become directory records.
pub fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).expect("add directory");
        } else {
            writer.start_file(*name, options).expect("start file");
            writer.write_all(bytes).expect("write entry");
        }
    }
    writer.finish().expect("finish archive").into_inner()
}

/// A solid-colour PNG of the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// A flat 8-bit RGB PSD with no layers, filled with one colour.
pub fn psd_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"8BPS");
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0; 6]);
    out.extend_from_slice(&3u16.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&8u16.to_be_bytes());
    out.extend_from_slice(&3u16.to_be_bytes());
    // colour mode data, image resources, layer and mask info: all empty
    for _ in 0..3 {
        out.extend_from_slice(&0u32.to_be_bytes());
    }
    // raw planar composite
    out.extend_from_slice(&0u16.to_be_bytes());
    let plane = (width * height) as usize;
    for channel in rgb {
        out.extend(std::iter::repeat_n(channel, plane));
    }
    out
}

/// A drawing with a single line entity.
pub const MINIMAL_DXF: &str = "  0\nSECTION\n  2\nENTITIES\n  0\nLINE\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n10.0\n 21\n10.0\n 31\n0.0\n  0\nENDSEC\n  0\nEOF\n";

pub fn svg_square() -> Vec<u8> {
    br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20"><rect width="20" height="20" fill="#3366cc"/></svg>"##.to_vec()
}

/// `count` numbered lines of plain text
pub fn numbered_lines(count: usize) -> Vec<u8> {
    (1..=count)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

/// The mixed archive used across the conversion tests:
/// an image and a Markdown note in `a/`, a text file in `b/`.
pub fn mixed_archive() -> Vec<u8> {
    zip_archive(&[
        ("a/img1.png", &png(8, 8)),
        ("a/notes.md", b"# Notes\n\nRemember the **milk**.\n"),
        ("b/readme.txt", b"hello\nworld\n"),
    ])
}
