//! Fixtures for building archives on disk in tests.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use plist::{Dictionary, Value};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Write a zip at `path` holding `entries`.
pub(crate) fn write_ipa(path: &Path, entries: &[(&str, &[u8])]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

/// XML `Info.plist` for a one-bundle iPhone/iPad app.
pub(crate) fn info_plist(bundle_id: &str, name: &str) -> Vec<u8> {
    let mut info = Dictionary::new();
    info.insert("CFBundleIdentifier".into(), Value::String(bundle_id.into()));
    info.insert("CFBundleName".into(), Value::String(name.into()));
    info.insert("CFBundleShortVersionString".into(), Value::String("1.0".into()));
    info.insert("CFBundleVersion".into(), Value::String("7".into()));
    info.insert("MinimumOSVersion".into(), Value::String("14.0".into()));
    info.insert(
        "UIDeviceFamily".into(),
        Value::Array(vec![Value::Integer(1.into()), Value::Integer(2.into())]),
    );

    let mut out = Vec::new();
    Value::Dictionary(info).to_writer_xml(&mut out).unwrap();
    out
}

/// A decodable PNG of the given size.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([30, 120, 200, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}
