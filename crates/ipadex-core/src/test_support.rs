//! In-memory fixtures shared by the unit tests.

use std::io::{Cursor, Write};

use plist::{Dictionary, Value};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build a zip container from `(path, bytes)` pairs.
pub(crate) fn build_zip<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Build a zip container from textual entries.
pub(crate) fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    build_zip(entries.iter().map(|(name, data)| (*name, data.as_bytes())))
}

/// Serialize a dictionary as an XML property list.
pub(crate) fn plist_xml(dict: Dictionary) -> Vec<u8> {
    let mut buf = Vec::new();
    Value::Dictionary(dict).to_writer_xml(&mut buf).unwrap();
    buf
}

/// Serialize a dictionary as a binary property list.
pub(crate) fn plist_binary(dict: Dictionary) -> Vec<u8> {
    let mut buf = Vec::new();
    Value::Dictionary(dict).to_writer_binary(&mut buf).unwrap();
    buf
}

/// Dictionary from string pairs.
pub(crate) fn dict(pairs: &[(&str, Value)]) -> Dictionary {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// Array of strings.
pub(crate) fn strings(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| Value::String((*s).to_string())).collect())
}

/// Rewrite the compression method recorded for `entry` in both its local
/// and central directory headers.
pub(crate) fn set_compression_method(zip: &mut [u8], entry: &str, method: u16) {
    const LOCAL: [u8; 4] = *b"PK\x03\x04";
    const CENTRAL: [u8; 4] = *b"PK\x01\x02";

    let read_u16 = |buf: &[u8], at: usize| u16::from_le_bytes([buf[at], buf[at + 1]]) as usize;
    let name = entry.as_bytes();
    let mut patched = 0;

    for i in 0..zip.len().saturating_sub(46) {
        let sig = &zip[i..i + 4];
        let (method_at, name_len_at, name_at) = if sig == LOCAL.as_slice() {
            (i + 8, i + 26, i + 30)
        } else if sig == CENTRAL.as_slice() {
            (i + 10, i + 28, i + 46)
        } else {
            continue;
        };
        let len = read_u16(zip, name_len_at);
        if zip.get(name_at..name_at + len) == Some(name) {
            zip[method_at..method_at + 2].copy_from_slice(&method.to_le_bytes());
            patched += 1;
        }
    }
    assert_eq!(patched, 2, "entry {entry} not found in both headers");
}

/// A decodable PNG of the given size.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}
