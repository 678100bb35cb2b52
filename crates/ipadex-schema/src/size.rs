//! Human-readable byte sizes.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count for display, e.g. `2500000` -> `"2.38 MB"`.
///
/// The value is divided by 1024 until it drops below 1024 or the unit
/// reaches GB, and is always printed with two decimals.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", UNITS[unit])
}
