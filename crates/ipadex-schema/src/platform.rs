//! Device-family bitmask.

use serde::{Deserialize, Serialize};

/// Bitmask of the device classes an app declares support for.
///
/// Each `UIDeviceFamily` value `d` in an app descriptor sets bit `1 << d`,
/// so the phone (family 1) is `0b10`, the tablet (family 2) is `0b100`, and
/// so on. The mask is stored and exported as a plain integer.
///
/// # Example
///
/// ```
/// use ipadex_schema::Platform;
///
/// let p = Platform::from_device_families([1, 2]);
/// assert_eq!(p.names(), vec!["iPhone", "iPad"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(u32);

impl Platform {
    /// iPhone / iPod touch (`UIDeviceFamily` 1).
    pub const PHONE: Platform = Platform(1 << 1);
    /// iPad (`UIDeviceFamily` 2).
    pub const TABLET: Platform = Platform(1 << 2);
    /// Apple TV (`UIDeviceFamily` 3).
    pub const TV: Platform = Platform(1 << 3);
    /// Apple Watch (`UIDeviceFamily` 4).
    pub const WATCH: Platform = Platform(1 << 4);

    const LABELS: [(Platform, &'static str); 4] = [
        (Self::PHONE, "iPhone"),
        (Self::TABLET, "iPad"),
        (Self::TV, "TV"),
        (Self::WATCH, "Watch"),
    ];

    /// Wrap a raw bitmask as read from storage.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build a mask from declared device families.
    ///
    /// Families that do not fit in the mask are ignored. When nothing is
    /// declared the phone bit is assumed.
    pub fn from_device_families<I>(families: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let bits = families
            .into_iter()
            .filter_map(|d| u32::try_from(d).ok())
            .filter(|d| *d < u32::BITS)
            .fold(0u32, |acc, d| acc | (1 << d));

        if bits == 0 { Self::PHONE } else { Self(bits) }
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Platform) -> bool {
        self.0 & other.0 == other.0
    }

    /// Human-readable device names, always in phone, tablet, tv, watch order.
    pub fn names(self) -> Vec<&'static str> {
        Self::LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::PHONE
    }
}

impl std::ops::BitOr for Platform {
    type Output = Platform;

    fn bitor(self, rhs: Self) -> Self::Output {
        Platform(self.0 | rhs.0)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names().join(", "))
    }
}
