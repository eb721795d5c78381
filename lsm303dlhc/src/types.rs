use core::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThreeAxes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ThreeAxes {
    pub fn add(&mut self, other: &ThreeAxes) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }

    pub fn scale(&mut self, factor: f64) {
        self.x /= factor;
        self.y /= factor;
        self.z /= factor;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawAxes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawAxes {
    pub fn to_axes(self) -> ThreeAxes {
        ThreeAxes {
            x: self.x as f64,
            y: self.y as f64,
            z: self.z as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Counts,
    MetersPerSecondSquared,
    Gauss,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Counts => f.write_str("raw"),
            Unit::MetersPerSecondSquared => f.write_str("m/s^2"),
            Unit::Gauss => f.write_str("gauss"),
        }
    }
}

/// One poll of a channel. `raw` is always the decoded register value, `axes`
/// carries it in the unit named by `unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub raw: RawAxes,
    pub axes: ThreeAxes,
    pub unit: Unit,
}

pub type AccelReading = Reading;
pub type MagReading = Reading;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputMode {
    Raw,
    #[default]
    PhysicalUnits,
}

/// How the little-endian accelerometer word is turned into counts.
///
/// The part left-justifies a 12-bit sample in the 16-bit output word, so
/// `Shifted12` arithmetic-shifts the word right by 4. `Full16` keeps the whole
/// two's-complement word. Both conventions are in use against this device and
/// they differ by a factor of 16; the physical scale is applied unchanged to
/// whichever value results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AccelPrecision {
    #[default]
    Shifted12,
    Full16,
}

impl AccelPrecision {
    pub fn decode(self, lo: u8, hi: u8) -> i16 {
        let word = i16::from_le_bytes([lo, hi]);
        match self {
            AccelPrecision::Shifted12 => word >> 4,
            AccelPrecision::Full16 => word,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ConfigurePolicy {
    /// Configure before the first read only.
    #[default]
    Once,
    /// Rewrite the configuration and wait out the settle delay before every read.
    EverySample,
}

/// What to do when a configuration register write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum WriteCheck {
    #[default]
    Strict,
    /// Log and carry on; readings may come from a misconfigured device.
    Lenient,
}
