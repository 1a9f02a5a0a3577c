//! Dial layout and hand angles.
//!
//! Angles are expressed in degrees in a screen coordinate system where 0°
//! points right and positive angles turn clockwise; the `-90°` offsets align
//! 0 seconds/minutes/hours with 12 o'clock.

use chrono::{DateTime, TimeZone, Timelike};

/// Bounds of the surface the widget is mounted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width:  f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The smaller of the two dimensions, clamped at zero.
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height).max(0.0)
    }
}

/// Rotation of the three hands, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour:   f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// Computes hand angles for a time of day.
    ///
    /// # Examples
    ///
    /// ```
    /// use dialclock_core::clock::HandAngles;
    ///
    /// let angles = HandAngles::at(3, 30, 0);
    /// assert_eq!(angles.hour, 15.0);
    /// assert_eq!(angles.minute, 90.0);
    /// assert_eq!(angles.second, -90.0);
    /// ```
    pub fn at(hours: u32, minutes: u32, seconds: u32) -> Self {
        let hours = (hours % 12) as f32;
        let minutes = minutes as f32;
        let seconds = seconds as f32;

        Self {
            hour:   (hours + minutes / 60.0) * 30.0 - 90.0,
            minute: (minutes + seconds / 60.0) * 6.0 - 90.0,
            second: seconds * 6.0 - 90.0,
        }
    }

    pub fn of<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::at(time.hour(), time.minute(), time.second())
    }
}

/// Placement of one numeral relative to the dial center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeral {
    pub value: u8,
    pub x:     f32,
    pub y:     f32,
}

/// Dial geometry derived from the container size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialLayout {
    pub radius:   f32,
    /// Edge length of the square the dial occupies.
    pub size:     f32,
    pub numerals: [Numeral; 12],
}

impl DialLayout {
    /// Lays out a dial of `radius` with numerals at `radius * inset`.
    pub fn new(radius: f32, inset: f32) -> Self {
        let distance = radius * inset;
        let numerals = std::array::from_fn(|index| {
            let value = index as u8 + 1;
            let angle = (f32::from(value) * 30.0 - 90.0).to_radians();

            Numeral {
                value,
                x: distance * angle.cos(),
                y: distance * angle.sin(),
            }
        });

        Self {
            radius,
            size: radius * 2.0,
            numerals,
        }
    }
}

/// Radius of the dial for a container: a fixed fraction of its smaller side.
pub fn radius_for(surface: Surface, fraction: f32) -> f32 {
    surface.min_dimension() * fraction
}
