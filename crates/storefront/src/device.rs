//! Viewport classification into coarse device buckets.

use serde::{Deserialize, Serialize};

/// Coarse responsive-design bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Phone,
    Tablet,
    Desktop,
    BigDesktop,
}

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Device class and orientation derived from a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub class: DeviceClass,
    pub orientation: Orientation,
}

/// Inclusive maximum viewport widths for each device class.
///
/// Anything wider than `desktop_max_width` is a [`DeviceClass::BigDesktop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub phone_max_width: u32,
    pub tablet_max_width: u32,
    pub desktop_max_width: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            phone_max_width: 600,
            tablet_max_width: 1200,
            desktop_max_width: 1800,
        }
    }
}

impl Breakpoints {
    /// Whether each breakpoint is wider than the previous one.
    #[must_use]
    pub const fn is_increasing(&self) -> bool {
        self.phone_max_width < self.tablet_max_width
            && self.tablet_max_width < self.desktop_max_width
    }

    /// Classify a `width`×`height` viewport.
    #[must_use]
    pub const fn classify(&self, width: u32, height: u32) -> DeviceInfo {
        let class = if width <= self.phone_max_width {
            DeviceClass::Phone
        } else if width <= self.tablet_max_width {
            DeviceClass::Tablet
        } else if width <= self.desktop_max_width {
            DeviceClass::Desktop
        } else {
            DeviceClass::BigDesktop
        };

        let orientation = if width < height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        };

        DeviceInfo { class, orientation }
    }
}
