//! Responsive view selection.
//!
//! Picks one of a fixed set of layouts from the device class, orientation
//! and route. Views only read the model; they never change it.

pub mod text;

use crate::app::AppModel;
use crate::device::{DeviceClass, DeviceInfo, Orientation};
use crate::routes::Route;

/// The layout used to draw a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererId {
    /// Collapsible menu, single-column grid.
    CompactNavigation,
    /// Full navigation bar, hero and product grid.
    StandardNavigation,
    /// Product detail with variant picker.
    ProductDetail,
}

/// Select the layout for `device` on `route`.
///
/// `NotFound` uses the home layouts while the redirect is pending.
#[must_use]
pub const fn select(device: DeviceInfo, route: &Route) -> RendererId {
    if matches!(route, Route::ProductDetail(_)) {
        return RendererId::ProductDetail;
    }

    match (device.class, device.orientation) {
        (DeviceClass::Phone, _) | (DeviceClass::Tablet, Orientation::Portrait) => {
            RendererId::CompactNavigation
        }
        (DeviceClass::Tablet, Orientation::Landscape)
        | (DeviceClass::Desktop | DeviceClass::BigDesktop, _) => RendererId::StandardNavigation,
    }
}

/// Draw the current model with the layout selected for it.
#[must_use]
pub fn render(model: &AppModel) -> String {
    text::render(select(model.device, &model.route), model)
}

#[cfg(test)]
mod tests {
    use shopfront_core::ProductId;

    use super::*;

    fn device(class: DeviceClass, orientation: Orientation) -> DeviceInfo {
        DeviceInfo { class, orientation }
    }

    #[test]
    fn test_product_detail_on_every_device() {
        let route = Route::ProductDetail(ProductId::new("p1"));
        for class in [
            DeviceClass::Phone,
            DeviceClass::Tablet,
            DeviceClass::Desktop,
            DeviceClass::BigDesktop,
        ] {
            for orientation in [Orientation::Portrait, Orientation::Landscape] {
                assert_eq!(
                    select(device(class, orientation), &route),
                    RendererId::ProductDetail
                );
            }
        }
    }

    #[test]
    fn test_navigation_layouts() {
        let cases = [
            (DeviceClass::Phone, Orientation::Portrait, RendererId::CompactNavigation),
            (DeviceClass::Phone, Orientation::Landscape, RendererId::CompactNavigation),
            (DeviceClass::Tablet, Orientation::Portrait, RendererId::CompactNavigation),
            (DeviceClass::Tablet, Orientation::Landscape, RendererId::StandardNavigation),
            (DeviceClass::Desktop, Orientation::Portrait, RendererId::StandardNavigation),
            (DeviceClass::BigDesktop, Orientation::Landscape, RendererId::StandardNavigation),
        ];
        for (class, orientation, expected) in cases {
            assert_eq!(select(device(class, orientation), &Route::Home), expected);
        }
    }

    #[test]
    fn test_not_found_uses_home_layout() {
        let phone = device(DeviceClass::Phone, Orientation::Portrait);
        assert_eq!(
            select(phone, &Route::NotFound),
            select(phone, &Route::Home)
        );
    }
}
