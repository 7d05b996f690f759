//! Plain-text frames for terminal hosts.

use std::fmt::Write as _;

use shopfront_core::{Catalog, FocusCursor, Product, Variant};

use super::RendererId;
use crate::app::{AppModel, QueryResult};
use crate::routes::Route;

/// Product display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub featured_image: Option<String>,
    pub variants: Vec<VariantView>,
}

/// Variant display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub selected: bool,
}

impl ProductView {
    /// Build the view of `product` with `variants` marking the chosen one.
    #[must_use]
    pub fn new(product: &Product, variants: Option<&FocusCursor<Variant>>) -> Self {
        let variants: Vec<VariantView> = variants.map_or_else(
            || {
                product
                    .variants
                    .data
                    .iter()
                    .enumerate()
                    .map(|(i, variant)| VariantView::new(variant, i == 0))
                    .collect()
            },
            |cursor| {
                cursor
                    .iter()
                    .enumerate()
                    .filter(|(_, variant)| !variant.is_placeholder())
                    .map(|(i, variant)| VariantView::new(variant, i == cursor.position()))
                    .collect()
            },
        );

        let price = variants
            .iter()
            .find(|variant| variant.selected)
            .map(|variant| variant.price.clone())
            .unwrap_or_default();

        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price,
            featured_image: product.featured_image().map(|image| image.src.clone()),
            variants,
        }
    }
}

impl VariantView {
    fn new(variant: &Variant, selected: bool) -> Self {
        Self {
            id: variant.id.to_string(),
            title: variant.title.clone(),
            price: variant.price.to_string(),
            selected,
        }
    }
}

/// Draw `model` with the `renderer` layout.
#[must_use]
pub fn render(renderer: RendererId, model: &AppModel) -> String {
    let mut out = String::new();
    let catalog = model.latest_catalog();

    match renderer {
        RendererId::CompactNavigation => {
            compact_header(&mut out, catalog, model.menu_focused);
            status_line(&mut out, model);
            product_grid(&mut out, catalog, model, 1);
        }
        RendererId::StandardNavigation => {
            standard_header(&mut out, catalog);
            status_line(&mut out, model);
            product_grid(&mut out, catalog, model, 3);
        }
        RendererId::ProductDetail => {
            let _ = writeln!(out, "< {}", shop_name(catalog));
            status_line(&mut out, model);
            product_detail(&mut out, model);
        }
    }

    out
}

fn shop_name(catalog: Option<&Catalog>) -> &str {
    catalog.map_or("Shop", Catalog::shop_name)
}

fn compact_header(out: &mut String, catalog: Option<&Catalog>, menu_open: bool) {
    let _ = writeln!(out, "[{}] {}", if menu_open { "x" } else { "=" }, shop_name(catalog));
    if menu_open {
        let _ = writeln!(out, "  Home");
        let _ = writeln!(out, "  Search");
    }
}

fn standard_header(out: &mut String, catalog: Option<&Catalog>) {
    let _ = writeln!(out, "{} | Home | Search", shop_name(catalog));
    if let Some(description) = catalog.and_then(Catalog::shop_description) {
        let _ = writeln!(out, "{description}");
    }
    if let Some(title) = catalog.and_then(Catalog::collection_title) {
        let _ = writeln!(out, "== {title} ==");
    }
}

fn status_line(out: &mut String, model: &AppModel) {
    match model.latest() {
        Some(QueryResult::Loading(_)) => {
            let _ = writeln!(out, "Loading...");
        }
        Some(QueryResult::Failure(failure)) => {
            let _ = writeln!(out, "Error: {failure}");
        }
        Some(QueryResult::Success(_)) | None => {}
    }
}

fn product_grid(out: &mut String, catalog: Option<&Catalog>, model: &AppModel, columns: usize) {
    let Some(catalog) = catalog else {
        return;
    };
    let products = catalog.products();

    let cells: Vec<String> = products
        .data
        .iter()
        .map(|product| {
            let view = ProductView::new(product, model.variant_focus.get(&product.id));
            format!("{} ({})", view.title, view.price)
        })
        .collect();

    if cells.is_empty() {
        let _ = writeln!(out, "No products yet.");
    }
    for row in cells.chunks(columns) {
        let _ = writeln!(out, "{}", row.join(" | "));
    }
    if products.has_next_page() {
        let _ = writeln!(out, "More products available.");
    }
}

fn product_detail(out: &mut String, model: &AppModel) {
    let product = model.product_focus.selected();
    let routed = match &model.route {
        Route::ProductDetail(id) => Some(id),
        Route::Home | Route::NotFound => None,
    };
    // A missed selection leaves the cursor where it was.
    if product.is_placeholder() || routed.is_some_and(|id| *id != product.id) {
        let _ = writeln!(out, "Product not available.");
        return;
    }

    let view = ProductView::new(product, model.variant_focus.get(&product.id));
    let _ = writeln!(out, "{}", view.title);
    if !view.price.is_empty() {
        let _ = writeln!(out, "{}", view.price);
    }
    if let Some(image) = &view.featured_image {
        let _ = writeln!(out, "Image: {image}");
    }
    if !view.description.is_empty() {
        let _ = writeln!(out, "{}", view.description);
    }
    for variant in &view.variants {
        let _ = writeln!(
            out,
            "  ({}) {} - {}",
            if variant.selected { "*" } else { " " },
            variant.title,
            variant.price
        );
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::{Image, Money, PageInfo, Paginator, ProductId, Shop, VariantId};

    use super::*;
    use crate::app::{Event, FailureKind, FetchFailure, Storefront};
    use crate::config::CatalogConfig;
    use crate::device::Breakpoints;

    fn product() -> Product {
        let variant = |id: &str, cents: i64| Variant {
            id: VariantId::new(id),
            title: format!("{id} pack"),
            image: None,
            price: Money::new(Decimal::new(cents, 2), "USD"),
        };
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            handle: "dried-pineapple".to_string(),
            title: "Dried Pineapple".to_string(),
            description: "Sweet and chewy.".to_string(),
            images: vec![Image {
                src: "https://cdn.example.com/p1.jpg".to_string(),
            }],
            variants: Paginator::new(
                vec![variant("Small", 500), variant("Large", 1250)],
                PageInfo::default(),
            ),
        }
    }

    fn loaded(width: u32, height: u32) -> (Storefront, AppModel) {
        let sf = Storefront::new(Breakpoints::default(), &CatalogConfig::default());
        let (model, _) = sf.start("/", width, height);
        let catalog = Catalog::ShopFront(Shop {
            name: "Naked Pineapple".to_string(),
            description: Some("Fruit snacks".to_string()),
            products: Paginator::new(
                vec![product()],
                PageInfo {
                    has_next_page: true,
                    ..PageInfo::default()
                },
            ),
        });
        let request = match model.latest() {
            Some(QueryResult::Loading(request)) => *request,
            other => panic!("expected loading entry, got {other:?}"),
        };
        let (model, _) = sf.transition(Event::FetchCompleted(request, Ok(catalog)), model);
        (sf, model)
    }

    #[test]
    fn test_product_view_uses_variant_cursor() {
        let product = product();
        let cursor =
            FocusCursor::from_list_or_else(product.variants.data.clone(), Variant::placeholder)
                .select_by(|v| v.id == VariantId::new("Large"));

        let view = ProductView::new(&product, Some(&cursor));
        assert_eq!(view.price, "12.50 USD");
        assert!(!view.variants[0].selected);
        assert!(view.variants[1].selected);

        let view = ProductView::new(&product, None);
        assert_eq!(view.price, "5.00 USD");
    }

    #[test]
    fn test_placeholder_variant_is_hidden() {
        let mut product = product();
        product.variants = Paginator::default();
        let cursor = FocusCursor::singleton(Variant::placeholder());

        let view = ProductView::new(&product, Some(&cursor));
        assert!(view.variants.is_empty());
        assert_eq!(view.price, "");
    }

    #[test]
    fn test_standard_frame() {
        let (_, model) = loaded(1440, 900);
        let frame = render(RendererId::StandardNavigation, &model);

        assert!(frame.starts_with("Naked Pineapple | Home | Search\nFruit snacks\n"));
        assert!(frame.contains("Dried Pineapple (5.00 USD)"));
        assert!(frame.contains("More products available."));
    }

    #[test]
    fn test_compact_frame_with_menu() {
        let (sf, model) = loaded(390, 844);
        let (model, _) = sf.transition(Event::MenuToggled, model);
        let frame = crate::views::render(&model);

        assert!(frame.starts_with("[x] Naked Pineapple\n  Home\n  Search\n"));
    }

    #[test]
    fn test_detail_frame() {
        let (sf, model) = loaded(1440, 900);
        let (model, _) = sf.transition(
            Event::RouteChanged("/products/gid%3A%2F%2Fshopify%2FProduct%2F1".to_string()),
            model,
        );
        let (model, _) = sf.transition(
            Event::VariantSelected(
                ProductId::new("gid://shopify/Product/1"),
                VariantId::new("Large"),
            ),
            model,
        );
        let frame = crate::views::render(&model);

        assert!(frame.starts_with("< Naked Pineapple\nDried Pineapple\n12.50 USD\n"));
        assert!(frame.contains("  ( ) Small pack - 5.00 USD\n"));
        assert!(frame.contains("  (*) Large pack - 12.50 USD\n"));
    }

    #[test]
    fn test_detail_frame_for_product_not_on_page() {
        let (sf, model) = loaded(1440, 900);
        let (model, _) =
            sf.transition(Event::RouteChanged("/products/missing".to_string()), model);
        assert_eq!(model.route, Route::ProductDetail(ProductId::new("missing")));

        let frame = crate::views::render(&model);
        assert!(frame.starts_with("< Naked Pineapple
"));
        assert!(frame.contains("Product not available.\n"));
        assert!(!frame.contains("Dried Pineapple"));
    }

    #[test]
    fn test_failure_is_shown_inline() {
        let (sf, model) = loaded(1440, 900);
        let (model, effects) = sf.transition(Event::RouteChanged("/home".to_string()), model);
        assert_eq!(render(RendererId::StandardNavigation, &model).lines().nth(2), Some("Loading..."));

        let request = match effects.as_slice() {
            [crate::app::Effect::Fetch { request, .. }] => *request,
            other => panic!("expected fetch, got {other:?}"),
        };
        let failure = FetchFailure::new(FailureKind::Status, "HTTP 503: upstream down");
        let (model, _) = sf.transition(Event::FetchCompleted(request, Err(failure)), model);
        let frame = render(RendererId::StandardNavigation, &model);

        assert!(frame.contains("Error: HTTP 503: upstream down\n"));
        assert!(frame.contains("Dried Pineapple (5.00 USD)"));
    }
}
