//! The transition function.

use shopfront_core::{Catalog, FocusCursor, Product, ProductId, Variant, VariantId};
use tracing::{debug, warn};

use super::event::{Effect, Event};
use super::model::{AppModel, FetchFailure, QueryResult, RequestId, VariantFocusMap};
use crate::config::{CatalogConfig, HomeSource};
use crate::device::Breakpoints;
use crate::routes::{HOME_PATH, Route, UrlRequest, product_path};
use crate::shopify::CatalogQuery;

/// Immutable environment of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storefront {
    breakpoints: Breakpoints,
    home: CatalogQuery,
}

impl Storefront {
    /// Create a state machine for the given viewport breakpoints and catalog.
    #[must_use]
    pub fn new(breakpoints: Breakpoints, catalog: &CatalogConfig) -> Self {
        let home = match &catalog.home {
            HomeSource::ShopFront => CatalogQuery::ShopFront { after: None },
            HomeSource::Collection(handle) => CatalogQuery::CollectionByHandle {
                handle: handle.clone(),
                after: None,
            },
        };
        Self { breakpoints, home }
    }

    /// The model of a fresh session: empty history, home route, placeholder
    /// product cursor.
    #[must_use]
    pub fn initial_model(&self, width: u32, height: u32) -> AppModel {
        AppModel::new(self.breakpoints.classify(width, height))
    }

    /// Start a session at `path`.
    ///
    /// The catalog is fetched once on load. A home path fetches through its
    /// own route change; a product path fetches here so the detail view has
    /// products to focus.
    #[must_use]
    pub fn start(&self, path: &str, width: u32, height: u32) -> (AppModel, Vec<Effect>) {
        let model = self.initial_model(width, height);
        let (mut model, mut effects) = self.transition(Event::RouteChanged(path.to_string()), model);

        if matches!(model.route, Route::ProductDetail(_)) {
            effects.push(fetch(&mut model, self.home.clone()));
        }
        (model, effects)
    }

    /// Apply one event to the model.
    #[must_use]
    pub fn transition(&self, event: Event, mut model: AppModel) -> (AppModel, Vec<Effect>) {
        debug!(event = event_name(&event), "Transition");

        let effects = match event {
            Event::RouteChanged(path) => self.route_changed(&path, &mut model),
            Event::FetchCompleted(request, result) => {
                fetch_completed(request, result, &mut model);
                Vec::new()
            }
            Event::LoadNextPage => self.load_next_page(&mut model),
            Event::DeviceReclassified { width, height } => {
                model.device = self.breakpoints.classify(width, height);
                Vec::new()
            }
            Event::VariantSelected(product, variant) => {
                select_variant(&product, &variant, &mut model);
                Vec::new()
            }
            Event::ProductSelected(product) => vec![Effect::PushUrl(product_path(&product))],
            Event::SearchTextChanged(text) => {
                debug!(len = text.len(), "Search text changed, no search wired");
                Vec::new()
            }
            Event::LinkClicked(request) => link_clicked(request),
            Event::MenuToggled => {
                model.menu_focused = !model.menu_focused;
                Vec::new()
            }
        };

        (model, effects)
    }

    fn route_changed(&self, path: &str, model: &mut AppModel) -> Vec<Effect> {
        let route = Route::parse(path);
        model.menu_focused = false;

        match route {
            Route::Home => {
                model.route = Route::Home;
                vec![fetch(model, self.home.clone())]
            }
            Route::ProductDetail(id) => {
                model.product_focus = std::mem::replace(
                    &mut model.product_focus,
                    FocusCursor::singleton(Product::placeholder()),
                )
                .select_by(|product| product.id == id);
                model.route = Route::ProductDetail(id);
                Vec::new()
            }
            Route::NotFound => {
                debug!(path, "Unknown path, redirecting home");
                model.route = Route::NotFound;
                vec![Effect::PushUrl(HOME_PATH.to_string())]
            }
        }
    }

    fn load_next_page(&self, model: &mut AppModel) -> Vec<Effect> {
        let cursor = match model.latest() {
            Some(QueryResult::Success(catalog)) if catalog.products().has_next_page() => {
                catalog.products().next_cursor().map(String::from)
            }
            _ => {
                debug!("No next page to load");
                return Vec::new();
            }
        };

        let query = self.home.clone().with_after(cursor);
        vec![fetch(model, query)]
    }
}

/// Push a loading placeholder and describe the fetch that will fill it.
fn fetch(model: &mut AppModel, query: CatalogQuery) -> Effect {
    let request = model.begin_fetch();
    debug!(%request, ?query, "Issuing catalog fetch");
    Effect::Fetch { request, query }
}

fn fetch_completed(
    request: RequestId,
    result: Result<Catalog, FetchFailure>,
    model: &mut AppModel,
) {
    if !model.finish_fetch(request) {
        warn!(%request, "Dropping catalog response with no pending request");
        return;
    }

    match result {
        Ok(catalog) => {
            rebuild_focus(&catalog, model);
            model.query_results.push_front(QueryResult::Success(catalog));
        }
        Err(failure) => {
            warn!(%request, kind = ?failure.kind, error = %failure, "Catalog fetch failed");
            model.query_results.push_front(QueryResult::Failure(failure));
        }
    }
}

/// Replace the product cursor and every variant cursor from a fresh page.
fn rebuild_focus(catalog: &Catalog, model: &mut AppModel) {
    let products = &catalog.products().data;

    model.variant_focus = products
        .iter()
        .map(|product| {
            let variants =
                FocusCursor::from_list_or_else(product.variants.data.clone(), Variant::placeholder);
            (product.id.clone(), variants)
        })
        .collect::<VariantFocusMap>();

    let mut focus = FocusCursor::from_list_or_else(products.clone(), Product::placeholder);
    if let Route::ProductDetail(id) = &model.route {
        focus = focus.select_by(|product| product.id == *id);
    }
    model.product_focus = focus;
}

fn select_variant(product: &ProductId, variant: &VariantId, model: &mut AppModel) {
    let Some(cursor) = model.variant_focus.remove(product) else {
        debug!(%product, "No variants tracked for product");
        return;
    };
    let cursor = cursor.select_by(|candidate| candidate.id == *variant);
    model.variant_focus.insert(product.clone(), cursor);
}

fn link_clicked(request: UrlRequest) -> Vec<Effect> {
    match request {
        UrlRequest::Internal(path) => vec![Effect::PushUrl(path)],
        UrlRequest::External(url) if url.is_empty() => Vec::new(),
        UrlRequest::External(url) => vec![Effect::Load(url)],
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::RouteChanged(_) => "route_changed",
        Event::FetchCompleted(..) => "fetch_completed",
        Event::LoadNextPage => "load_next_page",
        Event::DeviceReclassified { .. } => "device_reclassified",
        Event::VariantSelected(..) => "variant_selected",
        Event::ProductSelected(_) => "product_selected",
        Event::SearchTextChanged(_) => "search_text_changed",
        Event::LinkClicked(_) => "link_clicked",
        Event::MenuToggled => "menu_toggled",
    }
}
