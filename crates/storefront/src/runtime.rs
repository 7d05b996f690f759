//! Serialized event loop around the state machine.
//!
//! The runtime owns the single [`AppModel`] of a session. Events are applied
//! strictly one at a time; catalog fetches run as spawned tasks whose only
//! way back in is a `FetchCompleted` event on the same queue.

use std::collections::HashSet;

use tokio::sync::mpsc;
use tracing::{Instrument, debug, error, info, info_span};

use crate::app::{AppModel, Effect, Event, FailureKind, FetchFailure, RequestId, Storefront};
use crate::error::add_breadcrumb;
use crate::routes::History;
use crate::shopify::{CatalogApi, CatalogQuery};
use crate::views;

/// A running storefront session.
pub struct Runtime<C> {
    storefront: Storefront,
    catalog: C,
    model: AppModel,
    history: History,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: HashSet<RequestId>,
}

impl<C: CatalogApi> Runtime<C> {
    /// Start a session at `path` with a `width`×`height` viewport.
    ///
    /// Must be called within a tokio runtime: the initial catalog fetch is
    /// spawned immediately.
    pub fn start(storefront: Storefront, catalog: C, path: &str, width: u32, height: u32) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (model, effects) = storefront.start(path, width, height);
        info!(path, device = ?model.device, "Session started");

        let mut runtime = Self {
            storefront,
            catalog,
            model,
            history: History::new(path),
            events_tx,
            events_rx,
            in_flight: HashSet::new(),
        };
        runtime.run_effects(effects);
        runtime
    }

    /// Apply one event and run the effects it produces.
    pub fn dispatch(&mut self, event: Event) {
        if let Event::FetchCompleted(request, _) = &event {
            self.in_flight.remove(request);
        }

        let model = self.model.take();
        let (model, effects) = self.storefront.transition(event, model);
        self.model = model;
        self.run_effects(effects);
    }

    /// Process queued events until no fetch is in flight and the queue is
    /// empty.
    pub async fn settle(&mut self) {
        loop {
            let event = if self.in_flight.is_empty() {
                match self.events_rx.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                }
            } else {
                match self.events_rx.recv().await {
                    Some(event) => event,
                    None => break,
                }
            };
            self.dispatch(event);
        }
    }

    /// Step back in the history, as the browser back button would.
    ///
    /// Returns `false` when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        let Some(path) = self.history.back().map(String::from) else {
            return false;
        };
        add_breadcrumb("navigation", "Back", Some(&[("path", &path)]));
        self.dispatch(Event::RouteChanged(path));
        true
    }

    /// Step forward in the history.
    ///
    /// Returns `false` when there is nothing to go forward to.
    pub fn forward(&mut self) -> bool {
        let Some(path) = self.history.forward().map(String::from) else {
            return false;
        };
        add_breadcrumb("navigation", "Forward", Some(&[("path", &path)]));
        self.dispatch(Event::RouteChanged(path));
        true
    }

    /// A handle for pushing events (e.g. viewport changes) into the queue.
    #[must_use]
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    /// The current model.
    #[must_use]
    pub const fn model(&self) -> &AppModel {
        &self.model
    }

    /// The session history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Draw the current model with its selected layout.
    #[must_use]
    pub fn render(&self) -> String {
        views::render(&self.model)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { request, query } => self.spawn_fetch(request, query),
                Effect::PushUrl(path) => {
                    debug!(%path, "Pushing URL");
                    add_breadcrumb("navigation", "Pushed URL", Some(&[("path", &path)]));
                    self.history.push(path.clone());
                    self.enqueue(Event::RouteChanged(path));
                }
                Effect::Load(url) => {
                    info!(%url, "Loading external URL");
                    add_breadcrumb("navigation", "External link", Some(&[("url", &url)]));
                    self.history.record_load(url);
                }
            }
        }
    }

    fn spawn_fetch(&mut self, request: RequestId, query: CatalogQuery) {
        self.in_flight.insert(request);
        let catalog = self.catalog.clone();
        let events = self.events_tx.clone();

        let fetch = tokio::spawn(
            async move {
                catalog
                    .fetch_catalog(query)
                    .await
                    .map_err(|err| FetchFailure::from(&err))
            }
            .instrument(info_span!("catalog_fetch", %request)),
        );

        // Every fetch answers exactly once, even when its task panics.
        tokio::spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(err) => {
                    error!(%request, error = %err, "Catalog fetch task failed");
                    Err(FetchFailure::new(
                        FailureKind::Aborted,
                        "Catalog fetch aborted",
                    ))
                }
            };
            // The receiver lives as long as the runtime; a send error
            // only means the session already ended.
            let _ = events.send(Event::FetchCompleted(request, result));
        });
    }

    fn enqueue(&self, event: Event) {
        if self.events_tx.send(event).is_err() {
            debug!("Event queue closed");
        }
    }
}
