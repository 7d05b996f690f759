//! Application state machine.
//!
//! [`Storefront::transition`] is the sole authority over the [`AppModel`]:
//! every input (navigation, fetch completion, viewport change, shopper
//! selection) arrives as an [`Event`] and produces the next model plus the
//! [`Effect`]s the host must run.
//!
//! # Flow
//!
//! ```text
//! Event ──▶ Storefront::transition(event, model) ──▶ (model', [Effect])
//!   ▲                                                      │
//!   └──────── FetchCompleted / RouteChanged ◀── runtime ◀──┘
//! ```

mod event;
mod model;
mod update;

pub use event::{Effect, Event};
pub use model::{AppModel, FailureKind, FetchFailure, QueryResult, RequestId, VariantFocusMap};
pub use update::Storefront;
