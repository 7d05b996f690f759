//! Line commands accepted by an interactive `browse` session.
//!
//! ```text
//! open <href>                     click a link
//! product <id>                    open a product from the grid
//! variant <product-id> <variant>  pick a variant
//! next                            load the next page
//! back | forward                  move through the history
//! resize <width> <height>         resize the viewport
//! menu                            toggle the navigation menu
//! search <text>                   type into the search box
//! quit                            end the session
//! ```

use std::str::FromStr;

use shopfront_core::{ProductId, VariantId};
use url::Url;

use crate::app::Event;
use crate::error::AppError;
use crate::routes::classify_link;
use crate::runtime::Runtime;
use crate::shopify::CatalogApi;

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Open(String),
    Product(ProductId),
    Variant(ProductId, VariantId),
    Next,
    Back,
    Forward,
    Resize { width: u32, height: u32 },
    Menu,
    Search(String),
    Quit,
}

impl FromStr for SessionCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();
        let invalid = || AppError::InvalidCommand(line.to_string());

        let command = match (verb, args.as_slice()) {
            ("open", [_, ..]) => Self::Open(rest.to_string()),
            // `open` alone clicks a placeholder link.
            ("open", []) => Self::Open(String::new()),
            ("product", [id]) => Self::Product(ProductId::new(*id)),
            ("variant", [product, variant]) => {
                Self::Variant(ProductId::new(*product), VariantId::new(*variant))
            }
            ("next", []) => Self::Next,
            ("back", []) => Self::Back,
            ("forward", []) => Self::Forward,
            ("resize", [width, height]) => Self::Resize {
                width: width.parse().map_err(|_| invalid())?,
                height: height.parse().map_err(|_| invalid())?,
            },
            ("menu", []) => Self::Menu,
            ("search", _) => Self::Search(rest.to_string()),
            ("quit" | "exit", []) => Self::Quit,
            _ => return Err(invalid()),
        };
        Ok(command)
    }
}

impl SessionCommand {
    /// Feed this command into `runtime`. Links resolve against `origin`.
    ///
    /// `Quit` is the host's to handle and does nothing here.
    pub fn apply<C: CatalogApi>(self, runtime: &mut Runtime<C>, origin: &Url) {
        let event = match self {
            Self::Open(href) => {
                let base = origin
                    .join(runtime.history().current())
                    .unwrap_or_else(|_| origin.clone());
                Event::LinkClicked(classify_link(&base, &href))
            }
            Self::Product(id) => Event::ProductSelected(id),
            Self::Variant(product, variant) => Event::VariantSelected(product, variant),
            Self::Next => Event::LoadNextPage,
            Self::Back => {
                runtime.back();
                return;
            }
            Self::Forward => {
                runtime.forward();
                return;
            }
            Self::Resize { width, height } => Event::DeviceReclassified { width, height },
            Self::Menu => Event::MenuToggled,
            Self::Search(text) => Event::SearchTextChanged(text),
            Self::Quit => return,
        };
        runtime.dispatch(event);
    }
}
