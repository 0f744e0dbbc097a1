#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/datalist-widgets/")]

//! # datalist-widgets
//!
//! Searchable, paginated lists that keep a rendered view in sync with a
//! JSON dataset, for hosts built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! style message loops.
//!
//! ## Overview
//!
//! A list owns a dataset, a filtered view of it, a page and a [`Surface`]
//! to render into. The state flows one way:
//!
//! ```text
//! load ──▶ dataset ──search──▶ filtered ──page──▶ slice ──render──▶ surface
//! ```
//!
//! User events arrive as messages (`SearchInputMsg`, `SearchSubmitMsg`,
//! `PageMsg`) and go through `update()`, which returns commands for the
//! runtime to execute, such as the debounce tick of live search input.
//!
//! ## Features
//!
//! - **Loose configuration** normalized into canonical settings, from Rust
//!   values or JSON
//! - **Remote or literal data** with shape validation; HTTP via `reqwest`
//!   behind the default `http` feature
//! - **Case-insensitive multi-field search** with trailing-edge debounce for
//!   live input
//! - **Pagination** with Previous, numbered and Next controls
//! - **Declarative lists** configured by markup attributes
//!
//! ## Quick Start
//!
//! ```rust
//! use datalist_widgets::prelude::*;
//!
//! let records = vec![
//!     Record::new().with("name", "Widget").with("category", "Tools"),
//!     Record::new().with("name", "Gadget").with("category", "Toys"),
//! ];
//!
//! let mut list = List::builder()
//!     .container(MemorySurface::new())
//!     .data(DataSource::records(records))
//!     .item_template(|r: &Record| format!("<li>{}</li>", r.text("name").unwrap_or_default()))
//!     .search(SearchOption::Custom(SearchConfig {
//!         keys: Some(SearchKeys::from(vec!["name", "category"])),
//!         ..SearchConfig::default()
//!     }))
//!     .build()
//!     .unwrap();
//!
//! futures::executor::block_on(list.load()).unwrap();
//! list.search("tool");
//! assert_eq!(list.surface().html(Region::Items), "<li>Widget</li>");
//! ```
//!
//! ## Declarative Lists
//!
//! ```rust
//! use datalist_widgets::prelude::*;
//! use datalist_widgets::markup;
//! use std::sync::Arc;
//!
//! let page = markup::parse(r#"
//!   <div data-list-id="team" data-list-source="/team.json" data-list-search-key="name">
//!     <input data-list-search-input>
//!     <p item hidden><b item.name></b></p>
//!   </div>
//! "#).unwrap();
//!
//! let mut registry: Registry<ElementSurface> = Registry::new();
//! let warnings = registry.scan(&page, Arc::new(NoFetcher));
//! assert!(warnings.is_empty());
//! assert!(registry.get("team").is_some());
//! ```
//!
//! ## Component Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Option normalization and `ListConfig` |
//! | `loader` | `DataSource`, the `Fetch` capability, shape checks |
//! | `list` | The list engine: search, paging, rendering |
//! | `paginator` | Page arithmetic and page-control metadata |
//! | `debounce` | Tag-based trailing debounce |
//! | `binder` | Attribute-driven list creation |
//! | `registry` | Host-owned instances by key |
//! | `surface` | Render targets |
//! | `markup` | Owned HTML tree with parsing |

pub mod binder;
pub mod bindings;
pub mod config;
pub mod debounce;
pub mod error;
pub mod list;
pub mod loader;
pub mod markup;
pub mod paginator;
pub mod record;
pub mod registry;
pub mod surface;

pub use error::{ConfigError, DataError, DeclarativeWarning, Error, MarkupError, Result, ShapeError};
pub use list::Model as List;
pub use loader::DataSource;
pub use paginator::Model as Paginator;
pub use record::{FieldValue, Record};
pub use registry::Registry;
pub use surface::{ElementSurface, MemorySurface, Region, Surface};

/// Everything needed to build, drive and render lists.
pub mod prelude {
    pub use crate::binder::{scan, scan_with, MarkupTemplate};
    pub use crate::config::{
        ListConfig, PaginationConfig, PaginationOption, SearchConfig, SearchKeys, SearchOption,
    };
    pub use crate::error::{ConfigError, DataError, DeclarativeWarning};
    pub use crate::list::{
        Builder as ListBuilder, ItemTemplate, Lifecycle, LoadedMsg, Messages, Model as List,
        PageMsg, SearchInputMsg, SearchSubmitMsg,
    };
    pub use crate::loader::{DataSource, Fetch, NoFetcher};
    #[cfg(feature = "http")]
    pub use crate::loader::HttpFetcher;
    pub use crate::paginator::PageControlKind;
    pub use crate::record::{FieldValue, Record};
    pub use crate::registry::Registry;
    pub use crate::surface::{ElementSurface, MemorySurface, Region, Surface};
}
