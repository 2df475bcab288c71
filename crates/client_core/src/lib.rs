//! Client-side coordination for the movie catalog home screen.
//!
//! [`spawn_home`] starts the view model; the returned [`HomeHandle`] accepts
//! user commands and exposes [`HomeState`] snapshots through a watch channel.

pub mod bus;
pub mod category;
pub mod controller;
pub mod gateway;
pub mod home;
pub mod latest;
pub mod outcome;
pub mod pagination;
pub mod settings;
pub mod state;
pub mod timing;
pub mod title;
pub mod view_model;

pub use gateway::{
    CatalogGateway, CatalogTransport, HttpCatalogTransport, MissingCatalogTransport,
    DEFAULT_API_BASE_URL,
};
pub use home::{HomeCommand, HomeCore};
pub use settings::{HomeSettings, Locale};
pub use state::HomeState;
pub use title::derive_title;
pub use view_model::{spawn_home, HomeHandle};
