pub mod api;
pub mod components;
pub mod constants;
pub mod filter;
pub mod index;
pub mod logging;
pub mod map;
pub mod models;
pub mod presentation;
pub mod search;
pub mod viewer;

pub use components::app::App;
