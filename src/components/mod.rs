#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod line_filters;
pub mod map_view;
pub mod search_panel;
pub mod sidebar;
