//! Activity sign-up board: fetches activities, renders filterable cards and
//! submits sign-ups, as a Yew app. Everything outside `app` and `logging`
//! is independent of the browser.

pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;
