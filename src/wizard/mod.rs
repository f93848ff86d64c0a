//! StudyFlow terminal wizard
//!
//! Collects a study request in a form, sends it to the scheduling service
//! and shows the returned weekly plan.

pub mod app;
pub mod components;
pub mod events;
pub mod handlers;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::App;
pub use events::AppEvent;
