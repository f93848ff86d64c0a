//! Wizard screens

pub mod form;
pub mod plan;

pub use form::FormScreen;
pub use plan::PlanScreen;
