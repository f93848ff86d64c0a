//! Reusable UI components for the wizard

pub mod form_field;
pub mod status_display;

pub use form_field::{Form, FormField, FormFieldType};
pub use status_display::StatusDisplay;
