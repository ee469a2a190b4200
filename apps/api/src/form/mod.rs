// Form Controller
// Implements: company rows, presence validation, view-state transitions.

pub mod controller;
pub mod handlers;
pub mod validation;

pub use controller::FormSession;
