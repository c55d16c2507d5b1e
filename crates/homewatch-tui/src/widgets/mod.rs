//! Reusable rendering pieces shared by the screens.

pub mod feedback;
pub mod panel;
pub mod table;
pub mod text_field;
