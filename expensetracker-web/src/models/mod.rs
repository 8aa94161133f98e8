pub mod app_state;
pub mod editor_model;
