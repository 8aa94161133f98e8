//! Shared building blocks for the ExpenseTracker client.
//!
//! Everything in this crate is target independent so it can be exercised
//! natively while the web client itself is built for `wasm32`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregate;
pub mod editor;
pub mod models;
pub mod validation;

pub use aggregate::Aggregates;
pub use editor::{EditorState, Submission, TransactionEditor, TransitionError};
pub use validation::{Field, FieldErrors, ValidationError};
