pub mod auth;
pub mod errors;
pub mod transaction;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use errors::ErrorResponse;
pub use transaction::{
    DEFAULT_CURRENCY, NewTransaction, Transaction, TransactionId, TransactionInput,
    TransactionUpdate,
};
