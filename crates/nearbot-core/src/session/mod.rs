//! Session domain: model, expiry policy, and persistence contract.

pub mod model;
pub mod repository;

pub use model::{LoginHandoff, SESSION_MAX_AGE_HOURS, Session, UserType};
pub use repository::SessionRepository;
