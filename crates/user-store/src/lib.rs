pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use models::{KnowledgeLevel, PublicUser, User};
pub use store::UserStore;
