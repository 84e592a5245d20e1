pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use repository::{StoreError, TicketStore};
