pub mod entity;
pub mod memory_store;
pub mod migrations;
pub mod sea_orm_store;

pub use memory_store::InMemoryAggregateStore;
pub use sea_orm_store::SeaOrmAggregateStore;
