pub mod memory_store;
pub mod route_store;
pub mod sqlite_store;

pub use memory_store::MemoryRouteStore;
pub use route_store::RouteStore;
pub use sqlite_store::SqliteRouteStore;
