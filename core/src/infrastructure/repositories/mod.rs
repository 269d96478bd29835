pub mod entity_repository;
pub mod filter;
pub mod pagination;
pub mod registry;

pub use entity_repository::EntityRepository;
pub use filter::{FilterSet, compile};
pub use pagination::PaginationWindowBuilder;
pub use registry::Filterable;
