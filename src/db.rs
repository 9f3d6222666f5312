pub mod business_repo;
pub use business_repo::{BusinessRepository, PgBusinessRepository};
pub mod catalog_repo;
pub use catalog_repo::{CatalogRepository, PgCatalogRepository};
pub mod cart_repo;
pub use cart_repo::{CartRepository, PgCartRepository};
pub mod order_repo;
pub use order_repo::{OrderRepository, PgOrderRepository};
pub mod reservation_repo;
pub use reservation_repo::{PgReservationRepository, ReservationRepository};
