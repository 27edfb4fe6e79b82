//! Persistence models
//!
//! Database records carrying SurrealDB record ids. Wire-level payloads and
//! enums live in the `shared` crate.

pub mod customer;
pub mod order;
pub mod restaurant;
pub mod serde_helpers;
pub mod user;
pub mod voucher;

pub use customer::Customer;
pub use order::{
    NewOrder, NewOrderItem, Order, OrderDetail, OrderItem, OrderStatusHistory, OrderWithCustomer,
    OrderWithItems, OrderWithRestaurant,
};
pub use restaurant::{Dish, Restaurant};
pub use user::UserAccount;
pub use voucher::Voucher;
