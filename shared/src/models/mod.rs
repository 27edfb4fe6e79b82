//! Domain and wire models
//!
//! Store-agnostic types shared between the API server and its clients.
//! Persistence records (with database record ids) live in the server's
//! `db::models` module.

pub mod customer;
pub mod order;
pub mod restaurant;
pub mod user;
pub mod voucher;

pub use customer::DeliveryAddress;
pub use order::{
    CreateOrderRequest, OrderItemInput, OrderStatus, RejectOrderRequest, UpdateOrderStatusRequest,
};
pub use restaurant::DayHours;
pub use user::UserRole;
pub use voucher::{DiscountType, ValidateVoucherRequest, ValidateVoucherResponse};
