//! Voucher engine: code validation and discount computation

pub mod engine;

pub use engine::{VoucherEngine, VoucherRejection, calculate_discount, check_voucher};
