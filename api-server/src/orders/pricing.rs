//! Order line validation and subtotal computation
//!
//! Validation is batched: every quantity bound violation and every
//! dish/restaurant mismatch is collected before reporting, so a bad cart
//! comes back with the full list of problems in one response.

use rust_decimal::Decimal;
use surrealdb::RecordId;

use crate::db::models::Dish;
use crate::orders::money::{to_decimal, to_f64};
use crate::utils::validation::{collect_quantity, collect_required_text};
use shared::models::OrderItemInput;

/// A cart line resolved against the menu, with its snapshot values
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub dish: Dish,
    pub quantity: i32,
    /// `dish.price * quantity`, 2-decimal
    pub line_subtotal: f64,
}

/// A fully priced cart
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    /// Sum of line subtotals, rounded to 2 decimals after summation
    pub subtotal: f64,
}

/// Structural validation of the raw request lines (batch)
///
/// Checks each dish id is present and each quantity is an integer in [1, 99].
/// Returns every violation found; empty means structurally valid.
pub fn validate_items(items: &[OrderItemInput]) -> Vec<String> {
    let mut errors = Vec::new();
    if items.is_empty() {
        errors.push("order must contain at least one item".to_string());
    }
    for (index, item) in items.iter().enumerate() {
        collect_required_text(&mut errors, &item.dish_id, &format!("items[{index}].dish_id"));
        collect_quantity(&mut errors, item.quantity, &format!("items[{index}].quantity"));
    }
    errors
}

/// Check each resolved dish exists, belongs to the stated restaurant and is
/// still on the menu
///
/// `dishes` is parallel to `items`: `None` where the lookup found nothing.
/// Returns every violation; any violation is a hard failure and no order
/// may be constructed from the cart.
pub fn validate_dish_ownership(
    items: &[OrderItemInput],
    dishes: &[Option<Dish>],
    restaurant: &RecordId,
) -> Vec<String> {
    let mut errors = Vec::new();
    for (index, (item, dish)) in items.iter().zip(dishes.iter()).enumerate() {
        match dish {
            None => errors.push(format!("items[{index}]: dish {} not found", item.dish_id)),
            Some(dish) if dish.restaurant != *restaurant => {
                errors.push(format!(
                    "items[{index}]: dish {} does not belong to restaurant {}",
                    item.dish_id, restaurant
                ));
            }
            Some(dish) if !dish.is_available => {
                errors.push(format!(
                    "items[{index}]: dish '{}' is not available",
                    dish.name
                ));
            }
            Some(_) => {}
        }
    }
    errors
}

/// Price a cart of resolved dishes
///
/// Each line subtotal is `price * quantity` rounded to 2 decimals; the cart
/// subtotal is the rounded sum of the lines.
pub fn price_cart(items: &[OrderItemInput], dishes: Vec<Dish>) -> PricedCart {
    let mut lines = Vec::with_capacity(dishes.len());
    let mut subtotal = Decimal::ZERO;

    for (item, dish) in items.iter().zip(dishes.into_iter()) {
        let line = to_decimal(dish.price) * Decimal::from(item.quantity);
        let line_subtotal = to_f64(line);
        subtotal += to_decimal(line_subtotal);
        lines.push(PricedLine {
            dish,
            quantity: item.quantity,
            line_subtotal,
        });
    }

    PricedCart {
        lines,
        subtotal: to_f64(subtotal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(key: &str, restaurant: &str, price: f64) -> Dish {
        Dish {
            id: Some(RecordId::from_table_key("dish", key)),
            restaurant: RecordId::from_table_key("restaurant", restaurant),
            name: format!("Dish {key}"),
            price,
            cooking_time_minutes: 15,
            description: None,
            is_available: true,
        }
    }

    fn item(dish_id: &str, quantity: i32) -> OrderItemInput {
        OrderItemInput {
            dish_id: dish_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_validate_items_ok() {
        let items = vec![item("dish:a", 1), item("dish:b", 99)];
        assert!(validate_items(&items).is_empty());
    }

    #[test]
    fn test_validate_items_collects_all_violations() {
        let items = vec![item("dish:a", 0), item("", 5), item("dish:c", 100)];
        let errors = validate_items(&items);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("items[0].quantity"));
        assert!(errors[1].contains("items[1].dish_id"));
        assert!(errors[2].contains("items[2].quantity"));
    }

    #[test]
    fn test_empty_cart_is_a_violation() {
        let errors = validate_items(&[]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least one item"));
    }

    #[test]
    fn test_dish_ownership_mismatch_listed() {
        let restaurant = RecordId::from_table_key("restaurant", "r1");
        let items = vec![item("dish:a", 1), item("dish:b", 2), item("dish:c", 1)];
        let dishes = vec![
            Some(dish("a", "r1", 8.0)),
            Some(dish("b", "r2", 9.0)), // wrong restaurant
            None,                       // deleted / unknown
        ];

        let errors = validate_dish_ownership(&items, &dishes, &restaurant);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("does not belong"));
        assert!(errors[1].contains("not found"));
    }

    #[test]
    fn test_unavailable_dish_listed() {
        let restaurant = RecordId::from_table_key("restaurant", "r1");
        let items = vec![item("dish:a", 1)];
        let mut off_menu = dish("a", "r1", 8.0);
        off_menu.is_available = false;

        let errors = validate_dish_ownership(&items, &[Some(off_menu)], &restaurant);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not available"));
    }

    #[test]
    fn test_price_cart_sums_lines() {
        let items = vec![item("dish:a", 2), item("dish:b", 1)];
        let dishes = vec![dish("a", "r1", 8.00), dish("b", "r1", 12.00)];

        let cart = price_cart(&items, dishes);
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].line_subtotal, 16.00);
        assert_eq!(cart.lines[1].line_subtotal, 12.00);
        assert_eq!(cart.subtotal, 28.00);
    }

    #[test]
    fn test_price_cart_rounds_each_step() {
        // 3 * 3.335 = 10.005 per line -> line rounds to 10.01
        let items = vec![item("dish:a", 3)];
        let dishes = vec![dish("a", "r1", 3.335)];
        let cart = price_cart(&items, dishes);
        assert_eq!(cart.lines[0].line_subtotal, 10.01);
        assert_eq!(cart.subtotal, 10.01);
    }

    #[test]
    fn test_price_cart_penny_accumulation() {
        let items: Vec<OrderItemInput> = (0..100).map(|_| item("dish:a", 1)).collect();
        let dishes: Vec<Dish> = (0..100).map(|_| dish("a", "r1", 0.01)).collect();
        let cart = price_cart(&items, dishes);
        assert_eq!(cart.subtotal, 1.00);
    }
}
