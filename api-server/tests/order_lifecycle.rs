//! Order lifecycle integration tests against a real embedded store
//!
//! Run: cargo test -p api-server --test order_lifecycle

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use api_server::OrderService;
use api_server::auth::{CurrentUser, hash_password};
use api_server::db::DbService;
use api_server::db::repository::voucher::NewVoucher;
use api_server::db::repository::{
    CustomerRepository, DishRepository, OrderListFilter, RestaurantRepository, UserRepository,
    VoucherRepository,
};
use chrono::{Duration, Utc};
use shared::ErrorCode;
use shared::models::{
    CreateOrderRequest, DayHours, DeliveryAddress, DiscountType, OrderItemInput, OrderStatus,
    UserRole, ValidateVoucherRequest,
};

struct TestEnv {
    // Keeps the database directory alive for the test's duration
    _tmp: tempfile::TempDir,
    db: Surreal<Db>,
    service: OrderService,
    owner: RecordId,
    customer_user: RecordId,
    restaurant: RecordId,
    dish_pasta: RecordId,   // 8.50, 15 min
    dish_pizza: RecordId,   // 12.00, 20 min
    other_owner: RecordId,
    other_dish: RecordId,   // belongs to the other restaurant
}

fn address() -> DeliveryAddress {
    DeliveryAddress {
        street: "Via Roma".to_string(),
        house_number: "12".to_string(),
        staircase: Some("B".to_string()),
        door: Some("4".to_string()),
        postal_code: "1010".to_string(),
        city: "Vienna".to_string(),
    }
}

fn always_open() -> Vec<DayHours> {
    (0..7).map(|_| DayHours::open_between("00:00", "24:00")).collect()
}

async fn setup() -> TestEnv {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap().db;

    let users = UserRepository::new(db.clone());
    let customers = CustomerRepository::new(db.clone());
    let restaurants = RestaurantRepository::new(db.clone());
    let dishes = DishRepository::new(db.clone());

    let now = Utc::now().to_rfc3339();
    let hash = hash_password("password123").unwrap();

    let owner = users
        .create("owner@example.com".into(), hash.clone(), UserRole::RestaurantOwner, "Marco".into(), now.clone())
        .await
        .unwrap()
        .id
        .unwrap();
    let customer_user = users
        .create("ana@example.com".into(), hash.clone(), UserRole::Customer, "Ana".into(), now.clone())
        .await
        .unwrap()
        .id
        .unwrap();
    customers
        .create(customer_user.clone(), address(), Some("+43 660 0000000".into()))
        .await
        .unwrap();

    let restaurant = restaurants
        .create(owner.clone(), "Trattoria Prova".into(), always_open(), "Hauptstrasse 1".into(), "Vienna".into(), None)
        .await
        .unwrap()
        .id
        .unwrap();
    let dish_pasta = dishes
        .create(restaurant.clone(), "Pasta".into(), 8.50, 15, None)
        .await
        .unwrap()
        .id
        .unwrap();
    let dish_pizza = dishes
        .create(restaurant.clone(), "Pizza".into(), 12.00, 20, None)
        .await
        .unwrap()
        .id
        .unwrap();

    let other_owner = users
        .create("other@example.com".into(), hash, UserRole::RestaurantOwner, "Luigi".into(), now)
        .await
        .unwrap()
        .id
        .unwrap();
    let other_restaurant = restaurants
        .create(other_owner.clone(), "Osteria Altra".into(), always_open(), "Nebenstrasse 2".into(), "Vienna".into(), None)
        .await
        .unwrap()
        .id
        .unwrap();
    let other_dish = dishes
        .create(other_restaurant, "Risotto".into(), 11.00, 25, None)
        .await
        .unwrap()
        .id
        .unwrap();

    let service = OrderService::new(db.clone());
    TestEnv {
        _tmp: tmp,
        db,
        service,
        owner,
        customer_user,
        restaurant,
        dish_pasta,
        dish_pizza,
        other_owner,
        other_dish,
    }
}

fn order_request(env: &TestEnv, items: Vec<(&RecordId, i32)>) -> CreateOrderRequest {
    CreateOrderRequest {
        restaurant_id: env.restaurant.to_string(),
        items: items
            .into_iter()
            .map(|(dish, quantity)| OrderItemInput {
                dish_id: dish.to_string(),
                quantity,
            })
            .collect(),
        voucher_code: None,
        customer_notes: None,
    }
}

async fn seed_voucher(env: &TestEnv, code: &str, discount_type: DiscountType, value: f64, usage_limit: Option<i64>) {
    VoucherRepository::new(env.db.clone())
        .create(NewVoucher {
            code: code.to_string(),
            discount_type,
            discount_value: value,
            valid_from: (Utc::now() - Duration::days(1)).to_rfc3339(),
            valid_until: (Utc::now() + Duration::days(30)).to_rfc3339(),
            usage_limit,
            restaurant: Some(env.restaurant.clone()),
        })
        .await
        .unwrap();
}

fn customer_current_user(env: &TestEnv) -> CurrentUser {
    CurrentUser {
        id: env.customer_user.to_string(),
        email: "ana@example.com".into(),
        display_name: "Ana".into(),
        role: UserRole::Customer,
    }
}

#[tokio::test]
async fn create_order_snapshots_and_numbers_sequentially() {
    let env = setup().await;

    let first = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 2), (&env.dish_pizza, 1)]))
        .await
        .unwrap();

    assert_eq!(first.order.status, OrderStatus::Pending);
    assert_eq!(first.order.daily_order_number, 1);
    assert_eq!(first.order.subtotal, 29.00); // 2*8.50 + 12.00
    assert_eq!(first.order.discount_amount, 0.0);
    assert_eq!(first.order.final_price, 29.00);
    assert_eq!(first.order.delivery_address, address());

    // Bottleneck dish is 20 min + 10 flat, plus 5-10 only during rush hour
    assert!((30..=40).contains(&first.order.estimated_delivery_minutes));

    // Line items snapshot name and price at order time
    assert_eq!(first.items.len(), 2);
    let pasta_line = first.items.iter().find(|i| i.dish_name == "Pasta").unwrap();
    assert_eq!(pasta_line.dish_price, 8.50);
    assert_eq!(pasta_line.quantity, 2);
    assert_eq!(pasta_line.subtotal, 17.00);

    // Creation writes the initial pending history row
    let detail = env
        .service
        .get_order_details(&first.order.id.clone().unwrap().to_string(), &customer_current_user(&env))
        .await
        .unwrap();
    assert_eq!(detail.status_history.len(), 1);
    assert_eq!(detail.status_history[0].status, OrderStatus::Pending);

    // Same restaurant, same day: the next order takes number 2
    let second = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    assert_eq!(second.order.daily_order_number, 2);
    assert_eq!(second.order.order_date, first.order.order_date);
}

#[tokio::test]
async fn profile_edits_do_not_touch_placed_orders() {
    let env = setup().await;
    let order = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    let order_id = order.order.id.unwrap().to_string();

    // Move the customer to a new address after the order was placed
    let customers = CustomerRepository::new(env.db.clone());
    let profile = customers.find_by_user(&env.customer_user).await.unwrap().unwrap();
    let mut moved = address();
    moved.street = "Neue Gasse".to_string();
    moved.house_number = "99".to_string();
    customers
        .update_address(&profile.id.unwrap(), moved)
        .await
        .unwrap();

    // The order keeps its snapshot
    let detail = env
        .service
        .get_order_details(&order_id, &customer_current_user(&env))
        .await
        .unwrap();
    assert_eq!(detail.order.delivery_address, address());
}

#[tokio::test]
async fn percentage_voucher_discounts_and_counts_usage() {
    let env = setup().await;
    seed_voucher(&env, "TEN", DiscountType::Percentage, 10.0, None).await;

    let mut req = order_request(&env, vec![(&env.dish_pasta, 3)]); // 25.50
    req.voucher_code = Some("ten".to_string()); // codes match case-insensitively

    let order = env.service.create_order(&env.customer_user, req).await.unwrap();
    assert_eq!(order.order.subtotal, 25.50);
    assert_eq!(order.order.discount_amount, 2.55);
    assert_eq!(order.order.final_price, 22.95);
    assert_eq!(order.order.voucher_code.as_deref(), Some("TEN"));

    // Usage is counted once, after the order committed
    let voucher = VoucherRepository::new(env.db.clone())
        .find_by_code("TEN")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(voucher.usage_count, 1);
}

#[tokio::test]
async fn voucher_usage_cap_blocks_further_orders() {
    let env = setup().await;
    seed_voucher(&env, "ONCE", DiscountType::Percentage, 10.0, Some(1)).await;

    let mut req = order_request(&env, vec![(&env.dish_pasta, 1)]);
    req.voucher_code = Some("ONCE".to_string());
    env.service.create_order(&env.customer_user, req.clone()).await.unwrap();

    let err = env.service.create_order(&env.customer_user, req).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::VoucherLimitReached);
}

#[tokio::test]
async fn foreign_dish_fails_validation_and_persists_nothing() {
    let env = setup().await;

    let err = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1), (&env.other_dish, 1)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(err.message.contains("does not belong"));

    // No order row was persisted
    let orders = env
        .service
        .get_restaurant_orders(
            &env.restaurant.to_string(),
            &env.owner,
            OrderListFilter {
                limit: 50,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn quantity_violations_are_batched() {
    let env = setup().await;

    let err = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 0), (&env.dish_pizza, 100)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let details = err.details.unwrap();
    let errors = details.get("errors").unwrap().as_array().unwrap();
    assert_eq!(errors.len(), 2);
}

#[tokio::test]
async fn accept_moves_to_accepted_and_is_not_repeatable() {
    let env = setup().await;
    let order = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    let order_id = order.order.id.unwrap().to_string();

    let accepted = env.service.accept_order(&order_id, &env.owner).await.unwrap();
    assert_eq!(accepted.status, OrderStatus::Accepted);
    assert!(accepted.accepted_at.is_some());

    let detail = env
        .service
        .get_order_details(&order_id, &customer_current_user(&env))
        .await
        .unwrap();
    assert_eq!(detail.status_history.len(), 2);
    assert_eq!(detail.status_history[1].status, OrderStatus::Accepted);

    // Accepting again conflicts and leaves status/history unchanged
    let err = env.service.accept_order(&order_id, &env.owner).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotPending);

    let detail = env
        .service
        .get_order_details(&order_id, &customer_current_user(&env))
        .await
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::Accepted);
    assert_eq!(detail.status_history.len(), 2);
}

#[tokio::test]
async fn full_lifecycle_appends_one_history_row_per_transition() {
    let env = setup().await;
    let order = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pizza, 1)]))
        .await
        .unwrap();
    let order_id = order.order.id.unwrap().to_string();

    env.service.accept_order(&order_id, &env.owner).await.unwrap();
    for status in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ] {
        let updated = env
            .service
            .update_order_status(&order_id, &env.owner, status, None)
            .await
            .unwrap();
        assert_eq!(updated.status, status);
    }

    let detail = env
        .service
        .get_order_details(&order_id, &customer_current_user(&env))
        .await
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::Delivered);
    assert!(detail.order.delivered_at.is_some());
    assert!(detail.order.preparing_started_at.is_some());
    // pending + accepted + preparing + ready + delivering + delivered
    assert_eq!(detail.status_history.len(), 6);

    // Terminal: nothing more is allowed
    let err = env
        .service
        .update_order_status(&order_id, &env.owner, OrderStatus::Cancelled, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderAlreadyFinal);
}

#[tokio::test]
async fn illegal_transition_is_a_conflict() {
    let env = setup().await;
    let order = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    let order_id = order.order.id.unwrap().to_string();

    let err = env
        .service
        .update_order_status(&order_id, &env.owner, OrderStatus::Delivered, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    assert!(err.message.contains("pending"));
    assert!(err.message.contains("delivered"));
}

#[tokio::test]
async fn only_the_owning_restaurant_may_transition() {
    let env = setup().await;
    let order = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    let order_id = order.order.id.unwrap().to_string();

    let err = env.service.accept_order(&order_id, &env.other_owner).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let detail = env
        .service
        .get_order_details(&order_id, &customer_current_user(&env))
        .await
        .unwrap();
    assert_eq!(detail.order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn order_details_require_ownership() {
    let env = setup().await;
    let order = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    let order_id = order.order.id.unwrap().to_string();

    // A different customer cannot read it
    let users = UserRepository::new(env.db.clone());
    let customers = CustomerRepository::new(env.db.clone());
    let hash = hash_password("password123").unwrap();
    let stranger = users
        .create("eve@example.com".into(), hash, UserRole::Customer, "Eve".into(), Utc::now().to_rfc3339())
        .await
        .unwrap()
        .id
        .unwrap();
    customers.create(stranger.clone(), address(), None).await.unwrap();

    let err = env
        .service
        .get_order_details(
            &order_id,
            &CurrentUser {
                id: stranger.to_string(),
                email: "eve@example.com".into(),
                display_name: "Eve".into(),
                role: UserRole::Customer,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    // The restaurant's owner can
    let detail = env
        .service
        .get_order_details(
            &order_id,
            &CurrentUser {
                id: env.owner.to_string(),
                email: "owner@example.com".into(),
                display_name: "Marco".into(),
                role: UserRole::RestaurantOwner,
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.items.len(), 1);
}

#[tokio::test]
async fn restaurant_order_list_filters_by_status() {
    let env = setup().await;
    let first = env
        .service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();
    env.service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pizza, 1)]))
        .await
        .unwrap();
    env.service
        .accept_order(&first.order.id.unwrap().to_string(), &env.owner)
        .await
        .unwrap();

    let pending = env
        .service
        .get_restaurant_orders(
            &env.restaurant.to_string(),
            &env.owner,
            OrderListFilter {
                status: Some(OrderStatus::Pending),
                limit: 50,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].order.status, OrderStatus::Pending);

    let all = env
        .service
        .get_restaurant_orders(
            &env.restaurant.to_string(),
            &env.owner,
            OrderListFilter {
                limit: 50,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn customer_order_list_is_scoped_to_the_caller() {
    let env = setup().await;
    env.service
        .create_order(&env.customer_user, order_request(&env, vec![(&env.dish_pasta, 1)]))
        .await
        .unwrap();

    let mine = env
        .service
        .get_customer_orders(
            &env.customer_user,
            OrderListFilter {
                limit: 50,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].restaurant_name.as_deref(), Some("Trattoria Prova"));
}

#[tokio::test]
async fn validate_voucher_rejects_zeroed_total() {
    let env = setup().await;
    seed_voucher(&env, "FIVER", DiscountType::FixedAmount, 5.0, None).await;

    // 5.00 off a 3.00 cart caps at 3.00 and zeroes the total: invalid here
    let zeroed = env
        .service
        .validate_voucher(ValidateVoucherRequest {
            code: "FIVER".into(),
            restaurant_id: Some(env.restaurant.to_string()),
            order_amount: Some(3.00),
        })
        .await
        .unwrap();
    assert!(!zeroed.valid);
    assert_eq!(zeroed.message.as_deref(), Some("final price is 0"));

    // On a larger cart the same voucher is fine
    let ok = env
        .service
        .validate_voucher(ValidateVoucherRequest {
            code: "FIVER".into(),
            restaurant_id: Some(env.restaurant.to_string()),
            order_amount: Some(20.00),
        })
        .await
        .unwrap();
    assert!(ok.valid);
    assert_eq!(ok.discount_amount, Some(5.00));
    assert_eq!(ok.final_price, Some(15.00));
}

#[tokio::test]
async fn validate_voucher_reports_unknown_code() {
    let env = setup().await;
    let response = env
        .service
        .validate_voucher(ValidateVoucherRequest {
            code: "NOPE".into(),
            restaurant_id: None,
            order_amount: None,
        })
        .await
        .unwrap();
    assert!(!response.valid);
    assert_eq!(response.message.as_deref(), Some("voucher not found"));
}

#[tokio::test]
async fn voucher_scoped_to_another_restaurant_is_refused_at_checkout() {
    let env = setup().await;
    // Scoped to the *other* restaurant
    VoucherRepository::new(env.db.clone())
        .create(NewVoucher {
            code: "ELSEWHERE".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            valid_from: (Utc::now() - Duration::days(1)).to_rfc3339(),
            valid_until: (Utc::now() + Duration::days(30)).to_rfc3339(),
            usage_limit: None,
            restaurant: Some(
                RestaurantRepository::new(env.db.clone())
                    .find_by_owner(&env.other_owner)
                    .await
                    .unwrap()
                    .remove(0)
                    .id
                    .unwrap(),
            ),
        })
        .await
        .unwrap();

    let mut req = order_request(&env, vec![(&env.dish_pasta, 1)]);
    req.voucher_code = Some("ELSEWHERE".into());
    let err = env.service.create_order(&env.customer_user, req).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::VoucherWrongRestaurant);
}
