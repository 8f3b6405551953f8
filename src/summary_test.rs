use super::*;

fn pizza(id: &str, name: &str, price: u64) -> Pizza {
    Pizza { id: id.into(), name: name.into(), price, image_url: format!("/media/{id}_pizza.png") }
}

fn catalog() -> Catalog {
    [pizza("1", "Margherita", 450), pizza("2", "Pepperoni", 520), pizza("3", "Veggie", 399)]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect()
}

#[test]
fn empty_cart_is_empty_summary() {
    assert_eq!(CartSummary::build(&Cart::new(), &catalog()), CartSummary::default());
}

#[test]
fn totals_join_cart_with_prices() {
    let cart = Cart::from_json(r#"{"1":{"quantity":2},"3":{"quantity":1}}"#).unwrap();
    let summary = CartSummary::build(&cart, &catalog());

    assert_eq!(summary.notifications, 3);
    assert_eq!(summary.cart_items, 3);
    assert_eq!(summary.cart_total, 2 * 450 + 399);
    assert_eq!(summary.items.len(), 2);
    assert_eq!(summary.items[0].pizza.name, "Margherita");
    assert_eq!(summary.items[0].total, 900);
    assert_eq!(summary.items[1].quantity, 1);
}

#[test]
fn unknown_items_count_toward_badge_only() {
    let cart = Cart::from_json(r#"{"2":{"quantity":1},"99":{"quantity":4}}"#).unwrap();
    let summary = CartSummary::build(&cart, &catalog());

    assert_eq!(summary.notifications, 5);
    assert_eq!(summary.cart_items, 1);
    assert_eq!(summary.cart_total, 520);
    assert_eq!(summary.items.len(), 1);
}

#[test]
fn bonus_points_are_five_percent_rounded_down() {
    let cart = Cart::from_json(r#"{"3":{"quantity":1}}"#).unwrap();
    // 399 * 5 / 100 = 19.95
    assert_eq!(CartSummary::build(&cart, &catalog()).bonus_points, 19);

    let cart = Cart::from_json(r#"{"1":{"quantity":4}}"#).unwrap();
    assert_eq!(CartSummary::build(&cart, &catalog()).bonus_points, 90);
}
