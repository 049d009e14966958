//! # Filter predicates
//!
//! Pure, side-effect-free predicates applied client-side to a fetched collection.
//! Each entity has one filter struct whose fields are optional bounds; an unset
//! field never excludes anything, so [`Default`] is the "match everything" filter.
//!
//! Text fields use case-insensitive substring matching. Numeric and date bounds
//! are inclusive. Bounds that look into a user's orders are existential: a user
//! passes `min_order_total = 100` when *some* order totals at least 100.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Id, Order, Phone, User};

/// A predicate over items of type `T`.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;

    /// True when no field is set, i.e. every item matches.
    fn is_empty(&self) -> bool;
}

/// Case-insensitive substring match. A blank needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Values a range filter can be bounded by.
pub trait Bound: std::str::FromStr + PartialOrd {
    /// False for values that would make every comparison fail.
    fn is_usable(&self) -> bool {
        true
    }
}

impl Bound for f64 {
    fn is_usable(&self) -> bool {
        self.is_finite()
    }
}

impl Bound for usize {}

/// Parse an optional numeric bound from raw input. Blank, malformed or
/// non-finite input (`NaN`, `inf`) is no bound.
pub fn parse_bound<N: Bound>(raw: &str) -> Option<N> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok().filter(N::is_usable)
}

/// Parse an optional `YYYY-MM-DD` date bound from raw input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn within<N: PartialOrd>(value: N, min: Option<N>, max: Option<N>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

fn any_order(user: &User, pred: impl Fn(&Order) -> bool) -> bool {
    user.orders.iter().any(pred)
}

/// Undated orders never satisfy a date bound.
fn dated(order: &Order, pred: impl Fn(NaiveDate) -> bool) -> bool {
    order.order_date.is_some_and(pred)
}

fn blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhoneFilter {
    pub brand: String,
    pub model: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Filter<Phone> for PhoneFilter {
    fn matches(&self, phone: &Phone) -> bool {
        contains_ignore_case(&phone.brand, &self.brand)
            && contains_ignore_case(&phone.model, &self.model)
            && within(phone.price, self.min_price, self.max_price)
    }

    fn is_empty(&self) -> bool {
        blank(&self.brand)
            && blank(&self.model)
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub username: String,
    pub min_order_total: Option<f64>,
    pub max_order_total: Option<f64>,
    pub min_orders: Option<usize>,
    pub max_orders: Option<usize>,
    pub ordered_from: Option<NaiveDate>,
    pub ordered_to: Option<NaiveDate>,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        contains_ignore_case(&user.username, &self.username)
            && self
                .min_order_total
                .is_none_or(|min| any_order(user, |o| o.total_amount >= min))
            && self
                .max_order_total
                .is_none_or(|max| any_order(user, |o| o.total_amount <= max))
            && within(user.order_count(), self.min_orders, self.max_orders)
            && self
                .ordered_from
                .is_none_or(|from| any_order(user, |o| dated(o, |d| d >= from)))
            && self
                .ordered_to
                .is_none_or(|to| any_order(user, |o| dated(o, |d| d <= to)))
    }

    fn is_empty(&self) -> bool {
        blank(&self.username)
            && self.min_order_total.is_none()
            && self.max_order_total.is_none()
            && self.min_orders.is_none()
            && self.max_orders.is_none()
            && self.ordered_from.is_none()
            && self.ordered_to.is_none()
    }
}

/// Filter over orders. Orders only carry a `userId`, so the username predicate
/// looks names up in `usernames`; an unknown user has an empty name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderFilter {
    pub username: String,
    pub min_total: Option<f64>,
    pub max_total: Option<f64>,
    pub ordered_from: Option<NaiveDate>,
    pub ordered_to: Option<NaiveDate>,
    pub usernames: HashMap<Id, String>,
}

impl OrderFilter {
    /// Build the id -> username lookup from a user list.
    pub fn with_users(mut self, users: &[User]) -> Self {
        self.usernames = usernames(users);
        self
    }

    fn username_of(&self, order: &Order) -> &str {
        self.usernames
            .get(&order.user_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Index usernames by user id.
pub fn usernames(users: &[User]) -> HashMap<Id, String> {
    users
        .iter()
        .map(|u| (u.id, u.username.clone()))
        .collect()
}

impl Filter<Order> for OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        contains_ignore_case(self.username_of(order), &self.username)
            && within(order.total_amount, self.min_total, self.max_total)
            && self.ordered_from.is_none_or(|from| dated(order, |d| d >= from))
            && self.ordered_to.is_none_or(|to| dated(order, |d| d <= to))
    }

    fn is_empty(&self) -> bool {
        blank(&self.username)
            && self.min_total.is_none()
            && self.max_total.is_none()
            && self.ordered_from.is_none()
            && self.ordered_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(id: Id, brand: &str, model: &str, price: f64) -> Phone {
        Phone {
            id,
            brand: brand.to_string(),
            model: model.to_string(),
            price,
        }
    }

    fn order(id: Id, user_id: Id, date: &str, total: f64) -> Order {
        Order {
            id,
            user_id,
            order_date: parse_date(date),
            total_amount: total,
            phones: vec![],
        }
    }

    fn user(id: Id, name: &str, orders: Vec<Order>) -> User {
        User {
            id,
            username: name.to_string(),
            orders,
        }
    }

    #[test]
    fn test_text_match_ignores_case_and_blank() {
        assert!(contains_ignore_case("Acme", "acm"));
        assert!(contains_ignore_case("acme", "  "));
        assert!(!contains_ignore_case("Globex", "acme"));
        // Surrounding spaces in the filter input are ignored.
        assert!(contains_ignore_case("Acme", " Acme "));
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound::<f64>(" 12.5 "), Some(12.5));
        assert_eq!(parse_bound::<f64>(""), None);
        assert_eq!(parse_bound::<f64>("abc"), None);
        assert_eq!(parse_bound::<usize>("3"), Some(3));
        assert_eq!(parse_bound::<f64>("NaN"), None);
        assert_eq!(parse_bound::<f64>("inf"), None);
        assert_eq!(parse_bound::<f64>("-infinity"), None);
    }

    #[test]
    fn test_nan_input_leaves_phones_unfiltered() {
        let filter = PhoneFilter {
            min_price: parse_bound("NaN"),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&phone(1, "Acme", "X1", 10.0)));
    }

    #[test]
    fn test_phone_filter() {
        let filter = PhoneFilter {
            brand: "ac".to_string(),
            min_price: Some(100.0),
            max_price: Some(200.0),
            ..Default::default()
        };
        assert!(filter.matches(&phone(1, "Acme", "X", 100.0)));
        assert!(filter.matches(&phone(2, "ACME", "Y", 200.0)));
        assert!(!filter.matches(&phone(3, "Acme", "Z", 200.01)));
        assert!(!filter.matches(&phone(4, "Globex", "Z", 150.0)));
        assert!(!filter.is_empty());
        assert!(PhoneFilter::default().is_empty());
    }

    #[test]
    fn test_user_filter_order_bounds_are_existential() {
        let ann = user(
            1,
            "ann",
            vec![order(1, 1, "2024-01-10", 50.0), order(2, 1, "2024-03-01", 500.0)],
        );
        let bob = user(2, "bob", vec![order(3, 2, "2024-02-01", 80.0)]);
        let cid = user(3, "cid", vec![]);

        let rich = UserFilter {
            min_order_total: Some(400.0),
            ..Default::default()
        };
        assert!(rich.matches(&ann));
        assert!(!rich.matches(&bob));
        assert!(!rich.matches(&cid));

        // Both bounds hold through different orders.
        let both = UserFilter {
            min_order_total: Some(400.0),
            max_order_total: Some(60.0),
            ..Default::default()
        };
        assert!(both.matches(&ann));

        let busy = UserFilter {
            min_orders: Some(2),
            ..Default::default()
        };
        assert!(busy.matches(&ann));
        assert!(!busy.matches(&bob));

        let none = UserFilter {
            max_orders: Some(0),
            ..Default::default()
        };
        assert!(none.matches(&cid));
        assert!(!none.matches(&ann));
    }

    #[test]
    fn test_user_filter_dates() {
        let ann = user(1, "ann", vec![order(1, 1, "2024-01-10", 50.0)]);
        let undated = user(2, "bob", vec![order(2, 2, "", 50.0)]);

        let from = UserFilter {
            ordered_from: parse_date("2024-01-10"),
            ..Default::default()
        };
        assert!(from.matches(&ann));
        assert!(!from.matches(&undated));

        let to = UserFilter {
            ordered_to: parse_date("2024-01-09"),
            ..Default::default()
        };
        assert!(!to.matches(&ann));
    }

    #[test]
    fn test_order_filter_username_lookup() {
        let users = vec![user(1, "Alice", vec![]), user(2, "bob", vec![])];
        let filter = OrderFilter {
            username: "ALI".to_string(),
            ..Default::default()
        }
        .with_users(&users);

        assert!(filter.matches(&order(1, 1, "2024-01-01", 10.0)));
        assert!(!filter.matches(&order(2, 2, "2024-01-01", 10.0)));
        // Unknown users have an empty name.
        assert!(!filter.matches(&order(3, 99, "2024-01-01", 10.0)));
        assert!(OrderFilter::default().matches(&order(3, 99, "2024-01-01", 10.0)));
    }

    #[test]
    fn test_order_filter_total_and_date() {
        let filter = OrderFilter {
            min_total: Some(20.0),
            ordered_to: parse_date("2024-06-30"),
            ..Default::default()
        };
        assert!(filter.matches(&order(1, 1, "2024-06-30", 20.0)));
        assert!(!filter.matches(&order(2, 1, "2024-07-01", 20.0)));
        assert!(!filter.matches(&order(3, 1, "2024-06-01", 19.99)));
    }
}
