//! # Catalog models for phones, users and orders
//!
//! Defines the records the console receives from the remote API and the drafts it
//! sends back. Everything here is `Serialize + Deserialize` and uses the API's
//! camelCase wire names, so the same types are used for decoding list responses
//! and for encoding request bodies.
//!
//! ## Entities
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Phone`] | A catalog phone: brand, model and a non-negative price. |
//! | [`User`] | An account. Carries the server-computed list of its [`Order`]s; the password is never part of it. |
//! | [`Order`] | A purchase by one user of one or more phones. `total_amount` is computed by the server from the phones. |
//!
//! ## Drafts
//!
//! [`PhoneDraft`], [`UserDraft`] and [`OrderDraft`] are the request bodies for
//! create, update and bulk create. An order draft references phones by id and
//! never carries a total.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier shared by every entity kind.
pub type Id = i64;

/// Entities that can be looked up by their server id.
pub trait Identified {
    fn id(&self) -> Id;
}

/// A phone in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub id: Id,
    pub brand: String,
    pub model: String,
    pub price: f64,
}

impl Phone {
    /// "Brand Model", as shown in pickers and order details.
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// A user account with its orders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl User {
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

/// An order placed by one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Id,
    pub user_id: Id,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(rename = "smartphones", alias = "phones", default)]
    pub phones: Vec<Phone>,
}

impl Order {
    pub fn phone_ids(&self) -> Vec<Id> {
        self.phones.iter().map(|p| p.id).collect()
    }
}

impl Identified for Phone {
    fn id(&self) -> Id {
        self.id
    }
}

impl Identified for User {
    fn id(&self) -> Id {
        self.id
    }
}

impl Identified for Order {
    fn id(&self) -> Id {
        self.id
    }
}

/// Request body for creating or updating a phone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhoneDraft {
    pub brand: String,
    pub model: String,
    pub price: f64,
}

/// Request body for creating or updating a user.
///
/// `password` is omitted from the body when `None`, which leaves the stored
/// password untouched on update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Request body for creating or updating an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: Id,
    #[serde(rename = "smartphoneIds")]
    pub phone_ids: Vec<Id>,
}

/// Format a decimal amount for display: `$1234.50`.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_names() {
        let json = r#"{
            "id": 7,
            "userId": 3,
            "orderDate": "2024-05-01",
            "totalAmount": 1099.5,
            "smartphones": [{"id": 1, "brand": "Acme", "model": "X1", "price": 1099.5}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.user_id, 3);
        assert_eq!(order.order_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(order.phones.len(), 1);
        assert_eq!(order.phones[0].label(), "Acme X1");
    }

    #[test]
    fn test_user_without_orders_field() {
        let user: User = serde_json::from_str(r#"{"id": 1, "username": "ann"}"#).unwrap();
        assert_eq!(user.order_count(), 0);
    }

    #[test]
    fn test_user_draft_omits_missing_password() {
        let draft = UserDraft {
            username: "ann".to_string(),
            password: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value, serde_json::json!({ "username": "ann" }));
    }

    #[test]
    fn test_order_draft_body() {
        let draft = OrderDraft {
            user_id: 4,
            phone_ids: vec![1, 2],
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "userId": 4, "smartphoneIds": [1, 2] })
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5.0), "$5.00");
        assert_eq!(format_amount(1234.456), "$1234.46");
    }
}
