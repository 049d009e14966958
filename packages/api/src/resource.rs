//! The three REST collections the console manages.

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{Identified, Order, OrderDraft, Phone, PhoneDraft, User, UserDraft};

/// A REST collection under `/api`.
pub trait Resource {
    type Entity: DeserializeOwned + Identified;
    type Draft: Serialize;

    const PATH: &'static str;
    /// Capitalised noun for log lines and notices: "Phone".
    const NOUN: &'static str;
    /// Field whose uniqueness the server enforces with `409 Conflict`.
    const UNIQUE_FIELD: Option<&'static str> = None;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Phones;

impl Resource for Phones {
    type Entity = Phone;
    type Draft = PhoneDraft;

    const PATH: &'static str = "/api/phones";
    const NOUN: &'static str = "Phone";
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Draft = UserDraft;

    const PATH: &'static str = "/api/users";
    const NOUN: &'static str = "User";
    const UNIQUE_FIELD: Option<&'static str> = Some("username");
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orders;

impl Resource for Orders {
    type Entity = Order;
    type Draft = OrderDraft;

    const PATH: &'static str = "/api/orders";
    const NOUN: &'static str = "Order";
}
