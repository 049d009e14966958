//! Form schemas for the three entity kinds.
//!
//! Field names are the API's wire names so that server-side field errors land
//! next to the matching input.

use crate::form::{
    text_of, FieldErrors, FieldKind, FieldSpec, FieldValue, FieldValues, Requirement, Schema,
};
use crate::models::{format_amount, Id, Order, OrderDraft, Phone, PhoneDraft, User, UserDraft};

fn field_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.insert(field.to_string(), message);
}

fn into_result<D>(draft: Option<D>, errors: FieldErrors) -> Result<D, FieldErrors> {
    match draft {
        Some(draft) if errors.is_empty() => Ok(draft),
        _ => Err(errors),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhoneSchema;

impl Schema for PhoneSchema {
    type Entity = Phone;
    type Draft = PhoneDraft;

    const NOUN: &'static str = "phone";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "brand",
            label: "Brand",
            kind: FieldKind::Text,
            required: Requirement::Always,
        },
        FieldSpec {
            name: "model",
            label: "Model",
            kind: FieldKind::Text,
            required: Requirement::Always,
        },
        FieldSpec {
            name: "price",
            label: "Price",
            kind: FieldKind::Decimal,
            required: Requirement::Always,
        },
    ];

    fn values_of(phone: &Phone) -> FieldValues {
        FieldValues::from([
            ("brand", FieldValue::Single(phone.brand.clone())),
            ("model", FieldValue::Single(phone.model.clone())),
            ("price", FieldValue::Single(phone.price.to_string())),
        ])
    }

    fn parse(values: &FieldValues) -> Result<PhoneDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let price = match text_of(values, "price").trim().parse::<f64>() {
            Ok(price) if !price.is_finite() => {
                field_error(&mut errors, "price", "Price must be a number".to_string());
                None
            }
            Ok(price) if price < 0.0 => {
                field_error(&mut errors, "price", "Price must not be negative".to_string());
                None
            }
            Ok(price) => Some(price),
            Err(_) => {
                field_error(&mut errors, "price", "Price must be a number".to_string());
                None
            }
        };
        let draft = price.map(|price| PhoneDraft {
            brand: text_of(values, "brand").trim().to_string(),
            model: text_of(values, "model").trim().to_string(),
            price,
        });
        into_result(draft, errors)
    }

    fn describe(phone: &Phone) -> String {
        format!("{} ({})", phone.label(), format_amount(phone.price))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UserSchema;

impl Schema for UserSchema {
    type Entity = User;
    type Draft = UserDraft;

    const NOUN: &'static str = "user";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "username",
            label: "Username",
            kind: FieldKind::Text,
            required: Requirement::Always,
        },
        FieldSpec {
            name: "password",
            label: "Password",
            kind: FieldKind::Secret,
            required: Requirement::OnCreate,
        },
    ];

    fn values_of(user: &User) -> FieldValues {
        FieldValues::from([("username", FieldValue::Single(user.username.clone()))])
    }

    fn parse(values: &FieldValues) -> Result<UserDraft, FieldErrors> {
        let password = text_of(values, "password");
        Ok(UserDraft {
            username: text_of(values, "username").trim().to_string(),
            password: (!password.is_empty()).then(|| password.to_string()),
        })
    }

    fn describe(user: &User) -> String {
        user.username.clone()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrderSchema;

impl Schema for OrderSchema {
    type Entity = Order;
    type Draft = OrderDraft;

    const NOUN: &'static str = "order";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "userId",
            label: "User",
            kind: FieldKind::Choice,
            required: Requirement::Always,
        },
        FieldSpec {
            name: "smartphoneIds",
            label: "Phones",
            kind: FieldKind::MultiChoice,
            required: Requirement::Always,
        },
    ];

    fn values_of(order: &Order) -> FieldValues {
        FieldValues::from([
            ("userId", FieldValue::Single(order.user_id.to_string())),
            (
                "smartphoneIds",
                FieldValue::Many(order.phones.iter().map(|p| p.id.to_string()).collect()),
            ),
        ])
    }

    fn parse(values: &FieldValues) -> Result<OrderDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let user_id = text_of(values, "userId").trim().parse::<Id>().ok();
        if user_id.is_none() {
            field_error(&mut errors, "userId", "Select a user".to_string());
        }

        let selected = values
            .get("smartphoneIds")
            .map(FieldValue::items)
            .unwrap_or(&[]);
        let phone_ids = selected
            .iter()
            .map(|raw| raw.trim().parse::<Id>())
            .collect::<Result<Vec<_>, _>>()
            .ok()
            .filter(|ids| !ids.is_empty());
        if phone_ids.is_none() {
            field_error(
                &mut errors,
                "smartphoneIds",
                "Select at least one phone".to_string(),
            );
        }

        let draft = user_id
            .zip(phone_ids)
            .map(|(user_id, phone_ids)| OrderDraft { user_id, phone_ids });
        into_result(draft, errors)
    }

    fn describe(order: &Order) -> String {
        format!("#{} ({})", order.id, format_amount(order.total_amount))
    }
}
