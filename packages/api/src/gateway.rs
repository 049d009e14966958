//! # Mutation gateway
//!
//! [`Gateway`] issues every call the console makes against one [`Resource`]:
//! list and get for reads, create, update, delete and bulk create for writes.
//! Each call is a single round trip; nothing is retried.
//!
//! ## Status mapping
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx | decoded body, or [`ApiError::RequestFailed`] when it does not decode |
//! | 400 with a non-empty JSON object of strings | [`ApiError::ValidationFailed`] with those messages |
//! | 400 otherwise | [`ApiError::RequestFailed`] |
//! | 404 | [`ApiError::NotFound`] |
//! | 409 on a resource with a unique field | [`ApiError::ValidationFailed`] on that field |
//! | anything else, or no response | [`ApiError::RequestFailed`] |
//!
//! Callers reload the affected collection after a successful mutation. Since
//! every method resolves only once the response is in, awaiting the mutation
//! before calling [`Gateway::fetch_all`] orders the reload after the write.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{FieldErrors, Id};

use crate::error::ApiError;
use crate::resource::Resource;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

pub struct Gateway<R, T = HttpTransport> {
    transport: T,
    _resource: PhantomData<R>,
}

impl<R, T: Clone> Clone for Gateway<R, T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, T: Transport> Gateway<R, T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET {PATH}`.
    pub async fn list(&self) -> Result<Vec<R::Entity>, ApiError> {
        let response = self.send(ApiRequest::new(Method::Get, R::PATH)).await?;
        self.decode(response)
    }

    /// [`list`](Self::list) for views: a failed fetch is logged and shows as empty.
    pub async fn fetch_all(&self) -> Vec<R::Entity> {
        match self.list().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Failed to fetch {} list: {}", R::NOUN, e);
                Vec::new()
            }
        }
    }

    /// `GET {PATH}/{id}`.
    pub async fn get(&self, id: Id) -> Result<R::Entity, ApiError> {
        let response = self
            .send(ApiRequest::new(Method::Get, item_path::<R>(id)))
            .await?;
        self.decode(response)
    }

    /// `POST {PATH}`.
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Entity, ApiError> {
        let request = ApiRequest::new(Method::Post, R::PATH).with_body(encode(draft)?);
        let created: R::Entity = self.mutate(request).await?;
        tracing::info!("{} {} created", R::NOUN, store::Identified::id(&created));
        Ok(created)
    }

    /// `PUT {PATH}/{id}`.
    pub async fn update(&self, id: Id, draft: &R::Draft) -> Result<R::Entity, ApiError> {
        let request = ApiRequest::new(Method::Put, item_path::<R>(id)).with_body(encode(draft)?);
        let updated = self.mutate(request).await?;
        tracing::info!("{} {} updated", R::NOUN, id);
        Ok(updated)
    }

    /// `DELETE {PATH}/{id}`. The response body is ignored.
    pub async fn delete(&self, id: Id) -> Result<(), ApiError> {
        let response = self
            .send(ApiRequest::new(Method::Delete, item_path::<R>(id)))
            .await?;
        if !response.is_success() {
            let e = self.reject(response);
            tracing::warn!("{} {} delete rejected: {}", R::NOUN, id, e);
            return Err(e);
        }
        tracing::info!("{} {} deleted", R::NOUN, id);
        Ok(())
    }

    /// `POST {PATH}/bulk` with every draft in one request.
    pub async fn bulk_create(&self, drafts: &[R::Draft]) -> Result<Vec<R::Entity>, ApiError> {
        let path = format!("{}/bulk", R::PATH);
        let request = ApiRequest::new(Method::Post, path).with_body(encode(drafts)?);
        let created: Vec<R::Entity> = self.mutate(request).await?;
        tracing::info!("{} {} records created in bulk", created.len(), R::NOUN);
        Ok(created)
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.send(request).await
    }

    async fn mutate<D: DeserializeOwned>(&self, request: ApiRequest) -> Result<D, ApiError> {
        let label = format!("{:?} {}", request.method, request.path);
        let response = self.send(request).await?;
        self.decode(response).inspect_err(|e| {
            tracing::warn!("{} rejected: {}", label, e);
        })
    }

    fn decode<D: DeserializeOwned>(&self, response: ApiResponse) -> Result<D, ApiError> {
        if !response.is_success() {
            return Err(self.reject(response));
        }
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::RequestFailed(format!("unexpected response: {e}")))
    }

    fn reject(&self, response: ApiResponse) -> ApiError {
        let ApiResponse { status, body } = response;
        match status {
            400 => match serde_json::from_str::<FieldErrors>(&body) {
                Ok(errors) if !errors.is_empty() => ApiError::ValidationFailed(errors),
                _ => ApiError::RequestFailed(status_message(status, &body)),
            },
            404 => ApiError::NotFound(
                error_text(&body).unwrap_or_else(|| format!("{} not found", R::NOUN)),
            ),
            409 => match R::UNIQUE_FIELD {
                Some(field) => {
                    let message = error_text(&body)
                        .unwrap_or_else(|| format!("{} already exists", R::NOUN));
                    ApiError::ValidationFailed(FieldErrors::from([(field.to_string(), message)]))
                }
                None => ApiError::RequestFailed(status_message(status, &body)),
            },
            _ => ApiError::RequestFailed(status_message(status, &body)),
        }
    }
}

fn item_path<R: Resource>(id: Id) -> String {
    format!("{}/{}", R::PATH, id)
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::RequestFailed(e.to_string()))
}

/// Message out of an error body: `{"error": "..."}`, `{"message": "..."}` or plain text.
fn error_text(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["error", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(text)) => Some(text),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

fn status_message(status: u16, body: &str) -> String {
    match error_text(body) {
        Some(text) => format!("server returned {status}: {text}"),
        None => format!("server returned {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Orders, Phones, Users};
    use crate::transport::scripted::ScriptedTransport;
    use serde_json::json;
    use store::{CollectionStore, OrderDraft, PhoneDraft, UserDraft};

    fn phones(transport: ScriptedTransport) -> Gateway<Phones, ScriptedTransport> {
        Gateway::new(transport)
    }

    fn draft() -> PhoneDraft {
        PhoneDraft {
            brand: "Acme".to_string(),
            model: "X1".to_string(),
            price: 99.5,
        }
    }

    #[tokio::test]
    async fn test_list_decodes_entities() {
        let gateway = phones(ScriptedTransport::default().reply(
            200,
            r#"[{"id":1,"brand":"Acme","model":"X1","price":99.5}]"#,
        ));
        let list = gateway.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].brand, "Acme");
        assert_eq!(
            gateway.transport().requests(),
            vec![ApiRequest::new(Method::Get, "/api/phones")]
        );
    }

    #[tokio::test]
    async fn test_fetch_all_swallows_failures() {
        let gateway = phones(ScriptedTransport::default().fail("connection refused"));
        assert!(gateway.fetch_all().await.is_empty());

        let gateway = phones(ScriptedTransport::default().reply(500, "boom"));
        assert!(gateway.fetch_all().await.is_empty());

        let gateway = phones(ScriptedTransport::default().reply(200, "not json"));
        assert!(gateway.fetch_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_sends_draft() {
        let gateway = phones(ScriptedTransport::default().reply(
            201,
            r#"{"id":7,"brand":"Acme","model":"X1","price":99.5}"#,
        ));
        let created = gateway.create(&draft()).await.unwrap();
        assert_eq!(created.id, 7);

        let requests = gateway.transport().requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/phones");
        assert_eq!(
            requests[0].body,
            Some(json!({"brand": "Acme", "model": "X1", "price": 99.5}))
        );
    }

    #[tokio::test]
    async fn test_update_field_errors() {
        let gateway =
            phones(ScriptedTransport::default().reply(400, r#"{"brand":"must not be blank"}"#));
        let err = gateway.update(3, &draft()).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::ValidationFailed(FieldErrors::from([(
                "brand".to_string(),
                "must not be blank".to_string()
            )]))
        );
        assert_eq!(gateway.transport().requests()[0].path, "/api/phones/3");
        assert_eq!(gateway.transport().requests()[0].method, Method::Put);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let gateway = phones(
            ScriptedTransport::default()
                .reply(400, "[1,2]")
                .reply(400, "{}")
                .reply(404, r#"{"error":"Phone not found with id 9"}"#)
                .reply(404, "")
                .reply(409, "duplicate")
                .reply(503, "")
                .fail("offline"),
        );
        assert!(matches!(
            gateway.get(1).await,
            Err(ApiError::RequestFailed(_))
        ));
        // An empty error map names no field, so it cannot go next to an input.
        assert_eq!(
            gateway.get(1).await,
            Err(ApiError::RequestFailed("server returned 400".to_string()))
        );
        assert_eq!(
            gateway.get(9).await,
            Err(ApiError::NotFound("Phone not found with id 9".to_string()))
        );
        assert_eq!(
            gateway.get(9).await,
            Err(ApiError::NotFound("Phone not found".to_string()))
        );
        assert_eq!(
            gateway.get(9).await,
            Err(ApiError::RequestFailed(
                "server returned 409: duplicate".to_string()
            ))
        );
        assert_eq!(
            gateway.get(9).await,
            Err(ApiError::RequestFailed("server returned 503".to_string()))
        );
        assert_eq!(
            gateway.get(9).await,
            Err(ApiError::RequestFailed("offline".to_string()))
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_field_error() {
        let gateway: Gateway<Users, _> = Gateway::new(
            ScriptedTransport::default().reply(409, "Username 'ann' is already taken"),
        );
        let err = gateway
            .create(&UserDraft {
                username: "ann".to_string(),
                password: Some("pw".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::ValidationFailed(FieldErrors::from([(
                "username".to_string(),
                "Username 'ann' is already taken".to_string()
            )]))
        );
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let gateway = phones(
            ScriptedTransport::default()
                .reply(204, "")
                .reply(404, r#"{"error":"Phone not found"}"#),
        );
        assert_eq!(gateway.delete(4).await, Ok(()));
        assert!(matches!(
            gateway.delete(4).await,
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(gateway.transport().requests()[0].method, Method::Delete);
        assert_eq!(gateway.transport().requests()[0].path, "/api/phones/4");
    }

    #[tokio::test]
    async fn test_bulk_create_users_then_reload() {
        let created = r#"[{"id":1,"username":"a"},{"id":2,"username":"b"},{"id":3,"username":"c"}]"#;
        let gateway: Gateway<Users, _> = Gateway::new(
            ScriptedTransport::default()
                .reply(201, created)
                .reply(200, created),
        );
        let drafts: Vec<UserDraft> = ["a", "b", "c"]
            .iter()
            .map(|name| UserDraft {
                username: name.to_string(),
                password: Some("pw".to_string()),
            })
            .collect();

        let result = gateway.bulk_create(&drafts).await.unwrap();
        assert_eq!(result.len(), 3);

        let mut users = CollectionStore::default();
        users.replace(gateway.fetch_all().await);
        assert_eq!(users.raw().len(), 3);

        let requests = gateway.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/users/bulk");
        assert_eq!(requests[0].body.as_ref().and_then(Value::as_array).map(Vec::len), Some(3));
        assert_eq!(requests[1], ApiRequest::new(Method::Get, "/api/users"));
    }

    #[tokio::test]
    async fn test_order_draft_wire_body() {
        let gateway: Gateway<Orders, _> = Gateway::new(ScriptedTransport::default().reply(
            201,
            r#"{"id":5,"userId":2,"orderDate":"2024-05-01","totalAmount":10.0,"smartphones":[]}"#,
        ));
        let order = gateway
            .create(&OrderDraft {
                user_id: 2,
                phone_ids: vec![1, 4],
            })
            .await
            .unwrap();
        assert_eq!(order.user_id, 2);
        assert_eq!(
            gateway.transport().requests()[0].body,
            Some(json!({"userId": 2, "smartphoneIds": [1, 4]}))
        );
    }
}
