//! Resource clients for the server's account and transaction collections.
//!
//! Every response has the shape `{ success, data?, error? }`. A 2xx status
//! only means the request was delivered, so [ApiResponse] turns a response
//! into a [GatewayResult] that callers must handle in full.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};

use crate::{
    endpoints::format_endpoint,
    request::{Method, Payload, RequestClient, RequestError, RequestOptions},
};

/// A server-owned record with its own resource URL.
pub trait Entity: DeserializeOwned + Send + 'static {
    /// The collection URL, e.g. "/account".
    const URL: &'static str;
}

/// The body of every server response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The payload of a successful response.
    ///
    /// # Errors
    /// Returns [GatewayError::Rejected] if `success` is false and
    /// [GatewayError::MissingData] if a successful response has no payload.
    pub fn into_result(self) -> GatewayResult<T> {
        if !self.success {
            return Err(GatewayError::Rejected(self.error));
        }

        self.data.ok_or(GatewayError::MissingData)
    }

    /// Like [ApiResponse::into_result] for responses whose payload is not used.
    pub fn into_ack(self) -> GatewayResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(self.error))
        }
    }
}

/// Why a gateway call did not produce a result.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum GatewayError {
    /// The request failed before the server's answer could be read.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The server answered with `success: false`.
    #[error("the server rejected the request: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// The server answered with `success: true` but without `data`.
    #[error("the server response has no data")]
    MissingData,

    /// The response body does not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The operations the dashboard performs on a server collection.
#[async_trait]
pub trait EntityGateway<E>: Send + Sync {
    /// Fetch the collection, optionally filtered, e.g. by `account_id`.
    async fn list(&self, filter: Option<&Payload>) -> GatewayResult<Vec<E>>;

    async fn get(&self, id: &str) -> GatewayResult<E>;

    async fn create(&self, data: &Payload) -> GatewayResult<()>;

    async fn remove(&self, id: &str) -> GatewayResult<()>;
}

/// An [EntityGateway] that talks to the server through a [RequestClient].
///
/// | operation | request                         |
/// |-----------|---------------------------------|
/// | list      | `GET {URL}?{filter}`            |
/// | get       | `GET {URL}/{id}`                |
/// | create    | `PUT {URL}` with a form body    |
/// | remove    | `DELETE {URL}` with `id` field  |
pub struct HttpGateway<E> {
    client: RequestClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpGateway<E> {
    pub fn new(client: RequestClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        options: RequestOptions,
    ) -> GatewayResult<ApiResponse<T>> {
        let body = self.client.send(options).await?;

        serde_json::from_value(body).map_err(|error| GatewayError::Malformed(error.to_string()))
    }
}

#[async_trait]
impl<E: Entity> EntityGateway<E> for HttpGateway<E> {
    async fn list(&self, filter: Option<&Payload>) -> GatewayResult<Vec<E>> {
        let mut options = RequestOptions::new(Method::Get, E::URL);
        if let Some(filter) = filter {
            options = options.with_data(filter.clone());
        }

        self.fetch(options).await?.into_result()
    }

    async fn get(&self, id: &str) -> GatewayResult<E> {
        self.fetch(RequestOptions::new(Method::Get, format_endpoint(E::URL, id)))
            .await?
            .into_result()
    }

    async fn create(&self, data: &Payload) -> GatewayResult<()> {
        self.fetch::<serde_json::Value>(
            RequestOptions::new(Method::Put, E::URL).with_data(data.clone()),
        )
        .await?
        .into_ack()
    }

    async fn remove(&self, id: &str) -> GatewayResult<()> {
        self.fetch::<serde_json::Value>(
            RequestOptions::new(Method::Delete, E::URL).with_data(Payload::new().with("id", id)),
        )
        .await?
        .into_ack()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

/// Read an ID that the server may send as either a string or a number.
pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::{
        account::Account,
        request::{Method, Payload, RequestClient, RequestError},
        test_utils::FakeTransport,
        transaction::{Transaction, TransactionType},
    };

    use super::{ApiResponse, EntityGateway, GatewayError, HttpGateway};

    fn gateway<E: super::Entity>(transport: &Arc<FakeTransport>) -> HttpGateway<E> {
        HttpGateway::new(RequestClient::new(transport.clone()))
    }

    #[tokio::test]
    async fn list_sends_filter_as_query() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(
            200,
            &json!({"success": true, "data": [{
                "id": 1,
                "type": "income",
                "name": "Pay",
                "sum": 100,
                "created_at": "2019-03-10 03:20:41",
                "account_id": 7
            }]}),
        );

        let got = gateway::<Transaction>(&transport)
            .list(Some(&Payload::new().with("account_id", "7")))
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "/transaction?account_id=7");
        assert_eq!(
            got,
            vec![Transaction {
                id: "1".to_owned(),
                kind: TransactionType::Income,
                name: "Pay".to_owned(),
                sum: 100.0,
                created_at: "2019-03-10 03:20:41".to_owned(),
                account_id: "7".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn list_without_filter_sends_bare_url() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(200, &json!({"success": true, "data": []}));

        gateway::<Account>(&transport).list(None).await.unwrap();

        assert_eq!(transport.requests()[0].url, "/account");
    }

    #[tokio::test]
    async fn get_addresses_entity_by_id() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(
            200,
            &json!({"success": true, "data": {"id": "7", "name": "Wallet", "sum": 12.5}}),
        );

        let got = gateway::<Account>(&transport).get("7").await.unwrap();

        assert_eq!(transport.requests()[0].url, "/account/7");
        assert_eq!(
            got,
            Account {
                id: "7".to_owned(),
                name: "Wallet".to_owned(),
                sum: 12.5,
            }
        );
    }

    #[tokio::test]
    async fn create_puts_form_body() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(200, &json!({"success": true, "data": {"id": 3, "name": "Cash"}}));
        let data = Payload::new().with("name", "Cash");

        let got = gateway::<Account>(&transport).create(&data).await;

        let request = &transport.requests()[0];
        assert_eq!(got, Ok(()));
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "/account");
        assert_eq!(request.form, Some(data));
    }

    #[tokio::test]
    async fn remove_deletes_with_id_field() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(200, &json!({"success": true}));

        let got = gateway::<Transaction>(&transport).remove("11").await;

        let request = &transport.requests()[0];
        assert_eq!(got, Ok(()));
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "/transaction");
        assert_eq!(request.form, Some(Payload::new().with("id", "11")));
    }

    #[tokio::test]
    async fn unsuccessful_response_is_rejected() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(200, &json!({"success": false, "error": "Account not found"}));

        let got = gateway::<Account>(&transport).get("9").await;

        assert_eq!(got, Err(GatewayError::Rejected(Some("Account not found".to_owned()))));
    }

    #[tokio::test]
    async fn request_failure_is_passed_through() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(500, &json!({}));

        let got = gateway::<Account>(&transport).list(None).await;

        assert_eq!(got, Err(GatewayError::Request(RequestError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn unexpected_shape_is_malformed() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(200, &json!({"success": true, "data": "not a list"}));

        let got = gateway::<Account>(&transport).list(None).await;

        assert!(matches!(got, Err(GatewayError::Malformed(_))));
    }

    #[test]
    fn success_without_data_is_missing_data() {
        let response: ApiResponse<Account> = serde_json::from_value(json!({"success": true})).unwrap();

        assert_eq!(response.into_result(), Err(GatewayError::MissingData));
    }

    #[test]
    fn ack_ignores_data() {
        let response: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({"success": true, "data": {"anything": 1}})).unwrap();

        assert_eq!(response.into_ack(), Ok(()));
    }
}
