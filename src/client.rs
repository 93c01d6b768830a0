//! Client for the storefront remote APIs
//!
//! One method per backend endpoint: the product catalog, the coupon
//! validator and the checkout-session factory. Authenticated calls carry
//! the bearer credential supplied by the session layer.

use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::cart::models::Product;
use crate::error::{Error, Result};

/// One order line as submitted to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: u64,
    pub quantity: u32,
    pub price: f64,
}

/// A checkout-session request. Transient: built per attempt, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub client_id: u64,
    pub items: Vec<OrderItem>,
    /// Discount rate in `[0, 1]`; 0.0 when no coupon is active.
    pub discount: f64,
}

/// Response of `POST /create-checkout-session`: where to send the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

/// Response of `POST /coupons/validate`.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponValidation {
    /// Discount as a percentage, e.g. `20` for twenty percent off.
    pub discount: f64,
    pub code: String,
}

/// Response of `GET /client-by-user/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    pub client_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// HTTP client for the Catalog/Order, Coupon and Identity collaborators.
///
/// Timeouts and retries are delegated entirely to the transport; the
/// engine implements neither.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            bearer: None,
        }
    }

    /// Client that sends `Authorization: Bearer <token>` on every call.
    pub fn with_bearer(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            ..Self::new(base_url)
        }
    }

    /// Catalog listing: `GET /products`.
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        let response = self.request(Method::GET, "/products")?.send().await?;
        Ok(expect_success(response)?.json().await?)
    }

    /// Single product lookup: `GET /products/{id}`.
    pub async fn get_product(&self, product_id: u64) -> Result<Product> {
        let path = format!("/products/{product_id}");
        let response = self.request(Method::GET, &path)?.send().await?;
        Ok(expect_success(response)?.json().await?)
    }

    /// `POST /coupons/validate`. Any non-2xx answer means the code was
    /// rejected (invalid, expired or exhausted) and maps to
    /// [`Error::InvalidCoupon`].
    pub async fn validate_coupon(&self, code: &str) -> Result<CouponValidation> {
        let response = self
            .request(Method::POST, "/coupons/validate")?
            .json(&json!({ "code": code }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::InvalidCoupon);
        }
        Ok(response.json().await?)
    }

    /// `POST /coupons/use`. Records one usage of the coupon; issued
    /// fire-and-forget by the coupon agent.
    pub async fn use_coupon(&self, code: &str) -> Result<()> {
        let response = self
            .request(Method::POST, "/coupons/use")?
            .json(&json!({ "code": code }))
            .send()
            .await?;

        expect_success(response)?;
        Ok(())
    }

    /// Identity lookup: `GET /client-by-user/{user_id}`. A non-2xx answer
    /// maps to [`Error::UnresolvedClient`].
    pub async fn client_by_user(&self, user_id: u64) -> Result<ClientRecord> {
        let path = format!("/client-by-user/{user_id}");
        let response = self.request(Method::GET, &path)?.send().await?;

        if !response.status().is_success() {
            return Err(Error::UnresolvedClient);
        }
        Ok(response.json().await?)
    }

    /// `POST /create-checkout-session`. Returns the redirect target on the
    /// external payment processor.
    pub async fn create_checkout_session(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        let response = self
            .request(Method::POST, "/create-checkout-session")?
            .json(order)
            .send()
            .await?;

        Ok(expect_success(response)?.json().await?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }
}

fn expect_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            status: status.as_u16(),
        })
    }
}
