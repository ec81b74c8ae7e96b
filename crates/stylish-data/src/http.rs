//! Storefront JSON API over HTTP.

use crate::api::{AuthApi, Credentials, OrderApi, ProductApi};
use crate::{FetchClient, FetchError};
use async_trait::async_trait;
use serde::Deserialize;
use stylish_commerce::prelude::*;
use tracing::{debug, info};

/// `{ "data": ... }` wrapper used by every endpoint except product pages.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct AuthPayload {
    access_token: SessionToken,
}

/// [`ProductApi`], [`AuthApi`] and [`OrderApi`] backed by the storefront API.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    client: FetchClient,
    guest: Option<Credentials>,
}

impl HttpStorefrontApi {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            guest: None,
        }
    }

    /// Credentials used to acquire a token when none is stored.
    pub fn with_guest_credentials(mut self, credentials: Credentials) -> Self {
        self.guest = Some(credentials);
        self
    }

    async fn fetch_page(
        &self,
        path: &str,
        keyword: Option<&str>,
        cursor: &Cursor,
    ) -> Result<ProductPage, FetchError> {
        let mut request = self.client.get(path);
        if let Some(keyword) = keyword {
            request = request.query("keyword", keyword);
        }
        let page: ProductPage = request
            .query("paging", cursor.as_str())
            .send()
            .await?
            .json()?;

        debug!(
            path,
            cursor = %cursor,
            items = page.items.len(),
            next = ?page.next_cursor.as_ref().map(Cursor::as_str),
            "fetched product page"
        );
        Ok(page)
    }
}

#[async_trait]
impl ProductApi for HttpStorefrontApi {
    async fn fetch_by_category(
        &self,
        category: &str,
        cursor: &Cursor,
    ) -> Result<ProductPage, FetchError> {
        let path = format!("/products/{}", urlencoding::encode(category));
        self.fetch_page(&path, None, cursor).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        cursor: &Cursor,
    ) -> Result<ProductPage, FetchError> {
        self.fetch_page("/products/search", Some(keyword), cursor)
            .await
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let body: Envelope<Product> = self
            .client
            .get("/products/details")
            .query("id", id.as_str())
            .send()
            .await?
            .json()?;
        Ok(body.data)
    }

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, FetchError> {
        let body: Envelope<Vec<Campaign>> =
            self.client.get("/marketing/campaigns").send().await?.json()?;
        Ok(body.data)
    }
}

#[async_trait]
impl AuthApi for HttpStorefrontApi {
    async fn bootstrap_token(&self) -> Result<SessionToken, FetchError> {
        let credentials = self.guest.as_ref().ok_or_else(|| {
            FetchError::RequestError("no guest credentials configured".to_string())
        })?;
        info!(provider = credentials.provider(), "bootstrapping session token");
        self.sign_in(credentials).await
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<SessionToken, FetchError> {
        let body: Envelope<AuthPayload> = self
            .client
            .post("/user/signin")
            .json(credentials)?
            .send()
            .await?
            .json()?;
        Ok(body.data.access_token)
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, FetchError> {
        let body: Envelope<AuthPayload> = self
            .client
            .post("/user/signup")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))?
            .send()
            .await?
            .json()?;
        Ok(body.data.access_token)
    }

    async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile, FetchError> {
        let body: Envelope<Profile> = self
            .client
            .get("/user/profile")
            .bearer_auth(token.expose())
            .send()
            .await?
            .json()?;
        Ok(body.data)
    }
}

#[async_trait]
impl OrderApi for HttpStorefrontApi {
    async fn submit_order(
        &self,
        payload: &CheckoutPayload,
        token: &SessionToken,
    ) -> Result<OrderConfirmation, FetchError> {
        let body: Envelope<OrderConfirmation> = self
            .client
            .post("/order/checkout")
            .bearer_auth(token.expose())
            .json(payload)?
            .send()
            .await?
            .json()?;
        Ok(body.data)
    }
}
