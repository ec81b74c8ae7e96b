//! In-memory collaborators for controller tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stylish_commerce::prelude::*;
use stylish_data::{
    AuthApi, Credentials, FetchError, OrderApi, PaymentGateway, PaymentProof, ProductApi,
};
use tokio::sync::Semaphore;

pub fn product(title: &str) -> Product {
    Product::new(ProductId::new(title.to_lowercase()), title, Money::new(100))
}

/// Scripted product API. Pages are keyed by category, or `search:<keyword>`.
#[derive(Default)]
pub struct FakeProducts {
    pages: Mutex<HashMap<(String, String), ProductPage>>,
    campaigns: Mutex<Vec<Campaign>>,
    failures: Mutex<VecDeque<FetchError>>,
    requests: Mutex<Vec<String>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeProducts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, key: &str, cursor: &str, titles: &[&str], next: Option<&str>) {
        let page = ProductPage::new(
            titles.iter().map(|t| product(t)).collect(),
            next.map(Cursor::new),
        );
        self.pages
            .lock()
            .unwrap()
            .insert((key.to_string(), cursor.to_string()), page);
    }

    pub fn campaigns(&self, campaigns: Vec<Campaign>) {
        *self.campaigns.lock().unwrap() = campaigns;
    }

    pub fn fail_next(&self, error: FetchError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Make subsequent fetches wait for a permit on the returned semaphore.
    pub fn hold(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Stop holding new fetches. Fetches already waiting keep waiting.
    pub fn release_hold(&self) {
        *self.gate.lock().unwrap() = None;
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    async fn serve(&self, request: String, key: String, cursor: &Cursor) -> Result<ProductPage, FetchError> {
        self.requests.lock().unwrap().push(request);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        self.pages
            .lock()
            .unwrap()
            .get(&(key, cursor.as_str().to_string()))
            .cloned()
            .ok_or(FetchError::HttpError {
                status: 404,
                message: "no such page".into(),
            })
    }
}

#[async_trait]
impl ProductApi for FakeProducts {
    async fn fetch_by_category(&self, category: &str, cursor: &Cursor) -> Result<ProductPage, FetchError> {
        self.serve(
            format!("category:{}@{}", category, cursor),
            category.to_string(),
            cursor,
        )
        .await
    }

    async fn search_by_keyword(&self, keyword: &str, cursor: &Cursor) -> Result<ProductPage, FetchError> {
        self.serve(
            format!("search:{}@{}", keyword, cursor),
            format!("search:{}", keyword),
            cursor,
        )
        .await
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        Ok(product(id.as_str()))
    }

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, FetchError> {
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self.campaigns.lock().unwrap().clone())
    }
}

/// Auth API that issues fixed tokens or fails with a message.
#[derive(Default)]
pub struct FakeAuth {
    pub fail_with: Mutex<Option<String>>,
    pub bootstraps: AtomicUsize,
    pub profile_requests: AtomicUsize,
}

impl FakeAuth {
    pub fn failing(message: &str) -> Self {
        let auth = Self::default();
        *auth.fail_with.lock().unwrap() = Some(message.to_string());
        auth
    }

    fn issue(&self, token: &str) -> Result<SessionToken, FetchError> {
        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(FetchError::HttpError {
                status: 403,
                message,
            }),
            None => Ok(SessionToken::new(token)),
        }
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn bootstrap_token(&self) -> Result<SessionToken, FetchError> {
        self.bootstraps.fetch_add(1, Ordering::SeqCst);
        self.issue("guest-token")
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<SessionToken, FetchError> {
        self.issue("member-token")
    }

    async fn sign_up(&self, _: &str, _: &str, _: &str) -> Result<SessionToken, FetchError> {
        self.issue("new-member-token")
    }

    async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile, FetchError> {
        self.profile_requests.fetch_add(1, Ordering::SeqCst);
        Ok(Profile {
            name: format!("owner of {}", token.expose()),
            email: "ada@test.com".to_string(),
            picture_url: None,
        })
    }
}

/// Payment gateway with scripted readiness and status.
pub struct FakePayments {
    pub ready: AtomicBool,
    pub status: Mutex<i32>,
    pub proof_requests: AtomicUsize,
}

impl FakePayments {
    pub fn ready() -> Self {
        Self {
            ready: AtomicBool::new(true),
            status: Mutex::new(0),
            proof_requests: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PaymentGateway for FakePayments {
    async fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn request_payment_proof(&self) -> Result<PaymentProof, FetchError> {
        self.proof_requests.fetch_add(1, Ordering::SeqCst);
        let status = *self.status.lock().unwrap();
        Ok(if status == 0 {
            PaymentProof::accepted("prime-test")
        } else {
            PaymentProof::rejected(status, "card declined")
        })
    }
}

/// Order API that records payloads and can be held open.
#[derive(Default)]
pub struct FakeOrders {
    pub fail_with: Mutex<Option<FetchError>>,
    pub submitted: Mutex<Vec<(CheckoutPayload, SessionToken)>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeOrders {
    pub fn hold(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub async fn wait_for_submissions(&self, n: usize) {
        while self.count() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl OrderApi for FakeOrders {
    async fn submit_order(
        &self,
        payload: &CheckoutPayload,
        token: &SessionToken,
    ) -> Result<OrderConfirmation, FetchError> {
        self.submitted
            .lock()
            .unwrap()
            .push((payload.clone(), token.clone()));

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(OrderConfirmation {
            order_number: OrderNumber::new(format!("order-{}", self.count())),
        })
    }
}
