use std::sync::Arc;

use ::reqwest::{cookie::Jar, IntoUrl, Request, Response};
use serde::Serialize;

pub use ::reqwest::{multipart, Error};

/// Thin wrapper around `reqwest::Client` that keeps one cookie jar for the
/// whole session and logs every request.
#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

macro_rules! emit_request_fn {
    ($method:ident) => {
        pub fn $method(&self, u: impl IntoUrl) -> RequestBuilder {
            RequestBuilder::new(self.inner.$method(u), self.clone())
        }
    };
}

impl Client {
    pub fn new(accept_invalid_certs: bool) -> Result<Self, Error> {
        let cookie_jar = Arc::new(Jar::default());
        let inner = reqwest::Client::builder()
            .cookie_store(true)
            .cookie_provider(cookie_jar)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .gzip(true)
            .build()?;
        Ok(Self { inner })
    }

    emit_request_fn!(get);
    emit_request_fn!(post);

    pub(super) async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        let (method, url) = (req.method().clone(), req.url().clone());
        log::debug!("{} {}", method, url);
        let resp = self.inner.execute(req).await?;
        log::debug!("{} {} -> {}", method, url, resp.status());
        Ok(resp)
    }
}

impl RequestBuilder {
    fn new(b: ::reqwest::RequestBuilder, client: Client) -> Self {
        Self { inner: b, client }
    }

    pub async fn send(self) -> Result<Response, Error> {
        let req = self.inner.build()?;
        self.client.execute_request(req).await
    }

    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        self.inner = self.inner.query(query);
        self
    }

    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        self.inner = self.inner.form(form);
        self
    }

    pub fn multipart(mut self, form: multipart::Form) -> Self {
        self.inner = self.inner.multipart(form);
        self
    }
}
