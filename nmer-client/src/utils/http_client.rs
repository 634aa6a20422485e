use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::{body::Bytes, header::USER_AGENT, Method, Request};
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::{
    error::{SkinFetchError, SkinFetchResult},
    skin::fetcher::SkinSource,
};

const NMER_USER_AGENT: &str = concat!("nmer-client/", env!("CARGO_PKG_VERSION"));

type HttpsClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// [`SkinSource`] backed by a shared hyper client with TLS support.
pub struct HttpSkinSource {
    client: HttpsClient,
}

impl HttpSkinSource {
    #[must_use]
    pub fn new() -> Self {
        let https = HttpsConnector::new();

        Self {
            client: Client::builder(TokioExecutor::new()).build(https),
        }
    }
}

impl Default for HttpSkinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SkinSource for HttpSkinSource {
    async fn fetch(&self, url: &str) -> SkinFetchResult<Bytes> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(url)
            .header(USER_AGENT, NMER_USER_AGENT)
            .body(Empty::new())?;

        let response = self.client.request(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkinFetchError::UnexpectedStatus(status));
        }

        Ok(response.into_body().collect().await?.to_bytes())
    }
}
