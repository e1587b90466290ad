// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use oauth1_request::signature_method::HmacSha1 as DefaultSignatureMethod;
use oauth1_request::signature_method::SignatureMethod;
use reqwest::{Client as ReqwestClient, Method, Response};
use serde::Serialize;

use crate::resources::{Account, Marketplace, Orders, ShoppingCart, Stock, WantsLists};
use crate::{Body, ConfigResult, Endpoint, OAuthParameters, Result, Secrets, Signer};

use super::request::RequestBuilder;

pub trait MkmClientProvider {
    fn mkm(self, secrets: Secrets, endpoint: Endpoint) -> Client<DefaultSignatureMethod>
    where
        Self: Sized,
    {
        self.mkm_with_params(secrets, endpoint, OAuthParameters::new())
    }

    fn mkm_with_params<TSignatureMethod>(
        self,
        secrets: Secrets,
        endpoint: Endpoint,
        params: OAuthParameters<TSignatureMethod>,
    ) -> Client<TSignatureMethod>
    where
        Self: Sized,
        TSignatureMethod: SignatureMethod + Clone;
}

/// An MKM API client: a `reqwest::Client` plus the credentials and endpoint
/// every request is signed for.
///
/// Cloning is cheap and clones share the connection pool; requests may be
/// sent concurrently from any number of tasks.
#[derive(Debug, Clone)]
pub struct Client<TSignatureMethod = DefaultSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    inner: ReqwestClient,
    signer: Signer<Secrets, TSignatureMethod>,
    endpoint: Endpoint,
}

impl MkmClientProvider for ReqwestClient {
    fn mkm_with_params<TSignatureMethod>(
        self,
        secrets: Secrets,
        endpoint: Endpoint,
        parameters: OAuthParameters<TSignatureMethod>,
    ) -> Client<TSignatureMethod>
    where
        Self: Sized,
        TSignatureMethod: SignatureMethod + Clone,
    {
        Client {
            inner: self,
            signer: Signer::new(secrets, parameters),
            endpoint,
        }
    }
}

impl Client<DefaultSignatureMethod> {
    /// Constructs a new `Client`.
    ///
    /// This method calls reqwest::Client::new() internally.
    pub fn new(secrets: Secrets, endpoint: Endpoint) -> Self {
        ReqwestClient::new().mkm(secrets, endpoint)
    }

    /// Constructs a new `Client` with credentials read from the `MKM_*`
    /// environment variables (see [`Secrets::from_env`]).
    pub fn from_env(endpoint: Endpoint) -> ConfigResult<Self> {
        Ok(Self::new(Secrets::from_env()?, endpoint))
    }
}

impl<TSignatureMethod> Client<TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn signer(&self) -> &Signer<Secrets, TSignatureMethod> {
        &self.signer
    }

    pub(crate) fn inner(&self) -> &ReqwestClient {
        &self.inner
    }

    /// Convenience method to make a `GET` request to a resource path.
    pub fn get(&self, path: &str) -> RequestBuilder<'_, TSignatureMethod> {
        self.request(Method::GET, path)
    }

    /// Convenience method to make a `POST` request to a resource path.
    pub fn post(&self, path: &str) -> RequestBuilder<'_, TSignatureMethod> {
        self.request(Method::POST, path)
    }

    /// Convenience method to make a `PUT` request to a resource path.
    pub fn put(&self, path: &str) -> RequestBuilder<'_, TSignatureMethod> {
        self.request(Method::PUT, path)
    }

    /// Convenience method to make a `DELETE` request to a resource path.
    pub fn delete(&self, path: &str) -> RequestBuilder<'_, TSignatureMethod> {
        self.request(Method::DELETE, path)
    }

    /// Start building a `Request` with the `Method` and a path relative to
    /// the configured endpoint.
    ///
    /// Returns a `RequestBuilder`, which will allow setting the query and
    /// request body before sending.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_, TSignatureMethod> {
        RequestBuilder::new(self, method, path)
    }

    /// Sends one signed request and classifies the response.
    ///
    /// A [`Body::Xml`] body is serialized into a `<request>` document, a
    /// [`Body::Text`] body is sent unchanged. Pass an empty slice as `query`
    /// when there are no query parameters.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) before any network
    /// I/O when the consumer credentials are empty, and with
    /// [`Error::Protocol`](crate::Error::Protocol) on any status outside of
    /// `200..=299`. Transport failures are returned as
    /// [`Error::Reqwest`](crate::Error::Reqwest).
    pub async fn dispatch<Q>(
        &self,
        method: Method,
        path: &str,
        query: &Q,
        body: Option<Body>,
    ) -> Result<Response>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.request(method, path).query(query);
        match body {
            Some(body) => builder.body(body).send().await,
            None => builder.send().await,
        }
    }

    pub fn marketplace(&self) -> Marketplace<'_, TSignatureMethod> {
        Marketplace::new(self)
    }

    pub fn account(&self) -> Account<'_, TSignatureMethod> {
        Account::new(self)
    }

    pub fn shopping_cart(&self) -> ShoppingCart<'_, TSignatureMethod> {
        ShoppingCart::new(self)
    }

    pub fn stock(&self) -> Stock<'_, TSignatureMethod> {
        Stock::new(self)
    }

    pub fn wants_lists(&self) -> WantsLists<'_, TSignatureMethod> {
        WantsLists::new(self)
    }

    pub fn orders(&self) -> Orders<'_, TSignatureMethod> {
        Orders::new(self)
    }
}
