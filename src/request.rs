use std::time::Duration;

use http::{header::AUTHORIZATION, Method};
use oauth1_request::signature_method::SignatureMethod;
use reqwest::{Request, Response, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::serializer::serialize_mapping;
use crate::{Client, Error, Mapping, ProtocolError, Result};

/// A request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized into a `<request>` document when the request is built.
    Xml(Mapping),
    /// Sent as is.
    Text(String),
}

impl From<Mapping> for Body {
    fn from(mapping: Mapping) -> Self {
        Body::Xml(mapping)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_owned())
    }
}

/// A request under construction, signed when it is built.
///
/// Errors raised while building (an unparsable URL, a query that cannot be
/// encoded, an invalid argument) are kept and returned by
/// [`build`](RequestBuilder::build) or [`send`](RequestBuilder::send).
pub struct RequestBuilder<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
    method: Method,
    url: Result<Url>,
    body: Option<Body>,
    timeout: Option<Duration>,
}

impl<'c, TSignatureMethod> RequestBuilder<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>, method: Method, path: &str) -> Self {
        RequestBuilder {
            client,
            method,
            url: client.endpoint().resolve(path).map_err(Error::from),
            body: None,
            timeout: None,
        }
    }

    pub(crate) fn fail(self, error: Error) -> Self {
        RequestBuilder {
            url: Err(error),
            ..self
        }
    }

    /// Modify the query string of the URL.
    ///
    /// Modifies the URL of this request, adding the parameters provided.
    /// This method appends and does not overwrite. The parameters end up in
    /// the signature base string as well as in the requested URL.
    /// Calling `.query(&[("foo", "a"), ("foo", "b")])` gives `"foo=a&foo=b"`,
    /// booleans are written as `true` / `false`.
    ///
    /// # Errors
    /// The request fails when sent if the object you provide cannot be
    /// serialized into a query string.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        let result = match self.url {
            Ok(ref mut url) => append_query(url, query),
            Err(_) => Ok(()),
        };
        match result {
            Ok(()) => self,
            Err(err) => self.fail(err),
        }
    }

    /// Set an XML request body, serialized when the request is built.
    pub fn xml(self, mapping: Mapping) -> Self {
        self.body(mapping)
    }

    /// Set the request body.
    pub fn body<T: Into<Body>>(mut self, body: T) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Enables a request timeout.
    ///
    /// The timeout is applied from the when the request starts connecting
    /// until the response body has finished. It affects only this request
    /// and overrides the timeout configured using `ClientBuilder::timeout()`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Serializes the body, signs the request and returns it, ready to be
    /// executed by the inner `reqwest::Client`.
    pub fn build(self) -> Result<Request> {
        let url = self.url?;
        let body = match self.body {
            Some(Body::Xml(mapping)) => Some(serialize_mapping(&mapping)?),
            Some(Body::Text(text)) => Some(text),
            None => None,
        };
        let authorization = self.client.signer().authorize(&self.method, &url)?;

        debug!(method = %self.method, url = %url, "dispatching request");
        let mut builder = self
            .client
            .inner()
            .request(self.method, url)
            .header(AUTHORIZATION, authorization);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Constructs the Request and sends it to the target URL.
    ///
    /// # Errors
    ///
    /// Besides building errors and transport failures, any status outside of
    /// `200..=299` is returned as [`Error::Protocol`].
    pub async fn send(self) -> Result<Response> {
        let client = self.client;
        let request = self.build()?;
        let response = client.inner().execute(request).await?;
        check_status(response).await
    }
}

fn append_query<T: Serialize + ?Sized>(url: &mut Url, query: &T) -> Result<()> {
    {
        let mut pairs = url.query_pairs_mut();
        let serializer = serde_urlencoded::Serializer::new(&mut pairs);
        query.serialize(serializer)?;
    }
    // cleanup
    if let Some("") = url.query() {
        url.set_query(None);
    }
    Ok(())
}

pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // reqwest only exposes the canonical phrase of the status code
    let reason = status.canonical_reason().unwrap_or_default().to_string();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(status = status.as_u16(), error = %err, "failed to read error response body");
            String::new()
        }
    };
    warn!(status = status.as_u16(), reason = %reason, "request rejected by server");
    Err(ProtocolError {
        status,
        reason,
        body,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use http::header::AUTHORIZATION;

    use super::*;
    use crate::{mapping, Endpoint, Secrets};

    fn client() -> Client {
        Client::new(
            Secrets::new("app_token", "app_secret"),
            Endpoint::Custom("http://localhost/ws/v2.0/output.json".to_string()),
        )
    }

    fn body_text(request: &Request) -> &str {
        std::str::from_utf8(request.body().unwrap().as_bytes().unwrap()).unwrap()
    }

    #[test]
    fn query_is_appended_and_encoded() {
        let client = client();
        let request = client
            .get("/products/find")
            .query(&[("search", "Black Lotus"), ("idGame", "1")])
            .query(&[("exact", true)])
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost/ws/v2.0/output.json/products/find?search=Black+Lotus&idGame=1&exact=true"
        );
    }

    #[test]
    fn empty_query_leaves_url_untouched() {
        let client = client();
        let request = client
            .get("/account")
            .query(&Vec::<(&str, &str)>::new())
            .build()
            .unwrap();
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn unencodable_query_is_reported() {
        let client = client();
        let err = client
            .get("/account")
            .query(&[("nested", vec![1, 2])])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Query(_)));
    }

    #[test]
    fn xml_body_is_serialized() {
        let client = client();
        let request = client
            .put("/shoppingcart")
            .xml(mapping! {
                "action" => "add",
                "article" => vec![mapping! { "idArticle" => 1, "amount" => 1 }],
            })
            .build()
            .unwrap();
        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(
            body_text(&request),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><request><action>add</action>\
             <article><idArticle>1</idArticle><amount>1</amount></article></request>"
        );
    }

    #[test]
    fn text_body_passes_through() {
        let client = client();
        let request = client
            .post("/stock")
            .body("<request/>")
            .build()
            .unwrap();
        assert_eq!(body_text(&request), "<request/>");
    }

    #[test]
    fn authorization_is_attached() {
        let client = client();
        let request = client.get("/account").build().unwrap();
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(header.starts_with(
            "OAuth realm=\"http://localhost/ws/v2.0/output.json/account\","
        ));
        assert!(header.contains("oauth_token=\"\""));
    }

    #[test]
    fn signing_failure_stops_the_build() {
        let client = Client::new(Secrets::new("", ""), Endpoint::Production);
        let err = client.get("/account").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
