/*!
reqwest-mkm: reqwest ♡ the MKM (Cardmarket) API.

# Overview

This library is a client for the MKM marketplace API v2.0 built on top of
[reqwest](https://crates.io/crates/reqwest). Every request is signed with
OAuth 1.0a (HMAC-SHA1) by way of the
[oauth1-request](https://crates.io/crates/oauth1-request) crate, with the
header tweaks the MKM server expects, and request bodies are written as the
`<request>` XML documents the API consumes.

Responses are handed back as they are: only non-2xx statuses are turned
into errors.

# How to use

## Basic usecase 1 - reading the account

```no_run
# async fn run() -> reqwest_mkm::Result<()> {
use reqwest_mkm::{Client, Endpoint, Secrets};

let secrets = Secrets::new("[APP_TOKEN]", "[APP_SECRET]")
    .token("[ACCESS_TOKEN]", "[ACCESS_TOKEN_SECRET]");
let client = Client::new(secrets, Endpoint::Sandbox);

let resp = client.account().get_account().send().await?;
println!("{}", resp.text().await?);
# Ok(())
# }
```

## Basic usecase 2 - editing the shopping cart with an XML body

```no_run
# async fn run() -> reqwest_mkm::Result<()> {
use reqwest_mkm::{mapping, Client, Endpoint};

// reads MKM_APP_TOKEN, MKM_APP_SECRET, MKM_ACCESS_TOKEN and MKM_ACCESS_TOKEN_SECRET;
// widget apps set the last two to empty strings
let client = Client::from_env(Endpoint::Production)?;

let resp = client
    .put("/shoppingcart")
    .xml(mapping! {
        "action" => "add",
        "article" => vec![
            mapping! { "idArticle" => 1, "amount" => 1 },
            mapping! { "idArticle" => 2, "amount" => 3 },
        ],
    })
    .send()
    .await?;
# Ok(())
# }
```

## Basic usecase 3 - plugging into an existing reqwest client

```no_run
# async fn run() -> reqwest_mkm::Result<()> {
use std::time::Duration;
use reqwest_mkm::{Endpoint, MkmClientProvider, Secrets};

let client = reqwest::Client::builder()
    .timeout(Duration::from_secs(30))
    .build()?
    .mkm(Secrets::new("[APP_TOKEN]", "[APP_SECRET]"), Endpoint::Production);

let resp = client
    .get("/stock")
    .query(&[("start", 100)])
    .send()
    .await?;
# Ok(())
# }
```
*/
mod client;
mod endpoint;
mod error;
mod header;
mod request;
pub mod resources;
mod secrets;
pub mod serializer;
mod signer;
#[cfg(test)]
mod test_support;
mod value;

// exposed to external program
pub use client::{Client, MkmClientProvider};
pub use endpoint::{Endpoint, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use error::{
    ConfigError, ConfigResult, Error, ProtocolError, Result, SerializationError,
    SerializationResult,
};
pub use header::decode_signature;
pub use request::{Body, RequestBuilder};
pub use secrets::{
    Secrets, SecretsProvider, ACCESS_TOKEN_SECRET_VAR, ACCESS_TOKEN_VAR, APP_SECRET_VAR,
    APP_TOKEN_VAR,
};
pub use signer::{OAuthParameters, ProtocolParameters, Signer, TokenPolicy};
pub use value::{Mapping, Value};

// exposed constant variables
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
