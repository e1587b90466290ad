use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use http::Method;
use oauth1_request::signature_method::SignatureMethod;
use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use url::Url;

use crate::header::decode_signature;
use crate::{
    ConfigError, ConfigResult, SecretsProvider, OAUTH_CONSUMER_KEY, OAUTH_KEY_PREFIX,
    OAUTH_NONCE_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY, REALM_KEY,
};

const OAUTH_SCHEME: &str = "OAuth ";
const NONCE_LENGTH: usize = 32;

/// Decides whether `oauth_token` takes part in the signature when no access
/// token is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPolicy {
    /// RFC 5849 behavior: an empty token is left out.
    OmitEmpty,
    /// `oauth_token` is always sent, as an empty string if need be.
    /// MKM answers 401 to widget apps that leave it out.
    AlwaysInclude,
}

impl TokenPolicy {
    /// `AlwaysInclude` for widget credentials (empty token and secret),
    /// `OmitEmpty` otherwise.
    pub fn for_secrets<T>(secrets: &T) -> Self
    where
        T: SecretsProvider + ?Sized,
    {
        if secrets.is_anonymous() {
            TokenPolicy::AlwaysInclude
        } else {
            TokenPolicy::OmitEmpty
        }
    }

    fn apply(self, token: &str) -> Option<&str> {
        match self {
            TokenPolicy::AlwaysInclude => Some(token),
            TokenPolicy::OmitEmpty if token.is_empty() => None,
            TokenPolicy::OmitEmpty => Some(token),
        }
    }
}

/// The `oauth_*` parameters of a single request, before encoding.
///
/// `oauth_signature_method` and `oauth_signature` are added by the signature
/// method itself and are not part of this set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolParameters<'a> {
    pub consumer_key: &'a str,
    pub nonce: Cow<'a, str>,
    pub timestamp: u64,
    pub token: Option<&'a str>,
    pub version: bool,
}

impl<'a> ProtocolParameters<'a> {
    /// Returns the parameters as key-value pairs in the order they are signed.
    pub fn pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut pairs = vec![
            (OAUTH_CONSUMER_KEY, Cow::Borrowed(self.consumer_key)),
            (OAUTH_NONCE_KEY, Cow::Borrowed(self.nonce.as_ref())),
            (OAUTH_TIMESTAMP_KEY, Cow::Owned(self.timestamp.to_string())),
        ];
        if let Some(token) = self.token {
            pairs.push((OAUTH_TOKEN_KEY, Cow::Borrowed(token)));
        }
        if self.version {
            pairs.push((OAUTH_VERSION_KEY, Cow::Borrowed("1.0")));
        }
        pairs
    }

    fn options(&self) -> Options<'_> {
        let mut opt = Options::new();

        // NOTE: items must be added by alphabetical order
        opt.nonce(self.nonce.as_ref());
        opt.timestamp(self.timestamp);
        if let Some(token) = self.token {
            opt.token(token);
        }
        opt.version(self.version);

        opt
    }
}

/// Produces `Authorization` header values MKM accepts.
#[derive(Debug, Clone)]
pub struct Signer<TSecretsProvider, TSignatureMethod = HmacSha1>
where
    TSecretsProvider: SecretsProvider,
    TSignatureMethod: SignatureMethod + Clone,
{
    secrets: TSecretsProvider,
    parameters: OAuthParameters<TSignatureMethod>,
    token_policy: TokenPolicy,
}

impl<TSecretsProvider, TSignatureMethod> Signer<TSecretsProvider, TSignatureMethod>
where
    TSecretsProvider: SecretsProvider,
    TSignatureMethod: SignatureMethod + Clone,
{
    /// Creates a signer. Unless `parameters` pins one, the token policy is
    /// picked from the credentials here, once.
    pub fn new(secrets: TSecretsProvider, parameters: OAuthParameters<TSignatureMethod>) -> Self {
        let token_policy = parameters
            .token_policy
            .unwrap_or_else(|| TokenPolicy::for_secrets(&secrets));
        Signer {
            secrets,
            parameters,
            token_policy,
        }
    }

    pub fn token_policy(&self) -> TokenPolicy {
        self.token_policy
    }

    pub fn secrets(&self) -> &TSecretsProvider {
        &self.secrets
    }

    /// Collects the protocol parameters for one request, with a fresh nonce
    /// and timestamp unless fixed ones were configured.
    ///
    /// # Errors
    ///
    /// Fails when the consumer key or consumer secret is empty.
    pub fn protocol_parameters(&self) -> ConfigResult<ProtocolParameters<'_>> {
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        if consumer_key.is_empty() {
            return Err(ConfigError::MissingCredential("consumer key"));
        }
        if consumer_secret.is_empty() {
            return Err(ConfigError::MissingCredential("consumer secret"));
        }
        let (token, _) = self.secrets.get_token_pair();

        let nonce = match self.parameters.nonce {
            Some(ref nonce) => Cow::Borrowed(nonce.as_str()),
            None => Cow::Owned(generate_nonce()),
        };
        let timestamp = self
            .parameters
            .timestamp
            .unwrap_or_else(current_timestamp);

        Ok(ProtocolParameters {
            consumer_key,
            nonce,
            timestamp,
            token: self.token_policy.apply(token),
            version: self.parameters.version,
        })
    }

    /// Computes the `Authorization` header value for `method` and `url`.
    ///
    /// Query parameters of `url` are part of the signature base string; the
    /// realm is `url` without its query.
    ///
    /// # Errors
    ///
    /// Fails before signing when the consumer key or consumer secret is empty.
    pub fn authorize(&self, method: &Method, url: &Url) -> ConfigResult<String> {
        let parameters = self.protocol_parameters()?;
        let options = parameters.options();
        let (_, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (_, token_secret) = self.secrets.get_token_pair();

        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        // destructure query and sort by alphabetical order
        let mut query: Vec<(Cow<str>, Cow<str>)> =
            url::form_urlencoded::parse(url.query().unwrap_or_default().as_bytes()).collect();
        query.sort();

        // divide items into the ones sorting before and after "oauth_*"
        let (query_before_oauth, query_after_oauth): (Vec<_>, Vec<_>) = query
            .into_iter()
            .filter(|(key, _)| !key.starts_with(OAUTH_KEY_PREFIX))
            .partition(|(key, _)| &**key < OAUTH_KEY_PREFIX);

        // Step 0. instantiate sign generator
        let mut signer = OAuthSigner::with_signature_method(
            self.parameters.signature_method.clone(),
            method.as_str(),
            base_url.clone(),
            consumer_secret,
            Some(token_secret),
        );
        // Step 1. key [a ~ oauth_)
        for (key, value) in &query_before_oauth {
            signer.parameter(&**key, &**value);
        }
        // Step 2. add oauth_* parameters
        let mut signer = signer.oauth_parameters(parameters.consumer_key, &options);
        // Step 3. key (oauth_ ~ z]
        for (key, value) in &query_after_oauth {
            signer.parameter(&**key, &**value);
        }

        let authorization = signer.finish().authorization;
        let realm = match self.parameters.realm {
            Some(ref realm) => realm.as_str(),
            None => base_url.as_str(),
        };
        let authorization = with_realm(&authorization, realm);

        Ok(decode_signature(&authorization).into_owned())
    }
}

// OAuth oauth_...  ->  OAuth realm="realm",oauth_...
fn with_realm(authorization: &str, realm: &str) -> String {
    match authorization.strip_prefix(OAUTH_SCHEME) {
        Some(params) => format!("{}{}=\"{}\",{}", OAUTH_SCHEME, REALM_KEY, realm, params),
        None => format!("{},{}=\"{}\"", authorization, REALM_KEY, realm),
    }
}

fn generate_nonce() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct OAuthParameters<TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    nonce: Option<String>,
    realm: Option<String>,
    signature_method: TSignatureMethod,
    timestamp: Option<u64>,
    token_policy: Option<TokenPolicy>,
    version: bool,
}

impl Default for OAuthParameters<HmacSha1> {
    fn default() -> Self {
        OAuthParameters {
            nonce: None,
            realm: None,
            signature_method: HmacSha1,
            timestamp: None,
            token_policy: None,
            version: true,
        }
    }
}

impl OAuthParameters<HmacSha1> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<T> OAuthParameters<T>
where
    T: SignatureMethod + Clone,
{
    /// Fixes the oauth_nonce value instead of drawing a fresh one per request.
    ///
    /// # Note
    /// MKM rejects a reused nonce. This is meant for reproducing signatures.
    pub fn nonce<N>(self, nonce: N) -> Self
    where
        N: Into<String>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the realm value (defaults to the request URL without its query)
    pub fn realm<R>(self, realm: R) -> Self
    where
        R: Into<String>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// Fixes the oauth_timestamp value instead of reading the clock per request.
    pub fn timestamp<TS>(self, timestamp: TS) -> Self
    where
        TS: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// Overrides the token policy otherwise derived from the credentials.
    pub fn token_policy(self, token_policy: TokenPolicy) -> Self {
        OAuthParameters {
            token_policy: Some(token_policy),
            ..self
        }
    }

    /// set the oauth_version value (boolean)
    ///
    /// # Note
    /// When the version has value `true` (the default), oauth_version will be
    /// set with "1.0". Otherwise, oauth_version will not be included in your request.
    pub fn version(self, version: bool) -> Self {
        OAuthParameters { version, ..self }
    }

    pub fn signature_method<TSignatureMethod>(
        self,
        signature_method: TSignatureMethod,
    ) -> OAuthParameters<TSignatureMethod>
    where
        TSignatureMethod: SignatureMethod + Clone,
    {
        OAuthParameters {
            signature_method,
            nonce: self.nonce,
            realm: self.realm,
            timestamp: self.timestamp,
            token_policy: self.token_policy,
            version: self.version,
        }
    }
}
