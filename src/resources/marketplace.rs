use oauth1_request::signature_method::SignatureMethod;
use serde::Serialize;

use super::path_segment;
use crate::{Client, Error, RequestBuilder};

/// A page of results: `max_results` entities starting at `start`.
///
/// The server ignores either value without the other, so they only come
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: u32,
    pub max_results: u32,
}

impl Page {
    pub fn new(start: u32, max_results: u32) -> Self {
        Page { start, max_results }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

impl From<Option<Page>> for PageQuery {
    fn from(page: Option<Page>) -> Self {
        PageQuery {
            start: page.map(|p| p.start),
            max_results: page.map(|p| p.max_results),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Private,
    /// All commercial sellers, powersellers included.
    Commercial,
    Powerseller,
}

/// Article condition, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Condition {
    #[serde(rename = "MT")]
    Mint,
    #[serde(rename = "NM")]
    NearMint,
    #[serde(rename = "EX")]
    Excellent,
    #[serde(rename = "GD")]
    Good,
    #[serde(rename = "LP")]
    LightPlayed,
    #[serde(rename = "PL")]
    Played,
    #[serde(rename = "PO")]
    Poor,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Mint => "MT",
            Condition::NearMint => "NM",
            Condition::Excellent => "EX",
            Condition::Good => "GD",
            Condition::LightPlayed => "LP",
            Condition::Played => "PL",
            Condition::Poor => "PO",
        }
    }
}

/// Filters for [`Marketplace::get_articles_for_product`]. Unset fields are
/// not sent; an unset flag matches both values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    /// 1 (outstanding) to 5 (bad).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_user_score: Option<u8>,
    #[serde(rename = "idLanguage", skip_serializing_if = "Option::is_none")]
    pub language_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_foil: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_signed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_altered: Option<bool>,
    /// Counts every copy of the seller matching the other filters, so
    /// single articles may still have a lower count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_available: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery<'a> {
    search: &'a str,
    exact: bool,
    id_game: u32,
    id_language: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceGuideQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    id_game: Option<u32>,
}

/// Marketplace information: games, expansions, products, articles and users.
pub struct Marketplace<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
}

impl<'c, TSignatureMethod> Marketplace<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>) -> Self {
        Marketplace { client }
    }

    pub fn get_games(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/games")
    }

    /// Expansions with single cards for a game.
    pub fn get_expansion(&self, game_id: u32) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/games/{}/expansions", game_id))
    }

    pub fn get_expansion_singles(&self, expansion_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/expansions/{}/singles", expansion_id))
    }

    pub fn get_product(&self, product_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/products/{}", product_id))
    }

    /// Answers with a base64 encoded, gzipped CSV of all products.
    pub fn get_product_list(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/productlist")
    }

    /// Answers with a base64 encoded, gzipped CSV of the price guide.
    ///
    /// Game 1 (Magic) is the server default and is not sent. The file is
    /// regenerated every two hours; fetching it more often answers 429.
    pub fn get_price_guide(&self, game_id: u32) -> RequestBuilder<'c, TSignatureMethod> {
        let id_game = if game_id > 1 { Some(game_id) } else { None };
        self.client
            .get("/priceguide")
            .query(&PriceGuideQuery { id_game })
    }

    pub fn find_products(
        &self,
        search: &str,
        exact: bool,
        game_id: u32,
        language_id: u32,
        page: Option<Page>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .get("/products/find")
            .query(&SearchQuery {
                search,
                exact,
                id_game: game_id,
                id_language: language_id,
            })
            .query(&PageQuery::from(page))
    }

    /// Results over 1000 entities answer with a temporary redirect.
    pub fn get_articles_for_product(
        &self,
        product_id: u64,
        page: Option<Page>,
        filter: &ArticleFilter,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        let builder = self.client.get(&format!("/articles/{}", product_id));
        if let Some(score) = filter.min_user_score {
            if !(1..=5).contains(&score) {
                return builder.fail(Error::InvalidArgument(format!(
                    "minimum user score must be between 1 and 5, got {}",
                    score
                )));
            }
        }
        builder
            .query(&[("idProduct", product_id)])
            .query(&PageQuery::from(page))
            .query(filter)
    }

    pub fn get_metaproduct(&self, metaproduct_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/metaproducts/{}", metaproduct_id))
    }

    pub fn find_metaproducts(
        &self,
        search: &str,
        exact: bool,
        game_id: u32,
        language_id: u32,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/metaproducts/find").query(&SearchQuery {
            search,
            exact,
            id_game: game_id,
            id_language: language_id,
        })
    }

    /// `user` is either the numeric ID or the exact user name.
    pub fn get_user(&self, user: &str) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/users/{}", path_segment(user)))
    }

    /// At most 50 users are returned; `search` needs at least 3 characters.
    pub fn find_users(&self, search: &str) -> RequestBuilder<'c, TSignatureMethod> {
        let builder = self.client.get("/users/find");
        if search.chars().count() < 3 {
            return builder.fail(Error::InvalidArgument(format!(
                "user search needs at least 3 characters, got {:?}",
                search
            )));
        }
        builder.query(&[("search", search)])
    }

    pub fn get_articles_for_user(
        &self,
        user: &str,
        game_id: u32,
        page: Option<Page>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .get(&format!("/users/{}/articles", path_segment(user)))
            .query(&[("idUser", user)])
            .query(&[("idGame", game_id)])
            .query(&PageQuery::from(page))
    }
}
