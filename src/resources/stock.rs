use http::Method;
use oauth1_request::signature_method::SignatureMethod;
use serde::Serialize;

use super::{path_segment, Condition};
use crate::{mapping, Client, Mapping, RequestBuilder};

/// What [`Stock::bulk_modify`] does with the articles; each action maps to
/// its own HTTP method on `/stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    Add,
    Change,
    Remove,
}

impl StockAction {
    pub fn method(self) -> Method {
        match self {
            StockAction::Add => Method::POST,
            StockAction::Change => Method::PUT,
            StockAction::Remove => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increase,
    Decrease,
}

impl QuantityChange {
    fn path(self) -> &'static str {
        match self {
            QuantityChange::Increase => "/stock/increase",
            QuantityChange::Decrease => "/stock/decrease",
        }
    }
}

/// Properties of a stock article.
///
/// A change replaces every property, so unchanged ones must be given again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDetails {
    pub language_id: u32,
    /// In EUR.
    pub price: f64,
    pub comments: String,
    pub condition: Option<Condition>,
    pub is_foil: bool,
    pub is_signed: bool,
    pub is_altered: bool,
    pub is_playset: bool,
    pub is_first_ed: bool,
}

impl ArticleDetails {
    fn into_article(self, id_tag: &'static str, id: u64, count: u32) -> Mapping {
        let mut article = mapping! {
            id_tag => id,
            "count" => count,
            "idLanguage" => self.language_id,
            "comments" => self.comments,
            "price" => self.price,
            "isFoil" => self.is_foil,
            "isSigned" => self.is_signed,
            "isAltered" => self.is_altered,
            "isPlayset" => self.is_playset,
            "isFirstEd" => self.is_first_ed,
        };
        article.insert_some("condition", self.condition.map(Condition::as_str));
        article
    }
}

#[derive(Serialize)]
struct StockQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockFileQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    id_game: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_sealed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_language: Option<u32>,
}

/// `/stock` resources: the articles the authenticated user sells.
pub struct Stock<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
}

impl<'c, TSignatureMethod> Stock<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>) -> Self {
        Stock { client }
    }

    /// With `start`, only 100 entities beginning at that offset are returned.
    pub fn get_stock(&self, start: Option<u32>) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/stock").query(&StockQuery { start })
    }

    pub fn bulk_modify(
        &self,
        action: StockAction,
        articles: Vec<Mapping>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .request(action.method(), "/stock")
            .xml(mapping! { "article" => articles })
    }

    pub fn add_product(
        &self,
        product_id: u64,
        count: u32,
        details: ArticleDetails,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        let article = details.into_article("idProduct", product_id, count);
        self.bulk_modify(StockAction::Add, vec![article])
    }

    /// `count` is the number of copies the change applies to, not the new
    /// quantity; see [`change_quantity`](Stock::change_quantity) for that.
    pub fn change_article(
        &self,
        article_id: u64,
        count: u32,
        details: ArticleDetails,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        let article = details.into_article("idArticle", article_id, count);
        self.bulk_modify(StockAction::Change, vec![article])
    }

    pub fn remove_article(
        &self,
        article_id: u64,
        count: u32,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.bulk_modify(
            StockAction::Remove,
            vec![mapping! {
                "idArticle" => article_id,
                "count" => count,
            }],
        )
    }

    /// Answers with a base64 encoded, gzipped CSV of the stock.
    ///
    /// Server defaults (game 1, singles, English) are not sent.
    pub fn get_stock_as_file(
        &self,
        game_id: u32,
        is_sealed: bool,
        language_id: u32,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/stock/file").query(&StockFileQuery {
            id_game: Some(game_id).filter(|&id| id > 1),
            is_sealed: Some(is_sealed).filter(|&sealed| sealed),
            id_language: Some(language_id).filter(|&id| id > 1),
        })
    }

    pub fn get_article(&self, article_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/stock/article/{}", article_id))
    }

    /// Articles of the user's stock currently sitting in other users' carts.
    pub fn get_in_shopping_carts(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/stock/shoppingcart-articles")
    }

    /// `name` should be the English product name. A `game_id` of 0 finds
    /// accessories not tied to a game.
    pub fn find_articles(
        &self,
        name: &str,
        game_id: u32,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/stock/articles/{}/{}", path_segment(name), game_id))
    }

    /// Increasing may partially fail; failed articles are listed under
    /// `failed` in the response.
    pub fn change_quantity(
        &self,
        change: QuantityChange,
        articles: Vec<Mapping>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put(change.path())
            .xml(mapping! { "article" => articles })
    }
}
