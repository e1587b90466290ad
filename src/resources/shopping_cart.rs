use oauth1_request::signature_method::SignatureMethod;

use crate::{mapping, Client, Mapping, RequestBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
}

impl CartAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CartAction::Add => "add",
            CartAction::Remove => "remove",
        }
    }
}

/// Shipping address used for every reservation in the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    pub name: String,
    pub extra: Option<String>,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
}

impl From<&ShippingAddress> for Mapping {
    fn from(address: &ShippingAddress) -> Self {
        mapping! {
            "name" => address.name.clone(),
            "extra" => address.extra.clone().unwrap_or_default(),
            "street" => address.street.clone(),
            "zip" => address.zip.clone(),
            "city" => address.city.clone(),
            "country" => address.country.clone(),
        }
    }
}

/// `/shoppingcart` resources of the authenticated user.
pub struct ShoppingCart<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
}

impl<'c, TSignatureMethod> ShoppingCart<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>) -> Self {
        ShoppingCart { client }
    }

    pub fn get(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/shoppingcart")
    }

    /// Adds or removes several articles at once.
    ///
    /// Each article carries `idArticle` and `amount` (or `count`).
    pub fn bulk_edit(
        &self,
        action: CartAction,
        articles: Vec<Mapping>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.put("/shoppingcart").xml(mapping! {
            "action" => action.as_str(),
            "article" => articles,
        })
    }

    /// Without `amount` the server's default quantity applies.
    pub fn add(
        &self,
        article_id: u64,
        amount: Option<u32>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.bulk_edit(CartAction::Add, vec![article(article_id, amount)])
    }

    pub fn remove(
        &self,
        article_id: u64,
        amount: Option<u32>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.bulk_edit(CartAction::Remove, vec![article(article_id, amount)])
    }

    pub fn empty(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.delete("/shoppingcart")
    }

    /// Checks the cart out, paying from the account balance where possible.
    pub fn checkout(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.put("/shoppingcart/checkout")
    }

    /// The address is attached to the orders created at checkout.
    pub fn change_shipping_address(
        &self,
        address: &ShippingAddress,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put("/shoppingcart/shippingaddress")
            .xml(address.into())
    }

    pub fn get_shipping_methods(
        &self,
        reservation_id: u64,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/shoppingcart/shippingmethod/{}", reservation_id))
    }

    pub fn change_shipping_method(
        &self,
        reservation_id: u64,
        shipping_method_id: u64,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put(&format!("/shoppingcart/shippingmethod/{}", reservation_id))
            .xml(mapping! { "idShippingMethod" => shipping_method_id })
    }
}

fn article(article_id: u64, amount: Option<u32>) -> Mapping {
    let mut article = mapping! { "idArticle" => article_id };
    article.insert_some("amount", amount);
    article
}
