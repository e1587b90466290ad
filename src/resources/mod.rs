//! Thin wrappers mapping MKM resources onto signed requests.
//!
//! Every method returns a [`RequestBuilder`](crate::RequestBuilder); call
//! `.send().await` on it to perform the request.
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

mod account;
mod marketplace;
mod orders;
mod shopping_cart;
mod stock;
mod wants_lists;

pub use account::Account;
pub use marketplace::{ArticleFilter, Condition, Marketplace, Page, UserType};
pub use orders::{Evaluation, OrderAction, OrderActor, OrderState, Orders};
pub use shopping_cart::{CartAction, ShippingAddress, ShoppingCart};
pub use stock::{ArticleDetails, QuantityChange, Stock, StockAction};
pub use wants_lists::{WantsListAction, WantsListCategory, WantsLists};

// https://url.spec.whatwg.org/#path-percent-encode-set, plus `/` and `%`
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encodes a caller-supplied value so that it stays a single path segment.
pub(crate) fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_escapes_separators() {
        assert_eq!(path_segment("Black Lotus"), "Black%20Lotus");
        assert_eq!(path_segment("Fire // Ice"), "Fire%20%2F%2F%20Ice");
        assert_eq!(path_segment("what?#100%"), "what%3F%23100%25");
        assert_eq!(path_segment("Æther Vial"), "%C3%86ther%20Vial");
        assert_eq!(path_segment("karno"), "karno");
    }
}
