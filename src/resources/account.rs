use oauth1_request::signature_method::SignatureMethod;
use serde::Serialize;

use super::path_segment;
use crate::{mapping, Client, Error, RequestBuilder};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VacationQuery {
    on_vacation: bool,
    cancel_orders: bool,
    relist_items: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    unread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
}

/// `/account` resources of the authenticated user.
pub struct Account<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
}

impl<'c, TSignatureMethod> Account<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>) -> Self {
        Account { client }
    }

    pub fn get_account(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/account")
    }

    /// `relist_items` only applies to orders that actually get cancelled.
    pub fn change_vacation_status(
        &self,
        on_vacation: bool,
        cancel_orders: bool,
        relist_items: bool,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.put("/account/vacation").query(&VacationQuery {
            on_vacation,
            cancel_orders,
            relist_items,
        })
    }

    /// 1: English, 2: French, 3: German, 4: Spanish, 5: Italian.
    pub fn change_display_language(&self, language: u8) -> RequestBuilder<'c, TSignatureMethod> {
        let builder = self.client.put("/account/language");
        if !(1..=5).contains(&language) {
            return builder.fail(Error::InvalidArgument(format!(
                "display language must be between 1 and 5, got {}",
                language
            )));
        }
        builder.query(&[("idDisplayLanguage", language)])
    }

    pub fn get_message_overview(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/account/messages")
    }

    /// The whole message thread with another user.
    pub fn get_messages_from(&self, other_user_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/account/messages/{}", other_user_id))
    }

    pub fn get_message_from(
        &self,
        other_user_id: u64,
        message_id: &str,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&message_path(other_user_id, message_id))
    }

    /// The message is only deleted for the authenticated user.
    pub fn delete_message(
        &self,
        other_user_id: u64,
        message_id: &str,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.delete(&message_path(other_user_id, message_id))
    }

    pub fn delete_messages_from(&self, other_user_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.delete(&format!("/account/messages/{}", other_user_id))
    }

    /// Only messages the authenticated user received.
    pub fn get_unread_messages(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/account/messages/find").query(&MessageQuery {
            unread: Some(true),
            start_date: None,
            end_date: None,
        })
    }

    /// Dates are best given in ISO 8601 (`2017-12-08T14:41:12+0100`). Without
    /// `end_date` the server assumes the current date.
    pub fn get_messages_between(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/account/messages/find").query(&MessageQuery {
            unread: None,
            start_date: Some(start_date),
            end_date,
        })
    }

    /// Use `\n` for line breaks in `message`.
    pub fn send_message(
        &self,
        other_user_id: u64,
        message: &str,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .post(&format!("/account/messages/{}", other_user_id))
            .xml(mapping! { "message" => message })
    }

    pub fn redeem_coupon(&self, coupon_code: &str) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .post("/account/coupon")
            .xml(mapping! { "couponCode" => coupon_code })
    }
}

fn message_path(other_user_id: u64, message_id: &str) -> String {
    format!("/account/messages/{}/{}", other_user_id, path_segment(message_id))
}
