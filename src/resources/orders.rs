use std::fmt;

use oauth1_request::signature_method::SignatureMethod;

use crate::{mapping, Client, Mapping, RequestBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderActor {
    Seller,
    Buyer,
}

impl fmt::Display for OrderActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderActor::Seller => "seller",
            OrderActor::Buyer => "buyer",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Bought,
    Paid,
    Sent,
    Received,
    Lost,
    Cancelled,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderState::Bought => "bought",
            OrderState::Paid => "paid",
            OrderState::Sent => "sent",
            OrderState::Received => "received",
            OrderState::Lost => "lost",
            OrderState::Cancelled => "cancelled",
        })
    }
}

/// A state change of an order.
///
/// `relist_items` is only honoured when the seller performs the action.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    Send,
    ConfirmReception,
    Cancel,
    RequestCancellation {
        reason: String,
        relist_items: Option<bool>,
    },
    AcceptCancellation {
        relist_items: Option<bool>,
    },
}

impl OrderAction {
    fn into_mapping(self) -> Mapping {
        match self {
            OrderAction::Send => mapping! { "action" => "send" },
            OrderAction::ConfirmReception => mapping! { "action" => "confirmReception" },
            OrderAction::Cancel => mapping! { "action" => "cancel" },
            OrderAction::RequestCancellation {
                reason,
                relist_items,
            } => {
                let mut mapping = mapping! {
                    "action" => "requestCancellation",
                    "reason" => reason,
                };
                mapping.insert_some("relistItems", relist_items);
                mapping
            }
            OrderAction::AcceptCancellation { relist_items } => {
                let mut mapping = mapping! { "action" => "acceptCancellation" };
                mapping.insert_some("relistItems", relist_items);
                mapping
            }
        }
    }
}

/// An order evaluation.
///
/// Grades are 1 (very good) to 4 (bad), or 10 for not applicable.
/// `complaints` are the server's pre-defined complaint strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub grade: u8,
    pub item_description: u8,
    pub packaging: u8,
    pub comment: String,
    pub complaints: Vec<String>,
}

impl From<Evaluation> for Mapping {
    fn from(evaluation: Evaluation) -> Self {
        mapping! {
            "evaluationGrade" => evaluation.grade,
            "itemDescription" => evaluation.item_description,
            "packaging" => evaluation.packaging,
            "comment" => evaluation.comment,
            "complaint" => evaluation.complaints,
        }
    }
}

/// `/order` and `/orders` resources.
pub struct Orders<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
}

impl<'c, TSignatureMethod> Orders<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>) -> Self {
        Orders { client }
    }

    pub fn get(&self, order_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/order/{}", order_id))
    }

    /// Orders of the authenticated user by role and state.
    ///
    /// With `start`, only 100 entities beginning at that offset are returned.
    /// Results over 1000 entities answer with a temporary redirect.
    pub fn filter(
        &self,
        actor: OrderActor,
        state: OrderState,
        start: Option<u32>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        let path = match start {
            Some(start) => format!("/orders/{}/{}/{}", actor, state, start),
            None => format!("/orders/{}/{}", actor, state),
        };
        self.client.get(&path)
    }

    pub fn modify(
        &self,
        order_id: u64,
        action: OrderAction,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put(&format!("/order/{}", order_id))
            .xml(action.into_mapping())
    }

    pub fn set_tracking_number(
        &self,
        order_id: u64,
        tracking_number: &str,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put(&format!("/order/{}/tracking", order_id))
            .xml(mapping! { "trackingNumber" => tracking_number })
    }

    pub fn evaluate(
        &self,
        order_id: u64,
        evaluation: Evaluation,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .post(&format!("/order/{}/evaluation", order_id))
            .xml(evaluation.into())
    }
}
