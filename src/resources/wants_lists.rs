use oauth1_request::signature_method::SignatureMethod;

use crate::{mapping, Client, Mapping, RequestBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WantsListAction {
    AddItem,
    EditItem,
    DeleteItem,
}

impl WantsListAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WantsListAction::AddItem => "addItem",
            WantsListAction::EditItem => "editItem",
            WantsListAction::DeleteItem => "deleteItem",
        }
    }
}

/// The kind of items a wants list edit refers to. `Want` is an item that is
/// already on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WantsListCategory {
    Product,
    Metaproduct,
    Want,
}

impl WantsListCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            WantsListCategory::Product => "product",
            WantsListCategory::Metaproduct => "metaproduct",
            WantsListCategory::Want => "want",
        }
    }
}

/// `/wantslist` resources.
pub struct WantsLists<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    client: &'c Client<TSignatureMethod>,
}

impl<'c, TSignatureMethod> WantsLists<'c, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    pub(crate) fn new(client: &'c Client<TSignatureMethod>) -> Self {
        WantsLists { client }
    }

    pub fn get_all(&self) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get("/wantslist")
    }

    pub fn get(&self, wants_list_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.get(&format!("/wantslist/{}", wants_list_id))
    }

    pub fn create(&self, name: &str, game_id: u32) -> RequestBuilder<'c, TSignatureMethod> {
        self.client.post("/wantslist").xml(mapping! {
            "wantslist" => vec![mapping! {
                "name" => name,
                "idGame" => game_id,
            }],
        })
    }

    pub fn rename(&self, wants_list_id: u64, name: &str) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put(&format!("/wantslist/{}", wants_list_id))
            .xml(mapping! {
                "action" => "editWantslist",
                "name" => name,
            })
    }

    /// Deletes the list together with all of its items.
    pub fn delete(&self, wants_list_id: u64) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .delete(&format!("/wantslist/{}", wants_list_id))
            .xml(mapping! { "action" => "deleteWantslist" })
    }

    pub fn bulk_edit(
        &self,
        wants_list_id: u64,
        action: WantsListAction,
        category: WantsListCategory,
        items: Vec<Mapping>,
    ) -> RequestBuilder<'c, TSignatureMethod> {
        self.client
            .put(&format!("/wantslist/{}", wants_list_id))
            .xml(mapping! {
                "action" => action.as_str(),
                category.as_str() => items,
            })
    }
}
