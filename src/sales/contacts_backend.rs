use crate::error::Result;

use super::{
    contact::{Contact, ContactId},
    contact_form::FormPart,
};

/// Remote owner of the contact records. `token` is the bearer credential
/// for this call, `None` when no credential is stored.
#[allow(async_fn_in_trait)]
pub trait ContactsBackend {
    async fn contacts(&self, token: Option<&str>) -> Result<Vec<Contact>>;
    async fn create_contact(&self, token: Option<&str>, parts: Vec<FormPart>) -> Result<Contact>;
    async fn update_contact(&self, token: Option<&str>, id: ContactId, parts: Vec<FormPart>) -> Result<Contact>;
    async fn remove_contact(&self, token: Option<&str>, id: ContactId) -> Result<()>;
}
