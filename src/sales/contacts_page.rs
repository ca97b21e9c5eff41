use std::fmt;
use log::{debug, info, warn, error};

use crate::{
    Error,
    error::Result,
    core::token_store::CredentialSource,
};

use super::{
    contact::{Contact, ContactId},
    contact_form::ContactForm,
    contacts_backend::ContactsBackend,
};

/// Lifecycle of the create/edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Create,
    Edit(ContactId),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn bound_id(&self) -> Option<ContactId> {
        match self {
            Modal::Edit(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modal::Closed   => write!(f, "closed"),
            Modal::Create   => write!(f, "add contact"),
            Modal::Edit(id) => write!(f, "edit contact {}", id),
        }
    }
}

/// Blocking yes/no question asked before a destructive action.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Opens a stored document url outside of the page.
pub trait DocumentViewer {
    fn open(&self, url: &str) -> Result<()>;
}

/// View-controller of the contacts page: the fetched list, the filter over
/// it, and the create/edit modal with its edit buffer.
///
/// The held list is only ever replaced by a full fetch from the backend,
/// never patched locally after a mutation.
pub struct ContactsPage<B, C> {
    backend     : B,
    credentials : C,

    contacts    : Vec<Contact>,
    filter      : String,

    modal       : Modal,
    form        : ContactForm,
}

impl<B, C> ContactsPage<B, C>
where
    B: ContactsBackend,
    C: CredentialSource,
{
    pub fn new(backend: B, credentials: C) -> Self {
        Self {
            backend,
            credentials,
            contacts    : Vec::new(),
            filter      : String::new(),
            modal       : Modal::Closed,
            form        : ContactForm::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Initial population of the table.
    pub async fn mount(&mut self) -> Result<()> {
        self.refresh().await
    }

    /// Replaces the held list with the backend's. On failure the previous
    /// list stays as it was; the error is logged and handed back untouched.
    pub async fn refresh(&mut self) -> Result<()> {
        let token = self.credentials.token();
        match self.backend.contacts(token.as_deref()).await {
            Ok(contacts) => {
                debug!("Fetched {} contacts", contacts.len());
                self.contacts = contacts;
                Ok(())
            },
            Err(e) => {
                warn!("Fetching contacts error: {e}");
                Err(e)
            }
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|v| v.id() == id)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    /// Rows shown in the table, in fetched order.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.contacts.iter()
            .filter(|v| v.matches_company(&self.filter))
            .collect()
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn open_create(&mut self) {
        self.form.clear();
        self.modal = Modal::Create;
    }

    pub fn open_edit(&mut self, id: ContactId) -> Result<()> {
        let Some(contact) = self.contact(id) else {
            return Err(Error::NotFound(format!("No contact with id {} in the list", id)));
        };

        self.form = ContactForm::from_contact(contact);
        self.modal = Modal::Edit(id);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.form.clear();
        self.modal = Modal::Closed;
    }

    /// Sends the edit buffer as a create (no bound id) or an update of the
    /// bound record. On success the modal closes and the list is re-fetched;
    /// on failure the modal stays open with the buffer as typed.
    pub async fn submit(&mut self) -> Result<Contact> {
        let creating = match self.modal {
            Modal::Closed => return Err(Error::State("No contact form is open".into())),
            Modal::Create => true,
            Modal::Edit(_) => false,
        };

        if let Err(e) = self.form.validate(creating) {
            warn!("Contact form ({}) rejected: {e}", self.modal);
            return Err(e);
        }

        let token = self.credentials.token();
        let parts = self.form.to_parts();
        let result = match self.modal.bound_id() {
            Some(id) => self.backend.update_contact(token.as_deref(), id, parts).await,
            None => self.backend.create_contact(token.as_deref(), parts).await,
        };

        let contact = match result {
            Ok(v) => v,
            Err(e) => {
                error!("Submitting contact ({}) error: {e}", self.modal);
                return Err(e);
            }
        };

        info!("Contact {} {}.", contact.id(), if creating { "created" } else { "updated" });
        self.close_modal();

        // Already logged; the mutation itself succeeded.
        _ = self.refresh().await;
        Ok(contact)
    }

    /// Deletes record `id` once `confirm` agrees. Returns whether a delete
    /// was issued and accepted by the backend.
    pub async fn remove(&mut self, id: ContactId, confirm: &dyn Confirm) -> Result<bool> {
        let name = self.contact(id).map(|v| v.company_name().to_string());
        let question = match name {
            Some(name) => format!("Are you sure you want to delete contact {} ({})?", id, name),
            None => format!("Are you sure you want to delete contact {}?", id),
        };

        if !confirm.confirm(&question) {
            debug!("Deleting contact {} declined", id);
            return Ok(false);
        }

        let token = self.credentials.token();
        if let Err(e) = self.backend.remove_contact(token.as_deref(), id).await {
            error!("Deleting contact {} error: {e}", id);
            return Err(e);
        }

        info!("Contact {} deleted.", id);
        _ = self.refresh().await;
        Ok(true)
    }

    pub fn view_license(&self, id: ContactId, viewer: &dyn DocumentViewer) -> Result<()> {
        let Some(contact) = self.contact(id) else {
            return Err(Error::NotFound(format!("No contact with id {} in the list", id)));
        };

        let Some(url) = contact.license_file() else {
            return Err(Error::State(format!("Contact {} has no license document", id)));
        };

        viewer.open(url).map_err(|e| {
            warn!("Opening license document {} error: {e}", url);
            e
        })
    }
}
