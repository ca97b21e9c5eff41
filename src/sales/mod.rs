pub mod contact;
pub mod contact_form;
pub mod contacts_backend;
pub mod contacts_page;
pub mod api_client;
pub mod memory_backend;

pub use self::{
    contact::{Contact, ContactBuilder, ContactId},
    contact_form::{ContactForm, FormField, FormPart, LicenseFile},
    contacts_backend::ContactsBackend,
    contacts_page::{ContactsPage, Modal, Confirm, DocumentViewer},
    api_client::APIClient,
    memory_backend::{MemoryBackend, Request},
};

#[cfg(test)]
mod unitests;
