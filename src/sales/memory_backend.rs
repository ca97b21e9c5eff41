use std::cell::{Cell, RefCell};
use chrono::NaiveDate;
use log::debug;

use crate::{
    Error,
    error::Result,
};

use super::{
    contact::{Contact, ContactBuilder, ContactId},
    contact_form::{FormField, FormPart, LICENSE_FILE_FIELD},
    contacts_backend::ContactsBackend,
};

const FILES_URL: &str = "memory://licenses";

/// A request received by [`MemoryBackend`], kept in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    List   { token: Option<String> },
    Create { token: Option<String>, parts: Vec<FormPart> },
    Update { token: Option<String>, id: ContactId, parts: Vec<FormPart> },
    Remove { token: Option<String>, id: ContactId },
}

impl Request {
    pub fn token(&self) -> Option<&str> {
        match self {
            Request::List { token }         => token.as_deref(),
            Request::Create { token, .. }   => token.as_deref(),
            Request::Update { token, .. }   => token.as_deref(),
            Request::Remove { token, .. }   => token.as_deref(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Request::List { .. })
    }
}

/// In-process stand-in for the sales backend: records live in memory and
/// every request is journaled. An expected token, when set, is enforced the
/// way the real service enforces bearer authorization.
pub struct MemoryBackend {
    records     : RefCell<Vec<Contact>>,
    requests    : RefCell<Vec<Request>>,
    next_id     : Cell<u64>,

    token       : Option<String>,
    offline     : Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            records     : RefCell::new(Vec::new()),
            requests    : RefCell::new(Vec::new()),
            next_id     : Cell::new(1),
            token       : None,
            offline     : Cell::new(false),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_contacts(self, contacts: Vec<Contact>) -> Self {
        let next = contacts.iter().map(|v| v.id().as_u64()).max().unwrap_or(0) + 1;
        self.next_id.set(next);
        *self.records.borrow_mut() = contacts;
        self
    }

    /// While offline every request fails as a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn records(&self) -> Vec<Contact> {
        self.records.borrow().clone()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    fn admit(&self, request: Request) -> Result<()> {
        let token = request.token().map(|v| v.to_string());
        self.requests.borrow_mut().push(request);

        if self.offline.get() {
            return Err(Error::Network("Http error: sending http request error: connection refused".into()));
        }

        match self.token.as_ref() {
            Some(expected) if token.as_ref() != Some(expected) => {
                Err(Error::Permission("Http error: unauthorized (401) invalid token".into()))
            },
            _ => Ok(())
        }
    }

    fn position(&self, id: ContactId) -> Result<usize> {
        self.records.borrow().iter().position(|v| v.id() == id).ok_or_else(|| {
            Error::NotFound(format!("Http error: resource not found contact {}", id))
        })
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuilds a record out of a submitted form; `stored_file` is kept when the
/// form carries no document entry.
fn contact_from_parts(id: ContactId, parts: &[FormPart], stored_file: Option<&str>) -> Result<Contact> {
    let text = |field: FormField| -> Result<String> {
        parts.iter().find_map(|part| match part {
            FormPart::Text { name, value } if *name == field.name() => Some(value.clone()),
            _ => None,
        })
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Argument(format!("Http error: rejected by server (400) {} is required", field.name())))
    };

    let date = text(FormField::LicenseExpiryDate)?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        Error::Argument(format!("Http error: rejected by server (400) license_expiry_date {e}"))
    })?;

    let uploaded = parts.iter().find_map(|part| match part {
        FormPart::File { name, file } if *name == LICENSE_FILE_FIELD => {
            Some(format!("{}/{}/{}", FILES_URL, id, file.file_name()))
        },
        _ => None,
    });

    let mut builder = ContactBuilder::new(id);
    builder.with_company_name(&text(FormField::CompanyName)?)
        .with_contact_name(&text(FormField::ContactName)?)
        .with_company_email(&text(FormField::CompanyEmail)?)
        .with_contact_email(&text(FormField::ContactEmail)?)
        .with_company_number(&text(FormField::CompanyNumber)?)
        .with_contact_number(&text(FormField::ContactNumber)?)
        .with_license_number(&text(FormField::LicenseNumber)?)
        .with_license_expiry_date(date)
        .with_tirn_number(&text(FormField::TirnNumber)?);

    match uploaded.as_deref().or(stored_file) {
        Some(url) => { builder.with_license_file(url); },
        None => return Err(Error::Argument("Http error: rejected by server (400) license_file is required".into())),
    }
    builder.build()
}

impl ContactsBackend for MemoryBackend {
    async fn contacts(&self, token: Option<&str>) -> Result<Vec<Contact>> {
        self.admit(Request::List { token: token.map(|v| v.to_string()) })?;
        Ok(self.records())
    }

    async fn create_contact(&self, token: Option<&str>, parts: Vec<FormPart>) -> Result<Contact> {
        self.admit(Request::Create {
            token: token.map(|v| v.to_string()),
            parts: parts.clone()
        })?;

        let id = ContactId::new(self.next_id.get());
        let contact = contact_from_parts(id, &parts, None)?;
        self.next_id.set(id.as_u64() + 1);
        self.records.borrow_mut().push(contact.clone());

        debug!("Memory backend created contact {}", id);
        Ok(contact)
    }

    async fn update_contact(&self, token: Option<&str>, id: ContactId, parts: Vec<FormPart>) -> Result<Contact> {
        self.admit(Request::Update {
            token: token.map(|v| v.to_string()),
            id,
            parts: parts.clone()
        })?;

        let pos = self.position(id)?;
        let stored = self.records.borrow()[pos].license_file().map(|v| v.to_string());
        let contact = contact_from_parts(id, &parts, stored.as_deref())?;
        self.records.borrow_mut()[pos] = contact.clone();
        Ok(contact)
    }

    async fn remove_contact(&self, token: Option<&str>, id: ContactId) -> Result<()> {
        self.admit(Request::Remove { token: token.map(|v| v.to_string()), id })?;

        let pos = self.position(id)?;
        self.records.borrow_mut().remove(pos);
        Ok(())
    }
}
