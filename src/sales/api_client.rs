use reqwest::{
    Client,
    RequestBuilder,
    Response,
    multipart::{Form, Part},
};
use url::Url;
use log::debug;

use crate::{
    Error,
    error::Result,
};

use super::{
    contact::{Contact, ContactId},
    contact_form::FormPart,
    contacts_backend::ContactsBackend,
};

const CONTACTS_PATH: &str = "sales/contacts/";

/// Http client of the sales contacts REST surface.
pub struct APIClient {
    base_url    : Url,
    client      : Client,
}

impl APIClient {
    pub fn new(base_url: &Url) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            Error::State(format!("Http error: creating http client error {e}"))
        })?;

        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn contacts_url(&self) -> Result<Url> {
        Ok(self.base_url.join(CONTACTS_PATH)?)
    }

    pub(crate) fn all_contacts_url(&self) -> Result<Url> {
        Ok(self.contacts_url()?.join("all/")?)
    }

    pub(crate) fn contact_url(&self, id: ContactId) -> Result<Url> {
        Ok(self.contacts_url()?.join(&format!("{}/", id))?)
    }

    fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn multipart(parts: Vec<FormPart>) -> Result<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, file } => {
                    let mut data = Part::bytes(file.content().to_vec())
                        .file_name(file.file_name().to_string());
                    if let Some(mime) = file.mime() {
                        data = data.mime_str(mime).map_err(|e| {
                            Error::Argument(format!("Invalid mime type {mime}: {e}"))
                        })?;
                    }
                    form.part(name, data)
                }
            };
        }
        Ok(form)
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let rsp = builder.send().await.map_err(|e| {
            Error::Network(format!("Http error: sending http request error {e}"))
        })?;

        let status = rsp.status();
        if status.is_success() {
            return Ok(rsp);
        }

        let detail = rsp.text().await.unwrap_or_default();
        Err(Error::from_status(status.as_u16(), detail.trim()))
    }

    async fn json<T: serde::de::DeserializeOwned>(rsp: Response) -> Result<T> {
        rsp.json::<T>().await.map_err(|e| {
            Error::Protocol(format!("Http error: deserialize json error {e}"))
        })
    }
}

impl ContactsBackend for APIClient {
    async fn contacts(&self, token: Option<&str>) -> Result<Vec<Contact>> {
        let url = self.all_contacts_url()?;
        debug!("GET {}", url);

        let rsp = Self::send(Self::authorize(self.client.get(url), token)).await?;
        Self::json::<Vec<Contact>>(rsp).await
    }

    async fn create_contact(&self, token: Option<&str>, parts: Vec<FormPart>) -> Result<Contact> {
        let url = self.contacts_url()?;
        debug!("POST {} with {} form entries", url, parts.len());

        let form = Self::multipart(parts)?;
        let rsp = Self::send(Self::authorize(self.client.post(url), token).multipart(form)).await?;
        Self::json::<Contact>(rsp).await
    }

    async fn update_contact(&self, token: Option<&str>, id: ContactId, parts: Vec<FormPart>) -> Result<Contact> {
        let url = self.contact_url(id)?;
        debug!("PUT {} with {} form entries", url, parts.len());

        let form = Self::multipart(parts)?;
        let rsp = Self::send(Self::authorize(self.client.put(url), token).multipart(form)).await?;
        Self::json::<Contact>(rsp).await
    }

    async fn remove_contact(&self, token: Option<&str>, id: ContactId) -> Result<()> {
        let url = self.contact_url(id)?;
        debug!("DELETE {}", url);

        Self::send(Self::authorize(self.client.delete(url), token)).await?;
        Ok(())
    }
}
