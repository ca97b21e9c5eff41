use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use chrono::NaiveDate;

use crate::{
    Error,
    error::Result,
};

use super::contact::Contact;

pub const LICENSE_FILE_FIELD: &str = "license_file";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The nine text/date entries of the contact form, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    CompanyName,
    ContactName,
    CompanyEmail,
    ContactEmail,
    CompanyNumber,
    ContactNumber,
    LicenseNumber,
    LicenseExpiryDate,
    TirnNumber,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::CompanyName,
        FormField::ContactName,
        FormField::CompanyEmail,
        FormField::ContactEmail,
        FormField::CompanyNumber,
        FormField::ContactNumber,
        FormField::LicenseNumber,
        FormField::LicenseExpiryDate,
        FormField::TirnNumber,
    ];

    /// Name of the entry in the multipart body.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::CompanyName      => "company_name",
            FormField::ContactName      => "contact_name",
            FormField::CompanyEmail     => "company_email",
            FormField::ContactEmail     => "contact_email",
            FormField::CompanyNumber    => "company_number",
            FormField::ContactNumber    => "contact_number",
            FormField::LicenseNumber    => "license_number",
            FormField::LicenseExpiryDate=> "license_expiry_date",
            FormField::TirnNumber       => "tirn_number",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::CompanyName      => "Company Name",
            FormField::ContactName      => "Contact Name",
            FormField::CompanyEmail     => "Company Email",
            FormField::ContactEmail     => "Contact Email",
            FormField::CompanyNumber    => "Company Number",
            FormField::ContactNumber    => "Contact Number",
            FormField::LicenseNumber    => "License Number",
            FormField::LicenseExpiryDate=> "License Expiry Date",
            FormField::TirnNumber       => "TIRN Number",
        }
    }
}

impl FromStr for FormField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase().replace('-', "_");
        Self::ALL.iter()
            .find(|f| f.name() == name)
            .copied()
            .ok_or_else(|| Error::Argument(format!("Unknown contact field: {}", s)))
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw content of a license document chosen for upload.
#[derive(Clone, PartialEq)]
pub struct LicenseFile {
    file_name   : String,
    content     : Vec<u8>,
    mime        : Option<String>,
}

impl LicenseFile {
    pub fn new(file_name: &str, content: Vec<u8>) -> Self {
        Self {
            file_name   : file_name.to_string(),
            content,
            mime        : mime_of(file_name).map(|v| v.to_string()),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| {
            Error::Io(format!("Reading license file {} error: {e}", path.display()))
        })?;

        let file_name = path.file_name()
            .and_then(|v| v.to_str())
            .ok_or_else(|| Error::Argument(format!("Invalid license file path {}", path.display())))?;

        Ok(Self::new(file_name, content))
    }

    pub fn with_mime(mut self, mime: &str) -> Self {
        self.mime = Some(mime.to_string());
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

impl fmt::Debug for LicenseFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseFile")
            .field("file_name", &self.file_name)
            .field("size", &self.content.len())
            .field("mime", &self.mime)
            .finish()
    }
}

fn mime_of(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "pdf"           => "application/pdf",
        "png"           => "image/png",
        "jpg" | "jpeg"  => "image/jpeg",
        "gif"           => "image/gif",
        "webp"          => "image/webp",
        "doc"           => "application/msword",
        "docx"          => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt"           => "text/plain",
        _               => return None,
    };
    Some(mime)
}

/// One entry of the multipart body sent on create/update.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: LicenseFile },
}

impl FormPart {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } => *name,
            FormPart::File { name, .. } => *name,
        }
    }
}

/// Edit buffer behind the create/edit modal. Text entries hold exactly what
/// was typed; the expiry date is only parsed when validating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    company_name        : String,
    contact_name        : String,
    company_email       : String,
    contact_email       : String,
    company_number      : String,
    contact_number      : String,
    license_number      : String,
    license_expiry_date : String,
    tirn_number         : String,

    license_file        : Option<LicenseFile>,
}

impl ContactForm {
    /// Copies every field of `contact`. The stored document is never pulled
    /// back into memory, so the file slot starts out empty.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            company_name        : contact.company_name().to_string(),
            contact_name        : contact.contact_name().to_string(),
            company_email       : contact.company_email().to_string(),
            contact_email       : contact.contact_email().to_string(),
            company_number      : contact.company_number().to_string(),
            contact_number      : contact.contact_number().to_string(),
            license_number      : contact.license_number().to_string(),
            license_expiry_date : contact.license_expiry_date().format(DATE_FORMAT).to_string(),
            tirn_number         : contact.tirn_number().to_string(),
            license_file        : None,
        }
    }

    fn slot(&self, field: FormField) -> &String {
        match field {
            FormField::CompanyName      => &self.company_name,
            FormField::ContactName      => &self.contact_name,
            FormField::CompanyEmail     => &self.company_email,
            FormField::ContactEmail     => &self.contact_email,
            FormField::CompanyNumber    => &self.company_number,
            FormField::ContactNumber    => &self.contact_number,
            FormField::LicenseNumber    => &self.license_number,
            FormField::LicenseExpiryDate=> &self.license_expiry_date,
            FormField::TirnNumber       => &self.tirn_number,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::CompanyName      => &mut self.company_name,
            FormField::ContactName      => &mut self.contact_name,
            FormField::CompanyEmail     => &mut self.company_email,
            FormField::ContactEmail     => &mut self.contact_email,
            FormField::CompanyNumber    => &mut self.company_number,
            FormField::ContactNumber    => &mut self.contact_number,
            FormField::LicenseNumber    => &mut self.license_number,
            FormField::LicenseExpiryDate=> &mut self.license_expiry_date,
            FormField::TirnNumber       => &mut self.tirn_number,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        self.slot(field)
    }

    pub fn set(&mut self, field: FormField, value: &str) -> &mut Self {
        *self.slot_mut(field) = value.to_string();
        self
    }

    pub fn license_file(&self) -> Option<&LicenseFile> {
        self.license_file.as_ref()
    }

    pub fn set_license_file(&mut self, file: Option<LicenseFile>) -> &mut Self {
        self.license_file = file;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Required-field policy of the form: every text/date entry must be
    /// filled in, and a document must be attached when `creating`.
    pub fn validate(&self, creating: bool) -> Result<()> {
        for field in FormField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(Error::Argument(format!("{} is required", field.label())));
            }
        }

        let date = self.license_expiry_date.trim();
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| {
            Error::Argument(format!("{} must be a YYYY-MM-DD date, got {}: {e}",
                FormField::LicenseExpiryDate.label(), date))
        })?;

        if creating && self.license_file.is_none() {
            return Err(Error::Argument("License File is required".into()));
        }
        Ok(())
    }

    /// Multipart entries in submission order. The file entry is present only
    /// when a new document was chosen; the backend keeps the stored document
    /// of an updated record when the entry is absent.
    pub fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = FormField::ALL.iter().map(|field| {
            FormPart::Text {
                name: field.name(),
                value: self.get(*field).to_string(),
            }
        }).collect::<Vec<_>>();

        if let Some(file) = self.license_file.as_ref() {
            parts.push(FormPart::File {
                name: LICENSE_FILE_FIELD,
                file: file.clone(),
            });
        }
        parts
    }
}
