use std::fmt;
use std::str::FromStr;
use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use crate::{
    Error,
    error::Result,
};

/// Server-assigned identifier of a contact record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ContactId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim().parse::<u64>().map(Self).map_err(|e| {
            Error::Argument(format!("Invalid contact id {}: {e}", s))
        })
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer/vendor record as returned by the sales backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "id")]
    id                  : ContactId,

    #[serde(rename = "company_name")]
    company_name        : String,
    #[serde(rename = "contact_name")]
    contact_name        : String,
    #[serde(rename = "company_email")]
    company_email       : String,
    #[serde(rename = "contact_email")]
    contact_email       : String,
    #[serde(rename = "company_number")]
    company_number      : String,
    #[serde(rename = "contact_number")]
    contact_number      : String,
    #[serde(rename = "license_number")]
    license_number      : String,
    #[serde(rename = "license_expiry_date")]
    license_expiry_date : NaiveDate,
    #[serde(rename = "tirn_number")]
    tirn_number         : String,

    // Url of the stored document on read.
    #[serde(rename = "license_file", default)]
    license_file        : Option<String>,
}

impl Contact {
    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    pub fn company_email(&self) -> &str {
        &self.company_email
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn company_number(&self) -> &str {
        &self.company_number
    }

    pub fn contact_number(&self) -> &str {
        &self.contact_number
    }

    pub fn license_number(&self) -> &str {
        &self.license_number
    }

    pub fn license_expiry_date(&self) -> NaiveDate {
        self.license_expiry_date
    }

    pub fn tirn_number(&self) -> &str {
        &self.tirn_number
    }

    pub fn license_file(&self) -> Option<&str> {
        self.license_file.as_deref().filter(|v| !v.is_empty())
    }

    /// Case-insensitive substring match over the company name.
    pub fn matches_company(&self, filter: &str) -> bool {
        filter.is_empty() ||
            self.company_name.to_lowercase().contains(&filter.to_lowercase())
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
            "{}: {} ({}), contact {} <{}> {}, license {} expires {}, TIRN {}",
            self.id,
            self.company_name,
            self.company_email,
            self.contact_name,
            self.contact_email,
            self.contact_number,
            self.license_number,
            self.license_expiry_date,
            self.tirn_number,
        )
    }
}

/// Assembles a [`Contact`] outside of a server response, mostly for
/// fixtures and in-memory backends.
pub struct ContactBuilder {
    id                  : ContactId,
    company_name        : String,
    contact_name        : String,
    company_email       : String,
    contact_email       : String,
    company_number      : String,
    contact_number      : String,
    license_number      : String,
    license_expiry_date : Option<NaiveDate>,
    tirn_number         : String,
    license_file        : Option<String>,
}

impl ContactBuilder {
    pub fn new(id: ContactId) -> Self {
        Self {
            id,
            company_name        : String::new(),
            contact_name        : String::new(),
            company_email       : String::new(),
            contact_email       : String::new(),
            company_number      : String::new(),
            contact_number      : String::new(),
            license_number      : String::new(),
            license_expiry_date : None,
            tirn_number         : String::new(),
            license_file        : None,
        }
    }

    pub fn with_company_name(&mut self, name: &str) -> &mut Self {
        self.company_name = name.to_string();
        self
    }

    pub fn with_contact_name(&mut self, name: &str) -> &mut Self {
        self.contact_name = name.to_string();
        self
    }

    pub fn with_company_email(&mut self, email: &str) -> &mut Self {
        self.company_email = email.to_string();
        self
    }

    pub fn with_contact_email(&mut self, email: &str) -> &mut Self {
        self.contact_email = email.to_string();
        self
    }

    pub fn with_company_number(&mut self, number: &str) -> &mut Self {
        self.company_number = number.to_string();
        self
    }

    pub fn with_contact_number(&mut self, number: &str) -> &mut Self {
        self.contact_number = number.to_string();
        self
    }

    pub fn with_license_number(&mut self, number: &str) -> &mut Self {
        self.license_number = number.to_string();
        self
    }

    pub fn with_license_expiry_date(&mut self, date: NaiveDate) -> &mut Self {
        self.license_expiry_date = Some(date);
        self
    }

    pub fn with_tirn_number(&mut self, number: &str) -> &mut Self {
        self.tirn_number = number.to_string();
        self
    }

    pub fn with_license_file(&mut self, url: &str) -> &mut Self {
        self.license_file = Some(url.to_string());
        self
    }

    pub fn build(&mut self) -> Result<Contact> {
        let Some(date) = self.license_expiry_date else {
            return Err(Error::Argument("Missing license expiry date".into()));
        };

        Ok(Contact {
            id                  : self.id,
            company_name        : self.company_name.clone(),
            contact_name        : self.contact_name.clone(),
            company_email       : self.company_email.clone(),
            contact_email       : self.contact_email.clone(),
            company_number      : self.company_number.clone(),
            contact_number      : self.contact_number.clone(),
            license_number      : self.license_number.clone(),
            license_expiry_date : date,
            tirn_number         : self.tirn_number.clone(),
            license_file        : self.license_file.clone(),
        })
    }
}
