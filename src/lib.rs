pub mod core;
pub mod sales;

pub use crate::core::{
    error::{self, Error},
    logger,
    token_store::{self, TokenStore, CredentialSource},

    config::{self, Config},
    default_configuration as configuration,
};

pub use crate::sales::{
    Contact,
    ContactBuilder,
    ContactId,
    ContactForm,
    FormField,
    LicenseFile,
    ContactsBackend,
    ContactsPage,
    Modal,
    APIClient,
    MemoryBackend,
};
