use chrono::NaiveDate;
use crate::sales::{Contact, ContactBuilder, ContactId};
use super::contact;

#[test]
fn test_deserialize_contact() {
    let data = r#"{
        "id": 7,
        "company_name": "Acme Freight",
        "contact_name": "Wile E.",
        "company_email": "info@acme.test",
        "contact_email": "wile@acme.test",
        "company_number": "555-0001",
        "contact_number": "555-0002",
        "license_number": "AC-1",
        "license_expiry_date": "2026-05-01",
        "tirn_number": "T-77",
        "license_file": "https://files.example.com/acme.pdf"
    }"#;

    let contact: Contact = serde_json::from_str(data).unwrap();
    assert_eq!(contact.id(), ContactId::new(7));
    assert_eq!(contact.company_name(), "Acme Freight");
    assert_eq!(contact.contact_name(), "Wile E.");
    assert_eq!(contact.company_email(), "info@acme.test");
    assert_eq!(contact.contact_email(), "wile@acme.test");
    assert_eq!(contact.company_number(), "555-0001");
    assert_eq!(contact.contact_number(), "555-0002");
    assert_eq!(contact.license_number(), "AC-1");
    assert_eq!(contact.license_expiry_date(), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    assert_eq!(contact.tirn_number(), "T-77");
    assert_eq!(contact.license_file(), Some("https://files.example.com/acme.pdf"));
}

#[test]
fn test_deserialize_without_file() {
    let data = r#"{
        "id": 8,
        "company_name": "Globex",
        "contact_name": "Hank",
        "company_email": "g@globex.test",
        "contact_email": "h@globex.test",
        "company_number": "1",
        "contact_number": "2",
        "license_number": "3",
        "license_expiry_date": "2030-01-01",
        "tirn_number": "4",
        "license_file": null
    }"#;

    let contact: Contact = serde_json::from_str(data).unwrap();
    assert_eq!(contact.license_file(), None);
}

#[test]
fn test_matches_company() {
    let c = contact(1, "Acme Freight");
    assert!(c.matches_company(""));
    assert!(c.matches_company("acme"));
    assert!(c.matches_company("FREIGHT"));
    assert!(c.matches_company("e F"));
    assert!(!c.matches_company("globex"));
}

#[test]
fn test_contact_id() {
    let id: ContactId = " 42 ".parse().unwrap();
    assert_eq!(id, ContactId::new(42));
    assert_eq!(id.to_string(), "42");
    assert!("x42".parse::<ContactId>().is_err());
}

#[test]
fn test_builder_requires_date() {
    let result = ContactBuilder::new(ContactId::new(1))
        .with_company_name("Acme")
        .build();
    assert!(result.is_err());
}
