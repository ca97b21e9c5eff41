use std::io::Write;
use crate::Error;
use crate::sales::{
    ContactForm,
    FormField,
    FormPart,
    LicenseFile,
};
use super::{contact, filled_form, license_pdf};

#[test]
fn test_default_is_empty() {
    let form = ContactForm::default();
    assert!(form.is_empty());
    for field in FormField::ALL {
        assert_eq!(form.get(field), "");
    }
    assert!(form.license_file().is_none());
}

#[test]
fn test_from_contact() {
    let c = contact(3, "Initech");
    let form = ContactForm::from_contact(&c);

    assert_eq!(form.get(FormField::CompanyName), "Initech");
    assert_eq!(form.get(FormField::ContactName), c.contact_name());
    assert_eq!(form.get(FormField::CompanyEmail), c.company_email());
    assert_eq!(form.get(FormField::ContactEmail), c.contact_email());
    assert_eq!(form.get(FormField::CompanyNumber), c.company_number());
    assert_eq!(form.get(FormField::ContactNumber), c.contact_number());
    assert_eq!(form.get(FormField::LicenseNumber), "LIC-3");
    assert_eq!(form.get(FormField::LicenseExpiryDate), "2027-03-31");
    assert_eq!(form.get(FormField::TirnNumber), "TIRN-3");
    assert!(form.license_file().is_none());
}

#[test]
fn test_field_names() {
    assert_eq!("company_name".parse::<FormField>().unwrap(), FormField::CompanyName);
    assert_eq!("License-Expiry-Date".parse::<FormField>().unwrap(), FormField::LicenseExpiryDate);
    assert_eq!("tirn_number".parse::<FormField>().unwrap(), FormField::TirnNumber);
    assert!("license_file".parse::<FormField>().is_err());
}

#[test]
fn test_validate_create_requires_file() {
    let mut form = filled_form("Acme");
    let err = form.validate(true).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
    assert!(err.to_string().contains("License File"));

    form.set_license_file(Some(license_pdf()));
    assert!(form.validate(true).is_ok());
}

#[test]
fn test_validate_edit_without_file() {
    let form = filled_form("Acme");
    assert!(form.validate(false).is_ok());
}

#[test]
fn test_validate_required_fields() {
    for field in FormField::ALL {
        let mut form = filled_form("Acme");
        form.set(field, "   ");
        let err = form.validate(false).unwrap_err();
        assert!(err.to_string().contains(field.label()), "{}", err);
    }
}

#[test]
fn test_validate_date() {
    let mut form = filled_form("Acme");
    form.set(FormField::LicenseExpiryDate, "31/12/2026");
    assert!(matches!(form.validate(false), Err(Error::Argument(_))));
}

#[test]
fn test_parts_with_file() {
    let mut form = filled_form("Acme");
    form.set_license_file(Some(license_pdf()));

    let parts = form.to_parts();
    assert_eq!(parts.len(), 10);
    for (part, field) in parts.iter().zip(FormField::ALL.iter()) {
        assert_eq!(part.name(), field.name());
    }

    match &parts[9] {
        FormPart::File { name, file } => {
            assert_eq!(*name, "license_file");
            assert_eq!(file.file_name(), "license.pdf");
            assert_eq!(file.mime(), Some("application/pdf"));
        },
        other => panic!("unexpected part {:?}", other),
    }
}

#[test]
fn test_parts_without_file() {
    let form = filled_form("Acme");
    let parts = form.to_parts();
    assert_eq!(parts.len(), 9);
    assert!(parts.iter().all(|v| matches!(v, FormPart::Text { .. })));
    assert!(parts.iter().all(|v| v.name() != "license_file"));
    assert_eq!(parts[0], FormPart::Text { name: "company_name", value: "Acme".into() });
}

#[test]
fn test_license_file_open() {
    let mut tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    tmp.write_all(b"\x89PNG").unwrap();

    let file = LicenseFile::open(tmp.path()).unwrap();
    assert_eq!(file.size(), 4);
    assert_eq!(file.mime(), Some("image/png"));
    assert!(file.file_name().ends_with(".png"));

    assert!(LicenseFile::open("/nonexistent/license.pdf").is_err());
}

#[test]
fn test_clear() {
    let mut form = filled_form("Acme");
    form.set_license_file(Some(license_pdf()));
    form.clear();
    assert!(form.is_empty());
}
