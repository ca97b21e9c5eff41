#[cfg(test)] mod test_contact;
#[cfg(test)] mod test_contact_form;

#[cfg(test)] use chrono::NaiveDate;
#[cfg(test)] use crate::sales::{
    Contact,
    ContactBuilder,
    ContactId,
    ContactForm,
    FormField,
    LicenseFile,
};

#[cfg(test)]
fn contact(id: u64, company: &str) -> Contact {
    ContactBuilder::new(ContactId::new(id))
        .with_company_name(company)
        .with_contact_name("Jane Roe")
        .with_company_email("office@example.com")
        .with_contact_email("jane@example.com")
        .with_company_number("+971 4 000 0000")
        .with_contact_number("+971 50 000 0000")
        .with_license_number(&format!("LIC-{id}"))
        .with_license_expiry_date(NaiveDate::from_ymd_opt(2027, 3, 31).unwrap())
        .with_tirn_number(&format!("TIRN-{id}"))
        .with_license_file(&format!("https://files.example.com/licenses/{id}.pdf"))
        .build()
        .unwrap()
}

#[cfg(test)]
fn filled_form(company: &str) -> ContactForm {
    let mut form = ContactForm::default();
    form.set(FormField::CompanyName, company)
        .set(FormField::ContactName, "John Doe")
        .set(FormField::CompanyEmail, "sales@example.com")
        .set(FormField::ContactEmail, "john@example.com")
        .set(FormField::CompanyNumber, "+1 555 0100")
        .set(FormField::ContactNumber, "+1 555 0101")
        .set(FormField::LicenseNumber, "L-2024-7")
        .set(FormField::LicenseExpiryDate, "2026-12-31")
        .set(FormField::TirnNumber, "100200300");
    form
}

#[cfg(test)]
fn license_pdf() -> LicenseFile {
    LicenseFile::new("license.pdf", b"%PDF-1.4 test".to_vec())
}
