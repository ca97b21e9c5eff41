use clap::{arg, Command};

pub(crate) fn list_cli() -> Command {
    Command::new("list")
        .about("List contacts matching the current filter")
}

pub(crate) fn filter_cli() -> Command {
    Command::new("filter")
        .about("Filter contacts by company name, no text clears the filter")
        .arg(arg!([TEXT] ... "Text the company name must contain"))
}

pub(crate) fn refresh_cli() -> Command {
    Command::new("refresh")
        .about("Fetch the contact list again")
}

pub(crate) fn add_cli() -> Command {
    Command::new("add")
        .about("Open an empty contact form")
}

pub(crate) fn edit_cli() -> Command {
    Command::new("edit")
        .about("Open the contact form for an existing contact")
        .arg(arg!(<ID> "The contact id to edit"))
        .arg_required_else_help(true)
}

pub(crate) fn set_cli() -> Command {
    Command::new("set")
        .about("Set a field of the open contact form")
        .arg(arg!(<FIELD> "The field name")
            .value_parser([
                "company_name",
                "contact_name",
                "company_email",
                "contact_email",
                "company_number",
                "contact_number",
                "license_number",
                "license_expiry_date",
                "tirn_number",
            ])
        )
        .arg(arg!(<VALUE> ... "The field value"))
        .arg_required_else_help(true)
}

pub(crate) fn file_cli() -> Command {
    Command::new("file")
        .about("Attach a license document to the open contact form")
        .arg(arg!(<PATH> "Path of the license document"))
        .arg_required_else_help(true)
}

pub(crate) fn form_cli() -> Command {
    Command::new("form")
        .about("Show the open contact form")
}

pub(crate) fn submit_cli() -> Command {
    Command::new("submit")
        .about("Save the open contact form")
}

pub(crate) fn close_cli() -> Command {
    Command::new("close")
        .about("Discard the open contact form")
}

pub(crate) fn delete_cli() -> Command {
    Command::new("delete")
        .about("Delete a contact")
        .arg(arg!(<ID> "The contact id to delete"))
        .arg_required_else_help(true)
}

pub(crate) fn view_cli() -> Command {
    Command::new("view")
        .about("Open the license document of a contact")
        .arg(arg!(<ID> "The contact id"))
        .arg_required_else_help(true)
}
