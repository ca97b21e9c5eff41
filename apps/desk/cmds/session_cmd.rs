use clap::{arg, Command};

pub(crate) fn login_cli() -> Command {
    Command::new("login")
        .about("Store the bearer token used for backend requests")
        .arg(arg!(<TOKEN> "The bearer token"))
        .arg_required_else_help(true)
}

pub(crate) fn logout_cli() -> Command {
    Command::new("logout")
        .about("Remove the stored bearer token")
}
