use std::io::{self, Write};
use std::process::{Command as Process, Stdio};
use clap::{error, Parser, ArgMatches, Command};
use reedline::{Reedline, Signal};
use log::debug;

mod prompt;
use prompt::DeskPrompt;

#[cfg(test)]
mod unitests;

mod cmds {
    pub(crate) mod contact_cmd;
    pub(crate) mod session_cmd;
}
use cmds::{contact_cmd, session_cmd};

use salesdesk::{
    configuration as cfg,
    logger,
    error::Result,
    TokenStore,
    APIClient,
    MemoryBackend,
    ContactsBackend,
    ContactsPage,
    ContactId,
    Contact,
    FormField,
    LicenseFile,
    Modal,
    sales::{Confirm, DocumentViewer},
    token_store::StoredCredential,
};

const OFFLINE_URL: &str = "memory://local/";

fn build_cli() -> Command {
    let mut cmd = Command::new("desk")
        .about("Interactive sales contacts shell")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(contact_cmd::list_cli())
        .subcommand(contact_cmd::filter_cli())
        .subcommand(contact_cmd::refresh_cli())
        .subcommand(contact_cmd::add_cli())
        .subcommand(contact_cmd::edit_cli())
        .subcommand(contact_cmd::set_cli())
        .subcommand(contact_cmd::file_cli())
        .subcommand(contact_cmd::form_cli())
        .subcommand(contact_cmd::submit_cli())
        .subcommand(contact_cmd::close_cli())
        .subcommand(contact_cmd::delete_cli())
        .subcommand(contact_cmd::view_cli())
        .subcommand(session_cmd::login_cli())
        .subcommand(session_cmd::logout_cli())
        .help_template("{subcommands}");

    cmd.error(error::ErrorKind::InvalidSubcommand, "Invalid command provided");
    cmd
}

struct StdinConfirm;
impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        print!("{} [y/N] ", question);
        _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

struct SystemViewer;
impl DocumentViewer for SystemViewer {
    fn open(&self, url: &str) -> Result<()> {
        println!("License document: {}", url);

        let mut opener = if cfg!(target_os = "macos") {
            Process::new("open")
        } else if cfg!(target_os = "windows") {
            let mut p = Process::new("cmd");
            p.args(["/C", "start", ""]);
            p
        } else {
            Process::new("xdg-open")
        };

        opener.arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .or_else(|e| {
                // No desktop opener available; the printed url is enough.
                debug!("Launching document opener error: {e}");
                Ok(())
            })
    }
}

fn print_contacts(contacts: &[&Contact], filter: &str) {
    println!("Contacts (filter:{:?},total:{}):", filter, contacts.len());
    println!("{:<6} {:<28} {:<20} {:<26} {:<26} {:<16} {:<16} {:<14} {:<11} {:<16} {}",
        "ID", "Company", "Contact", "Company Email", "Contact Email",
        "Company No", "Contact No", "License No", "Expiry", "TIRN", "License"
    );
    for c in contacts {
        println!("{:<6} {:<28} {:<20} {:<26} {:<26} {:<16} {:<16} {:<14} {:<11} {:<16} {}",
            c.id(),
            c.company_name(),
            c.contact_name(),
            c.company_email(),
            c.contact_email(),
            c.company_number(),
            c.contact_number(),
            c.license_number(),
            c.license_expiry_date(),
            c.tirn_number(),
            if c.license_file().is_some() { "view" } else { "-" }
        );
    }
}

fn print_form<B: ContactsBackend>(page: &ContactsPage<B, StoredCredential>) {
    println!("Form ({}):", page.modal());
    for field in FormField::ALL {
        println!(" {:<20}\t{}", field.label(), page.form().get(field));
    }
    match page.form().license_file() {
        Some(file) => println!(" {:<20}\t{} ({} bytes)", "License File", file.file_name(), file.size()),
        None => println!(" {:<20}\t{}", "License File",
            if page.modal() == Modal::Create { "<required>" } else { "<keep current>" }),
    }
}

fn parse_id(m: &ArgMatches) -> Option<ContactId> {
    let id = m.get_one::<String>("ID")?;
    match id.parse::<ContactId>() {
        Ok(v) => Some(v),
        Err(e) => {
            println!("Error: {e}");
            None
        }
    }
}

fn require_open<B: ContactsBackend>(page: &ContactsPage<B, StoredCredential>) -> bool {
    if !page.modal().is_open() {
        println!("Error: no contact form is open, use 'add' or 'edit <ID>' first");
        return false;
    }
    true
}

async fn execute_command<B: ContactsBackend>(
    matches: ArgMatches,
    page: &mut ContactsPage<B, StoredCredential>,
    store: &TokenStore
) {
    match matches.subcommand() {
        Some(("list", _)) => {
            print_contacts(&page.visible_contacts(), page.filter());
        }
        Some(("filter", m)) => {
            let text = m.get_many::<String>("TEXT")
                .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            page.set_filter(&text);
            print_contacts(&page.visible_contacts(), page.filter());
        }
        Some(("refresh", _)) => {
            _ = page.refresh().await.map_err(|e| {
                println!("Error fetching contacts: {e}");
            }).map(|_| {
                print_contacts(&page.visible_contacts(), page.filter());
            });
        }
        Some(("add", _)) => {
            page.open_create();
            print_form(page);
        }
        Some(("edit", m)) => {
            let Some(id) = parse_id(m) else {
                return;
            };
            match page.open_edit(id) {
                Ok(_) => print_form(page),
                Err(e) => println!("Error: {e}"),
            }
        }
        Some(("set", m)) => {
            if !require_open(page) {
                return;
            }
            let Some(name) = m.get_one::<String>("FIELD") else {
                return;
            };
            let value = m.get_many::<String>("VALUE")
                .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();

            match name.parse::<FormField>() {
                Ok(field) => {
                    page.form_mut().set(field, &value);
                    println!("{} = {}", field.label(), value);
                }
                Err(e) => println!("Error: {e}"),
            }
        }
        Some(("file", m)) => {
            if !require_open(page) {
                return;
            }
            let Some(path) = m.get_one::<String>("PATH") else {
                return;
            };
            match LicenseFile::open(path) {
                Ok(file) => {
                    println!("License file attached: {} ({} bytes)", file.file_name(), file.size());
                    page.form_mut().set_license_file(Some(file));
                }
                Err(e) => println!("Error: {e}"),
            }
        }
        Some(("form", _)) => {
            if require_open(page) {
                print_form(page);
            }
        }
        Some(("submit", _)) => {
            match page.submit().await {
                Ok(contact) => println!("Contact {} saved.", contact.id()),
                Err(e) => println!("Error saving contact: {e}"),
            }
        }
        Some(("close", _)) => {
            page.close_modal();
        }
        Some(("delete", m)) => {
            let Some(id) = parse_id(m) else {
                return;
            };
            match page.remove(id, &StdinConfirm).await {
                Ok(true) => println!("Contact {} is deleted.", id),
                Ok(false) => {},
                Err(e) => println!("Error deleting contact: {e}"),
            }
        }
        Some(("view", m)) => {
            let Some(id) = parse_id(m) else {
                return;
            };
            _ = page.view_license(id, &SystemViewer).map_err(|e| {
                println!("Error: {e}");
            });
        }
        Some(("login", m)) => {
            let Some(token) = m.get_one::<String>("TOKEN") else {
                return;
            };
            let key = page.credentials().key().to_string();
            match store.set(&key, token) {
                Ok(_) => {
                    println!("Token stored.");
                    _ = page.refresh().await;
                }
                Err(e) => println!("Error storing token: {e}"),
            }
        }
        Some(("logout", _)) => {
            let key = page.credentials().key().to_string();
            _ = store.remove(&key).map_err(|e| {
                println!("Error removing token: {e}");
            }).map(|removed| {
                println!("{}", if removed { "Token removed." } else { "No token stored." });
            });
        }
        _ => println!("Unknown command"),
    }
}

/// Where the shell takes its input lines from.
pub(crate) trait LineSource {
    fn next_line(&mut self, prompt: &DeskPrompt) -> io::Result<Signal>;
}

impl LineSource for Reedline {
    fn next_line(&mut self, prompt: &DeskPrompt) -> io::Result<Signal> {
        self.read_line(prompt)
    }
}

/// Reads and executes commands until `exit`, Ctrl-C/Ctrl-D or a read failure.
/// Returns the number of lines read.
pub(crate) async fn run_loop<R, B>(
    reader: &mut R,
    page: &mut ContactsPage<B, StoredCredential>,
    store: &TokenStore
) -> usize
where
    R: LineSource,
    B: ContactsBackend,
{
    let mut cli = build_cli();
    let mut count = 0;

    loop {
        let prompt = DeskPrompt {
            modal: match page.modal() {
                Modal::Closed => String::new(),
                modal => modal.to_string(),
            }
        };

        let sig = match reader.next_line(&prompt) {
            Ok(v) => v,
            Err(e) => {
                // Input is gone (closed or non-terminal stdin); nothing more to read.
                log::error!("Reading command line error: {e}");
                break;
            }
        };
        count += 1;

        match sig {
            Signal::Success(line) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                match input {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    },
                    "help" => {
                        _ = cli.print_long_help();
                        continue;
                    }
                    _ => {}
                }

                let args: Vec<String> = input.split_whitespace().map(|s| s.to_string())
                    .collect();

                if args[0] == "help" && args.len() > 1 {
                    _ = match cli.find_subcommand_mut(args[1].as_str()) {
                        Some(cmd) => cmd.print_long_help(),
                        None => cli.print_long_help(),
                    };
                    continue;
                }

                let cmd = args.join(" ");
                match cli.clone().try_get_matches_from(args) {
                    Ok(matches) => execute_command(matches, page, store).await,
                    Err(_) => {
                        println!("Error: command not found or invalid arguments: '{}'", cmd);
                    }
                }
            }
            Signal::CtrlC | Signal::CtrlD => {
                println!("\nGoodbye!");
                break;
            }
        }
    }
    count
}

async fn run_shell<B: ContactsBackend>(mut page: ContactsPage<B, StoredCredential>, store: TokenStore) {
    // Failures are already logged; the table just starts out empty.
    _ = page.mount().await;

    println!("Welcome to the sales contacts shell. Type 'help' for commands, 'exit' to quit.\n");
    print_contacts(&page.visible_contacts(), page.filter());

    let mut rl = Reedline::create();
    run_loop(&mut rl, &mut page, &store).await;
}

#[derive(Parser, Debug)]
#[command(name = "desk")]
#[command(version = "1.0")]
#[command(about = "Interactive sales contacts shell", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Base url of the sales backend, overrides the configuration file
    #[arg(short, long, value_name = "URL")]
    api_url: Option<String>,

    /// Work against an in-memory backend instead of the remote service
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();

    let mut builder = cfg::Builder::new();
    if let Some(path) = opts.config.as_ref() {
        if let Err(e) = builder.load(path) {
            eprintln!("{e}");
            return;
        }
    }
    if let Some(url) = opts.api_url.as_deref() {
        builder.with_api_url(url);
    } else if opts.offline {
        builder.with_api_url(OFFLINE_URL);
    }

    let cfg = match builder.build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Loading configuration error: {e}");
            return;
        }
    };

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    logger::setup(cfg.log_level(), cfg.log_file());

    let store = TokenStore::new(cfg.token_store());
    let credentials = store.credentials(cfg.token_key());

    if opts.offline {
        let page = ContactsPage::new(MemoryBackend::new(), credentials);
        run_shell(page, store).await;
    } else {
        let client = match APIClient::new(cfg.api_url()) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Creating api client error: {e}");
                return;
            }
        };
        let page = ContactsPage::new(client, credentials);
        run_shell(page, store).await;
    }

    logger::teardown();
}

