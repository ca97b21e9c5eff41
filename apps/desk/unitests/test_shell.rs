use std::collections::VecDeque;
use std::io;
use reedline::Signal;
use tempfile::TempDir;

use salesdesk::{
    ContactsPage,
    MemoryBackend,
    Modal,
    TokenStore,
    token_store::StoredCredential,
};

use crate::{
    prompt::DeskPrompt,
    run_loop,
    LineSource,
};

/// Replays scripted lines, then fails the way a closed stdin does.
struct Script {
    lines: VecDeque<&'static str>,
    reads: usize,
}

impl Script {
    fn new(lines: &[&'static str]) -> Self {
        Self {
            lines: lines.iter().copied().collect(),
            reads: 0,
        }
    }
}

impl LineSource for Script {
    fn next_line(&mut self, _prompt: &DeskPrompt) -> io::Result<Signal> {
        self.reads += 1;
        match self.lines.pop_front() {
            Some(line) => Ok(Signal::Success(line.to_string())),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
        }
    }
}

fn offline_page() -> (TempDir, TokenStore, ContactsPage<MemoryBackend, StoredCredential>) {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("storage.json"));
    let page = ContactsPage::new(MemoryBackend::new(), store.credentials("token"));
    (dir, store, page)
}

#[tokio::test]
async fn test_loop_stops_on_read_error() {
    let (_dir, store, mut page) = offline_page();
    let mut script = Script::new(&["list"]);

    let lines = run_loop(&mut script, &mut page, &store).await;
    assert_eq!(lines, 1);
    assert_eq!(script.reads, 2);
}

#[tokio::test]
async fn test_loop_stops_on_immediate_read_error() {
    let (_dir, store, mut page) = offline_page();
    let mut script = Script::new(&[]);

    let lines = run_loop(&mut script, &mut page, &store).await;
    assert_eq!(lines, 0);
    assert_eq!(script.reads, 1);
}

#[tokio::test]
async fn test_loop_exit_command() {
    let (_dir, store, mut page) = offline_page();
    let mut script = Script::new(&["add", "set company_name Acme Freight", "exit", "close"]);

    let lines = run_loop(&mut script, &mut page, &store).await;
    assert_eq!(lines, 3);
    assert_eq!(script.reads, 3);
    assert_eq!(page.modal(), Modal::Create);
    assert_eq!(page.form().get(salesdesk::FormField::CompanyName), "Acme Freight");
}

#[tokio::test]
async fn test_loop_login_stores_token() {
    let (_dir, store, mut page) = offline_page();
    let mut script = Script::new(&["login abc123", "", "logout", "login xyz"]);

    let lines = run_loop(&mut script, &mut page, &store).await;
    assert_eq!(lines, 4);
    assert_eq!(store.get("token"), Some("xyz".to_string()));
}
