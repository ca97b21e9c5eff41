#[cfg(test)] mod test_shell;
