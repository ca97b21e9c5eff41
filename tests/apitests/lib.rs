#[cfg(test)]
mod core {
    mod config;
    mod token_store;
}

#[cfg(test)]
mod sales {
    mod contacts_page;
}

// helper functions
#[cfg(test)]
fn conf_path(name: &str) -> String {
    match std::fs::metadata(name) {
        Ok(_) => name.to_string(),
        Err(_) => format!("tests/apitests/{}", name),
    }
}
