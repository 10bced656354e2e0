use std::env;

/// Secrets never appear in the printout, so this is an explicit allow-list rather than a `JH_` prefix scan.
const NON_SECRET_ENVS: &[&str] = &[
    "RUST_LOG",
    "JH_HOST",
    "JH_PORT",
    "JH_ALLOWED_ORIGIN",
    "JH_CLOUDINARY_CLOUD_NAME",
    "JH_CLOUDINARY_UPLOAD_PRESET",
    "JH_FIREBASE_PROJECT_ID",
    "JH_APP_ID",
];

/// The server takes no arguments. If any are given anyway, print the help text and the current (non-secret)
/// environment, and let the caller exit instead of starting up.
pub fn handle_command_line_args() -> bool {
    if env::args().nth(1).is_none() {
        return false;
    }
    println!("\n{}\n", include_str!("./cli-help.txt"));
    println!("Current environment (secrets omitted):");
    for name in NON_SECRET_ENVS {
        println!("  {name:<30} {}", env_value(name));
    }
    true
}

fn env_value(name: &str) -> String {
    match env::var(name) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => "<not set>".to_string(),
        Err(env::VarError::NotUnicode(value)) => format!("<invalid: {}>", value.to_string_lossy()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unset_vars_are_reported_not_missing() {
        assert_eq!(env_value("JH_NO_SUCH_VARIABLE_EVER"), "<not set>");
    }

    #[test]
    fn no_secret_variable_is_ever_listed() {
        assert!(NON_SECRET_ENVS.iter().all(|name| !name.contains("SECRET") && !name.contains("API_KEY")));
    }
}
