//! Auth command - check and explain token setup

use crate::cli::style::{check, Stylize};
use anstream::println;
use media_flow::auth::{get_auth, AuthSource, TOKEN_ENV};
use media_flow::config::{config_dir, ENDPOINT_ENV};
use media_flow::error::Result;

/// Run the auth test command
pub fn run_auth_test() -> Result<()> {
    let auth = get_auth()?;
    let source = match &auth.source {
        AuthSource::EnvVar => TOKEN_ENV.to_string(),
        AuthSource::File(path) => path.display().to_string(),
    };
    println!("{} Token found", check());
    println!("  Source: {}", source.accent());
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    let token_path = config_dir().map_or_else(
        || "<config dir>/media-flow/token".to_string(),
        |d| d.join("token").display().to_string(),
    );

    println!("{}", "Reservation Service Authentication".emphasis());
    println!();
    println!("Option 1: Environment variable");
    println!("  Set {}", TOKEN_ENV.accent());
    println!();
    println!("Option 2: Token file");
    println!("  Write the token to {}", token_path.accent());
    println!();
    println!("The service URL is read from {} or --endpoint.", ENDPOINT_ENV.accent());
}
