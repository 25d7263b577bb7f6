use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::errors::ConfigError;

pub const TOKEN_ENV_VAR: &str = "BRAWL_STARS_API_TOKEN";

/// Read the API token from the environment, falling back to an interactive prompt
pub fn resolve_api_token() -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        return validate_token(&token);
    }

    let stdin = io::stdin();
    prompt_for_token(&mut stdin.lock(), &mut io::stdout())
}

pub fn prompt_for_token<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Enter your Brawl Stars API token: ").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read API token from stdin")?;
    validate_token(&line)
}

fn validate_token(raw: &str) -> Result<String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(ConfigError::MissingToken.into());
    }
    Ok(token.to_string())
}
