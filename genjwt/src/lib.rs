use crate::cli::Cli;
use crate::config::GenJwtConfig;
use clap::Parser;
use genjwt_lib::payload::PayloadSource;
use genjwt_lib::{TokenRequest, generate_token};
use tracing::{Level, info};

pub mod cli;
mod config;
pub mod errors;

/// Parses the command line, generates the token and prints it on stdout.
///
/// Help and version requests exit right away with status 0. Logs go to stderr
/// so that stdout only ever carries the token.
///
/// # Errors
///
/// * `GenJwtCliError::Usage` - The command line is invalid.
/// * `GenJwtCliError::ConfigurationError` - The configuration can't be loaded.
/// * `GenJwtCliError::GenJwtLibError` - The payload, the claims or the signing failed.
pub fn run() -> errors::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => return Err(err.into()),
        Err(err) => err.exit(),
    };

    init_tracing(cli.verbose);

    let token = generate(&cli)?;
    println!("{token}");

    Ok(())
}

/// Generates a token from parsed command line arguments.
///
/// The configuration named by `--config` and the `GENJWT_*` environment
/// variables provide defaults for the options the command line leaves out.
pub fn generate(cli: &Cli) -> errors::Result<String> {
    let config = GenJwtConfig::new(cli.config.as_deref())?;
    let options = config.sign_options(cli);

    info!(
        algorithm = %options.algorithm,
        expires_in = ?options.expires_in,
        payload_file = ?cli.payload_file,
        "Generating token"
    );

    let request = TokenRequest {
        payload: PayloadSource::new(cli.payload.clone(), cli.payload_file.clone()),
        claims: cli.claims.clone(),
        secret: cli.secret.clone(),
        options,
    };

    Ok(generate_token(&request)?)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}
