use clap::Parser;
use clap::builder::TypedValueParser;
use std::path::PathBuf;

/// CLI tool to generate JSON Web Tokens (JWT)
#[derive(Debug, Parser)]
#[command(name = "genjwt", author, version, about, long_about = None)]
pub struct Cli {
    /// Secret key to sign the JWT (PEM private key for RS*, PS*, ES* and EdDSA)
    #[arg(short, long)]
    pub secret: String,
    /// JWT payload as JSON string
    #[arg(short, long, default_value = "{}")]
    pub payload: String,
    /// Path to a JSON file containing the payload
    #[arg(
        short = 'f',
        long,
        value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from)
    )]
    pub payload_file: Option<PathBuf>,
    /// Expiration time (e.g., 1h, 30m, 10s) [default: 1h]
    #[arg(short, long = "expiresIn", visible_alias = "expires-in")]
    pub expires_in: Option<String>,
    /// Signing algorithm [default: HS256]
    #[arg(short, long)]
    pub algorithm: Option<String>,
    /// Issuer of the token
    #[arg(short, long)]
    pub issuer: Option<String>,
    /// Subject of the token
    #[arg(short = 'x', long)]
    pub subject: Option<String>,
    /// Additional claims as JSON string
    #[arg(short, long, default_value = "{}")]
    pub claims: String,
    /// Audience of the token
    #[arg(long)]
    pub audience: Option<String>,
    /// Time before which the token is not valid (e.g., 10s, 5m)
    #[arg(long)]
    pub not_before: Option<String>,
    /// Unique identifier of the token
    #[arg(long)]
    pub jwt_id: Option<String>,
    /// Key identifier added to the header
    #[arg(long)]
    pub key_id: Option<String>,
    /// Do not add the "iat" claim
    #[arg(long)]
    pub no_timestamp: bool,
    /// TOML file providing default options
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Log debug information on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
