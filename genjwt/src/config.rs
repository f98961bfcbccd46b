use crate::cli::Cli;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use genjwt_lib::signer::{DEFAULT_ALGORITHM, DEFAULT_EXPIRES_IN, SignOptions};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Default sign options, read from an optional TOML file then from
/// `GENJWT_*` environment variables.
///
/// Numbers are accepted wherever a string is expected. For `expires_in` and
/// `not_before` a number counts seconds.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GenJwtConfig {
    #[serde(default, deserialize_with = "string_or_number")]
    pub algorithm: Option<String>,
    #[serde(default, deserialize_with = "timespan_or_seconds")]
    pub expires_in: Option<String>,
    #[serde(default, deserialize_with = "timespan_or_seconds")]
    pub not_before: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub audience: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub key_id: Option<String>,
}

/// Scalar as typed by figment, environment variables like `GENJWT_SUBJECT=42`
/// come out as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn is_number(&self) -> bool {
        matches!(self, Scalar::Integer(_) | Scalar::Float(_))
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::String(value) => f.write_str(value),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Bool(value) => write!(f, "{value}"),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| scalar.to_string()))
}

fn timespan_or_seconds<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| {
        if scalar.is_number() {
            format!("{scalar}s")
        } else {
            scalar.to_string()
        }
    }))
}

impl GenJwtConfig {
    pub fn new(configuration_file: Option<&Path>) -> crate::errors::Result<Self> {
        let mut figment = Figment::new();
        if let Some(configuration_file) = configuration_file {
            figment = figment.merge(Toml::file_exact(configuration_file));
        }
        Ok(figment.merge(Env::prefixed("GENJWT_")).extract()?)
    }

    /// Combines the command line with the configuration.
    ///
    /// Flags win over the configuration, which wins over the built-in defaults.
    pub fn sign_options(self, cli: &Cli) -> SignOptions {
        SignOptions {
            algorithm: cli
                .algorithm
                .clone()
                .or(self.algorithm)
                .unwrap_or_else(|| DEFAULT_ALGORITHM.to_string()),
            expires_in: Some(
                cli.expires_in
                    .clone()
                    .or(self.expires_in)
                    .unwrap_or_else(|| DEFAULT_EXPIRES_IN.to_string()),
            ),
            not_before: cli.not_before.clone().or(self.not_before),
            audience: cli.audience.clone().or(self.audience),
            issuer: cli.issuer.clone().or(self.issuer),
            subject: cli.subject.clone().or(self.subject),
            jwt_id: cli.jwt_id.clone(),
            key_id: cli.key_id.clone().or(self.key_id),
            no_timestamp: cli.no_timestamp,
        }
    }
}
