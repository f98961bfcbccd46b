pub type Result<T> = std::result::Result<T, GenJwtError>;

#[derive(Debug, thiserror::Error)]
pub enum GenJwtError {
    #[error("Error reading payload file: {0}")]
    PayloadFileIo(#[from] std::io::Error),
    #[error("Error reading payload file: {0}")]
    PayloadFileJson(#[source] serde_json::Error),
    #[error("Invalid payload JSON: {0}")]
    PayloadJson(#[source] serde_json::Error),
    #[error("Invalid claims JSON: {0}")]
    ClaimsJson(#[source] serde_json::Error),
    #[error("Invalid {origin} JSON: expected an object but found {found}")]
    NotAnObject {
        origin: &'static str,
        found: &'static str,
    },
    #[error("Error generating token: {0}")]
    Sign(#[from] SignError),
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("secretOrPrivateKey must have a value")]
    MissingSecret,
    #[error("\"algorithm\" must be a valid string enum value, got '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("Invalid key for {algorithm} : {source}")]
    InvalidKey {
        algorithm: String,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("\"{0}\" should be a number of seconds")]
    NonNumericClaim(&'static str),
    #[error("Bad \"options.{option}\" option. The payload already has an \"{claim}\" property.")]
    ClaimConflict {
        option: &'static str,
        claim: &'static str,
    },
    #[error(
        "\"{option}\" should be a number of seconds or string representing a timespan eg: \"1d\", \"20h\", 60, got '{value}'"
    )]
    InvalidTimespan { option: &'static str, value: String },
    #[error("Signing error : {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}
