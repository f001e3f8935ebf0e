#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("connection string {0:?} doesn't name a scheme")]
    MissingScheme(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}
