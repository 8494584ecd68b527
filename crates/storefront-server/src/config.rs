/// Port used when `APPLICATION_PORT` is absent, unparsable, or zero.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings read from the environment at startup. Handlers never
/// touch the environment themselves; everything flows through this value.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub port: u16,
    /// Enables request logging and the startup banner.
    pub dev_mode: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("APPLICATION_PORT").ok().as_deref(),
            std::env::var("APPLICATION_DEV_MODE").ok().as_deref(),
        )
    }

    /// Pure constructor so tests can exercise the parsing rules without
    /// mutating process-wide environment variables.
    ///
    /// Any port value that does not parse as a nonzero u16 falls back to
    /// [`DEFAULT_PORT`]. Dev mode is on only for the exact string `true`.
    pub fn from_vars(port: Option<&str>, dev_mode: Option<&str>) -> Self {
        let port = port
            .and_then(|raw| raw.trim().parse::<u16>().ok())
            .filter(|&port| port != 0)
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            dev_mode: dev_mode == Some("true"),
        }
    }
}
