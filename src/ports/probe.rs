//! Connectivity probe port for the optional live handshake.

/// Credentials for the MQTT platform, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Platform account name.
    pub username: String,
    /// Platform API key.
    pub key: String,
}

/// Outcome of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The platform acknowledged the handshake.
    Connected,
    /// No acknowledgement yet; the caller may poll again.
    Pending,
    /// The platform rejected the credentials. Polling again cannot help.
    Unauthorized,
}

/// Attempts a handshake with the MQTT platform.
///
/// The live adapter performs a real authenticated request; tests
/// substitute a scripted probe. The bounded poll loop that drives this
/// port lives in `connect::wait_for_connection`, not in the adapter.
pub trait ConnectionProbe: Send + Sync {
    /// Makes one time-bounded handshake attempt.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures that are neither "not yet
    /// connected" nor "bad credentials" (e.g. a malformed endpoint).
    fn poll(
        &self,
        credentials: &Credentials,
    ) -> Result<ProbeStatus, Box<dyn std::error::Error + Send + Sync>>;
}
