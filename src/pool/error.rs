/// Pool error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Every connection attempt allowed by the retry budget failed.
    ///
    /// The embedding application decides whether to terminate, degrade or
    /// retry at a higher level.
    #[error("Failed to connect to the RabbitMq broker: all {attempts} attempts failed")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    /// A channel was requested from a pool that holds no channels.
    ///
    /// This guards against misuse (a pool built with size zero), not against
    /// environmental failures, and is never worth retrying.
    #[error("Channel pool is empty, no channel was ever provisioned")]
    EmptyPool,
}
