use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no capture device available: {0}")]
    NoInputDevice(String),
    #[error("failed to spawn {name} worker: {source}")]
    WorkerSpawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} worker disconnected")]
    WorkerDisconnected(&'static str),
}

/// Error type that can cross worker thread boundaries.
pub type SendError = Box<dyn std::error::Error + Send + Sync>;
