use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("no splat is selected")]
    NoSelection,
    #[error("splat \"{0}\" has no hotspots")]
    EmptyCollection(String),
    #[error("invalid hotspot file: missing \"hotspots\" array")]
    InvalidHotspotFile,
    #[error("invalid hotspot at index {index}: {reason}")]
    InvalidHotspot { index: usize, reason: String },
    #[error("hotspot \"{0}\" has no navigation target")]
    NavigationTargetUnset(String),
    #[error("navigation target \"{0}\" not found")]
    NavigationTargetNotFound(String),
    #[error("{0}")]
    NavigationOneShotReceive(#[from] oneshot::RecvError),
}
