use thiserror::Error;

#[derive(Error, Debug)]
pub enum MxvError {
    #[error("could not reserve storage for a {rows}x{cols} run")]
    Allocation { rows: usize, cols: usize },
    #[error("invalid dimensions {rows}x{cols}: both must be positive")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("group of {group} processes cannot partition {rows} rows")]
    GroupTooLarge { group: usize, rows: usize },
    #[error("invalid strategy selector: {0}")]
    InvalidSelector(String),
    #[error("rank {rank} lost its peer {peer} during a collective")]
    PeerDisconnected { rank: usize, peer: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MxvError>;
