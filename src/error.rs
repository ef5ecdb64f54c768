use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoteroError {
    #[error("cannot open database: {0}")]
    Connection(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no matching item found for title: {0}")]
    NotFound(String),
    #[error("failed to update item: {0}")]
    Update(String),
    #[error("out of memory: {0}")]
    ResourceExhaustion(String),
    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),
}

impl ZoteroError {
    /// Maps a failed lookup, singling out SQLITE_NOMEM which diesel reports as an
    /// unclassified database error.
    pub fn from_lookup(err: diesel::result::Error) -> ZoteroError {
        if is_out_of_memory(&err) {
            ZoteroError::ResourceExhaustion(err.to_string())
        } else {
            ZoteroError::Query(err)
        }
    }

    /// Logs the error before it is handed back to the caller. Out-of-memory is
    /// the one failure reported as critical.
    pub fn logged(self) -> ZoteroError {
        match &self {
            ZoteroError::ResourceExhaustion(_) => error!("CRITICAL: {}", self),
            _ => error!("{}", self),
        }
        self
    }

    /// Maps a failed write. Anything other than out-of-memory is an update failure.
    pub fn from_write(err: diesel::result::Error) -> ZoteroError {
        if is_out_of_memory(&err) {
            ZoteroError::ResourceExhaustion(err.to_string())
        } else {
            ZoteroError::Update(err.to_string())
        }
    }
}

fn is_out_of_memory(err: &diesel::result::Error) -> bool {
    match err {
        diesel::result::Error::DatabaseError(_, info) => info.message().contains("out of memory"),
        _ => false,
    }
}
