use diesel::prelude::*;
use diesel::sql_types::BigInt;
use std::path::{Path, PathBuf};

use crate::error::ZoteroError;

const SCHEMA_PROBE: &str =
    "SELECT COUNT(*) AS table_count FROM sqlite_master WHERE type = 'table' AND name IN ('items', 'itemData', 'itemDataValues')";

#[derive(QueryableByName)]
struct SchemaProbe {
    #[diesel(sql_type = BigInt)]
    table_count: i64,
}

/// Where Zotero keeps its database unless the data directory was moved.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Zotero").join("zotero.sqlite"))
}

/// Opens the Zotero database at `path`. The file must already exist: a typo in
/// the path is reported instead of leaving an empty database behind. The
/// connection is closed when the returned value is dropped.
pub fn establish_connection(path: &Path) -> Result<SqliteConnection, ZoteroError> {
    debug!("Database path: {}", path.display());
    if !path.is_file() {
        return Err(ZoteroError::Connection(format!("{} does not exist or is not a file", path.display())).logged());
    }

    let mut conn = SqliteConnection::establish(&path.to_string_lossy())
        .map_err(|e| ZoteroError::Connection(format!("{}: {}", path.display(), e)).logged())?;

    // sqlite opens lazily, so a corrupt or foreign file only shows up on the first read
    let probe = diesel::sql_query(SCHEMA_PROBE)
        .get_result::<SchemaProbe>(&mut conn)
        .map_err(|e| ZoteroError::Connection(format!("{}: {}", path.display(), e)).logged())?;
    if probe.table_count != 3 {
        return Err(ZoteroError::Connection(format!("{} is not a Zotero database", path.display())).logged());
    }

    Ok(conn)
}
