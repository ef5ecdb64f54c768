use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SEEDED_DATE_ADDED: &str = "2019-03-02 14:11:05";

// Trimmed copy of the Zotero tables the tool touches, with the same column
// names and affinities.
const SCHEMA: &str = r#"
CREATE TABLE items (
    itemID INTEGER PRIMARY KEY,
    itemTypeID INT NOT NULL,
    dateAdded TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    dateModified TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    clientDateModified TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    libraryID INT NOT NULL,
    key TEXT NOT NULL,
    version INT NOT NULL DEFAULT 0,
    synced INT NOT NULL DEFAULT 0,
    UNIQUE (libraryID, key)
);
CREATE TABLE itemDataValues (
    valueID INTEGER PRIMARY KEY,
    value UNIQUE
);
CREATE TABLE itemData (
    itemID INT,
    fieldID INT,
    valueID,
    PRIMARY KEY (itemID, fieldID),
    FOREIGN KEY (itemID) REFERENCES items(itemID) ON DELETE CASCADE,
    FOREIGN KEY (valueID) REFERENCES itemDataValues(valueID)
);
"#;

// fieldID 1 is title, 2 is abstractNote.
const SEED: &str = r#"
INSERT INTO items (itemID, itemTypeID, dateAdded, clientDateModified, libraryID, key)
VALUES (53, 2, '2019-03-02 14:11:05', '2019-03-02 14:11:05', 1, 'DESIGN53'),
       (54, 2, '2019-03-02 14:11:05', '2019-03-02 14:11:05', 1, 'ETHICS54'),
       (60, 2, '2019-03-02 14:11:05', '2019-03-02 14:11:05', 1, 'VIRTUE60'),
       (61, 2, '2019-03-02 14:11:05', '2019-03-02 14:11:05', 1, 'VIRTUE61'),
       (70, 2, '2019-03-02 14:11:05', '2019-03-02 14:11:05', 1, 'GROWTH70'),
       (71, 2, '2019-03-02 14:11:05', '2019-03-02 14:11:05', 1, 'TOP10071');
INSERT INTO itemDataValues (valueID, value)
VALUES (385, 'The Design Of Everyday Things'),
       (386, 'What are ethical frameworks?'),
       (387, 'Aristotle & Virtue Theory'),
       (388, 'A survey of virtue ethics in applied settings'),
       (389, 'Scaling to 100% utilisation'),
       (390, 'Top 100 papers of the decade');
INSERT INTO itemData (itemID, fieldID, valueID)
VALUES (53, 1, 385),
       (54, 1, 386),
       (61, 1, 387),
       (60, 2, 388),
       (70, 1, 389),
       (71, 1, 390);
"#;

/// Creates a Zotero-shaped database inside a fresh temporary directory. The
/// directory is removed when the returned guard is dropped.
pub fn fixture_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("zotero.sqlite");
    let mut conn = SqliteConnection::establish(&path.to_string_lossy()).expect("failed to create fixture db");
    conn.batch_execute(SCHEMA).expect("failed to create schema");
    conn.batch_execute(SEED).expect("failed to seed fixture db");
    (dir, path)
}
