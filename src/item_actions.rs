use chrono::NaiveDateTime;
use diesel::debug_query;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::error::ZoteroError;
use crate::models::{ItemId, MatchedItem};
use crate::schema::{item_data, item_data_values, items};

/// Layout of `items.dateAdded`, always UTC.
pub const DATE_ADDED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Wraps the search term for LIKE, escaping its own wildcards with '\'.
fn like_pattern(title: &str) -> String {
    let mut pattern = String::with_capacity(title.len() + 2);
    pattern.push('%');
    for c in title.chars() {
        if c == '%' || c == '_' || c == '\\' {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Accepts only the exact zero-padded layout Zotero writes. chrono alone is
/// lenient about padding and whitespace, and `dateAdded` is compared as text.
pub fn validate_date_added(new_date: &str) -> Result<(), ZoteroError> {
    let parsed = NaiveDateTime::parse_from_str(new_date, DATE_ADDED_FORMAT).map_err(|e| {
        ZoteroError::InvalidInput(format!("date added {:?} does not match {}: {}", new_date, DATE_ADDED_FORMAT, e)).logged()
    })?;
    if parsed.format(DATE_ADDED_FORMAT).to_string() != new_date {
        return Err(ZoteroError::InvalidInput(format!(
            "date added {:?} is not in canonical form, expected {:?}",
            new_date,
            parsed.format(DATE_ADDED_FORMAT).to_string()
        ))
        .logged());
    }
    Ok(())
}

/// Every data value containing `title` (case-insensitive for ASCII), joined to its item.
/// Rows come back in whatever order sqlite produces them.
///
/// A title of only whitespace is refused like an empty one; any other title is
/// searched exactly as given, surrounding spaces included.
pub fn find_matches(title: &str, conn: &mut SqliteConnection) -> Result<Vec<MatchedItem>, ZoteroError> {
    if title.trim().is_empty() {
        return Err(ZoteroError::InvalidInput("title name cannot be empty".to_string()).logged());
    }

    let query = item_data::table
        .inner_join(item_data_values::table)
        .inner_join(items::table)
        .filter(item_data_values::value.like(like_pattern(title)).escape('\\'))
        .select((
            items::item_id,
            item_data::value_id,
            item_data_values::value,
            items::date_added,
            items::client_date_modified,
        ));
    debug!("{}", debug_query::<Sqlite, _>(&query).to_string());
    let results = query.load::<MatchedItem>(conn).map_err(|e| ZoteroError::from_lookup(e).logged())?;
    debug!("num_matched: {}", results.len());
    Ok(results)
}

/// Resolves `title` to the item owning the first matching data value.
///
/// A title fragment can also occur in another item's abstract or notes; when
/// the matches span several items the first row still wins, but the
/// competing ids are logged so a wrong pick can be spotted.
pub fn resolve_item_id(title: &str, conn: &mut SqliteConnection) -> Result<ItemId, ZoteroError> {
    let results = find_matches(title, conn)?;
    let first = match results.first() {
        Some(first) => first,
        None => return Err(ZoteroError::NotFound(title.to_string()).logged()),
    };
    info!("Successfully fetched results for title: {}", title);
    info!("Results: {}", first);

    let mut distinct_ids: Vec<ItemId> = Vec::new();
    for row in results.iter() {
        if !distinct_ids.contains(&row.item_id) {
            distinct_ids.push(row.item_id);
        }
    }
    if distinct_ids.len() > 1 {
        warn!("Title {:?} matches {} items {:?}, using item {}", title, distinct_ids.len(), distinct_ids, first.item_id);
        for row in results.iter().skip(1) {
            debug!("also matched: {}", row);
        }
    }

    Ok(first.item_id)
}

/// Sets `dateAdded` on a single item. The connection is in autocommit mode, so
/// the change is durable once this returns.
pub fn update_date_added(item_id: ItemId, new_date: &str, conn: &mut SqliteConnection) -> Result<(), ZoteroError> {
    validate_date_added(new_date)?;

    let update = diesel::update(items::table.filter(items::item_id.eq(item_id))).set(items::date_added.eq(new_date));
    debug!("{}", debug_query::<Sqlite, _>(&update).to_string());
    let num_updated = update.execute(conn).map_err(|e| ZoteroError::from_write(e).logged())?;
    debug!("num_updated: {}", num_updated);
    if num_updated == 0 {
        return Err(ZoteroError::Update(format!("no item with itemID {}", item_id)).logged());
    }
    Ok(())
}

pub fn find_date_added(item_id: ItemId, conn: &mut SqliteConnection) -> Result<Option<String>, ZoteroError> {
    let query = items::table.filter(items::item_id.eq(item_id)).select(items::date_added);
    debug!("{}", debug_query::<Sqlite, _>(&query).to_string());
    let date_added = query.first::<String>(conn).optional().map_err(|e| ZoteroError::from_lookup(e).logged())?;
    Ok(date_added)
}
