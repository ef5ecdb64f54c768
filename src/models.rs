use diesel::prelude::*;
use std::fmt;

pub type ItemId = i64;

/// One row of the title lookup: an item joined to one of its data values.
#[derive(PartialEq, Eq, Debug, Clone, Queryable)]
pub struct MatchedItem {
    pub item_id: ItemId,
    pub value_id: i64,
    pub value: String,
    pub date_added: String,
    pub client_date_modified: String,
}

impl fmt::Display for MatchedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(itemID: {}, valueID: {}, value: {:?}, dateAdded: {}, clientDateModified: {})",
            self.item_id, self.value_id, self.value, self.date_added, self.client_date_modified
        )
    }
}
