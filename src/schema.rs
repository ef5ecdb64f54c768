// Subset of the Zotero schema this tool reads and writes. The tables are
// owned by Zotero; only the columns used here are declared.

table! {
    items (item_id) {
        #[sql_name = "itemID"]
        item_id -> BigInt,
        #[sql_name = "dateAdded"]
        date_added -> Text,
        #[sql_name = "clientDateModified"]
        client_date_modified -> Text,
    }
}

table! {
    #[sql_name = "itemData"]
    item_data (item_id, field_id) {
        #[sql_name = "itemID"]
        item_id -> BigInt,
        #[sql_name = "fieldID"]
        field_id -> BigInt,
        #[sql_name = "valueID"]
        value_id -> BigInt,
    }
}

table! {
    #[sql_name = "itemDataValues"]
    item_data_values (value_id) {
        #[sql_name = "valueID"]
        value_id -> BigInt,
        value -> Text,
    }
}

joinable!(item_data -> items (item_id));
joinable!(item_data -> item_data_values (value_id));

allow_tables_to_appear_in_same_query!(items, item_data, item_data_values);
