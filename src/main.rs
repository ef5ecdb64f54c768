#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

use log::Level;
use std::error::Error;
use std::path;
use std::str::FromStr;
use structopt::StructOpt;

use crate::config::{Config, FileConfig};
use crate::error::ZoteroError;

mod config;
mod db;
mod error;
mod item_actions;
mod models;
mod schema;
#[cfg(test)]
mod test_support;

#[derive(StructOpt, Debug)]
#[structopt(name = "zotero-date-fix", about = "Rewrites the dateAdded field of one Zotero item, found by title")]
struct Options {
    #[structopt(short = "l", long = "log_level", long_help = "log level", default_value = "info")]
    log_level: String,

    #[structopt(short = "f", long = "database_file", long_help = "zotero.sqlite file; falls back to DB_PATH in ./.env, then the config file", env = "DB_PATH", parse(from_os_str))]
    database: Option<path::PathBuf>,

    #[structopt(short = "t", long = "title", long_help = "substring of the item title to search for")]
    title: Option<String>,

    #[structopt(short = "d", long = "date_added", long_help = "new dateAdded value in UTC, e.g. \"2024-11-30 09:57:32\"")]
    date_added: Option<String>,

    #[structopt(short = "c", long = "config", long_help = "JSON config file", parse(from_os_str))]
    config: Option<path::PathBuf>,

    #[structopt(short = "n", long = "dry_run", long_help = "resolve the item but do not write")]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::from_args();
    let log_level = Level::from_str(options.log_level.as_str())?;
    simple_logger::init_with_level(log_level)?;
    debug!("{:?}", options);

    info!("Starting the Zotero dateAdded update...");
    if let Err(e) = run(options) {
        error!("Update aborted: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn run(options: Options) -> Result<(), ZoteroError> {
    let file_config = match &options.config {
        Some(p) => FileConfig::load(p)?,
        None => FileConfig::default(),
    };
    let db_path = options.database.or_else(|| config::dotenv_db_path(path::Path::new(".env")));
    let config = Config::resolve(db_path, options.title, options.date_added, file_config)?;

    debug!("Connecting to the database...");
    let mut conn = db::establish_connection(&config.db_path)?;
    debug!("Connected to the database successfully.");

    debug!("Fetching item ID for title: {}", config.title_name);
    let item_id = item_actions::resolve_item_id(&config.title_name, &mut conn)?;

    if options.dry_run {
        info!("Dry run: item {} would get dateAdded {}", item_id, config.new_date_added);
        return Ok(());
    }

    item_actions::update_date_added(item_id, &config.new_date_added, &mut conn)?;
    match item_actions::find_date_added(item_id, &mut conn)? {
        Some(stored) => info!("Item {} dateAdded is now {}", item_id, stored),
        None => warn!("Item {} disappeared after the update", item_id),
    }
    info!("Date added updated successfully.");
    Ok(())
}
