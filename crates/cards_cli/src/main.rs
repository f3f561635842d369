//! Command-line entry point over the cards core crate.
//!
//! # Responsibility
//! - Provide a small local surface for poking the store:
//!   add/list/count/finish/delete-all.
//! - Keep output deterministic for quick sanity checks.

use cards_core::{
    default_log_level, init_logging, Card, CardId, CardListQuery, CardState, CardsDB, RepoError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

const DB_DIR_ENV: &str = "CARDS_DB_DIR";
const DEFAULT_DB_DIR: &str = ".cards";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("cards: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "add" => {
            let name = args
                .get(1)
                .ok_or("usage: cards add <name> [state]")?;
            let state = match args.get(2) {
                Some(text) => CardState::from_str(text).map_err(|err| err.to_string())?,
                None => CardState::default(),
            };
            let db = open_store()?;
            let id = db
                .add_card(&Card::with_state(name.as_str(), state))
                .map_err(store_error)?;
            println!("{id}");
            close_store(db)
        }
        "list" => {
            let db = open_store()?;
            let cards = db.list_cards(&CardListQuery::default()).map_err(store_error)?;
            for card in cards {
                let id = card.id.map(|id| id.to_string()).unwrap_or_default();
                println!("{id}\t{}\t{}", card.state, card.name);
            }
            close_store(db)
        }
        "count" => {
            let db = open_store()?;
            println!("{}", db.count().map_err(store_error)?);
            close_store(db)
        }
        "finish" => {
            let id = parse_id(args.get(1).ok_or("usage: cards finish <id>")?)?;
            let db = open_store()?;
            db.finish(id).map_err(store_error)?;
            close_store(db)
        }
        "delete-all" => {
            let db = open_store()?;
            db.delete_all().map_err(store_error)?;
            close_store(db)
        }
        "version" => {
            println!("cards {}", cards_core::core_version());
            Ok(())
        }
        other => Err(format!("unknown command `{other}`; run without arguments for usage")),
    }
}

fn open_store() -> Result<CardsDB, String> {
    let root = store_root();
    // A broken log setup must not take the store down with it.
    if let Err(message) = init_logging(default_log_level(), root.join("logs")) {
        eprintln!("cards: logging disabled: {message}");
    }
    CardsDB::open(&root).map_err(store_error)
}

fn close_store(db: CardsDB) -> Result<(), String> {
    db.close().map_err(store_error)
}

fn store_root() -> PathBuf {
    std::env::var_os(DB_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_DIR))
}

fn parse_id(text: &str) -> Result<CardId, String> {
    CardId::parse_str(text).map_err(|_| format!("invalid card id `{text}`"))
}

fn store_error(err: RepoError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::{run, DB_DIR_ENV};
    use cards_core::logging_status;

    #[test]
    fn store_commands_initialize_logging_under_the_store_root() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(DB_DIR_ENV, dir.path());

        run(&["count".to_string()]).unwrap();

        let (_level, log_dir) = logging_status().expect("logging should be active");
        assert_eq!(log_dir, dir.path().join("logs"));
    }
}

fn print_usage() {
    println!("usage: cards <command>");
    println!();
    println!("commands:");
    println!("  add <name> [state]   add a card (state: todo | 'in prog' | done)");
    println!("  list                 list all cards");
    println!("  count                print the number of cards");
    println!("  finish <id>          mark a card done");
    println!("  delete-all           remove every card");
    println!("  version              print the core crate version");
    println!();
    println!("store root comes from ${DB_DIR_ENV} (default `{DEFAULT_DB_DIR}`)");
}
