//! Parametrized fixture value: one test body, one run per starting state.
//!
//! `#[values]` multiplies the test across the listed states, each run an
//! independent test result. `finish` must land on `done` from any of them.

use cards_core::{Card, CardState, CardsDB};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct StoreFixture {
    db: CardsDB,
    _dir: TempDir,
}

#[fixture]
fn cards_db() -> StoreFixture {
    let dir = TempDir::new().expect("temp dir should be creatable");
    let db = CardsDB::open(dir.path()).expect("store should open under temp dir");
    StoreFixture { db, _dir: dir }
}

#[rstest]
fn finish(
    cards_db: StoreFixture,
    #[values(CardState::Done, CardState::InProgress, CardState::Todo)] start_state: CardState,
) {
    let card_id = cards_db
        .db
        .add_card(&Card::with_state("card_name", start_state))
        .unwrap();
    cards_db.db.finish(card_id).unwrap();
    assert_eq!(cards_db.db.get_card(card_id).unwrap().state, CardState::Done);
}
