//! End-to-end checks of the store → derivation → render pipeline through the
//! public API, using a recording surface in place of the terminal.

use std::fs;
use std::path::PathBuf;

use game_fund_board::{
    filter_funded, filter_unfunded, render, search, top_by_pledged, top_two_by_pledged,
    total_backers, total_pledged, CardView, DisplaySurface, GameRecord, RecordStore, Trigger,
    ViewController, ViewError, HANDLERS,
};

/// Surface that keeps every card and counts how often it was cleared.
#[derive(Default)]
struct RecordingSurface {
    cards: Vec<CardView>,
    clears: usize,
}

impl DisplaySurface for RecordingSurface {
    fn clear(&mut self) {
        self.cards.clear();
        self.clears += 1;
    }

    fn append(&mut self, card: CardView) {
        self.cards.push(card);
    }
}

impl RecordingSurface {
    fn names(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.name.as_str()).collect()
    }
}

fn game(name: &str, pledged: f64, goal: f64, backers: u64) -> GameRecord {
    GameRecord::new(name, format!("{name} description"), "", pledged, goal, backers).unwrap()
}

fn catalogue() -> Vec<GameRecord> {
    vec![
        game("Star Forge", 5000.0, 4000.0, 120),
        game("Moss Garden", 300.0, 1000.0, 12),
        game("Iron Tide", 5000.0, 9000.0, 80),
        game("Starlight Café", 750.0, 750.0, 30),
        game("Deep Root", 0.0, 500.0, 0),
    ]
}

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "game-fund-board-{test}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn render_produces_one_card_per_record_in_order() {
    let games = catalogue();
    let mut surface = RecordingSurface::default();
    let shown = render(&mut surface, &games);
    assert_eq!(shown, games.len());
    let expected: Vec<&str> = games.iter().map(GameRecord::name).collect();
    assert_eq!(surface.names(), expected);
}

#[test]
fn empty_render_clears_prior_cards() {
    let games = catalogue();
    let mut surface = RecordingSurface::default();
    render(&mut surface, &games);
    render(&mut surface, search(&games, "no such game"));
    assert!(surface.cards.is_empty());
    assert_eq!(surface.clears, 2);
}

#[test]
fn funded_and_unfunded_partition_the_collection() {
    let games = catalogue();
    let funded = filter_funded(&games);
    let unfunded = filter_unfunded(&games);
    assert_eq!(funded.len() + unfunded.len(), games.len());
    for record in &games {
        let in_funded = funded.contains(&record);
        let in_unfunded = unfunded.contains(&record);
        assert!(in_funded ^ in_unfunded, "{} must be in exactly one view", record.name());
    }
    let names: Vec<&str> = funded.iter().map(|game| game.name()).collect();
    assert_eq!(names, ["Star Forge", "Starlight Café"]);
}

#[test]
fn aggregates_match_manual_sums() {
    let games = catalogue();
    assert_eq!(total_backers(&games), Ok(242));
    assert_eq!(total_pledged(&games), 11050.0);
}

#[test]
fn overflowing_backer_counts_load_but_total_is_an_error() {
    let json = (0..3)
        .map(|idx| {
            format!(
                r#"{{"name":"Crowd {idx}","pledged":1,"goal":2,"backers":{}}}"#,
                i64::MAX
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    let store = RecordStore::from_json_str(&format!("[{json}]")).unwrap();
    assert_eq!(store.len(), 3);
    assert!(matches!(
        total_backers(store.records()),
        Err(ViewError::AggregateOverflow(_))
    ));
    assert!(game_fund_board::Summary::compute(store.records())
        .total_backers
        .is_none());
}

#[test]
fn ranking_prefers_earlier_record_on_ties() {
    let games = catalogue();
    let (first, second) = top_two_by_pledged(&games).unwrap();
    assert_eq!(first.name(), "Star Forge");
    assert_eq!(second.name(), "Iron Tide");

    let ranked = top_by_pledged(&games, games.len()).unwrap();
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].pledged() >= pair[1].pledged()));
    assert!(matches!(
        top_by_pledged(&games, 6),
        Err(ViewError::NotEnoughRecords {
            requested: 6,
            available: 5
        })
    ));
}

#[test]
fn dispatch_is_idempotent_per_trigger() {
    let store = RecordStore::new(catalogue());
    let controller = ViewController::new(&store);
    for trigger in [
        Trigger::ShowAll,
        Trigger::ShowUnfunded,
        Trigger::ShowFunded,
        Trigger::Search("star".into()),
    ] {
        let mut surface = RecordingSurface::default();
        let first = controller.dispatch(&trigger, &mut surface).unwrap();
        let snapshot = surface.cards.clone();
        let second = controller.dispatch(&trigger, &mut surface).unwrap();
        assert_eq!(first, second);
        assert_eq!(surface.cards, snapshot, "{trigger} changed on repeat");
    }
}

#[test]
fn dispatch_does_not_depend_on_previous_view() {
    let store = RecordStore::new(catalogue());
    let controller = ViewController::new(&store);
    let mut surface = RecordingSurface::default();

    controller
        .dispatch(&Trigger::Search("STAR".into()), &mut surface)
        .unwrap();
    assert_eq!(surface.names(), ["Star Forge", "Starlight Café"]);

    controller
        .dispatch(&Trigger::ShowUnfunded, &mut surface)
        .unwrap();
    assert_eq!(surface.names(), ["Moss Garden", "Iron Tide", "Deep Root"]);

    controller.dispatch(&Trigger::ShowAll, &mut surface).unwrap();
    assert_eq!(surface.cards.len(), store.len());
    assert_eq!(store.records(), catalogue().as_slice());
}

#[test]
fn handler_table_is_enumerable() {
    let names: Vec<&str> = HANDLERS.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["showAll", "showUnfunded", "showFunded", "search"]);

    let games = catalogue();
    for (name, handler) in HANDLERS {
        let view = handler(&games, "");
        let trigger = Trigger::from_event(name, "").unwrap();
        let store = RecordStore::new(games.clone());
        let expected = ViewController::new(&store).view(&trigger).unwrap();
        assert_eq!(view, expected, "{name}");
    }
}

#[test]
fn load_or_seed_writes_sample_then_reloads_it() {
    let dir = scratch_dir("seed");
    let path = dir.join("nested").join("games.json");

    let seeded = RecordStore::load_or_seed(&path).unwrap();
    assert!(path.exists());
    assert!(seeded.len() >= 2);

    let reloaded = RecordStore::load_or_seed(&path).unwrap();
    assert_eq!(reloaded.records(), seeded.records());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_keeps_user_file_and_reports_bad_records() {
    let dir = scratch_dir("load");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("games.json");

    fs::write(
        &path,
        r#"[{"name":"Only","description":"","img":"","pledged":10,"goal":20,"backers":1}]"#,
    )
    .unwrap();
    let store = RecordStore::load_or_seed(&path).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name(), "Only");

    fs::write(
        &path,
        r#"[{"name":"Broke","description":"","img":"","pledged":10,"goal":0,"backers":1}]"#,
    )
    .unwrap();
    let err = RecordStore::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("goal must be a positive amount"));
    let _ = fs::remove_dir_all(&dir);
}
