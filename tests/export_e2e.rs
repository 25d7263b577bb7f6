// tests/export_e2e.rs
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use brawl_harvest::domain::normalize::{normalize_battle_log, normalize_player};
use brawl_harvest::domain::{BattleKeyStrategy, CollectedPlayer, RecordStore, TagRosterRecord};
use brawl_harvest::errors::ConfigError;
use brawl_harvest::export::{export_store, load_player_tags, write_roster};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("brawl_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn first_line(path: &PathBuf) -> String {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn populated_store() -> RecordStore {
    let mut store = RecordStore::new();

    let player = json!({
        "tag": "#2G09L9QRC",
        "name": "Rook",
        "trophies": 31000,
        "club": {"tag": "#2YCQ8", "name": "Harbor"},
        "brawlers": [{"id": 16000000, "name": "SHELLY", "power": 11, "rank": 25, "trophies": 750, "highestTrophies": 800}]
    });
    assert!(store.add_player(normalize_player(&player, now()).unwrap()));

    let log = json!({
        "items": [{
            "battleTime": "20250610T101500.000Z",
            "event": {"id": 15000001, "mode": "gemGrab", "map": "Hard Rock Mine"},
            "battle": {
                "mode": "gemGrab",
                "type": "ranked",
                "result": "victory",
                "duration": 120,
                "trophyChange": 8,
                "teams": [
                    [{"tag": "#2G09L9QRC", "name": "Rook", "brawler": {"id": 16000000, "name": "SHELLY", "power": 11, "trophies": 750}}],
                    [{"tag": "#8Y8CC02J", "name": "Vex", "brawler": {"id": 16000001, "name": "COLT", "power": 9, "trophies": 600}}]
                ]
            }
        }]
    });
    for battle in normalize_battle_log(&log, "#2G09L9QRC", BattleKeyStrategy::PerPlayer, now()).unwrap() {
        store.add_battle(battle);
    }
    store
}

#[test]
fn export_writes_every_populated_table_with_headers() {
    let dir = tmp_dir("populated");
    let written = export_store(&populated_store(), &dir).unwrap();

    // The brawler catalog was never fetched, so brawlers.csv is skipped
    assert_eq!(written.len(), 6);
    assert!(!dir.join("brawlers.csv").exists());

    let battles = dir.join("battles.csv");
    assert_eq!(
        first_line(&battles),
        "id,battle_time,mode_id,map_id,type,result,duration,trophy_change,star_player_tag"
    );
    let content = fs::read_to_string(&battles).unwrap();
    assert!(content.contains("20250610T101500.000Z_#2G09L9QRC"));

    let participants = fs::read_to_string(dir.join("battle_players.csv")).unwrap();
    assert_eq!(participants.lines().count(), 3);

    assert_eq!(
        first_line(&dir.join("maps.csv")),
        "id,name,mode_id,environment,created_at,updated_at"
    );
    let players = fs::read_to_string(dir.join("players.csv")).unwrap();
    assert!(players.contains("#2G09L9QRC,Rook,31000"));
    assert!(players.contains("#2YCQ8"));
}

#[test]
fn empty_store_writes_nothing() {
    let dir = tmp_dir("empty");
    let written = export_store(&RecordStore::new(), &dir).unwrap();
    assert!(written.is_empty());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn roster_is_written_under_timestamped_name() {
    let dir = tmp_dir("roster");
    let player = CollectedPlayer {
        tag: "#2G09L9QRC".into(),
        name: "Rook".into(),
        trophies: 31000,
        club_tag: Some("#2YCQ8".into()),
        club_name: "Harbor".into(),
    };
    let rows = vec![TagRosterRecord::from_player(&player, player.category())];

    let path = write_roster(&dir, &rows, now()).unwrap().unwrap();
    assert!(path.ends_with("player_tags_20250610_120000.csv"));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "player_tag,player_name,trophies,club_name,trophy_category");
    assert_eq!(lines[1], "#2G09L9QRC,Rook,31000,Harbor,expert");
}

#[test]
fn roster_output_feeds_the_tag_loader() {
    let dir = tmp_dir("roundtrip_tags");
    let path = dir.join("tags.csv");
    fs::write(
        &path,
        "player_tag,player_name,trophies\n#2G09L9QRC,Rook,31000\n8y8cc02j,Vex,12000\n,,\n",
    )
    .unwrap();

    let tags = load_player_tags(&path).unwrap();
    assert_eq!(tags, vec!["#2G09L9QRC", "#8Y8CC02J"]);
}

#[test]
fn tag_file_without_tags_is_rejected() {
    let dir = tmp_dir("no_tags");
    let path = dir.join("tags.csv");
    fs::write(&path, "player_tag\n").unwrap();

    let err = load_player_tags(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::EmptyTagList(_))
    ));
}
