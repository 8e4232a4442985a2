use club_tournament::domain::{default_skill_levels, SubMatch};
use club_tournament::store::{DocumentFile, ErrorKind, TournamentStore};
use tempfile::TempDir;

struct League {
    _dir: TempDir,
    store: TournamentStore,
    path: std::path::PathBuf,
    a: String,
    b: String,
    a1: String,
    a2: String,
    b1: String,
    b2: String,
}

fn league() -> League {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tournament_data.json");
    let mut store = TournamentStore::open(DocumentFile::new(&path), default_skill_levels()).unwrap();

    let a = store.create_team("Team A").unwrap();
    let b = store.create_team("Team B").unwrap();
    let a1 = store.add_player(&a, "a1", "Beginner").unwrap();
    let a2 = store.add_player(&a, "a2", "Expert").unwrap();
    let b1 = store.add_player(&b, "b1", "Beginner").unwrap();
    let b2 = store.add_player(&b, "b2", "Expert").unwrap();

    League {
        _dir: dir,
        store,
        path,
        a,
        b,
        a1,
        a2,
        b1,
        b2,
    }
}

#[test]
fn split_sub_matches_make_a_draw() {
    let mut l = league();

    let id = l
        .store
        .record_match(
            &l.a,
            &l.b,
            vec![
                SubMatch::singles(&l.a1, &l.b1, &[l.a1.as_str()]),
                SubMatch::singles(&l.a2, &l.b2, &[l.b2.as_str()]),
            ],
        )
        .unwrap();

    let record = l.store.match_record(&id).unwrap();
    assert_eq!(record.score(), "1-1");
    assert_eq!(record.winner_id, None);
    assert_eq!(record.winner_name, "Draw");
    let standings = l.store.standings();
    assert!(standings.iter().all(|s| s.draws == 1 && s.matches_played == 1));
}

#[test]
fn majority_decides_the_match() {
    let mut l = league();

    let id = l
        .store
        .record_match(
            &l.a,
            &l.b,
            vec![
                SubMatch::singles(&l.a1, &l.b1, &[l.a1.as_str()]),
                SubMatch::singles(&l.a2, &l.b2, &[l.a2.as_str()]),
                SubMatch::doubles([l.a1.as_str(), l.a2.as_str()], [l.b1.as_str(), l.b2.as_str()], &[]),
            ],
        )
        .unwrap();

    let record = l.store.match_record(&id).unwrap().clone();
    assert_eq!((record.team1_sub_match_wins, record.team2_sub_match_wins), (2, 0));
    assert!(record.team1_sub_match_wins + record.team2_sub_match_wins <= 3);
    assert_eq!(record.winner_id.as_deref(), Some(l.a.as_str()));
    assert_eq!(l.store.standings()[0].name, "Team A");

    // re-applying the same list keeps the tally
    l.store.update_match(&id, record.sub_matches.clone()).unwrap();
    let again = l.store.match_record(&id).unwrap();
    assert_eq!(again.score(), record.score());
    assert_eq!(again.timestamp, record.timestamp);
}

#[test]
fn standings_without_matches_are_zero() {
    let l = league();

    let standings = l.store.standings();

    assert_eq!(standings.len(), 2);
    assert!(standings
        .iter()
        .all(|s| s.wins + s.losses + s.draws + s.matches_played == 0));
    assert_eq!(standings[0].name, "Team A");
}

#[test]
fn deleting_a_team_removes_its_matches() {
    let mut l = league();
    l.store
        .record_match(&l.a, &l.b, vec![SubMatch::singles(&l.a1, &l.b1, &[l.b1.as_str()])])
        .unwrap();

    l.store.delete_team(&l.a).unwrap();

    assert!(l.store.matches().is_empty());
    let standings = l.store.standings();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].matches_played, 0);
}

#[test]
fn referenced_skill_level_stays() {
    let mut l = league();
    let before = l.store.data().clone();

    let err = l.store.remove_skill_level("Expert").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cascade);
    assert_eq!(l.store.data(), &before);
}

#[test]
fn import_without_matches_is_rejected() {
    let mut l = league();
    let before = l.store.data().clone();
    let import = l.path.with_file_name("incomplete.json");
    std::fs::write(&import, r#"{"teams": {}, "skill_levels": ["Beginner"]}"#).unwrap();

    let err = l.store.import(&import).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InputValidation);
    assert_eq!(l.store.data(), &before);
}

#[test]
fn corrupt_document_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tournament_data.json");
    std::fs::write(&path, "[1, 2,").unwrap();

    let store = TournamentStore::open(DocumentFile::new(&path), default_skill_levels()).unwrap();

    assert!(store.was_recovered());
    assert!(store.teams().is_empty());
    assert_eq!(store.skill_levels(), default_skill_levels().as_slice());
    assert!(!path.exists());
}

#[test]
fn reopening_keeps_insertion_order() {
    let mut l = league();
    l.store.create_team("Aardvarks").unwrap();
    let first = l
        .store
        .record_match(&l.b, &l.a, vec![SubMatch::singles(&l.b1, &l.a1, &[])])
        .unwrap();
    let second = l
        .store
        .record_match(&l.a, &l.b, vec![SubMatch::singles(&l.a2, &l.b2, &[])])
        .unwrap();

    let reopened = TournamentStore::open(DocumentFile::new(&l.path), default_skill_levels()).unwrap();

    let names: Vec<&str> = reopened.teams().values().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Team A", "Team B", "Aardvarks"]);
    let ids: Vec<&String> = reopened.matches().keys().collect();
    assert_eq!(ids, vec![&first, &second]);
    assert_eq!(reopened.data(), l.store.data());
}

#[test]
fn repeated_winner_is_not_counted_twice() {
    let mut l = league();

    let err = l
        .store
        .record_match(
            &l.a,
            &l.b,
            vec![SubMatch::doubles(
                [l.a1.as_str(), l.a2.as_str()],
                [l.b1.as_str(), l.b2.as_str()],
                &[l.a1.as_str(), l.a1.as_str()],
            )],
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InputValidation);
    assert!(l.store.player_points(None).iter().all(|row| row.points == 0));
}
