// command-level tests of startlist generation and start-entry maintenance

use chrono::{NaiveDateTime, TimeDelta};
use integration_testing::port_fakes::{
    contestant, event_id, interval_event, interval_format, make_core_with_fakes, raceclass,
    sprint_event, sprint_format,
};
use race_core::{
    CoreError, Race, SpRaces, SpStartEntries, SpStartlists, StartEntryDraft,
};

fn at(time: &str) -> NaiveDateTime {
    format!("2021-08-31T{time}").parse().unwrap()
}

#[tokio::test]
async fn test_interval_startlist_assigns_bibs_in_order() {
    // Arrange: one raceclass of sixteen, bibs 1..16
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 16)]);
    events.seed_contestants((1..=16).map(|bib| contestant(bib, "G16 years")).collect());
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();

    // Act
    let startlist_id = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap();

    // Assert
    let startlist = store
        .get_startlist_by_id(startlist_id)
        .await
        .unwrap()
        .expect("startlist should be persisted");
    assert_eq!(startlist.no_of_contestants, 16);
    assert_eq!(startlist.start_entries.len(), 16);

    let races = store.get_races_by_event_id(event_id()).await.unwrap();
    assert_eq!(races.len(), 1);
    let entries = core
        .get_start_entries_for_race(races[0].id())
        .await
        .unwrap();
    assert_eq!(races[0].common().start_entries.len(), 16);
    assert_eq!(races[0].common().no_of_contestants, 16);
    for (k, entry) in entries.iter().enumerate() {
        assert_eq!(entry.bib, k as u32 + 1);
        assert_eq!(entry.starting_position, k as u32 + 1);
        assert_eq!(
            entry.scheduled_start_time,
            at("09:00:00") + TimeDelta::seconds(30 * k as i64)
        );
    }
}

#[tokio::test]
async fn test_every_bib_starts_exactly_once() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 3), raceclass("J16", 1, 2, 2)]);
    events.seed_contestants(vec![
        contestant(1, "G16 years"),
        contestant(2, "J16 years"),
        contestant(3, "G16 years"),
        contestant(4, "J16 years"),
        contestant(5, "G16 years"),
    ]);
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();

    let startlist_id = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap();

    let entries = store
        .get_start_entries_by_startlist_id(startlist_id)
        .await
        .unwrap();
    let mut bibs: Vec<u32> = entries.iter().map(|entry| entry.bib).collect();
    bibs.sort_unstable();
    assert_eq!(bibs, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_sprint_heats_are_filled_round_robin_by_bib() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(sprint_event());
    events.seed_format(sprint_format());
    events.seed_raceclasses(vec![raceclass("J15", 1, 1, 7)]);
    events.seed_contestants((1..=7).map(|bib| contestant(bib, "J15 years")).collect());
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();

    core.generate_startlist_for_event("token", event_id())
        .await
        .unwrap();

    let mut races = store.get_races_by_event_id(event_id()).await.unwrap();
    races.sort_by_key(Race::order);
    let heats: Vec<&Race> = races
        .iter()
        .filter(|race| race.is_sprint_first_round())
        .collect();
    assert_eq!(heats.len(), 2);

    let mut heat_bibs: Vec<Vec<u32>> = Vec::new();
    for heat in &heats {
        let entries = core.get_start_entries_for_race(heat.id()).await.unwrap();
        heat_bibs.push(entries.iter().map(|entry| entry.bib).collect());
    }
    assert_eq!(heat_bibs[0], vec![1, 3, 5, 7]);
    assert_eq!(heat_bibs[1], vec![2, 4, 6]);
    // the finals stay empty until progression fills them
    for race in races.iter().filter(|race| !race.is_sprint_first_round()) {
        assert!(race.common().start_entries.is_empty());
    }
}

#[tokio::test]
async fn test_startlist_generation_requires_a_raceplan() {
    let (core, _store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 1)]);
    events.seed_contestants(vec![contestant(1, "G16 years")]);

    let err = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn test_second_startlist_for_the_same_event_is_refused() {
    let (core, _store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 1)]);
    events.seed_contestants(vec![contestant(1, "G16 years")]);
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();
    core.generate_startlist_for_event("token", event_id())
        .await
        .unwrap();

    let err = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_deleting_a_startlist_empties_the_races() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 2)]);
    events.seed_contestants(vec![contestant(1, "G16 years"), contestant(2, "G16 years")]);
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();
    let startlist_id = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap();

    core.delete_startlist(startlist_id).await.unwrap();

    assert!(
        store
            .get_startlist_by_id(startlist_id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        store
            .get_start_entries_by_startlist_id(startlist_id)
            .await
            .unwrap()
            .is_empty()
    );
    for race in store.get_races_by_event_id(event_id()).await.unwrap() {
        assert!(
            race.common().start_entries.is_empty(),
            "race {} still references deleted entries",
            race.order()
        );
    }
}

#[tokio::test]
async fn test_start_entries_can_be_removed_and_added_back() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 3)]);
    events.seed_contestants((1..=3).map(|bib| contestant(bib, "G16 years")).collect());
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();
    let startlist_id = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap();
    let races = store.get_races_by_event_id(event_id()).await.unwrap();
    let race_id = races[0].id();
    let entries = core.get_start_entries_for_race(race_id).await.unwrap();
    let removed = entries[1].clone();

    // Act: take bib 2 out, then put it back
    core.remove_start_entry(race_id, removed.id).await.unwrap();

    let startlist = store
        .get_startlist_by_id(startlist_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(startlist.no_of_contestants, 2);
    let race = store.get_race_by_id(race_id).await.unwrap().unwrap();
    assert_eq!(race.common().start_entries.len(), 2);

    let draft = StartEntryDraft {
        startlist_id,
        race_id,
        bib: removed.bib,
        name: removed.name.clone(),
        club: removed.club.clone(),
        scheduled_start_time: removed.scheduled_start_time,
        starting_position: removed.starting_position,
    };
    let new_id = core.add_start_entry(race_id, draft).await.unwrap();

    let startlist = store
        .get_startlist_by_id(startlist_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(startlist.no_of_contestants, 3);
    let entries = core.get_start_entries_for_race(race_id).await.unwrap();
    let positions: Vec<u32> = entries.iter().map(|entry| entry.starting_position).collect();
    assert_eq!(positions, vec![1, 2, 3], "order is restored around {new_id}");
}

#[tokio::test]
async fn test_duplicate_bib_in_a_race_is_refused() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(interval_event());
    events.seed_format(interval_format());
    events.seed_raceclasses(vec![raceclass("G16", 1, 1, 2)]);
    events.seed_contestants(vec![contestant(1, "G16 years"), contestant(2, "G16 years")]);
    core.generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();
    let startlist_id = core
        .generate_startlist_for_event("token", event_id())
        .await
        .unwrap();
    let races = store.get_races_by_event_id(event_id()).await.unwrap();
    let race_id = races[0].id();

    let draft = StartEntryDraft {
        startlist_id,
        race_id,
        bib: 1,
        name: "First1 Last1".into(),
        club: "Lyn Ski".into(),
        scheduled_start_time: at("09:05:00"),
        starting_position: 3,
    };
    let err = core.add_start_entry(race_id, draft).await.unwrap_err();
    assert!(matches!(err, CoreError::AlreadyExists(_)));
}
