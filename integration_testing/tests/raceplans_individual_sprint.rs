// command-level tests of raceplan generation for individual-sprint events

use integration_testing::port_fakes::{
    event_id, make_core_with_fakes, raceclass, sprint_event, sprint_format,
};
use race_core::{CoreError, Race, SpRaceplans, SpRaces};

fn sprint(race: &Race) -> &race_core::IndividualSprintRace {
    match race {
        Race::IndividualSprint(race) => race,
        Race::IntervalStart(_) => panic!("expected an individual sprint race"),
    }
}

#[tokio::test]
async fn test_seven_contestants_get_a_quarter_and_a_final() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(sprint_event());
    events.seed_format(sprint_format());
    events.seed_raceclasses(vec![raceclass("G13", 1, 1, 7)]);

    let raceplan_id = core
        .generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();

    let mut races = store.get_races_by_raceplan_id(raceplan_id).await.unwrap();
    races.sort_by_key(Race::order);
    assert_eq!(races.len(), 2);
    assert_eq!(sprint(&races[0]).round, "Q");
    assert_eq!(sprint(&races[0]).common.no_of_contestants, 7);
    assert_eq!(sprint(&races[1]).round, "F");
    assert_eq!(sprint(&races[1]).common.no_of_contestants, 7);
}

#[tokio::test]
async fn test_sixteen_contestants_get_two_quarters_and_two_finals() {
    let (core, store, events, _auth) = make_core_with_fakes();
    events.seed_event(sprint_event());
    events.seed_format(sprint_format());
    events.seed_raceclasses(vec![raceclass("G13", 1, 1, 16)]);

    let raceplan_id = core
        .generate_raceplan_for_event("token", event_id())
        .await
        .unwrap();

    let raceplan = store
        .get_raceplan_by_id(raceplan_id)
        .await
        .unwrap()
        .unwrap();
    let mut races = store.get_races_by_raceplan_id(raceplan_id).await.unwrap();
    races.sort_by_key(Race::order);

    let rounds: Vec<(&str, &str, u32)> = races
        .iter()
        .map(|race| {
            let race = sprint(race);
            (
                race.round.as_str(),
                race.index.as_str(),
                race.common.no_of_contestants,
            )
        })
        .collect();
    assert_eq!(
        rounds,
        vec![("Q", "", 8), ("Q", "", 8), ("F", "A", 8), ("F", "B", 8)]
    );

    // every contestant is assigned to a first-round heat
    let first_round_total: u32 = races
        .iter()
        .filter(|race| race.is_sprint_first_round())
        .map(|race| race.common().no_of_contestants)
        .sum();
    assert_eq!(first_round_total, raceplan.no_of_contestants);
}

#[tokio::test]
async fn test_contestants_above_every_template_are_refused() {
    let (core, _store, events, _auth) = make_core_with_fakes();
    events.seed_event(sprint_event());
    events.seed_format(sprint_format());
    // the seeded table tops out at 24 contestants per raceclass
    events.seed_raceclasses(vec![raceclass("G13", 1, 1, 30)]);

    let err = core
        .generate_raceplan_for_event("token", event_id())
        .await
        .unwrap_err();
    match err {
        CoreError::BadRequest(message) => {
            assert!(message.contains("Unsupported value for no of contestants"))
        }
        other => panic!("expected BadRequest, got {other:?}"),
    }
}
