// raceplan generation for interval-start events

use crate::{
    CoreError, CoreResult, Event, IntervalStartFormat, IntervalStartRace, Race, RaceCommon,
    Raceclass, Raceplan,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Build the race sequence for an interval-start event: one race per
/// raceclass, groups separated by the configured gap. A race occupies
/// `intervals * no_of_contestants` of wall time, so the next race starts
/// one interval after the previous race's last contestant has left.
pub fn plan_interval_start(
    event: &Event,
    format: &IntervalStartFormat,
    raceclasses: &[Raceclass],
) -> CoreResult<(Raceplan, Vec<Race>)> {
    let mut active: Vec<&Raceclass> = raceclasses
        .iter()
        .filter(|raceclass| raceclass.no_of_contestants > 0)
        .collect();
    active.sort_by_key(|raceclass| (raceclass.group, raceclass.order));

    if active
        .iter()
        .any(|raceclass| raceclass.no_of_contestants > format.max_no_of_contestants_in_race)
    {
        return Err(CoreError::BadRequest(
            "Unsupported value for no of contestants.".into(),
        ));
    }

    let raceplan_id = Uuid::new_v4();
    let mut races: Vec<Race> = Vec::with_capacity(active.len());
    let mut clock = event.starts_at();
    let mut prev_group: Option<u32> = None;

    for raceclass in &active {
        if prev_group.is_some_and(|group| group != raceclass.group) {
            clock += format.time_between_groups;
        }
        races.push(Race::IntervalStart(IntervalStartRace {
            common: RaceCommon {
                id: Uuid::new_v4(),
                raceclass: raceclass.name.clone(),
                order: races.len() as u32 + 1,
                start_time: clock,
                no_of_contestants: raceclass.no_of_contestants,
                max_no_of_contestants: format.max_no_of_contestants_in_race,
                event_id: event.id,
                raceplan_id,
                start_entries: Vec::new(),
                results: HashMap::new(),
            },
        }));
        clock += format.intervals * raceclass.no_of_contestants as i32;
        prev_group = Some(raceclass.group);
    }

    let raceplan = Raceplan {
        id: raceplan_id,
        event_id: event.id,
        no_of_contestants: active
            .iter()
            .map(|raceclass| raceclass.no_of_contestants)
            .sum(),
        races: races.iter().map(Race::id).collect(),
    };
    Ok((raceplan, races))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn event() -> Event {
        serde_json::from_value(serde_json::json!({
            "id": "290e70d5-0933-4af0-bb53-1d705ba7eb95",
            "name": "Oslo Skagen sprint",
            "competition_format": "Interval Start",
            "date_of_event": "2021-08-31",
            "time_of_event": "09:00:00"
        }))
        .unwrap()
    }

    fn format() -> IntervalStartFormat {
        serde_json::from_value(serde_json::json!({
            "name": "Interval Start",
            "intervals": "00:00:30",
            "time_between_groups": "00:10:00",
            "max_no_of_contestants_in_race": 10000
        }))
        .unwrap()
    }

    fn raceclass(name: &str, group: u32, order: u32, n: u32) -> Raceclass {
        Raceclass {
            id: Uuid::new_v4(),
            name: name.to_string(),
            ageclasses: vec![format!("{name} years")],
            event_id: event().id,
            no_of_contestants: n,
            ranking: true,
            group,
            order,
        }
    }

    fn at(time: &str) -> NaiveDateTime {
        format!("2021-08-31T{time}").parse().unwrap()
    }

    #[test]
    fn test_two_groups_of_two_raceclasses() {
        let raceclasses = vec![
            raceclass("G16", 1, 1, 16),
            raceclass("J16", 1, 2, 18),
            raceclass("G15", 2, 1, 15),
            raceclass("J15", 2, 2, 17),
        ];

        let (raceplan, races) = plan_interval_start(&event(), &format(), &raceclasses).unwrap();

        assert_eq!(raceplan.no_of_contestants, 66);
        assert_eq!(raceplan.races.len(), 4);

        let expected = [
            ("G16", 1, "09:00:00", 16),
            ("J16", 2, "09:08:00", 18),
            ("G15", 3, "09:27:00", 15),
            ("J15", 4, "09:34:30", 17),
        ];
        for (race, (name, order, start, n)) in races.iter().zip(expected) {
            assert_eq!(race.raceclass(), name);
            assert_eq!(race.order(), order, "order of {name}");
            assert_eq!(race.common().start_time, at(start), "start time of {name}");
            assert_eq!(race.common().no_of_contestants, n);
            assert_eq!(race.common().raceplan_id, raceplan.id);
        }
    }

    #[test]
    fn test_empty_raceclasses_consume_no_schedule_time() {
        let raceclasses = vec![
            raceclass("G16", 1, 1, 16),
            raceclass("J16", 1, 2, 0),
            raceclass("G15", 2, 1, 15),
        ];

        let (raceplan, races) = plan_interval_start(&event(), &format(), &raceclasses).unwrap();

        assert_eq!(raceplan.no_of_contestants, 31);
        assert_eq!(races.len(), 2, "the empty raceclass is skipped entirely");
        // 09:00:00 + 16 * 30s + group gap
        assert_eq!(races[1].common().start_time, at("09:18:00"));
    }

    #[test]
    fn test_raceclass_over_race_capacity_is_rejected() {
        let mut format = format();
        format.max_no_of_contestants_in_race = 10;
        let raceclasses = vec![raceclass("G16", 1, 1, 16)];

        let err = plan_interval_start(&event(), &format, &raceclasses).unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));
    }
}
