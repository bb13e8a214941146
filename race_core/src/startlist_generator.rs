// startlist generation

use crate::{
    CompetitionFormat, Contestant, CoreError, CoreResult, Event, Race, Raceclass, Raceplan,
    StartEntry, Startlist,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Assign every registered contestant to a race with a starting position
/// and a scheduled start time. Interval-start races start their whole
/// raceclass one interval apart in bib order; sprint first-round heats are
/// filled round-robin by bib. Later sprint rounds are left to progression.
pub fn generate_startlist(
    event: &Event,
    format: &CompetitionFormat,
    raceclasses: &[Raceclass],
    contestants: &[Contestant],
    raceplan: &Raceplan,
    races: &[Race],
) -> CoreResult<(Startlist, Vec<StartEntry>, Vec<Race>)> {
    let contestants_by_raceclass = group_contestants(raceclasses, contestants)?;

    // walk the races in plan order
    let position_in_plan: HashMap<Uuid, usize> = raceplan
        .races
        .iter()
        .enumerate()
        .map(|(position, race_id)| (*race_id, position))
        .collect();
    let mut races: Vec<Race> = races.to_vec();
    races.sort_by_key(|race| {
        position_in_plan
            .get(&race.id())
            .copied()
            .unwrap_or(usize::MAX)
    });

    let startlist_id = Uuid::new_v4();
    let mut entries: Vec<StartEntry> = Vec::new();
    let mut updated_races: Vec<Race> = Vec::new();

    match format {
        CompetitionFormat::IntervalStart(interval_format) => {
            for race in &races {
                let Some(assigned) = contestants_by_raceclass.get(race.raceclass()) else {
                    continue;
                };
                ensure_capacity(race, assigned.len())?;
                let mut race = race.clone();
                let mut entry_ids = Vec::with_capacity(assigned.len());
                for (position, (bib, contestant)) in assigned.iter().enumerate() {
                    let entry = StartEntry {
                        id: Uuid::new_v4(),
                        startlist_id,
                        race_id: race.id(),
                        bib: *bib,
                        name: contestant.full_name(),
                        club: contestant.club.clone(),
                        scheduled_start_time: race.common().start_time
                            + interval_format.intervals * position as i32,
                        starting_position: position as u32 + 1,
                    };
                    entry_ids.push(entry.id);
                    entries.push(entry);
                }
                race.common_mut().no_of_contestants = entry_ids.len() as u32;
                race.common_mut().start_entries = entry_ids;
                updated_races.push(race);
            }
        }
        CompetitionFormat::IndividualSprint(_) => {
            let mut heats_by_raceclass: HashMap<&str, Vec<Race>> = HashMap::new();
            let mut raceclass_order: Vec<&str> = Vec::new();
            for race in &races {
                if !race.is_sprint_first_round() {
                    continue;
                }
                let raceclass = race.raceclass();
                if !heats_by_raceclass.contains_key(raceclass) {
                    raceclass_order.push(raceclass);
                }
                heats_by_raceclass
                    .entry(raceclass)
                    .or_default()
                    .push(race.clone());
            }

            for raceclass in raceclass_order {
                let Some(assigned) = contestants_by_raceclass.get(raceclass) else {
                    continue;
                };
                let heats = &heats_by_raceclass[raceclass];
                let mut per_heat: Vec<Vec<StartEntry>> = vec![Vec::new(); heats.len()];
                for (index, (bib, contestant)) in assigned.iter().enumerate() {
                    let heat_index = index % heats.len();
                    let race = &heats[heat_index];
                    let starting_position = per_heat[heat_index].len() as u32 + 1;
                    per_heat[heat_index].push(StartEntry {
                        id: Uuid::new_v4(),
                        startlist_id,
                        race_id: race.id(),
                        bib: *bib,
                        name: contestant.full_name(),
                        club: contestant.club.clone(),
                        // heat starts are shared; position orders the lanes
                        scheduled_start_time: race.common().start_time,
                        starting_position,
                    });
                }
                for (race, heat_entries) in heats.iter().zip(per_heat) {
                    ensure_capacity(race, heat_entries.len())?;
                    let mut race = race.clone();
                    race.common_mut().no_of_contestants = heat_entries.len() as u32;
                    race.common_mut().start_entries =
                        heat_entries.iter().map(|entry| entry.id).collect();
                    updated_races.push(race);
                    entries.extend(heat_entries);
                }
            }
        }
    }

    let startlist = Startlist {
        id: startlist_id,
        event_id: event.id,
        no_of_contestants: entries.len() as u32,
        start_entries: entries.iter().map(|entry| entry.id).collect(),
    };
    Ok((startlist, entries, updated_races))
}

/// Group contestants by the raceclass covering their ageclass, sorted by
/// bib. Every contestant needs a bib, and every ageclass must map to
/// exactly one raceclass.
fn group_contestants<'a>(
    raceclasses: &[Raceclass],
    contestants: &'a [Contestant],
) -> CoreResult<HashMap<String, Vec<(u32, &'a Contestant)>>> {
    let mut grouped: HashMap<String, Vec<(u32, &Contestant)>> = HashMap::new();
    for contestant in contestants {
        let Some(bib) = contestant.bib else {
            return Err(CoreError::BadRequest(format!(
                "contestant {} has no bib",
                contestant.full_name()
            )));
        };
        let mut covering = raceclasses
            .iter()
            .filter(|raceclass| raceclass.covers_ageclass(&contestant.ageclass));
        let Some(raceclass) = covering.next() else {
            return Err(CoreError::BadRequest(format!(
                "ageclass {:?} of contestant with bib {bib} has no raceclass",
                contestant.ageclass
            )));
        };
        if covering.next().is_some() {
            return Err(CoreError::BadRequest(format!(
                "ageclass {:?} is covered by more than one raceclass",
                contestant.ageclass
            )));
        }
        grouped
            .entry(raceclass.name.clone())
            .or_default()
            .push((bib, contestant));
    }
    for assigned in grouped.values_mut() {
        assigned.sort_by_key(|(bib, _)| *bib);
    }
    Ok(grouped)
}

fn ensure_capacity(race: &Race, assigned: usize) -> CoreResult<()> {
    if assigned as u32 > race.common().max_no_of_contestants {
        return Err(CoreError::BadRequest(format!(
            "race {} would exceed its maximum of {} contestants",
            race.order(),
            race.common().max_no_of_contestants
        )));
    }
    Ok(())
}
