// raceplan generation for individual-sprint events

use crate::{
    CoreError, CoreResult, Event, HeatQuota, IndividualSprintFormat, IndividualSprintRace,
    QuotaKeyword, Race, RaceCommon, RaceConfig, Raceclass, Raceplan,
};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Build the sprint race tree for an event: per raceclass the applicable
/// round table is materialized into heats, contestants are flowed through
/// the progression rules to size the later rounds, and the heats are laid
/// out on the clock group by group, round by round.
pub fn plan_individual_sprint(
    event: &Event,
    format: &IndividualSprintFormat,
    raceclasses: &[Raceclass],
) -> CoreResult<(Raceplan, Vec<Race>)> {
    let mut active: Vec<&Raceclass> = raceclasses
        .iter()
        .filter(|raceclass| raceclass.no_of_contestants > 0)
        .collect();
    active.sort_by_key(|raceclass| (raceclass.group, raceclass.order));

    let raceplan_id = Uuid::new_v4();

    // one entry per raceclass: its group and its races, round by round
    let mut materialized: Vec<(u32, Vec<Vec<IndividualSprintRace>>)> =
        Vec::with_capacity(active.len());
    for raceclass in &active {
        let template = format.template_for(raceclass).ok_or_else(|| {
            CoreError::BadRequest("Unsupported value for no of contestants.".into())
        })?;
        materialized.push((
            raceclass.group,
            materialize_raceclass(raceclass, template, format, event, raceplan_id),
        ));
    }

    // Emission order inside a group is round-major: every raceclass's
    // first round back to back, then every raceclass's second round, etc.
    let mut emission: Vec<(u32, usize, IndividualSprintRace)> = Vec::new();
    let mut i = 0;
    while i < materialized.len() {
        let group = materialized[i].0;
        let mut j = i;
        while j < materialized.len() && materialized[j].0 == group {
            j += 1;
        }
        let max_rounds = materialized[i..j]
            .iter()
            .map(|(_, rounds)| rounds.len())
            .max()
            .unwrap_or(0);
        for phase in 0..max_rounds {
            for (_, rounds) in &mut materialized[i..j] {
                if let Some(round_races) = rounds.get_mut(phase) {
                    for race in round_races.drain(..) {
                        emission.push((group, phase, race));
                    }
                }
            }
        }
        i = j;
    }

    // temporal layout: the gap before a race depends on what it follows
    let mut races: Vec<Race> = Vec::with_capacity(emission.len());
    let mut clock = event.starts_at();
    let mut prev: Option<(u32, usize)> = None;
    for (group, phase, mut race) in emission {
        if let Some((prev_group, prev_phase)) = prev {
            clock += if prev_group != group {
                format.time_between_groups
            } else if prev_phase != phase {
                format.time_between_rounds
            } else {
                format.time_between_heats
            };
        }
        race.common.order = races.len() as u32 + 1;
        race.common.start_time = clock;
        prev = Some((group, phase));
        races.push(Race::IndividualSprint(race));
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

/// Materialize one raceclass's heats, round by round in template order.
/// First-round heats split the raceclass evenly; later rounds are sized by
/// the contestants the progression rules flow into them.
fn materialize_raceclass(
    raceclass: &Raceclass,
    template: &RaceConfig,
    format: &IndividualSprintFormat,
    event: &Event,
    raceplan_id: Uuid,
) -> Vec<Vec<IndividualSprintRace>> {
    // (round, letter) -> contestants flowing in from earlier rounds
    let mut pools: BTreeMap<(String, String), u32> = BTreeMap::new();
    let mut rounds_out: Vec<Vec<IndividualSprintRace>> = Vec::with_capacity(template.rounds.len());

    for (round_no, round) in template.rounds.iter().enumerate() {
        let letters: Vec<(String, u32)> = template
            .no_of_heats
            .get(round)
            .map(|heats| {
                heats
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(letter, count)| (letter.clone(), *count))
                    .collect()
            })
            .unwrap_or_default();
        // a round run in a single A letter leaves the index empty
        let single_letter = letters.len() == 1 && letters[0].0 == "A";

        let mut heats: Vec<IndividualSprintRace> = Vec::new();
        if round_no == 0 {
            let total_heats: u32 = letters.iter().map(|(_, count)| *count).sum();
            let mut sizes = distribute(raceclass.no_of_contestants, total_heats).into_iter();
            for (letter, count) in &letters {
                for heat in 1..=*count {
                    heats.push(sprint_race(
                        raceclass,
                        template,
                        format,
                        event,
                        raceplan_id,
                        round,
                        letter,
                        single_letter,
                        heat,
                        sizes.next().unwrap_or(0),
                    ));
                }
            }
        } else {
            for (letter, count) in &letters {
                let pool = pools
                    .get(&(round.clone(), letter.clone()))
                    .copied()
                    .unwrap_or(0);
                let mut sizes = distribute(pool, *count).into_iter();
                for heat in 1..=*count {
                    heats.push(sprint_race(
                        raceclass,
                        template,
                        format,
                        event,
                        raceplan_id,
                        round,
                        letter,
                        single_letter,
                        heat,
                        sizes.next().unwrap_or(0),
                    ));
                }
            }
        }

        for race in &heats {
            feed_pools(&mut pools, race);
        }
        rounds_out.push(heats);
    }
    rounds_out
}

#[allow(clippy::too_many_arguments)]
fn sprint_race(
    raceclass: &Raceclass,
    template: &RaceConfig,
    format: &IndividualSprintFormat,
    event: &Event,
    raceplan_id: Uuid,
    round: &str,
    letter: &str,
    single_letter: bool,
    heat: u32,
    no_of_contestants: u32,
) -> IndividualSprintRace {
    IndividualSprintRace {
        common: RaceCommon {
            id: Uuid::new_v4(),
            raceclass: raceclass.name.clone(),
            // order and start_time are assigned during layout
            order: 0,
            start_time: event.starts_at(),
            no_of_contestants,
            max_no_of_contestants: format.max_no_of_contestants_in_race,
            event_id: event.id,
            raceplan_id,
            start_entries: Vec::new(),
            results: HashMap::new(),
        },
        round: round.to_string(),
        index: if single_letter {
            String::new()
        } else {
            letter.to_string()
        },
        heat,
        rule: template
            .from_to
            .get(round)
            .and_then(|letter_map| letter_map.get(letter))
            .cloned()
            .unwrap_or_default(),
    }
}

/// Resolve one heat's progression rule into the later rounds' letter
/// pools. Numeric quotas leave the heat first; "REST" takes whoever is
/// left after them and "ALL" the whole heat.
fn feed_pools(pools: &mut BTreeMap<(String, String), u32>, race: &IndividualSprintRace) {
    let heat_size = race.common.no_of_contestants;
    let mut remaining = heat_size;
    for (next_round, letter_map) in &race.rule {
        for (next_letter, quota) in letter_map {
            if let HeatQuota::Count(count) = quota {
                let take = (*count).min(remaining);
                remaining -= take;
                if take > 0 {
                    *pools
                        .entry((next_round.clone(), next_letter.clone()))
                        .or_default() += take;
                }
            }
        }
    }
    for (next_round, letter_map) in &race.rule {
        for (next_letter, quota) in letter_map {
            if let HeatQuota::Keyword(keyword) = quota {
                let take = match keyword {
                    QuotaKeyword::All => heat_size,
                    QuotaKeyword::Rest => std::mem::take(&mut remaining),
                };
                if take > 0 {
                    *pools
                        .entry((next_round.clone(), next_letter.clone()))
                        .or_default() += take;
                }
            }
        }
    }
}

/// Split n contestants across k heats as evenly as possible, larger heats
/// first when not divisible.
fn distribute(n: u32, heats: u32) -> Vec<u32> {
    if heats == 0 {
        return Vec::new();
    }
    let base = n / heats;
    let remainder = n % heats;
    (0..heats)
        .map(|heat| if heat < remainder { base + 1 } else { base })
        .collect()
}
