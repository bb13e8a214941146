// top-level use cases composing the planners and generators with the ports

mod race_results;
mod raceplans;
mod start_entries;
mod startlists;
mod time_events;
