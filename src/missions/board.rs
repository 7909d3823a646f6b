//! The order board: keeps exactly one active mission on the bar and replaces
//! it after every serve, skip, new day and restart.

use bevy::prelude::*;

use crate::shared::*;
use super::{MissionGenerator, MissionRng};

fn post_next_mission(
    generator: &mut MissionGenerator,
    rng: &mut MissionRng,
    vocab: &Vocabulary,
    book: &RecipeBook,
    active: &mut ActiveMission,
    posted: &mut EventWriter<MissionPostedEvent>,
) {
    match generator.generate(&mut rng.0, vocab, book) {
        Ok(mission) => {
            posted.send(MissionPostedEvent {
                mission: mission.clone(),
            });
            active.mission = Some(mission);
        }
        Err(err) => {
            warn!("[Missions] Could not post an order: {}", err);
            active.mission = None;
        }
    }
}

/// Posts the first order of the session when the bar opens.
pub fn post_opening_mission(
    mut generator: ResMut<MissionGenerator>,
    mut rng: ResMut<MissionRng>,
    vocab: Res<Vocabulary>,
    book: Res<RecipeBook>,
    mut active: ResMut<ActiveMission>,
    mut posted: EventWriter<MissionPostedEvent>,
) {
    if active.mission.is_some() {
        return;
    }
    post_next_mission(&mut generator, &mut rng, &vocab, &book, &mut active, &mut posted);
}

/// Replaces the active order once it has been served or skipped, and at the
/// start of each day. A restart also wipes the generator's memory.
#[allow(clippy::too_many_arguments)]
pub fn refresh_mission(
    mut served: EventReader<DrinkServedEvent>,
    mut skipped: EventReader<MissionSkippedEvent>,
    mut day_started: EventReader<DayStartedEvent>,
    mut restarts: EventReader<RestartGameEvent>,
    mut generator: ResMut<MissionGenerator>,
    mut rng: ResMut<MissionRng>,
    vocab: Res<Vocabulary>,
    book: Res<RecipeBook>,
    mut active: ResMut<ActiveMission>,
    mut posted: EventWriter<MissionPostedEvent>,
) {
    let restarted = restarts.read().count() > 0;
    if restarted {
        generator.forget();
    }

    let replace = restarted
        | (served.read().count() > 0)
        | (skipped.read().count() > 0)
        | (day_started.read().count() > 0);
    if !replace {
        return;
    }

    post_next_mission(&mut generator, &mut rng, &vocab, &book, &mut active, &mut posted);
}

pub fn log_mission_posted(mut events: EventReader<MissionPostedEvent>) {
    for ev in events.read() {
        info!(
            "[Missions] New order ({:?}): {}",
            ev.mission.mission_type(),
            ev.mission.text
        );
    }
}
