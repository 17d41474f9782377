//! Player entity creation

use hecs::{Entity, World};

use crate::attributes::AttributeSet;
use crate::ecs::{CombatVictories, Home, Location, LocationId, Name, Player};

/// Spawn a player at `location` with catalog-default attributes.
///
/// `home` is where the player wakes up after defeat.
pub fn spawn_player(
    world: &mut World,
    name: &str,
    location: LocationId,
    home: Option<LocationId>,
) -> Entity {
    let entity = world.spawn((
        Player,
        Name::new(name),
        AttributeSet::new(),
        Location(location),
        CombatVictories::default(),
    ));

    if let Some(home) = home {
        let _ = world.insert_one(entity, Home(home));
    }

    log::debug!("Spawned player {} at {}", name, location);
    entity
}
