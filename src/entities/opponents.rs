//! Opponent entity creation
//!
//! Builds opponents from data templates with level-based scaling.

use hecs::{Entity, World};

use crate::attributes::{names, AttributeSet};
use crate::data::OpponentTemplate;
use crate::ecs::{AttackPower, Defense, Location, LocationId, Name, Opponent, Retaliates};
use crate::progression::scale_to_level;

/// Spawn an opponent from `template` at `location`.
///
/// Attributes are scaled to `level` (or the template's level when `None`);
/// the template's health then overrides the scaled pools.
pub fn spawn_opponent(
    world: &mut World,
    template: &OpponentTemplate,
    location: LocationId,
    level: Option<i32>,
) -> Entity {
    let level = level.unwrap_or(template.level);
    let mut attrs = AttributeSet::new();
    scale_to_level(&mut attrs, level);
    let _ = attrs.set(names::MAX_HEALTH, template.health);
    let _ = attrs.set(names::HEALTH, template.health);

    let entity = world.spawn((
        Name::new(template.name.as_str()),
        Opponent::new(template.key.as_str()).with_loot(template.loot.clone()),
        attrs,
        Defense(template.defense),
        AttackPower(template.attack_power),
        Location(location),
    ));

    if template.retaliates {
        let _ = world.insert_one(entity, Retaliates);
    }

    log::debug!("Spawned {} (level {}) at {}", template.name, level, location);
    entity
}
