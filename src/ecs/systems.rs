//! ECS Systems
//!
//! World-wide passes and queries shared by combat and the host turn loop.

use hecs::{Entity, World};

use crate::attributes::{names, AttributeModifier, AttributeSet};
use crate::ecs::{DamageHandling, Health, Location, LocationId};

/// Age every timed modifier in the world by one turn.
///
/// Returns each modifier that expired along with its owner and attribute, so
/// the caller can report fading effects.
pub fn tick_modifiers(world: &mut World) -> Vec<(Entity, &'static str, AttributeModifier)> {
    let mut expired = Vec::new();

    for (entity, attrs) in world.query_mut::<&mut AttributeSet>() {
        for (attribute, modifier) in attrs.update_modifiers() {
            log::debug!("{:?}: {} from {} expired", entity, attribute, modifier.source);
            expired.push((entity, attribute, modifier));
        }
    }

    expired
}

/// Whether an entity is out of the fight. Entities with no health of any kind
/// never go down. A `DamageHandling` verdict only counts alongside an
/// `AttributeSet`; a bare `Health` pool is down at 0.
pub fn is_down(world: &World, entity: Entity) -> bool {
    if let Ok(attrs) = world.get::<&AttributeSet>(entity) {
        let handler_says = world
            .get::<&DamageHandling>(entity)
            .map_or(false, |h| h.0.is_defeated(&attrs));
        return handler_says || health_depleted(&attrs);
    }
    world.get::<&Health>(entity).map_or(false, |h| h.is_dead())
}

pub fn health_depleted(attrs: &AttributeSet) -> bool {
    attrs.get(names::HEALTH).map_or(false, |h| h <= 0)
}

/// Whether two entities share a location. Detached entities share nothing.
pub fn co_located(world: &World, a: Entity, b: Entity) -> bool {
    match (location_of(world, a), location_of(world, b)) {
        (Some(here), Some(there)) => here == there,
        _ => false,
    }
}

pub fn location_of(world: &World, entity: Entity) -> Option<LocationId> {
    world.get::<&Location>(entity).ok().map(|l| l.0)
}

/// Every entity currently at `location`
pub fn entities_at(world: &World, location: LocationId) -> Vec<Entity> {
    world
        .query::<&Location>()
        .iter()
        .filter(|(_, at)| at.0 == location)
        .map(|(entity, _)| entity)
        .collect()
}
