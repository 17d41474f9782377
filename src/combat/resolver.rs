//! Attack resolution
//!
//! Runs one attack between two entities: roll to hit, roll damage, apply it,
//! handle defeat, and queue the defender's counter-attack. The counter-attack
//! is never resolved inline; it waits on the resolver's scheduler and is
//! re-validated against live state when it comes due.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::attributes::{names, AttributeSet};
use crate::combat::check::{roll_ability_check, AbilityCheck};
use crate::combat::damage::{
    apply_to_health, attack_attribute, defense_rating, final_damage, roll_base_damage,
    roll_to_hit, AttackRoll, DEFAULT_ATTACK_POWER,
};
use crate::data::CombatConfig;
use crate::dice::Dice;
use crate::ecs::systems::health_depleted;
use crate::ecs::{
    co_located, is_down, location_of, AttackPower, CombatVictories, DamageHandling, Defense,
    Health, Home, Location, LocationId, Name, Opponent, Player, Retaliates,
};
use crate::game::Scheduler;
use crate::items::{LootSpawner, Weapon, WorldLootSpawner};

/// Work the resolver defers to a later turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// `retaliator` strikes back at `target`
    CounterAttack { retaliator: Entity, target: Entity },
}

impl DeferredAction {
    /// Whether the action depends on `entity`
    pub fn involves(&self, entity: Entity) -> bool {
        match *self {
            DeferredAction::CounterAttack { retaliator, target } => {
                retaliator == entity || target == entity
            }
        }
    }
}

/// What happened to a defeated participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DefeatReport {
    /// A disposable opponent was detached from the world
    Removed {
        opponent_key: String,
        loot: Vec<String>,
        /// Victor's victory count for this opponent key after the win
        victories: u32,
    },
    /// A durable actor was sent home and partly healed
    Respawned {
        home: Option<LocationId>,
        health: i32,
    },
    /// Defeated, but neither disposable nor durable
    Fallen,
}

/// Result of one attack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatOutcome {
    pub hit: bool,
    /// Raw d20, 0 if the attack could not be made
    pub roll: i32,
    pub attacker_bonus: i32,
    pub hit_total: i32,
    pub defense_class: i32,
    /// Damage actually taken, `None` on a miss
    pub damage: Option<i32>,
    pub defender_defeated: bool,
    pub defeat: Option<DefeatReport>,
    /// Whether the defender queued a counter-attack
    pub counter_scheduled: bool,
}

impl CombatOutcome {
    fn from_roll(roll: &AttackRoll) -> Self {
        Self {
            hit: roll.hit,
            roll: roll.roll,
            attacker_bonus: roll.bonus,
            hit_total: roll.hit_total,
            defense_class: roll.defense_class,
            damage: None,
            defender_defeated: false,
            defeat: None,
            counter_scheduled: false,
        }
    }

    /// An attack that could not be made: a participant is gone or down
    fn void() -> Self {
        Self {
            hit: false,
            roll: 0,
            attacker_bonus: 0,
            hit_total: 0,
            defense_class: 0,
            damage: None,
            defender_defeated: false,
            defeat: None,
            counter_scheduled: false,
        }
    }
}

/// A counter-attack that fired during [`CombatResolver::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct FiredCounter {
    pub retaliator: Entity,
    pub target: Entity,
    pub outcome: CombatOutcome,
}

/// Resolves attacks and owns the deferred counter-attack queue
pub struct CombatResolver<D = StdRng, S = WorldLootSpawner> {
    config: CombatConfig,
    dice: D,
    spawner: S,
    scheduler: Scheduler<DeferredAction>,
}

impl CombatResolver {
    /// Resolver with default config, world loot spawning and seeded dice
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            CombatConfig::default(),
            StdRng::seed_from_u64(seed),
            WorldLootSpawner,
        )
    }
}

impl<D: Dice, S: LootSpawner> CombatResolver<D, S> {
    pub fn new(config: CombatConfig, dice: D, spawner: S) -> Self {
        Self {
            config,
            dice,
            spawner,
            scheduler: Scheduler::new(),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    pub fn scheduler(&self) -> &Scheduler<DeferredAction> {
        &self.scheduler
    }

    /// Ability check against the configured default difficulty
    pub fn ability_check(&mut self, attrs: &AttributeSet, name: &str) -> AbilityCheck {
        roll_ability_check(attrs, name, self.config.default_difficulty, &mut self.dice)
    }

    /// Resolve one attack of `attacker` on `defender`.
    ///
    /// Returns as soon as the exchange is settled. A surviving defender that
    /// retaliates gets a counter-attack queued for a later turn; see
    /// [`CombatResolver::advance`].
    pub fn resolve_attack(
        &mut self,
        world: &mut World,
        attacker: Entity,
        defender: Entity,
        weapon: Option<&Weapon>,
    ) -> CombatOutcome {
        let mut outcome = self.strike(world, attacker, defender, weapon);

        if outcome.hit
            && !outcome.defender_defeated
            && world.get::<&Retaliates>(defender).is_ok()
        {
            self.scheduler.schedule(
                self.config.counter_attack_delay,
                DeferredAction::CounterAttack {
                    retaliator: defender,
                    target: attacker,
                },
            );
            outcome.counter_scheduled = true;
            log::debug!(
                "{} will strike back at {} in {} turn(s)",
                name_of(world, defender),
                name_of(world, attacker),
                self.config.counter_attack_delay
            );
        }

        outcome
    }

    /// Advance the clock by `turns`, firing deferred actions as they come
    /// due. Actions whose participants are gone, apart, or down are dropped
    /// without effect.
    pub fn advance(&mut self, world: &mut World, turns: u64) -> Vec<FiredCounter> {
        let mut fired = Vec::new();
        for _ in 0..turns {
            for action in self.scheduler.tick() {
                if let Some(counter) = self.fire(world, action) {
                    fired.push(counter);
                }
            }
        }
        fired
    }

    /// Cancel every pending action tied to `entity`, e.g. before despawning
    /// it. Returns how many were dropped.
    pub fn cancel_involving(&mut self, entity: Entity) -> usize {
        self.scheduler.cancel_where(|action| action.involves(entity))
    }

    fn fire(&mut self, world: &mut World, action: DeferredAction) -> Option<FiredCounter> {
        let DeferredAction::CounterAttack { retaliator, target } = action;

        if !world.contains(retaliator) || !world.contains(target) {
            log::debug!("Counter-attack dropped: participant no longer exists");
            return None;
        }
        if !co_located(world, retaliator, target) {
            log::debug!(
                "Counter-attack dropped: {} and {} are no longer together",
                name_of(world, retaliator),
                name_of(world, target)
            );
            return None;
        }
        if is_down(world, retaliator) || is_down(world, target) {
            log::debug!("Counter-attack dropped: a participant is already down");
            return None;
        }

        log::info!(
            "{} counter-attacks {}",
            name_of(world, retaliator),
            name_of(world, target)
        );
        let outcome = self.strike(world, retaliator, target, None);
        Some(FiredCounter {
            retaliator,
            target,
            outcome,
        })
    }

    /// Roll to hit, deal damage and settle defeat. Never schedules anything.
    fn strike(
        &mut self,
        world: &mut World,
        attacker: Entity,
        defender: Entity,
        weapon: Option<&Weapon>,
    ) -> CombatOutcome {
        if !world.contains(attacker) || !world.contains(defender) {
            log::warn!("Attack skipped: attacker or defender does not exist");
            return CombatOutcome::void();
        }
        if is_down(world, attacker) || is_down(world, defender) {
            log::debug!(
                "Attack skipped: {} or {} is already down",
                name_of(world, attacker),
                name_of(world, defender)
            );
            return CombatOutcome::void();
        }

        // Attack roll
        let attack_value = attribute(world, attacker, attack_attribute(weapon));
        let explicit_defense = world.get::<&Defense>(defender).ok().map(|d| d.0);
        let defense = defense_rating(explicit_defense, attribute(world, defender, names::DEXTERITY));
        let roll = roll_to_hit(attack_value, defense, &mut self.dice);
        let mut outcome = CombatOutcome::from_roll(&roll);

        if !roll.hit {
            log::debug!(
                "{} misses {} ({} vs DC {})",
                name_of(world, attacker),
                name_of(world, defender),
                roll.hit_total,
                roll.defense_class
            );
            return outcome;
        }

        // Damage
        let attack_power = world
            .get::<&AttackPower>(attacker)
            .map(|p| p.0)
            .unwrap_or(DEFAULT_ATTACK_POWER);
        let base = roll_base_damage(
            attribute(world, attacker, names::STRENGTH),
            attack_power,
            &mut self.dice,
        );
        let damage = final_damage(base, weapon, explicit_defense.unwrap_or(0).max(0));
        let (taken, defeated) = apply_damage(world, defender, damage);
        outcome.damage = Some(taken);
        outcome.defender_defeated = defeated;

        log::debug!(
            "{} hits {} for {} ({} vs DC {})",
            name_of(world, attacker),
            name_of(world, defender),
            taken,
            roll.hit_total,
            roll.defense_class
        );

        // Defeat
        if defeated {
            outcome.defeat = Some(self.handle_defeat(world, attacker, defender));
        }

        outcome
    }

    fn handle_defeat(&mut self, world: &mut World, victor: Entity, defeated: Entity) -> DefeatReport {
        self.cancel_involving(defeated);

        let opponent = world.get::<&Opponent>(defeated).ok().map(|o| (*o).clone());
        if let Some(opponent) = opponent {
            return self.remove_opponent(world, victor, defeated, opponent);
        }
        if world.get::<&Player>(defeated).is_ok() {
            return self.respawn(world, defeated);
        }

        log::info!("{} falls", name_of(world, defeated));
        DefeatReport::Fallen
    }

    fn remove_opponent(
        &mut self,
        world: &mut World,
        victor: Entity,
        defeated: Entity,
        opponent: Opponent,
    ) -> DefeatReport {
        let _ = world.remove_one::<Location>(defeated);

        let drop_at = location_of(world, victor);
        let loot = opponent.loot_table.roll(&mut self.dice);
        for key in &loot {
            self.spawner.spawn_loot(world, key, &opponent.key, drop_at);
        }

        let recorded = world
            .get::<&mut CombatVictories>(victor)
            .ok()
            .map(|mut wins| wins.record(&opponent.key));
        let victories = match recorded {
            Some(count) => count,
            None => {
                let mut wins = CombatVictories::default();
                let count = wins.record(&opponent.key);
                let _ = world.insert_one(victor, wins);
                count
            }
        };

        log::info!(
            "{} defeated {} (dropped: {:?})",
            name_of(world, victor),
            opponent.key,
            loot
        );

        DefeatReport::Removed {
            opponent_key: opponent.key,
            loot,
            victories,
        }
    }

    fn respawn(&mut self, world: &mut World, defeated: Entity) -> DefeatReport {
        let home = world
            .get::<&Home>(defeated)
            .ok()
            .map(|h| h.0)
            .or(self.config.fallback_home);

        if let Some(home) = home {
            let _ = world.insert_one(defeated, Location(home));
        }

        let floor = self.config.respawn_health_floor;
        let health = match world.query_one_mut::<(Option<&mut AttributeSet>, Option<&mut Health>)>(defeated) {
            Ok((Some(attrs), _)) => {
                let max = attrs.get(names::MAX_HEALTH).unwrap_or(floor);
                let target = if home.is_some() { floor.max(max / 2) } else { max };
                let _ = attrs.set(names::HEALTH, target);
                attrs.get(names::HEALTH).unwrap_or(target)
            }
            Ok((None, Some(health))) => {
                health.current = if home.is_some() {
                    floor.max(health.max / 2)
                } else {
                    health.max
                };
                health.current
            }
            _ => 0,
        };

        log::info!(
            "{} was defeated and wakes at {} with {} health",
            name_of(world, defeated),
            home.map_or_else(|| "the same spot".to_string(), |h| h.to_string()),
            health
        );

        DefeatReport::Respawned { home, health }
    }
}

/// Effective attribute value, `None` if the entity has no attribute set
fn attribute(world: &World, entity: Entity, name: &str) -> Option<i32> {
    world
        .get::<&AttributeSet>(entity)
        .ok()
        .and_then(|attrs| attrs.get(name))
}

/// Apply damage through whichever capability the defender exposes.
/// Returns the damage taken and whether the defender is now defeated.
///
/// A `DamageHandling` component only applies alongside an `AttributeSet`;
/// on a bare `Health` pool it is ignored and the full damage lands.
fn apply_damage(world: &mut World, defender: Entity, damage: i32) -> (i32, bool) {
    let query = world.query_one_mut::<(
        Option<&mut AttributeSet>,
        Option<&DamageHandling>,
        Option<&mut Health>,
    )>(defender);

    match query {
        Ok((Some(attrs), Some(handler), _)) => {
            let taken = handler.0.take_damage(attrs, damage);
            let down = handler.0.is_defeated(attrs) || health_depleted(attrs);
            (taken, down)
        }
        Ok((Some(attrs), None, _)) => {
            let taken = apply_to_health(attrs, damage);
            (taken, health_depleted(attrs))
        }
        Ok((None, _, Some(health))) => {
            health.take_damage(damage);
            (damage, health.is_dead())
        }
        Ok((None, _, None)) => (damage, false),
        Err(_) => (0, false),
    }
}

fn name_of(world: &World, entity: Entity) -> String {
    world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| format!("{:?}", entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ArmoredHide;
    use crate::dice::ScriptedDice;
    use crate::ecs::LootDrop;
    use crate::items::LootTable;

    const ARENA: LocationId = LocationId(1);

    fn resolver(rolls: &[i32], chances: &[f64]) -> CombatResolver<ScriptedDice> {
        let dice = ScriptedDice::new()
            .with_rolls(rolls.iter().copied())
            .with_chances(chances.iter().copied());
        CombatResolver::new(CombatConfig::default(), dice, WorldLootSpawner)
    }

    fn stats(strength: i32, health: i32) -> AttributeSet {
        let mut attrs = AttributeSet::new();
        attrs.set("strength", strength).unwrap();
        attrs.set("health", health).unwrap();
        attrs
    }

    fn fighter(world: &mut World, name: &str, strength: i32, health: i32) -> Entity {
        world.spawn((Name::new(name), stats(strength, health), Location(ARENA)))
    }

    fn health(world: &World, entity: Entity) -> i32 {
        world.get::<&AttributeSet>(entity).unwrap().get("health").unwrap()
    }

    #[test]
    fn test_hit_applies_weapon_damage() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let target = fighter(&mut world, "dummy", 10, 10);
        let mut combat = resolver(&[15, 2], &[]);

        let sword = Weapon::melee("iron sword", 5);
        let outcome = combat.resolve_attack(&mut world, hero, target, Some(&sword));

        assert!(outcome.hit);
        assert_eq!(outcome.attacker_bonus, 2);
        assert_eq!(outcome.hit_total, 17);
        assert_eq!(outcome.defense_class, 10);
        // d4 2 + bonus 2 + weapon 5
        assert_eq!(outcome.damage, Some(9));
        assert_eq!(health(&world, target), 1);
        assert!(!outcome.defender_defeated);
        assert!(!outcome.counter_scheduled);
    }

    #[test]
    fn test_lethal_hit_removes_opponent_and_drops_loot() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let loot = LootTable::new()
            .with("code fragment", 0.7)
            .with("bug report", 0.3);
        let bug = world.spawn((
            Name::new("bug creature"),
            stats(10, 9),
            Location(ARENA),
            Opponent::new("bug creature").with_loot(loot),
            Retaliates,
        ));
        let mut combat = resolver(&[15, 2], &[0.5, 0.5]);

        let sword = Weapon::melee("iron sword", 5);
        let outcome = combat.resolve_attack(&mut world, hero, bug, Some(&sword));

        assert!(outcome.defender_defeated);
        assert!(!outcome.counter_scheduled);
        assert_eq!(health(&world, bug), 0);
        assert!(world.get::<&Location>(bug).is_err());
        assert_eq!(
            outcome.defeat,
            Some(DefeatReport::Removed {
                opponent_key: "bug creature".to_string(),
                loot: vec!["code fragment".to_string()],
                victories: 1,
            })
        );

        let drops: Vec<_> = world
            .query::<(&LootDrop, &Location)>()
            .iter()
            .map(|(_, (drop, at))| (drop.key.clone(), at.0))
            .collect();
        assert_eq!(drops, vec![("code fragment".to_string(), ARENA)]);
        assert_eq!(world.get::<&CombatVictories>(hero).unwrap().count("bug creature"), 1);
    }

    #[test]
    fn test_victories_accumulate_per_entity() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let rival = fighter(&mut world, "rival", 14, 100);
        let mut combat = resolver(&[15, 2, 15, 2, 15, 2], &[]);

        for attacker in [hero, hero, rival] {
            let bug = world.spawn((stats(10, 1), Location(ARENA), Opponent::new("bug creature")));
            combat.resolve_attack(&mut world, attacker, bug, None);
        }

        assert_eq!(world.get::<&CombatVictories>(hero).unwrap().count("bug creature"), 2);
        assert_eq!(world.get::<&CombatVictories>(rival).unwrap().count("bug creature"), 1);
    }

    #[test]
    fn test_miss_deals_nothing_and_never_counters() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let guard = fighter(&mut world, "guard", 14, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[1], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, guard, None);

        assert!(!outcome.hit);
        assert_eq!(outcome.damage, None);
        assert!(!outcome.counter_scheduled);
        assert!(combat.advance(&mut world, 3).is_empty());
        assert_eq!(health(&world, hero), 100);
    }

    #[test]
    fn test_counter_attack_waits_one_turn() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 30);
        let guard = fighter(&mut world, "guard", 12, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[15, 2, 18, 3], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, guard, None);
        assert!(outcome.counter_scheduled);
        // Nothing happens until the clock moves
        assert_eq!(health(&world, hero), 30);
        assert_eq!(combat.scheduler().pending(), 1);

        let fired = combat.advance(&mut world, 1);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].retaliator, guard);
        assert_eq!(fired[0].target, hero);
        // d4 3 + bonus 1, no weapon
        assert_eq!(fired[0].outcome.damage, Some(4));
        assert!(!fired[0].outcome.counter_scheduled);
        assert_eq!(health(&world, hero), 26);
        assert!(combat.scheduler().is_idle());
    }

    #[test]
    fn test_counter_attack_dropped_after_relocation() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 30);
        let guard = fighter(&mut world, "guard", 12, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[15, 2, 20, 4], &[]);

        combat.resolve_attack(&mut world, hero, guard, None);
        world.insert_one(hero, Location(LocationId(2))).unwrap();

        assert!(combat.advance(&mut world, 1).is_empty());
        assert_eq!(health(&world, hero), 30);
        assert!(combat.scheduler().is_idle());
    }

    #[test]
    fn test_counter_attack_dropped_after_despawn() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 30);
        let guard = fighter(&mut world, "guard", 12, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[15, 2], &[]);

        combat.resolve_attack(&mut world, hero, guard, None);
        world.despawn(guard).unwrap();

        assert!(combat.advance(&mut world, 2).is_empty());
    }

    #[test]
    fn test_cancel_involving() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 30);
        let guard = fighter(&mut world, "guard", 12, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[15, 2], &[]);

        combat.resolve_attack(&mut world, hero, guard, None);
        assert_eq!(combat.cancel_involving(hero), 1);
        assert_eq!(combat.cancel_involving(hero), 0);
        assert!(combat.scheduler().is_idle());
    }

    #[test]
    fn test_defeated_player_respawns_at_home() {
        let mut world = World::new();
        let brute = world.spawn((Name::new("brute"), AttackPower(12), Location(ARENA)));
        let player = world.spawn((
            Name::new("player"),
            Player,
            stats(10, 5),
            Location(ARENA),
            Home(LocationId(9)),
        ));
        let mut combat = resolver(&[20], &[]);

        let outcome = combat.resolve_attack(&mut world, brute, player, None);

        assert_eq!(outcome.attacker_bonus, 0);
        assert_eq!(outcome.damage, Some(12));
        assert!(outcome.defender_defeated);
        assert_eq!(
            outcome.defeat,
            Some(DefeatReport::Respawned {
                home: Some(LocationId(9)),
                health: 50,
            })
        );
        assert_eq!(world.get::<&Location>(player).unwrap().0, LocationId(9));
        assert_eq!(health(&world, player), 50);
    }

    #[test]
    fn test_homeless_player_heals_in_place() {
        let mut world = World::new();
        let brute = world.spawn((AttackPower(12), Location(ARENA)));
        let player = world.spawn((Player, stats(10, 5), Location(ARENA)));
        let mut combat = resolver(&[20], &[]);

        let outcome = combat.resolve_attack(&mut world, brute, player, None);

        assert_eq!(
            outcome.defeat,
            Some(DefeatReport::Respawned { home: None, health: 100 })
        );
        assert_eq!(world.get::<&Location>(player).unwrap().0, ARENA);
    }

    #[test]
    fn test_fallback_home_from_config() {
        let mut world = World::new();
        let brute = world.spawn((AttackPower(12), Location(ARENA)));
        let player = world.spawn((Player, stats(10, 5), Location(ARENA)));
        let config = CombatConfig {
            fallback_home: Some(LocationId(4)),
            ..CombatConfig::default()
        };
        let mut combat = CombatResolver::new(
            config,
            ScriptedDice::new().with_rolls([20]),
            WorldLootSpawner,
        );

        combat.resolve_attack(&mut world, brute, player, None);

        assert_eq!(world.get::<&Location>(player).unwrap().0, LocationId(4));
        assert_eq!(health(&world, player), 50);
    }

    #[test]
    fn test_damage_handler_reports_damage_taken() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let beetle = world.spawn((
            stats(10, 20),
            DamageHandling::new(ArmoredHide { armor: 3 }),
            Location(ARENA),
        ));
        let mut combat = resolver(&[15, 2], &[]);

        let sword = Weapon::melee("iron sword", 5);
        let outcome = combat.resolve_attack(&mut world, hero, beetle, Some(&sword));

        assert_eq!(outcome.damage, Some(6));
        assert_eq!(health(&world, beetle), 14);
    }

    #[test]
    fn test_explicit_defense_raises_class_and_reduces_damage() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let guardian = world.spawn((Defense(2), Health::new(50), Location(ARENA)));
        let mut combat = resolver(&[15, 2], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, guardian, None);

        assert_eq!(outcome.defense_class, 12);
        // d4 2 + bonus 2 - defense 2
        assert_eq!(outcome.damage, Some(2));
        assert_eq!(world.get::<&Health>(guardian).unwrap().current, 48);
    }

    #[test]
    fn test_outcome_serializes_for_presentation() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let bug = world.spawn((stats(10, 1), Location(ARENA), Opponent::new("bug_creature")));
        let mut combat = resolver(&[15, 2], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, bug, None);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["hit"], true);
        assert_eq!(json["damage"], 4);
        assert_eq!(json["defeat"]["Removed"]["opponent_key"], "bug_creature");
        assert_eq!(json["defeat"]["Removed"]["victories"], 1);
    }

    #[test]
    fn test_defeated_opponent_pays_out_once() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let bug = world.spawn((
            stats(10, 1),
            Location(ARENA),
            Opponent::new("bug").with_loot(LootTable::new().with("gem", 1.0)),
        ));
        let mut combat = resolver(&[15, 2, 15, 2], &[0.0, 0.0]);

        let first = combat.resolve_attack(&mut world, hero, bug, None);
        assert!(first.defender_defeated);

        let second = combat.resolve_attack(&mut world, hero, bug, None);
        assert!(!second.hit);
        assert_eq!(second.roll, 0);
        assert_eq!(second.damage, None);
        assert_eq!(second.defeat, None);

        assert_eq!(world.get::<&CombatVictories>(hero).unwrap().count("bug"), 1);
        assert_eq!(world.query::<&LootDrop>().iter().count(), 1);
        // The second attack never touched the dice
        assert_eq!(combat.dice_mut().rolls_left(), 2);
    }

    #[test]
    fn test_downed_attacker_cannot_strike() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 0);
        let target = fighter(&mut world, "dummy", 10, 10);
        let mut combat = resolver(&[20, 4], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, target, None);
        assert!(!outcome.hit);
        assert_eq!(health(&world, target), 10);
    }

    #[test]
    fn test_counter_attack_dropped_when_retaliator_is_down() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 30);
        let guard = fighter(&mut world, "guard", 12, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[15, 2, 20, 4], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, guard, None);
        assert!(outcome.counter_scheduled);
        // Felled by something outside this exchange
        world
            .get::<&mut AttributeSet>(guard)
            .unwrap()
            .set("health", 0)
            .unwrap();

        assert!(combat.advance(&mut world, 1).is_empty());
        assert_eq!(health(&world, hero), 30);
        assert!(combat.scheduler().is_idle());
    }

    #[test]
    fn test_counter_attack_dropped_when_target_is_down() {
        let mut world = World::new();
        let hero = world.spawn((AttackPower(3), Health::new(30), Location(ARENA)));
        let guard = fighter(&mut world, "guard", 12, 30);
        world.insert_one(guard, Retaliates).unwrap();
        let mut combat = resolver(&[15, 20, 4], &[]);

        assert!(combat.resolve_attack(&mut world, hero, guard, None).counter_scheduled);
        world.get::<&mut Health>(hero).unwrap().current = 0;

        assert!(combat.advance(&mut world, 1).is_empty());
        assert_eq!(world.get::<&Health>(hero).unwrap().current, 0);
    }

    #[test]
    fn test_health_pool_ignores_damage_handler() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let golem = world.spawn((
            Health::new(20),
            DamageHandling::new(ArmoredHide { armor: 3 }),
            Location(ARENA),
        ));
        let mut combat = resolver(&[15, 2], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, golem, None);

        // d4 2 + bonus 2, armor not applied without an attribute set
        assert_eq!(outcome.damage, Some(4));
        assert_eq!(world.get::<&Health>(golem).unwrap().current, 16);
    }

    #[test]
    fn test_missing_entity_yields_empty_outcome() {
        let mut world = World::new();
        let hero = fighter(&mut world, "hero", 14, 100);
        let ghost = world.spawn((Name::new("ghost"),));
        world.despawn(ghost).unwrap();
        let mut combat = resolver(&[20], &[]);

        let outcome = combat.resolve_attack(&mut world, hero, ghost, None);
        assert!(!outcome.hit);
        assert_eq!(outcome.roll, 0);
    }
}
