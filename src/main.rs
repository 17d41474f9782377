//! Skirmish - Entry Point
//!
//! Runs a short scripted encounter against the default opponent templates and
//! prints each exchange as JSON.

use std::env;

use anyhow::{Context, Result};
use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skirmish::data::DataManager;
use skirmish::ecs::{is_down, location_of, tick_modifiers, LocationId};
use skirmish::entities::{spawn_opponent, spawn_player};
use skirmish::items::{weapon::templates, WorldLootSpawner};
use skirmish::progression::add_experience;
use skirmish::{AttributeSet, CombatResolver};

const TOWN: LocationId = LocationId(0);
const CAVE: LocationId = LocationId(1);

/// Hard stop so a stalemate cannot loop forever
const MAX_ROUNDS: u32 = 50;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Skirmish v{}", env!("CARGO_PKG_VERSION"));

    let seed = match env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid seed: {}", arg))?,
        None => 7,
    };

    let data = DataManager::new();
    let mut world = World::new();
    let mut combat = CombatResolver::new(
        data.combat.clone(),
        StdRng::seed_from_u64(seed),
        WorldLootSpawner,
    );

    let hero = spawn_player(&mut world, "Hero", CAVE, Some(TOWN));
    {
        let mut attrs = world.get::<&mut AttributeSet>(hero)?;
        attrs.add_modifier("strength", 4, "war cry", Some(3))?;
    }

    let template = data
        .opponents
        .find("bug_creature")
        .context("no bug_creature template")?;
    let bug = spawn_opponent(&mut world, template, CAVE, None);

    let sword = templates::iron_sword();
    for round in 1..=MAX_ROUNDS {
        let outcome = combat.resolve_attack(&mut world, hero, bug, Some(&sword));
        println!("round {}: {}", round, serde_json::to_string(&outcome)?);

        if outcome.defender_defeated {
            let mut attrs = world.get::<&mut AttributeSet>(hero)?;
            let progress = add_experience(&mut attrs, 120);
            println!("progress: {}", serde_json::to_string(&progress)?);
            println!("{}", attrs.format_summary());
            break;
        }

        for counter in combat.advance(&mut world, 1) {
            println!("counter: {}", serde_json::to_string(&counter.outcome)?);
        }
        for (_, attribute, modifier) in tick_modifiers(&mut world) {
            log::info!("{} on {} wore off", modifier.source, attribute);
        }

        if is_down(&world, hero) || location_of(&world, hero) != Some(CAVE) {
            log::info!("Hero was driven out of the cave");
            break;
        }
    }

    log::info!("Skirmish finished");
    Ok(())
}
