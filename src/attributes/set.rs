//! Per-entity attribute container
//!
//! Holds a base value and the active modifiers for every attribute in the
//! catalog. All reads return the clamped effective value.

use std::collections::BTreeMap;

use super::catalog::{catalog, names, AttributeCategory, AttributeDefinition};
use super::modifier::AttributeModifier;
use crate::error::{AttributeError, Result};

/// Base value plus modifiers for one attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AttributeSlot {
    base: i32,
    modifiers: Vec<AttributeModifier>,
}

impl AttributeSlot {
    fn effective(&self, def: &AttributeDefinition) -> i32 {
        let total = i64::from(self.base)
            + self.modifiers.iter().map(|m| i64::from(m.value)).sum::<i64>();
        let saturated = i32::try_from(total).unwrap_or(if total < 0 { i32::MIN } else { i32::MAX });
        def.clamp(saturated)
    }
}

/// Attribute values and modifiers belonging to a single entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSet {
    /// One slot per catalog definition, in catalog order
    slots: Vec<AttributeSlot>,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSet {
    /// Create a set with every attribute at its catalog default
    pub fn new() -> Self {
        let slots = catalog()
            .iter()
            .map(|def| AttributeSlot {
                base: def.default_value,
                modifiers: Vec::new(),
            })
            .collect();
        Self { slots }
    }

    fn lookup(name: &str) -> Result<(usize, &'static AttributeDefinition)> {
        let cat = catalog();
        cat.slot(name)
            .zip(cat.definition(name))
            .ok_or_else(|| AttributeError::UnknownAttribute(name.to_string()))
    }

    /// Effective value of an attribute the catalog is required to contain
    fn core(&self, name: &'static str) -> i32 {
        self.get(name)
            .unwrap_or_else(|| panic!("core attribute {name} missing from catalog"))
    }

    /// Current value including modifiers, clamped to the attribute's bounds
    pub fn get(&self, name: &str) -> Option<i32> {
        let (slot, def) = Self::lookup(name).ok()?;
        Some(self.slots[slot].effective(def))
    }

    /// Stored base value, ignoring modifiers
    pub fn base(&self, name: &str) -> Option<i32> {
        let (slot, _) = Self::lookup(name).ok()?;
        Some(self.slots[slot].base)
    }

    /// Set the base value of an attribute.
    ///
    /// The value is clamped to the catalog bounds. Lowering `max_health` or
    /// `max_mana` pulls the matching current value down with it; raising them
    /// leaves the current value alone.
    pub fn set(&mut self, name: &str, value: i32) -> Result<()> {
        let (slot, def) = Self::lookup(name)?;
        let value = def.clamp(value);
        self.slots[slot].base = value;

        let paired = match def.name {
            names::MAX_HEALTH => Some(names::HEALTH),
            names::MAX_MANA => Some(names::MANA),
            _ => None,
        };
        if let Some(current) = paired {
            let (current_slot, _) = Self::lookup(current)?;
            let current = &mut self.slots[current_slot];
            if current.base > value {
                current.base = value;
            }
        }
        Ok(())
    }

    /// Attach a modifier to an attribute. `duration` is in turns, `None`
    /// for permanent.
    pub fn add_modifier(
        &mut self,
        name: &str,
        value: i32,
        source: impl Into<String>,
        duration: Option<u32>,
    ) -> Result<()> {
        let (slot, _) = Self::lookup(name)?;
        self.slots[slot]
            .modifiers
            .push(AttributeModifier::new(value, source, duration));
        Ok(())
    }

    /// Active modifiers on an attribute
    pub fn modifiers(&self, name: &str) -> Option<&[AttributeModifier]> {
        let (slot, _) = Self::lookup(name).ok()?;
        Some(&self.slots[slot].modifiers)
    }

    /// Remove every modifier from `source` across all attributes, returning
    /// how many were removed.
    pub fn remove_modifiers_by_source(&mut self, source: &str) -> usize {
        self.slots
            .iter_mut()
            .map(|slot| {
                let before = slot.modifiers.len();
                slot.modifiers.retain(|m| m.source != source);
                before - slot.modifiers.len()
            })
            .sum()
    }

    /// Advance all timed modifiers by one turn.
    ///
    /// Call once per game turn. Returns the modifiers that expired on this
    /// tick together with the attribute they were attached to.
    pub fn update_modifiers(&mut self) -> Vec<(&'static str, AttributeModifier)> {
        let mut expired = Vec::new();
        for (slot, def) in self.slots.iter_mut().zip(catalog().iter()) {
            let (active, gone): (Vec<_>, Vec<_>) = slot
                .modifiers
                .drain(..)
                .map(|mut m| {
                    let alive = m.tick();
                    (m, alive)
                })
                .partition(|(_, alive)| *alive);
            slot.modifiers = active.into_iter().map(|(m, _)| m).collect();
            expired.extend(gone.into_iter().map(|(m, _)| (def.name, m)));
        }
        expired
    }

    /// Every attribute with its effective value, in catalog order
    pub fn get_all(&self) -> Vec<(&'static str, i32)> {
        self.slots
            .iter()
            .zip(catalog().iter())
            .map(|(slot, def)| (def.name, slot.effective(def)))
            .collect()
    }

    pub fn description(&self, name: &str) -> Option<&'static str> {
        catalog().description(name)
    }

    /// Raise max health and mana for a new level and refill both pools.
    ///
    /// max_health grows by 10 + strength / 5 and max_mana by 5 + wisdom / 5,
    /// each applied to its own attribute. Returns the change in each maximum.
    pub fn handle_level_up(&mut self) -> BTreeMap<&'static str, i32> {
        let str_bonus = self.core(names::STRENGTH).div_euclid(5);
        let wis_bonus = self.core(names::WISDOM).div_euclid(5);

        let old_max_health = self.core(names::MAX_HEALTH);
        let old_max_mana = self.core(names::MAX_MANA);

        self.grow_base(names::MAX_HEALTH, 10 + str_bonus);
        self.grow_base(names::MAX_MANA, 5 + wis_bonus);

        let new_max_health = self.core(names::MAX_HEALTH);
        let new_max_mana = self.core(names::MAX_MANA);
        self.refill(names::HEALTH, new_max_health);
        self.refill(names::MANA, new_max_mana);

        let mut changes = BTreeMap::new();
        changes.insert(names::MAX_HEALTH, new_max_health - old_max_health);
        changes.insert(names::MAX_MANA, new_max_mana - old_max_mana);
        changes
    }

    fn grow_base(&mut self, name: &'static str, amount: i32) {
        if let Ok((slot, def)) = Self::lookup(name) {
            let base = &mut self.slots[slot].base;
            *base = def.clamp(base.saturating_add(amount));
        }
    }

    /// Set a pool's base so its effective value lands on `target`
    fn refill(&mut self, name: &'static str, target: i32) {
        if let Ok((slot, def)) = Self::lookup(name) {
            let slot = &mut self.slots[slot];
            let offset = slot.effective(def) - slot.base;
            slot.base = def.clamp(target - offset);
        }
    }

    /// Multi-line summary grouped by category.
    ///
    /// Attributes whose modifiers change them show the base alongside.
    pub fn format_summary(&self) -> String {
        let mut groups: Vec<(AttributeCategory, Vec<String>)> = Vec::new();
        for (slot, def) in self.slots.iter().zip(catalog().iter()) {
            let value = slot.effective(def);
            let label = display_name(def.name);
            let line = if value != slot.base {
                format!("  {}: {} (Base: {})", label, value, slot.base)
            } else {
                format!("  {}: {}", label, value)
            };
            match groups.iter_mut().find(|(cat, _)| *cat == def.category) {
                Some((_, lines)) => lines.push(line),
                None => groups.push((def.category, vec![line])),
            }
        }

        groups
            .into_iter()
            .map(|(cat, lines)| format!("{} Attributes:\n{}\n", cat, lines.join("\n")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// "max_health" -> "Max Health"
fn display_name(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
