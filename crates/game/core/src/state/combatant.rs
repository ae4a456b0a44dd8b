//! Combatant entity and its identity key.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::combat::{DamageStrategy, MitigationStrategy};
use crate::error::{CombatError, Result};
use crate::stats::{ResourceKind, Stats};

/// Character class tag. Parsing is case-insensitive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Archetype {
    Warrior,
    Mage,
    Archer,
    Rogue,
}

/// Identity used for mapping combatants to agents.
///
/// Two combatants with the same name and archetype produce equal keys even
/// when their stats differ. Roster names must therefore be unique per
/// archetype or their bindings collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantKey {
    pub name: String,
    pub archetype: Archetype,
}

impl CombatantKey {
    pub fn new(name: impl Into<String>, archetype: Archetype) -> Self {
        Self {
            name: name.into(),
            archetype,
        }
    }
}

impl fmt::Display for CombatantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.archetype)
    }
}

/// A participant in a match.
///
/// Equality and hashing follow [`CombatantKey`], not the current stats.
/// All state changes go through the methods below so the [`Stats`]
/// invariants hold after every mutation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    name: String,
    archetype: Archetype,
    stats: Stats,
    damage: DamageStrategy,
    mitigation: MitigationStrategy,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        archetype: Archetype,
        stats: Stats,
        damage: DamageStrategy,
        mitigation: MitigationStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            archetype,
            stats,
            damage,
            mitigation,
        }
    }

    pub fn builder() -> CombatantBuilder {
        CombatantBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn key(&self) -> CombatantKey {
        CombatantKey::new(self.name.clone(), self.archetype)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn health(&self) -> i32 {
        self.stats.health()
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn damage_strategy(&self) -> DamageStrategy {
        self.damage
    }

    pub fn mitigation_strategy(&self) -> MitigationStrategy {
        self.mitigation
    }

    pub fn set_damage_strategy(&mut self, strategy: DamageStrategy) {
        self.damage = strategy;
    }

    pub fn set_mitigation_strategy(&mut self, strategy: MitigationStrategy) {
        self.mitigation = strategy;
    }

    /// Computes raw damage against `target` and pays the strategy's cost.
    ///
    /// The target is never touched and mitigation is not applied. On failure
    /// the attacker is left unchanged.
    pub fn attack(&mut self, target: &Stats) -> Result<i32> {
        let roll = self.damage.compute_raw_damage(&self.stats, target)?;
        if roll.mana_cost > 0 {
            self.use_mana(roll.mana_cost)?;
        }
        Ok(roll.damage)
    }

    /// Post-mitigation damage for `incoming`. Never negative.
    pub fn defend(&self, incoming: i32) -> i32 {
        self.mitigation.compute_reduction(&self.stats, incoming)
    }

    /// Applies mitigated damage and returns the amount actually removed.
    pub fn take_damage(&mut self, raw: i32) -> i32 {
        let actual = self.defend(raw);
        let before = self.stats.health();
        self.stats = self.stats.with_health(before.saturating_sub(actual));
        before - self.stats.health()
    }

    /// Restores health up to the maximum and returns the amount gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.stats.health();
        self.stats = self.stats.with_health(before.saturating_add(amount));
        self.stats.health() - before
    }

    pub fn use_mana(&mut self, amount: i32) -> Result<()> {
        if self.stats.mana() < amount {
            return Err(CombatError::InsufficientResource {
                resource: ResourceKind::Mana,
                required: amount,
                available: self.stats.mana(),
            });
        }
        self.stats = self.stats.with_mana(self.stats.mana() - amount);
        Ok(())
    }

    pub fn restore_mana(&mut self, amount: i32) {
        self.stats = self.stats.with_mana(self.stats.mana().saturating_add(amount));
    }

    /// Sets health directly, clamped, bypassing mitigation.
    pub fn set_health(&mut self, health: i32) {
        self.stats = self.stats.with_health(health);
    }
}

impl PartialEq for Combatant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.archetype == other.archetype
    }
}

impl Eq for Combatant {}

impl Hash for Combatant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.archetype.hash(state);
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} the {} [HP {}/{}, ATK {}, DEF {}]",
            self.name,
            self.archetype,
            self.stats.health(),
            self.stats.max_health(),
            self.stats.attack_power(),
            self.stats.defense()
        )
    }
}

/// Builder for [`Combatant`]. Strategies default to melee and standard.
#[derive(Clone, Debug, Default)]
pub struct CombatantBuilder {
    name: Option<String>,
    archetype: Option<Archetype>,
    stats: Option<Stats>,
    damage: Option<DamageStrategy>,
    mitigation: Option<MitigationStrategy>,
}

impl CombatantBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn damage_strategy(mut self, strategy: DamageStrategy) -> Self {
        self.damage = Some(strategy);
        self
    }

    pub fn mitigation_strategy(mut self, strategy: MitigationStrategy) -> Self {
        self.mitigation = Some(strategy);
        self
    }

    pub fn build(self) -> Result<Combatant> {
        Ok(Combatant {
            name: self.name.ok_or(CombatError::MissingField("name"))?,
            archetype: self.archetype.ok_or(CombatError::MissingField("archetype"))?,
            stats: self.stats.ok_or(CombatError::MissingField("stats"))?,
            damage: self.damage.unwrap_or(DamageStrategy::Melee),
            mitigation: self.mitigation.unwrap_or(MitigationStrategy::Standard),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> Combatant {
        Combatant::new(
            "Conan",
            Archetype::Warrior,
            Stats::full(150, 40, 30, 0).unwrap(),
            DamageStrategy::Melee,
            MitigationStrategy::HeavyArmor,
        )
    }

    fn mage() -> Combatant {
        Combatant::new(
            "Gandalf",
            Archetype::Mage,
            Stats::new(80, 80, 50, 100, 60, 10).unwrap(),
            DamageStrategy::Magic,
            MitigationStrategy::Standard,
        )
    }

    #[test]
    fn warrior_melee_against_mage() {
        let mut conan = warrior();
        let mut gandalf = mage();

        let raw = conan.attack(gandalf.stats()).unwrap();
        assert_eq!(raw, 48);
        assert_eq!(gandalf.health(), 80, "attack must not touch the target");

        let dealt = gandalf.take_damage(raw);
        assert_eq!(dealt, 43);
        assert_eq!(gandalf.health(), 37);
    }

    #[test]
    fn magic_attack_spends_mana() {
        let mut gandalf = mage();
        let conan = warrior();

        assert_eq!(gandalf.attack(conan.stats()).unwrap(), 65);
        assert_eq!(gandalf.stats().mana(), 40);
    }

    #[test]
    fn failed_magic_attack_leaves_mana_unchanged() {
        let mut gandalf = mage();
        gandalf.use_mana(45).unwrap();
        let conan = warrior();

        let err = gandalf.attack(conan.stats()).unwrap_err();

        assert!(matches!(err, CombatError::InsufficientResource { available: 5, .. }));
        assert_eq!(gandalf.stats().mana(), 5);
    }

    #[test]
    fn damage_and_healing_clamp() {
        let mut gandalf = mage();

        assert_eq!(gandalf.take_damage(1_000), 80);
        assert_eq!(gandalf.health(), 0);
        assert!(!gandalf.is_alive());

        assert_eq!(gandalf.heal(500), 80);
        assert_eq!(gandalf.health(), 80);
    }

    #[test]
    fn use_mana_rejects_overdraft() {
        let mut gandalf = mage();

        assert_eq!(
            gandalf.use_mana(60),
            Err(CombatError::InsufficientResource {
                resource: ResourceKind::Mana,
                required: 60,
                available: 50,
            })
        );
        gandalf.use_mana(50).unwrap();
        assert_eq!(gandalf.stats().mana(), 0);

        gandalf.restore_mana(250);
        assert_eq!(gandalf.stats().mana(), 100);
    }

    #[test]
    fn set_health_bypasses_mitigation() {
        let mut conan = warrior();
        conan.set_health(135);
        assert_eq!(conan.health(), 135);
        conan.set_health(-5);
        assert_eq!(conan.health(), 0);
    }

    #[test]
    fn strategies_can_be_swapped() {
        let mut conan = warrior();
        conan.set_damage_strategy(DamageStrategy::Ranged);
        conan.set_mitigation_strategy(MitigationStrategy::Standard);

        assert_eq!(conan.attack(mage().stats()).unwrap(), 32);
        assert_eq!(conan.defend(100), 85);
    }

    #[test]
    fn equality_follows_name_and_archetype() {
        let mut wounded = warrior();
        wounded.set_health(1);

        assert_eq!(wounded, warrior());
        assert_eq!(wounded.key(), CombatantKey::new("Conan", Archetype::Warrior));

        let renamed = Combatant::builder()
            .name("Conan")
            .archetype(Archetype::Rogue)
            .stats(*warrior().stats())
            .build()
            .unwrap();
        assert_ne!(renamed, warrior());
    }

    #[test]
    fn builder_defaults_and_missing_fields() {
        let built = Combatant::builder()
            .name("Shadow")
            .archetype(Archetype::Rogue)
            .stats(Stats::full(90, 55, 20, 30).unwrap())
            .build()
            .unwrap();
        assert_eq!(built.damage_strategy(), DamageStrategy::Melee);
        assert_eq!(built.mitigation_strategy(), MitigationStrategy::Standard);

        let missing = Combatant::builder().name("Nobody").build().unwrap_err();
        assert_eq!(missing, CombatError::MissingField("archetype"));
    }

    #[test]
    fn display_mentions_identity_and_numbers() {
        let text = warrior().to_string();
        for needle in ["Conan", "WARRIOR", "150", "40", "30"] {
            assert!(text.contains(needle), "{text} should contain {needle}");
        }
    }

    #[test]
    fn archetype_parses_case_insensitively() {
        assert_eq!("mage".parse::<Archetype>(), Ok(Archetype::Mage));
        assert_eq!("Rogue".parse::<Archetype>(), Ok(Archetype::Rogue));
        assert!("paladin".parse::<Archetype>().is_err());
    }
}
