//! Roster ownership and combatant addressing.
//!
//! Both rosters live in one [`Battlefield`] and combatants are referred to by
//! [`CombatantId`] rather than by reference. Defeated combatants stay in
//! their roster slot for the rest of the match.

use std::fmt;

use crate::error::{CombatError, Result};

use super::Combatant;

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamId {
    One,
    Two,
}

impl TeamId {
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => f.write_str("team 1"),
            Self::Two => f.write_str("team 2"),
        }
    }
}

/// Position of a combatant: its team and its index in that roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId {
    pub team: TeamId,
    pub slot: usize,
}

impl CombatantId {
    pub const fn new(team: TeamId, slot: usize) -> Self {
        Self { team, slot }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.team, self.slot)
    }
}

/// Both rosters of a match.
#[derive(Clone, Debug, Default)]
pub struct Battlefield {
    teams: [Vec<Combatant>; 2],
}

impl Battlefield {
    pub fn new(team_one: Vec<Combatant>, team_two: Vec<Combatant>) -> Self {
        Self {
            teams: [team_one, team_two],
        }
    }

    pub fn roster(&self, team: TeamId) -> &[Combatant] {
        &self.teams[team.index()]
    }

    /// Ids of every roster slot of `team`, in roster order.
    pub fn ids(&self, team: TeamId) -> impl Iterator<Item = CombatantId> + '_ {
        (0..self.roster(team).len()).map(move |slot| CombatantId::new(team, slot))
    }

    pub fn get(&self, id: CombatantId) -> Result<&Combatant> {
        self.teams[id.team.index()]
            .get(id.slot)
            .ok_or(CombatError::UnknownCombatant(id))
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.teams[id.team.index()]
            .get_mut(id.slot)
            .ok_or(CombatError::UnknownCombatant(id))
    }

    /// Borrows two distinct combatants mutably at once.
    pub fn pair_mut(
        &mut self,
        first: CombatantId,
        second: CombatantId,
    ) -> Result<(&mut Combatant, &mut Combatant)> {
        if first == second {
            return Err(CombatError::SameCombatant(first));
        }
        self.get(first)?;
        self.get(second)?;

        let [one, two] = &mut self.teams;
        let pair = match (first.team, second.team) {
            (TeamId::One, TeamId::Two) => (&mut one[first.slot], &mut two[second.slot]),
            (TeamId::Two, TeamId::One) => (&mut two[first.slot], &mut one[second.slot]),
            (team, _) => {
                let roster = match team {
                    TeamId::One => one,
                    TeamId::Two => two,
                };
                split_pair(roster, first.slot, second.slot)
            }
        };
        Ok(pair)
    }

    /// Living members of `id`'s team, including `id` itself when alive.
    pub fn allies_of(&self, id: CombatantId) -> Vec<(CombatantId, &Combatant)> {
        self.living(id.team).collect()
    }

    /// Living members of the opposing team.
    pub fn enemies_of(&self, id: CombatantId) -> Vec<(CombatantId, &Combatant)> {
        self.living(id.team.opponent()).collect()
    }

    /// Living enemy with the lowest absolute health; the first in roster
    /// order wins ties.
    pub fn weakest_living_enemy(&self, id: CombatantId) -> Option<CombatantId> {
        lowest_health(self.living(id.team.opponent()))
    }

    pub fn is_defeated(&self, team: TeamId) -> bool {
        self.roster(team).iter().all(|combatant| !combatant.is_alive())
    }

    /// Looks up a living combatant of `team` by name, ignoring case.
    ///
    /// Comparison uses Unicode lowercase, so "éowyn" finds "Éowyn".
    pub fn find_living_by_name(&self, team: TeamId, name: &str) -> Option<CombatantId> {
        let wanted = name.trim().to_lowercase();
        self.living(team)
            .find(|(_, combatant)| combatant.name().to_lowercase() == wanted)
            .map(|(id, _)| id)
    }

    fn living(&self, team: TeamId) -> impl Iterator<Item = (CombatantId, &Combatant)> + '_ {
        self.roster(team)
            .iter()
            .enumerate()
            .filter(|(_, combatant)| combatant.is_alive())
            .map(move |(slot, combatant)| (CombatantId::new(team, slot), combatant))
    }
}

/// Lowest absolute health among `candidates`; earlier entries win ties.
pub fn lowest_health<'a>(
    candidates: impl IntoIterator<Item = (CombatantId, &'a Combatant)>,
) -> Option<CombatantId> {
    candidates
        .into_iter()
        .fold(None, |best: Option<(CombatantId, i32)>, (id, combatant)| match best {
            Some((_, health)) if health <= combatant.health() => best,
            _ => Some((id, combatant.health())),
        })
        .map(|(id, _)| id)
}

fn split_pair(
    roster: &mut [Combatant],
    first: usize,
    second: usize,
) -> (&mut Combatant, &mut Combatant) {
    if first < second {
        let (head, tail) = roster.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = roster.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageStrategy, MitigationStrategy};
    use crate::state::Archetype;
    use crate::stats::Stats;

    fn fighter(name: &str, health: i32, max_health: i32) -> Combatant {
        Combatant::new(
            name,
            Archetype::Rogue,
            Stats::new(health, max_health, 0, 0, 50, 10).unwrap(),
            DamageStrategy::Melee,
            MitigationStrategy::Standard,
        )
    }

    fn field() -> Battlefield {
        Battlefield::new(
            vec![fighter("Conan", 150, 150), fighter("Gandalf", 0, 80)],
            vec![
                fighter("Legolas", 60, 100),
                fighter("Shadow", 40, 90),
                fighter("Ghost", 40, 90),
            ],
        )
    }

    #[test]
    fn views_skip_defeated_members() {
        let field = field();
        let conan = CombatantId::new(TeamId::One, 0);

        let allies: Vec<_> = field.allies_of(conan).into_iter().map(|(id, _)| id).collect();
        assert_eq!(allies, vec![conan]);
        assert_eq!(field.enemies_of(conan).len(), 3);
    }

    #[test]
    fn weakest_enemy_breaks_ties_by_roster_order() {
        let field = field();
        assert_eq!(
            field.weakest_living_enemy(CombatantId::new(TeamId::One, 0)),
            Some(CombatantId::new(TeamId::Two, 1))
        );
    }

    #[test]
    fn weakest_enemy_of_an_empty_roster_is_none() {
        let field = Battlefield::new(vec![fighter("Conan", 150, 150)], vec![fighter("Dead", 0, 10)]);
        assert_eq!(field.weakest_living_enemy(CombatantId::new(TeamId::One, 0)), None);
        assert!(field.is_defeated(TeamId::Two));
        assert!(!field.is_defeated(TeamId::One));
    }

    #[test]
    fn pair_mut_handles_both_slot_orders() {
        let mut field = field();
        let shadow = CombatantId::new(TeamId::Two, 1);
        let legolas = CombatantId::new(TeamId::Two, 0);

        let (a, b) = field.pair_mut(shadow, legolas).unwrap();
        assert_eq!((a.name(), b.name()), ("Shadow", "Legolas"));

        let (a, b) = field.pair_mut(legolas, shadow).unwrap();
        assert_eq!((a.name(), b.name()), ("Legolas", "Shadow"));

        let conan = CombatantId::new(TeamId::One, 0);
        let (a, b) = field.pair_mut(shadow, conan).unwrap();
        assert_eq!((a.name(), b.name()), ("Shadow", "Conan"));
    }

    #[test]
    fn pair_mut_rejects_aliasing_and_unknown_slots() {
        let mut field = field();
        let conan = CombatantId::new(TeamId::One, 0);
        let missing = CombatantId::new(TeamId::Two, 9);

        assert_eq!(field.pair_mut(conan, conan).unwrap_err(), CombatError::SameCombatant(conan));
        assert_eq!(field.pair_mut(conan, missing).unwrap_err(), CombatError::UnknownCombatant(missing));
    }

    #[test]
    fn name_lookup_ignores_case_and_the_dead() {
        let field = field();
        assert_eq!(
            field.find_living_by_name(TeamId::Two, "  legolas "),
            Some(CombatantId::new(TeamId::Two, 0))
        );
        assert_eq!(field.find_living_by_name(TeamId::One, "GANDALF"), None);
    }

    #[test]
    fn name_lookup_folds_non_ascii_case() {
        let field = Battlefield::new(
            vec![fighter("Éowyn", 100, 100)],
            vec![fighter("Ødger", 100, 100)],
        );

        assert_eq!(
            field.find_living_by_name(TeamId::One, "éOWYN"),
            Some(CombatantId::new(TeamId::One, 0))
        );
        assert_eq!(
            field.find_living_by_name(TeamId::Two, "øDGER"),
            Some(CombatantId::new(TeamId::Two, 0))
        );
    }
}
