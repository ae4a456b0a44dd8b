use std::fmt;

use game_core::{Battlefield, CombatantId, MatchState, TeamId};
use serde::{Deserialize, Serialize};

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Every combatant of the other team is defeated.
    Victory(TeamId),
    /// Both teams were exhausted at the same check.
    Draw,
    /// The configured round limit was reached with both teams standing.
    RoundLimit { rounds: u32 },
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<TeamId> {
        match self {
            Self::Victory(team) => Some(*team),
            Self::Draw | Self::RoundLimit { .. } => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory(team) => write!(f, "{team} wins"),
            Self::Draw => f.write_str("draw"),
            Self::RoundLimit { rounds } => write!(f, "no winner after {rounds} rounds"),
        }
    }
}

/// A combatant still standing when the report was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survivor {
    pub id: CombatantId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
}

/// Summary of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    pub final_state: MatchState,
    /// Actions in the log when the match ended.
    pub commands_executed: usize,
    pub survivors: Vec<Survivor>,
}

impl MatchReport {
    pub(crate) fn new(
        outcome: MatchOutcome,
        final_state: MatchState,
        commands_executed: usize,
        field: &Battlefield,
    ) -> Self {
        let survivors = [TeamId::One, TeamId::Two]
            .into_iter()
            .flat_map(|team| field.ids(team))
            .filter_map(|id| {
                let combatant = field.get(id).ok()?;
                combatant.is_alive().then(|| Survivor {
                    id,
                    name: combatant.name().to_owned(),
                    health: combatant.health(),
                    max_health: combatant.stats().max_health(),
                })
            })
            .collect();

        Self {
            outcome,
            final_state,
            commands_executed,
            survivors,
        }
    }

    /// Survivors belonging to `team`.
    pub fn survivors_of(&self, team: TeamId) -> impl Iterator<Item = &Survivor> {
        self.survivors.iter().filter(move |s| s.id.team == team)
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.outcome, self.final_state)?;
        writeln!(f, "commands executed: {}", self.commands_executed)?;
        for survivor in &self.survivors {
            writeln!(
                f,
                "  {} [{}]: {}/{} HP",
                survivor.name, survivor.id.team, survivor.health, survivor.max_health
            )?;
        }
        Ok(())
    }
}
