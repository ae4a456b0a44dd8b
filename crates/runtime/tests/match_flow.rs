use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use game_content::CombatantFactory;
use game_core::{
    Action, Archetype, Combatant, CombatError, CombatantId, CombatantKey, DamageStrategy,
    MitigationStrategy, Stats, TeamId,
};
use runtime::{
    ChannelAgent, DecisionAgent, DecisionContext, MatchConfig, MatchController, MatchEvent,
    MatchOutcome, RuleBasedAgent, RuntimeError, Topic, TurnOutcome,
};

/// Agent that never produces a decision.
struct FailingAgent;

#[async_trait]
impl DecisionAgent for FailingAgent {
    async fn decide(&self, _ctx: &DecisionContext<'_>) -> runtime::Result<Action> {
        Err(RuntimeError::UnresolvableDecision {
            agent: self.name().into(),
            reason: "always fails".into(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Agent that takes far longer than any test timeout.
struct StalledAgent;

#[async_trait]
impl DecisionAgent for StalledAgent {
    async fn decide(&self, ctx: &DecisionContext<'_>) -> runtime::Result<Action> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Action::heal(ctx.actor, 30))
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

/// Agent that blocks its worker thread instead of yielding.
struct BlockingAgent;

#[async_trait]
impl DecisionAgent for BlockingAgent {
    async fn decide(&self, ctx: &DecisionContext<'_>) -> runtime::Result<Action> {
        std::thread::sleep(Duration::from_millis(1000));
        Ok(Action::heal(ctx.actor, 30))
    }

    fn name(&self) -> &str {
        "blocking"
    }
}

/// Agent that returns the same action every turn.
struct ScriptedAgent(Action);

#[async_trait]
impl DecisionAgent for ScriptedAgent {
    async fn decide(&self, _ctx: &DecisionContext<'_>) -> runtime::Result<Action> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn factory() -> CombatantFactory {
    CombatantFactory::new().unwrap()
}

fn custom(name: &str, archetype: Archetype, stats: Stats, damage: DamageStrategy) -> Combatant {
    Combatant::new(name, archetype, stats, damage, MitigationStrategy::Standard)
}

const CONAN: CombatantId = CombatantId::new(TeamId::One, 0);
const GANDALF: CombatantId = CombatantId::new(TeamId::One, 1);
const LEGOLAS: CombatantId = CombatantId::new(TeamId::Two, 0);

fn preset_controller() -> MatchController {
    let factory = factory();
    MatchController::builder()
        .team(
            TeamId::One,
            vec![factory.warrior("Conan").unwrap(), factory.mage("Gandalf").unwrap()],
        )
        .team(
            TeamId::Two,
            vec![factory.archer("Legolas").unwrap(), factory.rogue("Shadow").unwrap()],
        )
        .bind_all(Arc::new(RuleBasedAgent::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn rule_based_preset_match_plays_out_deterministically() {
    let mut controller = preset_controller();

    let report = controller.run().await.unwrap();

    assert_eq!(report.outcome, MatchOutcome::Victory(TeamId::One));
    assert_eq!(report.commands_executed, 5);
    assert_eq!((report.final_state.round, report.final_state.turn), (2, 3));
    assert!(report.final_state.can_undo);
    assert_eq!(report.final_state.history_size, 5);

    let survivors: Vec<_> = report
        .survivors
        .iter()
        .map(|s| (s.name.as_str(), s.health))
        .collect();
    assert_eq!(survivors, vec![("Conan", 150), ("Gandalf", 45)]);
    assert_eq!(report.survivors_of(TeamId::Two).count(), 0);
}

#[tokio::test]
async fn match_ends_even_when_every_agent_fails() {
    let factory = factory();
    let mut controller = MatchController::builder()
        .team(
            TeamId::One,
            vec![factory.warrior("Conan").unwrap(), factory.mage("Gandalf").unwrap()],
        )
        .team(
            TeamId::Two,
            vec![factory.archer("Legolas").unwrap(), factory.rogue("Shadow").unwrap()],
        )
        .bind_all(Arc::new(FailingAgent))
        .build()
        .unwrap();
    let mut actions = controller.subscribe(Topic::Action);

    let report = controller.run().await.unwrap();

    assert!(matches!(report.outcome, MatchOutcome::Victory(_)));
    assert!(report.commands_executed > 0);

    let mut fallbacks = 0;
    while let Ok(event) = actions.try_recv() {
        if matches!(event, MatchEvent::FallbackApplied { .. }) {
            fallbacks += 1;
        }
    }
    assert!(fallbacks > 0);
}

#[tokio::test]
async fn stalled_agent_times_out_into_the_fallback() {
    let factory = factory();
    let mut controller = MatchController::builder()
        .config(MatchConfig::default().with_decision_timeout(Duration::from_millis(20)))
        .team(TeamId::One, vec![factory.warrior("Conan").unwrap()])
        .team(TeamId::Two, vec![factory.archer("Legolas").unwrap()])
        .bind_all(Arc::new(StalledAgent))
        .build()
        .unwrap();

    let outcome = controller.process_turn(CONAN).await.unwrap();

    assert_eq!(outcome, TurnOutcome::Fallback);
    assert_eq!(controller.field().get(LEGOLAS).unwrap().health(), 59);
    assert_eq!(controller.log().len(), 1);
    assert_eq!(controller.state().turn, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_agent_cannot_outlast_the_timeout() {
    let factory = factory();
    let mut controller = MatchController::builder()
        .config(MatchConfig::default().with_decision_timeout(Duration::from_millis(20)))
        .team(TeamId::One, vec![factory.warrior("Conan").unwrap()])
        .team(TeamId::Two, vec![factory.archer("Legolas").unwrap()])
        .bind_all(Arc::new(BlockingAgent))
        .build()
        .unwrap();

    let started = Instant::now();
    let outcome = controller.process_turn(CONAN).await.unwrap();

    assert!(
        started.elapsed() < Duration::from_millis(500),
        "turn took {:?}",
        started.elapsed()
    );
    assert_eq!(outcome, TurnOutcome::Fallback);
    assert_eq!(controller.field().get(LEGOLAS).unwrap().health(), 59);
    assert!(matches!(controller.log().last(), Some(Action::Attack(_))));
    assert_eq!(controller.log().len(), 1);
}

fn human_duel(commands: &[&str]) -> MatchController {
    let factory = factory();
    let (tx, human) = ChannelAgent::<String>::channel(commands.len().max(1));
    for line in commands {
        tx.try_send((*line).to_owned()).unwrap();
    }

    MatchController::builder()
        .team(TeamId::One, vec![factory.warrior("Conan").unwrap()])
        .team(TeamId::Two, vec![factory.rogue("Shadow").unwrap()])
        .bind(
            CombatantKey::new("Conan", Archetype::Warrior),
            Arc::new(human),
        )
        .bind(
            CombatantKey::new("Shadow", Archetype::Rogue),
            Arc::new(RuleBasedAgent::new()),
        )
        .build()
        .unwrap()
}

#[tokio::test]
async fn typed_commands_play_a_full_match() {
    let mut controller = human_duel(&[
        "attack shadow",
        "ATTACK Shadow",
        "  attack   shadow ",
        "Attack SHADOW",
    ]);
    let mut actions = controller.subscribe(Topic::Action);

    let report = controller.run().await.unwrap();

    assert_eq!(report.outcome, MatchOutcome::Victory(TeamId::One));
    assert_eq!(report.commands_executed, 7);
    assert_eq!((report.final_state.round, report.final_state.turn), (4, 2));
    let survivors: Vec<_> = report
        .survivors
        .iter()
        .map(|s| (s.name.as_str(), s.health))
        .collect();
    assert_eq!(survivors, vec![("Conan", 114)]);

    while let Ok(event) = actions.try_recv() {
        assert!(
            !matches!(event, MatchEvent::FallbackApplied { .. }),
            "every typed command should resolve: {event:?}"
        );
    }
}

#[tokio::test]
async fn unparseable_command_falls_back() {
    let mut controller = human_duel(&["dance", "heal shadow"]);
    let shadow = CombatantId::new(TeamId::Two, 0);

    assert_eq!(
        controller.process_turn(CONAN).await.unwrap(),
        TurnOutcome::Fallback
    );
    assert_eq!(controller.field().get(shadow).unwrap().health(), 52);

    // Shadow is not Conan's ally.
    assert_eq!(
        controller.process_turn(CONAN).await.unwrap(),
        TurnOutcome::Fallback
    );
    assert_eq!(controller.field().get(shadow).unwrap().health(), 14);

    // Queue exhausted and sender dropped.
    assert_eq!(
        controller.process_turn(CONAN).await.unwrap(),
        TurnOutcome::Fallback
    );
    assert!(!controller.field().get(shadow).unwrap().is_alive());
}

#[tokio::test]
async fn unbound_combatant_is_fatal() {
    let factory = factory();
    let mut controller = MatchController::builder()
        .team(TeamId::One, vec![factory.warrior("Conan").unwrap()])
        .team(TeamId::Two, vec![factory.rogue("Shadow").unwrap()])
        .bind(
            CombatantKey::new("Conan", Archetype::Warrior),
            Arc::new(RuleBasedAgent::new()),
        )
        .build()
        .unwrap();

    let err = controller.run().await.unwrap_err();

    match err {
        RuntimeError::UnboundCombatant { key } => {
            assert_eq!(key, CombatantKey::new("Shadow", Archetype::Rogue));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn game_over_is_checked_after_every_turn() {
    let factory = factory();
    let fragile = custom(
        "Fragile",
        Archetype::Rogue,
        Stats::new(1, 90, 0, 0, 55, 20).unwrap(),
        DamageStrategy::Melee,
    );
    let mut controller = MatchController::builder()
        .team(
            TeamId::One,
            vec![factory.warrior("Conan").unwrap(), factory.mage("Gandalf").unwrap()],
        )
        .team(TeamId::Two, vec![fragile])
        .bind_all(Arc::new(RuleBasedAgent::new()))
        .build()
        .unwrap();

    let report = controller.run().await.unwrap();

    assert_eq!(report.outcome, MatchOutcome::Victory(TeamId::One));
    assert_eq!(report.commands_executed, 1);
    assert_eq!(report.final_state.turn, 2);
    assert_eq!(
        controller.field().get(GANDALF).unwrap().stats().mana(),
        100,
        "Gandalf must not act after the last enemy falls"
    );
}

#[tokio::test]
async fn invalid_target_is_replaced_by_the_fallback() {
    let factory = factory();
    let mut controller = MatchController::builder()
        .team(TeamId::One, vec![factory.warrior("Conan").unwrap()])
        .team(TeamId::Two, vec![factory.archer("Legolas").unwrap()])
        .bind_all(Arc::new(ScriptedAgent(Action::heal(LEGOLAS, 30))))
        .build()
        .unwrap();
    let mut actions = controller.subscribe(Topic::Action);

    let outcome = controller.process_turn(CONAN).await.unwrap();

    assert_eq!(outcome, TurnOutcome::Fallback);
    assert_eq!(controller.field().get(LEGOLAS).unwrap().health(), 59);
    assert!(matches!(
        actions.try_recv().unwrap(),
        MatchEvent::FallbackApplied { actor: CONAN, .. }
    ));
    assert!(matches!(
        actions.try_recv().unwrap(),
        MatchEvent::ActionExecuted { .. }
    ));
}

#[tokio::test]
async fn failed_fallback_forfeits_the_turn() {
    let drained = custom(
        "Gandalf",
        Archetype::Mage,
        Stats::new(80, 80, 5, 100, 60, 10).unwrap(),
        DamageStrategy::Magic,
    );
    let mut controller = MatchController::builder()
        .team(TeamId::One, vec![drained])
        .team(TeamId::Two, vec![factory().archer("Legolas").unwrap()])
        .bind_all(Arc::new(RuleBasedAgent::new()))
        .build()
        .unwrap();
    let mut turns = controller.subscribe(Topic::Turn);
    let gandalf = CombatantId::new(TeamId::One, 0);

    let outcome = controller.process_turn(gandalf).await.unwrap();

    assert_eq!(outcome, TurnOutcome::Forfeited);
    assert!(controller.log().is_empty());
    assert_eq!(controller.state().turn, 2);
    assert!(!controller.state().can_undo);
    assert_eq!(controller.field().get(LEGOLAS).unwrap().health(), 100);
    assert_eq!(controller.field().get(gandalf).unwrap().stats().mana(), 5);

    assert!(matches!(turns.try_recv().unwrap(), MatchEvent::TurnStarted { .. }));
    assert!(matches!(turns.try_recv().unwrap(), MatchEvent::TurnForfeited { .. }));
}

#[tokio::test]
async fn harmless_rosters_stop_at_the_round_limit() {
    let broke_mage = |name: &str| {
        custom(
            name,
            Archetype::Mage,
            Stats::new(80, 80, 0, 100, 60, 10).unwrap(),
            DamageStrategy::Magic,
        )
    };
    let mut controller = MatchController::builder()
        .config(MatchConfig::default().with_max_rounds(3))
        .team(TeamId::One, vec![broke_mage("Merlin")])
        .team(TeamId::Two, vec![broke_mage("Morgana")])
        .bind_all(Arc::new(RuleBasedAgent::new()))
        .build()
        .unwrap();

    let report = controller.run().await.unwrap();

    assert_eq!(report.outcome, MatchOutcome::RoundLimit { rounds: 3 });
    assert_eq!(report.commands_executed, 0);
    assert_eq!(report.survivors.len(), 2);
}

#[tokio::test]
async fn undo_restores_health_and_refreshes_state() {
    let mut controller = preset_controller();

    controller.process_turn(CONAN).await.unwrap();
    let shadow = CombatantId::new(TeamId::Two, 1);
    assert_eq!(controller.field().get(shadow).unwrap().health(), 52);
    assert!(controller.state().can_undo);
    assert_eq!(controller.state().history_size, 1);

    let undone = controller.undo_last().unwrap();

    assert_eq!(undone.target(), shadow);
    assert_eq!(controller.field().get(shadow).unwrap().health(), 90);
    assert!(!controller.state().can_undo);
    assert_eq!(controller.state().history_size, 0);
    assert_eq!(controller.state().turn, 2, "undo does not rewind the turn counter");

    assert!(matches!(
        controller.undo_last(),
        Err(RuntimeError::Combat(CombatError::NoHistory))
    ));
}

#[tokio::test]
async fn empty_roster_is_rejected_at_build() {
    let err = MatchController::builder()
        .team(TeamId::One, vec![factory().warrior("Conan").unwrap()])
        .build()
        .unwrap_err();

    assert!(matches!(err, RuntimeError::EmptyRoster { team: TeamId::Two }));
}
