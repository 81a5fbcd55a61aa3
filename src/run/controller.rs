use crate::core::{ParticipantId, RunConfig, RunRng};
use crate::economy::{self, Currency, DailyStatus, Economy, ExchangeQuote};
use crate::error::RunError;
use crate::events::{EventBus, RunEvent, SubscriptionId};
use crate::features::FeatureSpec;
use crate::policy::{self, Resolution, StageReport, VoteTally};
use crate::roster::{Roster, TeamSplit};
use crate::storage::{keys, KeyValueStore};

use super::reveal::PrizeReveal;
use super::state::{Checkpoint, NextStep, RunOutcome, RunState, RunSummary, StageSummary};
use super::{RunMode, RunPhase};

/// Owns one player's run lifecycle and persistent balances.
///
/// The host constructs a single controller at startup and hands `&mut`
/// access to whichever stage or menu is active. Stages report back through
/// [`stage_complete`](Self::stage_complete) / [`stage_failed`](Self::stage_failed);
/// presentation layers call [`prize_reveal_complete`](Self::prize_reveal_complete)
/// and [`voting_complete`](Self::voting_complete) when their animations end.
///
/// Calls that do not fit the current phase (or arrive in practice mode) are
/// ignored with a debug log. Only spend-gated and checkpoint operations
/// return errors.
pub struct RunController<S: KeyValueStore> {
    config: RunConfig,
    store: S,
    rng: RunRng,
    events: EventBus,
    economy: Economy,
    state: RunState,
    last_summary: Option<RunSummary>,
}

impl<S: KeyValueStore> RunController<S> {
    /// Validate `config` and load balances from `store`.
    pub fn new(config: RunConfig, store: S, rng: RunRng) -> Result<Self, RunError> {
        config.validate()?;
        let economy = Economy::load(&store, config.starting_coins);
        log::info!(
            "run controller ready: {} coins, {} prize, seed {}",
            economy.coins.balance(),
            economy.prize.balance(),
            rng.seed()
        );
        Ok(Self {
            config,
            store,
            rng,
            events: EventBus::new(),
            economy,
            state: RunState::default(),
            last_summary: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    #[must_use]
    pub fn mode(&self) -> RunMode {
        self.state.mode
    }

    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.state.stage_index
    }

    #[must_use]
    pub fn run_prize(&self) -> i64 {
        self.state.run_prize
    }

    /// Read-only view of the alive participants.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    #[must_use]
    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    #[must_use]
    pub fn coins(&self) -> i64 {
        self.economy.coins.balance()
    }

    #[must_use]
    pub fn prize(&self) -> i64 {
        self.economy.prize.balance()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Summary of the most recently finished run.
    #[must_use]
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&RunEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Run lifecycle
    // ------------------------------------------------------------------

    /// Pay the entry cost and begin stage 0 with a fresh roster.
    pub fn start_run(&mut self) -> Result<(), RunError> {
        let phase = self.state.phase;
        if !phase.accepts_start() {
            return Err(RunError::WrongPhase(phase));
        }
        self.spend_coins(self.config.entry_cost)?;

        let mut roster = Roster::new();
        let filled = roster.initialize(
            self.config.total_slots,
            self.config.character_types,
            &mut self.rng,
        );
        debug_assert!(filled, "config is validated on construction");

        self.state = RunState {
            mode: RunMode::Main,
            phase,
            stage_index: 0,
            run_prize: 0,
            stage_start_len: roster.len(),
            roster,
        };
        self.last_summary = None;
        self.bump_serial();
        log::info!("run started with {} participants", self.state.roster.len());
        self.set_phase(RunPhase::StageInProgress(0));
        Ok(())
    }

    /// Apply a finished stage's report and move to the prize reveal.
    ///
    /// Returns `None` when the call is ignored or the report is a loss (the
    /// run fails immediately, no reveal).
    pub fn stage_complete(&mut self, report: StageReport) -> Option<StageSummary> {
        let Some(stage_index) = self.active_stage() else {
            self.ignored("stage_complete");
            return None;
        };

        let start_len = self.state.stage_start_len;
        let resolution = policy::resolve(report, &mut self.state.roster, start_len, &mut self.rng);
        let eliminated = match resolution {
            Resolution::Eliminated(count) => count,
            Resolution::RunLost => {
                log::info!("stage {} lost", stage_index + 1);
                self.fail_run();
                return None;
            }
        };

        let previous_prize = self.state.run_prize;
        let earned = policy::prize_for(eliminated, self.config.per_player_reward);
        self.state.run_prize = previous_prize.saturating_add(earned);

        PrizeReveal {
            stage_index,
            eliminated,
            start_players: start_len,
            previous_prize,
        }
        .store(&mut self.store);

        let remaining = self.state.roster.len();
        let finished =
            policy::is_last_standing(remaining) || stage_index >= self.config.last_stage();
        let next = if finished {
            NextStep::Finish
        } else {
            NextStep::Vote
        };
        log::info!(
            "stage {} complete: {eliminated} eliminated, {remaining} remaining, run prize {}",
            stage_index + 1,
            self.state.run_prize
        );
        self.set_phase(RunPhase::AwaitingPrizeReveal);

        Some(StageSummary {
            stage_index,
            start_len,
            eliminated,
            remaining,
            previous_prize,
            run_prize: self.state.run_prize,
            next,
        })
    }

    /// The player lost. Valid during a stage or the vote.
    pub fn stage_failed(&mut self) {
        let in_run = matches!(
            self.state.phase,
            RunPhase::StageInProgress(_) | RunPhase::AwaitingVote
        );
        if self.state.mode != RunMode::Main || !in_run {
            self.ignored("stage_failed");
            return;
        }
        log::info!("stage {} failed", self.state.stage_index + 1);
        self.fail_run();
    }

    /// Quit the current stage. Same as losing it.
    pub fn give_up(&mut self) {
        self.stage_failed();
    }

    /// The reveal animation finished.
    ///
    /// Surviving alone ends the run with the full-field prize, replacing the
    /// accumulated value. Clearing the final stage ends it as is.
    pub fn prize_reveal_complete(&mut self) {
        if self.state.mode != RunMode::Main || self.state.phase != RunPhase::AwaitingPrizeReveal {
            self.ignored("prize_reveal_complete");
            return;
        }

        if policy::is_last_standing(self.state.roster.len()) {
            self.state.run_prize = self.config.last_standing_prize();
            self.finish(RunOutcome::LastStanding);
        } else if self.state.stage_index >= self.config.last_stage() {
            self.finish(RunOutcome::Survived);
        } else {
            self.set_phase(RunPhase::AwaitingVote);
        }
    }

    /// The survivors decided whether to go on.
    pub fn voting_complete(&mut self, passed: bool) {
        if self.state.mode != RunMode::Main || self.state.phase != RunPhase::AwaitingVote {
            self.ignored("voting_complete");
            return;
        }

        if !passed {
            log::info!("vote failed after stage {}", self.state.stage_index + 1);
            self.finish(RunOutcome::VotedOut);
            return;
        }

        let next = self.state.stage_index + 1;
        self.state.stage_index = next;
        self.state.stage_start_len = self.state.roster.len();
        log::info!(
            "vote passed, starting stage {} with {} participants",
            next + 1,
            self.state.stage_start_len
        );
        self.set_phase(RunPhase::StageInProgress(next));
    }

    fn fail_run(&mut self) {
        self.state.run_prize = 0;
        self.finish(RunOutcome::Failed);
    }

    fn finish(&mut self, outcome: RunOutcome) {
        let complete = outcome.is_complete();
        let prize = if complete { self.state.run_prize } else { 0 };

        economy::record_pending(&mut self.store, keys::PRIZE_TO_ADD, prize);
        if prize > 0 {
            self.economy.prize.add(prize, &mut self.store, &mut self.events);
        }

        let summary = RunSummary {
            outcome,
            prize,
            stages_cleared: if complete {
                self.state.stage_index + 1
            } else {
                self.state.stage_index
            },
            survivors: self.state.roster.len(),
        };
        log::info!(
            "run over ({outcome:?}): prize {prize}, {} stages cleared",
            summary.stages_cleared
        );

        self.state.roster.clear();
        self.state.run_prize = 0;
        self.state.stage_start_len = 0;
        self.last_summary = Some(summary);
        self.bump_serial();
        self.set_phase(if complete {
            RunPhase::RunComplete
        } else {
            RunPhase::RunFailed
        });
    }

    // ------------------------------------------------------------------
    // Practice
    // ------------------------------------------------------------------

    /// Play a single stage without paying or scoring.
    pub fn enter_practice(&mut self, stage_index: usize) -> Result<(), RunError> {
        let phase = self.state.phase;
        if !phase.accepts_start() {
            return Err(RunError::WrongPhase(phase));
        }
        if stage_index >= self.config.stage_count {
            log::error!(
                "cannot practice stage {stage_index}: only {} stages",
                self.config.stage_count
            );
            return Err(RunError::UnknownStage {
                index: stage_index,
                stage_count: self.config.stage_count,
            });
        }
        self.state.mode = RunMode::Practice;
        self.state.stage_index = stage_index;
        log::info!("practicing stage {}", stage_index + 1);
        Ok(())
    }

    pub fn leave_practice(&mut self) {
        if self.state.mode == RunMode::Practice {
            self.state.mode = RunMode::Main;
            self.state.stage_index = 0;
            log::info!("left practice");
        }
    }

    // ------------------------------------------------------------------
    // In-stage purchases
    // ------------------------------------------------------------------

    /// Pay the revive cost and ask the active stage to respawn.
    pub fn revive(&mut self) -> Result<(), RunError> {
        if self.state.mode == RunMode::Practice {
            return Err(RunError::PracticeMode);
        }
        if self.active_stage().is_none() {
            return Err(RunError::WrongPhase(self.state.phase));
        }
        self.spend_coins(self.config.revive_cost)?;
        log::info!("player revived");
        self.events.emit(&RunEvent::StageRespawn);
        Ok(())
    }

    /// Pay for a feature and broadcast its activation.
    pub fn activate_feature(&mut self, feature: &FeatureSpec) -> Result<(), RunError> {
        if feature.cost < 0 {
            log::error!("feature {} has negative cost {}", feature.name, feature.cost);
            return Err(RunError::InvalidCost(feature.cost));
        }
        self.spend_coins(feature.cost)?;
        log::info!("feature {} activated", feature.name);
        self.events.emit(&RunEvent::FeatureActivated(feature.kind));
        Ok(())
    }

    fn spend_coins(&mut self, amount: i64) -> Result<(), RunError> {
        if self.economy.coins.spend(amount, &mut self.store, &mut self.events) {
            Ok(())
        } else {
            Err(RunError::InsufficientFunds {
                needed: amount,
                available: self.economy.coins.balance(),
            })
        }
    }

    // ------------------------------------------------------------------
    // Stage extension points
    // ------------------------------------------------------------------

    /// Remove one participant during a stage. Repeated reports of the same
    /// death return false.
    pub fn eliminate(&mut self, id: ParticipantId) -> bool {
        if self.active_stage().is_none() {
            self.ignored("eliminate");
            return false;
        }
        if !self.state.roster.eliminate(id) {
            return false;
        }
        let remaining = self.state.roster.len();
        self.events.emit(&RunEvent::ParticipantEliminated { id, remaining });
        true
    }

    /// Tug-of-war teams for the current roster.
    pub fn split_teams(&mut self) -> TeamSplit {
        self.state.roster.split_teams(self.config.max_team_size, &mut self.rng)
    }

    /// How many participants take part in the vote (player included).
    #[must_use]
    pub fn voter_count(&self) -> usize {
        self.state.roster.len()
    }

    /// Roll the NPC votes. The player's vote is added on the tally.
    pub fn open_vote(&mut self) -> VoteTally {
        VoteTally::cast(
            VoteTally::npc_voters_for(self.voter_count()),
            self.config.vote_pass_percent,
            &mut self.rng,
        )
    }

    /// Random elimination count for the dalgona stage.
    pub fn dalgona_eliminations(&mut self) -> usize {
        policy::dalgona_eliminations(
            self.state.roster.len(),
            self.config.min_remaining_after_dalgona,
            &mut self.rng,
        )
    }

    /// Elimination count for the marbles stage.
    #[must_use]
    pub fn marbles_eliminations(&self) -> usize {
        policy::half_of(self.state.roster.len())
    }

    #[must_use]
    pub fn tutorial_seen(&self, stage_index: usize) -> bool {
        self.store.get_flag(&keys::tutorial_seen(stage_index))
    }

    pub fn mark_tutorial_seen(&mut self, stage_index: usize) {
        self.store.set_flag(&keys::tutorial_seen(stage_index), true);
        self.store.flush_or_log();
    }

    // ------------------------------------------------------------------
    // Menu
    // ------------------------------------------------------------------

    #[must_use]
    pub fn quote_exchange(&self, level: i64) -> ExchangeQuote {
        self.economy.quote_exchange(&self.config.exchange, level)
    }

    pub fn exchange(&mut self, level: i64) -> bool {
        self.economy
            .exchange(&self.config.exchange, level, &mut self.store, &mut self.events)
    }

    pub fn daily_status(&mut self, now: i64) -> DailyStatus {
        DailyStatus::check(&mut self.store, now)
    }

    pub fn claim_daily_reward(&mut self, now: i64) -> Result<i64, DailyStatus> {
        self.economy
            .claim_daily(&self.config.rewards, now, &mut self.store, &mut self.events)
    }

    pub fn grant_ad_reward(&mut self) {
        self.economy
            .grant_ad_reward(&self.config.rewards, &mut self.store, &mut self.events);
    }

    /// Credit a balance from outside a run (shop purchases).
    pub fn credit(&mut self, currency: Currency, amount: i64) -> bool {
        self.economy
            .ledger_mut(currency)
            .add(amount, &mut self.store, &mut self.events)
    }

    /// Debit a balance from outside a run.
    pub fn debit(&mut self, currency: Currency, amount: i64) -> bool {
        self.economy
            .ledger_mut(currency)
            .spend(amount, &mut self.store, &mut self.events)
    }

    pub fn take_pending_coins(&mut self) -> i64 {
        economy::take_pending_coins(&mut self.store)
    }

    pub fn take_pending_prize(&mut self) -> i64 {
        economy::take_pending_prize(&mut self.store)
    }

    // ------------------------------------------------------------------
    // Suspend / resume
    // ------------------------------------------------------------------

    /// Encode the in-progress run. Balances live in the store and are not included.
    pub fn checkpoint(&self) -> Result<Vec<u8>, RunError> {
        let checkpoint = Checkpoint {
            serial: self.serial(),
            state: self.state.clone(),
            rng: self.rng.state(),
        };
        Ok(checkpoint.encode()?)
    }

    /// Replace the run state with a checkpoint. On error nothing changes.
    ///
    /// Only checkpoints taken since the last run start or finish are
    /// accepted, and the state must fit the active configuration.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), RunError> {
        let checkpoint = Checkpoint::decode(bytes)?;
        let current = self.serial();
        if checkpoint.serial != current {
            log::warn!("refusing checkpoint from run {} (now {current})", checkpoint.serial);
            return Err(RunError::StaleCheckpoint {
                checkpoint: checkpoint.serial,
                current,
            });
        }
        if let Err(err) = checkpoint.state.validate(&self.config) {
            log::warn!("refusing checkpoint: {err}");
            return Err(err);
        }
        let from = self.state.phase;
        self.rng = RunRng::from_state(&checkpoint.rng);
        self.state = checkpoint.state;
        log::info!("run restored at {}", self.state.phase);
        if from != self.state.phase {
            self.events.emit(&RunEvent::PhaseChanged {
                from,
                to: self.state.phase,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------

    fn serial(&self) -> i64 {
        self.store.get_or(keys::RUN_SERIAL, 0)
    }

    fn bump_serial(&mut self) {
        let next = self.serial().wrapping_add(1);
        self.store.set(keys::RUN_SERIAL, next);
        self.store.flush_or_log();
    }

    fn active_stage(&self) -> Option<usize> {
        match self.state.mode {
            RunMode::Main => self.state.phase.stage(),
            RunMode::Practice => None,
        }
    }

    fn set_phase(&mut self, to: RunPhase) {
        let from = self.state.phase;
        self.state.phase = to;
        log::debug!("phase: {from} -> {to}");
        self.events.emit(&RunEvent::PhaseChanged { from, to });
    }

    fn ignored(&self, operation: &str) {
        log::debug!(
            "{operation} ignored while {} ({:?})",
            self.state.phase,
            self.state.mode
        );
    }
}

impl<S: KeyValueStore> std::fmt::Debug for RunController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunController")
            .field("state", &self.state)
            .field("economy", &self.economy)
            .field("last_summary", &self.last_summary)
            .finish_non_exhaustive()
    }
}
