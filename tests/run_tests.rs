//! End-to-end run sequencing through the public controller API.

use std::cell::RefCell;
use std::rc::Rc;

use squid_run::core::{ParticipantId, RunConfig, RunRng};
use squid_run::events::RunEvent;
use squid_run::policy::{StageReport, Verdict};
use squid_run::run::{NextStep, RunController, RunOutcome, RunPhase};
use squid_run::storage::{keys, KeyValueStore, MemoryStore};

fn controller(config: RunConfig, seed: u64) -> RunController<MemoryStore> {
    RunController::new(config, MemoryStore::new(), RunRng::new(seed)).unwrap()
}

/// Eliminate `count` non-player entries one by one, as a stage would.
fn eliminate_npcs(ctl: &mut RunController<MemoryStore>, count: usize) {
    let victims: Vec<ParticipantId> = ctl
        .roster()
        .iter()
        .filter(|id| !id.is_player())
        .take(count)
        .collect();
    for id in victims {
        assert!(ctl.eliminate(id));
    }
}

/// Finish the current stage and pass the vote.
fn clear_stage(ctl: &mut RunController<MemoryStore>, eliminate: usize) {
    let summary = ctl.stage_complete(StageReport::Eliminate(eliminate)).unwrap();
    assert_eq!(summary.next, NextStep::Vote);
    ctl.prize_reveal_complete();
    assert_eq!(ctl.phase(), RunPhase::AwaitingVote);
    ctl.voting_complete(true);
}

#[test]
fn test_start_run_pays_and_fills_roster() {
    let config = RunConfig::default()
        .with_slots(20)
        .with_character_types(10)
        .with_starting_coins(25);
    let mut ctl = controller(config, 42);

    ctl.start_run().unwrap();

    assert_eq!(ctl.coins(), 0);
    assert_eq!(ctl.roster().len(), 20);
    assert_eq!(ctl.roster().count_of(ParticipantId::PLAYER), 1);
    assert_eq!(ctl.stage_index(), 0);
    assert_eq!(ctl.phase(), RunPhase::StageInProgress(0));
    assert_eq!(ctl.store().get(keys::TOTAL_COINS), Some(0));
}

#[test]
fn test_delta_report_counts_stage_eliminations() {
    let mut ctl = controller(RunConfig::default().with_slots(12), 1);
    ctl.start_run().unwrap();
    eliminate_npcs(&mut ctl, 3);

    let summary = ctl.stage_complete(StageReport::RosterDelta).unwrap();

    assert_eq!(summary.start_len, 12);
    assert_eq!(summary.eliminated, 3);
    assert_eq!(summary.run_prize, 3000);
    assert_eq!(ctl.run_prize(), 3000);
}

#[test]
fn test_explicit_count_protects_player() {
    let mut ctl = controller(RunConfig::default().with_slots(10), 2);
    ctl.start_run().unwrap();

    let summary = ctl.stage_complete(StageReport::Eliminate(5)).unwrap();

    assert_eq!(summary.eliminated, 5);
    assert_eq!(ctl.roster().len(), 5);
    assert!(ctl.roster().contains(ParticipantId::PLAYER));
}

#[test]
fn test_explicit_count_larger_than_field() {
    let mut ctl = controller(RunConfig::default().with_slots(6), 2);
    ctl.start_run().unwrap();

    let summary = ctl.stage_complete(StageReport::Eliminate(50)).unwrap();

    assert_eq!(summary.eliminated, 5);
    assert_eq!(summary.run_prize, 5000);
    assert_eq!(summary.next, NextStep::Finish);
}

#[test]
fn test_last_one_standing_short_circuits() {
    let mut ctl = controller(RunConfig::default(), 3);
    ctl.start_run().unwrap();

    let summary = ctl.stage_complete(StageReport::Eliminate(19)).unwrap();
    assert_eq!(summary.remaining, 1);
    assert_eq!(summary.next, NextStep::Finish);

    ctl.prize_reveal_complete();

    assert_eq!(ctl.phase(), RunPhase::RunComplete);
    assert_eq!(ctl.prize(), 20_000);
    let last = ctl.last_summary().unwrap();
    assert_eq!(last.outcome, RunOutcome::LastStanding);
    assert_eq!(last.prize, 20_000);
    assert_eq!(last.stages_cleared, 1);
    assert!(ctl.roster().is_empty());
    assert_eq!(ctl.run_prize(), 0);
}

#[test]
fn test_last_one_standing_replaces_accumulated_prize() {
    let mut ctl = controller(RunConfig::default(), 4);
    ctl.start_run().unwrap();
    clear_stage(&mut ctl, 4);
    clear_stage(&mut ctl, 4);
    assert_eq!(ctl.run_prize(), 8000);

    let remaining = ctl.roster().len();
    ctl.stage_complete(StageReport::Eliminate(remaining - 1)).unwrap();
    ctl.prize_reveal_complete();

    assert_eq!(ctl.last_summary().unwrap().prize, 20_000);
    assert_eq!(ctl.prize(), 20_000);
}

#[test]
fn test_vote_failure_keeps_accumulated_prize() {
    let mut ctl = controller(RunConfig::default(), 5);
    ctl.start_run().unwrap();
    clear_stage(&mut ctl, 2);
    clear_stage(&mut ctl, 2);
    assert_eq!(ctl.stage_index(), 2);

    ctl.stage_complete(StageReport::Eliminate(3)).unwrap();
    ctl.prize_reveal_complete();
    assert_eq!(ctl.phase(), RunPhase::AwaitingVote);
    let prize_before_vote = ctl.run_prize();

    ctl.voting_complete(false);

    assert_eq!(ctl.phase(), RunPhase::RunComplete);
    assert_eq!(prize_before_vote, 7000);
    assert_eq!(ctl.prize(), 7000);
    assert_eq!(ctl.last_summary().unwrap().outcome, RunOutcome::VotedOut);
    assert_eq!(ctl.last_summary().unwrap().stages_cleared, 3);
    assert_eq!(ctl.store().get(keys::PRIZE_TO_ADD), Some(7000));
}

#[test]
fn test_full_run_through_every_stage() {
    let mut ctl = controller(RunConfig::default(), 6);
    ctl.start_run().unwrap();

    for _ in 0..5 {
        clear_stage(&mut ctl, 1);
    }
    assert_eq!(ctl.stage_index(), 5);

    let summary = ctl.stage_complete(StageReport::Eliminate(1)).unwrap();
    assert_eq!(summary.next, NextStep::Finish);
    ctl.prize_reveal_complete();

    let last = ctl.last_summary().unwrap();
    assert_eq!(last.outcome, RunOutcome::Survived);
    assert_eq!(last.prize, 6000);
    assert_eq!(last.stages_cleared, 6);
    assert_eq!(last.survivors, 14);
}

#[test]
fn test_prize_never_decreases_during_run() {
    let mut ctl = controller(RunConfig::default(), 7);
    ctl.start_run().unwrap();

    let mut previous = ctl.run_prize();
    for eliminated in [3, 0, 2, 1] {
        ctl.stage_complete(StageReport::Eliminate(eliminated)).unwrap();
        assert!(ctl.run_prize() >= previous);
        previous = ctl.run_prize();
        ctl.prize_reveal_complete();
        ctl.voting_complete(true);
        assert_eq!(ctl.run_prize(), previous);
    }
}

#[test]
fn test_team_outcome_won_counts_losers() {
    let mut ctl = controller(RunConfig::default(), 8);
    ctl.start_run().unwrap();
    clear_stage(&mut ctl, 0);
    clear_stage(&mut ctl, 0);
    assert_eq!(ctl.stage_index(), 2);

    let split = ctl.split_teams();
    for &id in split.losers(true) {
        ctl.eliminate(id);
    }
    let summary = ctl.stage_complete(StageReport::Outcome(Verdict::Won)).unwrap();

    assert_eq!(summary.eliminated, 5);
    assert_eq!(ctl.roster().len(), 15);
    assert!(ctl.roster().contains(ParticipantId::PLAYER));
}

#[test]
fn test_failure_forfeits_prize() {
    let mut ctl = controller(RunConfig::default(), 9);
    ctl.start_run().unwrap();
    clear_stage(&mut ctl, 5);
    assert_eq!(ctl.run_prize(), 5000);

    ctl.stage_failed();

    assert_eq!(ctl.phase(), RunPhase::RunFailed);
    assert_eq!(ctl.run_prize(), 0);
    assert_eq!(ctl.prize(), 0);
    assert!(ctl.roster().is_empty());
    let last = ctl.last_summary().unwrap();
    assert_eq!(last.outcome, RunOutcome::Failed);
    assert_eq!(last.stages_cleared, 1);
}

#[test]
fn test_new_run_after_failure() {
    let mut ctl = controller(RunConfig::default(), 10);
    ctl.start_run().unwrap();
    ctl.stage_failed();

    ctl.start_run().unwrap();

    assert_eq!(ctl.coins(), 50);
    assert_eq!(ctl.phase(), RunPhase::StageInProgress(0));
    assert_eq!(ctl.roster().len(), 20);
    assert!(ctl.last_summary().is_none());
}

#[test]
fn test_out_of_order_calls_are_ignored() {
    let mut ctl = controller(RunConfig::default(), 11);
    ctl.start_run().unwrap();

    ctl.voting_complete(true);
    ctl.prize_reveal_complete();
    assert_eq!(ctl.phase(), RunPhase::StageInProgress(0));

    ctl.stage_complete(StageReport::Eliminate(1)).unwrap();
    assert_eq!(ctl.stage_complete(StageReport::Eliminate(1)), None);
    let someone = ctl.roster().iter().next().unwrap();
    assert!(!ctl.eliminate(someone));
    ctl.voting_complete(true);
    assert_eq!(ctl.phase(), RunPhase::AwaitingPrizeReveal);
    assert_eq!(ctl.roster().len(), 19);
}

#[test]
fn test_phase_change_sequence() {
    let mut ctl = controller(RunConfig::default().with_stage_count(2), 12);
    let phases = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&phases);
    ctl.subscribe(move |event| {
        if let RunEvent::PhaseChanged { to, .. } = event {
            sink.borrow_mut().push(*to);
        }
    });

    ctl.start_run().unwrap();
    clear_stage(&mut ctl, 1);
    ctl.stage_complete(StageReport::Eliminate(1)).unwrap();
    ctl.prize_reveal_complete();

    assert_eq!(
        *phases.borrow(),
        vec![
            RunPhase::StageInProgress(0),
            RunPhase::AwaitingPrizeReveal,
            RunPhase::AwaitingVote,
            RunPhase::StageInProgress(1),
            RunPhase::AwaitingPrizeReveal,
            RunPhase::RunComplete,
        ]
    );
}

#[test]
fn test_prize_committed_before_completion_event() {
    let mut ctl = controller(RunConfig::default().with_stage_count(1), 13);
    ctl.start_run().unwrap();
    ctl.stage_complete(StageReport::Eliminate(2)).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ctl.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    ctl.prize_reveal_complete();

    assert_eq!(
        *seen.borrow(),
        vec![
            RunEvent::PrizeChanged(2000),
            RunEvent::PhaseChanged {
                from: RunPhase::AwaitingPrizeReveal,
                to: RunPhase::RunComplete,
            },
        ]
    );
}
