//! Click state machine tests.
//!
//! These tests drive a full session through clicks and clock advances:
//! - Immediate matches
//! - The two-stage mismatch sequence
//! - Rejected clicks
//! - Completion and cancellation

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use photo_pair::cards::{Board, CardIndex, FaceId};
use photo_pair::core::ConfigError;
use photo_pair::game::{ClickOutcome, GameSession, Phase, RejectReason};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn idx(i: usize) -> CardIndex {
    CardIndex::new(i)
}

/// Session on a seeded shuffle, with a completion counter.
fn seeded_session(seed: u64) -> (GameSession, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let session = GameSession::builder()
        .seed(seed)
        .on_complete(move || counter.set(counter.get() + 1))
        .build()
        .expect("default config is valid");
    (session, calls)
}

/// Two positions holding different faces.
fn mismatched_pair(session: &GameSession) -> (CardIndex, CardIndex) {
    let board = session.board();
    let first = idx(0);
    let second = CardIndex::all()
        .find(|&i| i != first && !board.is_pair(first, i))
        .expect("board has more than one face");
    (first, second)
}

// =============================================================================
// Matching
// =============================================================================

/// Test that a matching pair is matched with no delay.
#[test]
fn test_matching_pair_is_immediate() {
    let (mut session, _) = seeded_session(42);
    let (a, b) = session.board().pairs()[0];

    assert_eq!(session.click(a), ClickOutcome::Selected(a));
    assert_eq!(session.click(b), ClickOutcome::Matched { first: a, second: b });

    assert!(session.state().selected().is_empty());
    assert!(session.state().is_matched(a));
    assert!(session.state().is_matched(b));
    assert_eq!(session.pending_timers(), 0);
    assert_eq!(session.phase(), Phase::Idle);
}

/// Test that the second card of a pair may be clicked first.
#[test]
fn test_pair_order_does_not_matter() {
    let (mut session, _) = seeded_session(7);
    let (a, b) = session.board().pairs()[5];

    session.click(b);
    assert_eq!(session.click(a), ClickOutcome::Matched { first: b, second: a });
}

// =============================================================================
// Mismatch Sequence
// =============================================================================

/// Test the reveal, flash, hide timeline for a mismatch.
#[test]
fn test_mismatch_timeline() {
    let (mut session, _) = seeded_session(42);
    let (a, b) = mismatched_pair(&session);

    session.click(a);
    assert_eq!(session.click(b), ClickOutcome::Mismatched { first: a, second: b });

    // Both shown, no flash yet
    assert_eq!(session.advance(ms(999)), 0);
    assert_eq!(session.state().selected(), &[a, b]);
    assert!(session.state().incorrect().is_empty());
    assert_eq!(session.phase(), Phase::Resolving);

    // Flash starts at 1000ms
    assert_eq!(session.advance(ms(1)), 1);
    assert_eq!(session.state().incorrect(), &[a, b]);
    assert_eq!(session.state().selected(), &[a, b]);
    assert_eq!(session.pending_timers(), 2);

    // Still flashing just before 2000ms
    assert_eq!(session.advance(ms(999)), 0);
    assert_eq!(session.state().incorrect(), &[a, b]);

    // Both timers fire together
    assert_eq!(session.advance(ms(1)), 2);
    assert!(session.state().incorrect().is_empty());
    assert!(session.state().selected().is_empty());
    assert_eq!(session.state().matched_count(), 0);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.pending_timers(), 0);
}

/// Test that one long advance runs the whole sequence.
#[test]
fn test_single_advance_runs_whole_sequence() {
    let (mut session, _) = seeded_session(3);
    let (a, b) = mismatched_pair(&session);

    session.click(a);
    session.click(b);

    assert_eq!(session.advance(ms(5000)), 3);
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.state().incorrect().is_empty());
    assert_eq!(session.now(), ms(5000));
}

/// Test that the flash and clear timers are independent.
#[test]
fn test_flash_and_clear_delays_are_independent() {
    let mut session = GameSession::builder()
        .seed(11)
        .reveal_delay(ms(100))
        .flash_delay(ms(200))
        .clear_delay(ms(300))
        .build()
        .unwrap();
    let (a, b) = mismatched_pair(&session);

    session.click(a);
    session.click(b);
    session.advance(ms(100));
    assert_eq!(session.state().incorrect(), &[a, b]);

    // Flash ends first, cards stay face up
    session.advance(ms(200));
    assert!(session.state().incorrect().is_empty());
    assert_eq!(session.state().selected(), &[a, b]);
    assert_eq!(session.click(a), ClickOutcome::Rejected(RejectReason::Resolving));

    session.advance(ms(100));
    assert!(session.state().selected().is_empty());
    assert_eq!(session.pending_timers(), 0);
}

/// Test that a flash longer than the clear delay is refused at build time.
#[test]
fn test_flash_outlasting_clear_is_rejected() {
    let result = GameSession::builder()
        .seed(5)
        .flash_delay(ms(3000))
        .clear_delay(ms(500))
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::FlashOutlastsClear { flash_ms: 3000, clear_ms: 500 })
    ));
}

/// Test that a flashing card cannot be clicked, and a later mismatch
/// keeps its full flash.
#[test]
fn test_flashing_cards_stay_locked_until_cleared() {
    let mut session = GameSession::builder()
        .seed(5)
        .flash_delay(ms(500))
        .clear_delay(ms(500))
        .build()
        .unwrap();
    let (a, b) = mismatched_pair(&session);
    let partner = session.board().partner_of(a);

    session.click(a);
    session.click(b);
    session.advance(ms(1200));
    assert_eq!(session.state().incorrect(), &[a, b]);
    assert_eq!(session.click(a), ClickOutcome::Rejected(RejectReason::Resolving));
    assert_eq!(session.click(partner), ClickOutcome::Rejected(RejectReason::Resolving));

    session.advance(ms(300));
    assert!(session.state().incorrect().is_empty());
    assert!(session.state().selected().is_empty());

    // Second mismatch at t=1500: flash runs 2500..3000
    session.click(a);
    session.click(b);
    session.advance(ms(1100));
    assert_eq!(session.state().incorrect(), &[a, b]);
    session.advance(ms(350));
    assert_eq!(session.state().incorrect(), &[a, b]);
    session.advance(ms(50));
    assert!(session.state().incorrect().is_empty());
}

// =============================================================================
// Rejected Clicks
// =============================================================================

/// Test that a third click while two cards are face up is dropped, not queued.
#[test]
fn test_third_click_rejected_not_queued() {
    let (mut session, _) = seeded_session(42);
    let (a, b) = mismatched_pair(&session);
    let c = CardIndex::all().find(|&i| i != a && i != b).unwrap();

    session.click(a);
    session.click(b);
    assert_eq!(session.click(c), ClickOutcome::Rejected(RejectReason::Resolving));

    session.advance(ms(1500));
    assert_eq!(session.click(c), ClickOutcome::Rejected(RejectReason::Resolving));

    session.advance(ms(500));
    assert!(session.state().selected().is_empty());
    assert!(!session.state().is_selected(c));
}

/// Test that clicking a matched card or the selected card changes nothing.
#[test]
fn test_matched_and_selected_clicks_are_no_ops() {
    let (mut session, _) = seeded_session(42);
    let (a, b) = session.board().pairs()[0];
    let (c, _) = session.board().pairs()[1];

    session.click(a);
    session.click(b);
    session.click(c);

    let before = session.snapshot();
    assert_eq!(session.click(a), ClickOutcome::Rejected(RejectReason::AlreadyMatched));
    assert_eq!(session.click(b), ClickOutcome::Rejected(RejectReason::AlreadyMatched));
    assert_eq!(session.click(c), ClickOutcome::Rejected(RejectReason::AlreadySelected));
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.pending_timers(), 0);
}

// =============================================================================
// Completion
// =============================================================================

/// Test that solving the board calls the collaborator exactly once.
#[test]
fn test_completion_fires_once() {
    let (mut session, calls) = seeded_session(42);
    let pairs = session.board().pairs();

    for (i, &(a, b)) in pairs.iter().enumerate() {
        session.click(a);
        let outcome = session.click(b);
        if i + 1 == pairs.len() {
            assert_eq!(outcome, ClickOutcome::Completed { first: a, second: b });
        } else {
            assert_eq!(outcome, ClickOutcome::Matched { first: a, second: b });
            assert_eq!(calls.get(), 0);
        }
    }

    assert_eq!(calls.get(), 1);
    assert_eq!(session.phase(), Phase::Complete);
    assert_eq!(session.state().matched_count(), 24);

    // Nothing observable changes afterwards
    let after = session.snapshot();
    for i in CardIndex::all() {
        assert_eq!(session.click(i), ClickOutcome::Rejected(RejectReason::Complete));
    }
    assert_eq!(session.advance(ms(10_000)), 0);
    assert_eq!(session.snapshot(), after);
    assert_eq!(calls.get(), 1);
}

/// Test that no mismatch timer survives completion.
#[test]
fn test_completion_leaves_no_pending_timers() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut session = GameSession::builder()
        .seed(5)
        .flash_delay(ms(400))
        .clear_delay(ms(400))
        .on_complete(move || counter.set(counter.get() + 1))
        .build()
        .unwrap();
    let (a, b) = mismatched_pair(&session);

    session.click(a);
    session.click(b);
    session.advance(ms(1400));
    assert!(session.state().selected().is_empty());
    assert!(session.state().incorrect().is_empty());

    for (x, y) in session.board().pairs() {
        session.click(x);
        session.click(y);
    }

    assert_eq!(calls.get(), 1);
    assert_eq!(session.pending_timers(), 0);
    assert!(session.state().incorrect().is_empty());

    let done = session.snapshot();
    assert_eq!(session.advance(ms(5000)), 0);
    assert_eq!(session.snapshot(), done);
}

/// Test that mismatches along the way do not affect completion.
#[test]
fn test_completion_after_mismatches() {
    let (mut session, calls) = seeded_session(99);
    let (a, b) = mismatched_pair(&session);

    for _ in 0..3 {
        session.click(a);
        session.click(b);
        session.advance(ms(2000));
    }
    assert_eq!(session.state().matched_count(), 0);

    for (x, y) in session.board().pairs() {
        session.click(x);
        session.click(y);
    }
    assert_eq!(calls.get(), 1);
}

// =============================================================================
// Teardown
// =============================================================================

/// Test that teardown cancels a pending mismatch and freezes the state.
#[test]
fn test_teardown_mid_mismatch() {
    let (mut session, calls) = seeded_session(42);
    let (a, b) = mismatched_pair(&session);

    session.click(a);
    session.click(b);
    session.advance(ms(1000));
    assert_eq!(session.pending_timers(), 2);

    assert_eq!(session.teardown(), 2);
    let frozen = session.snapshot();

    assert_eq!(session.advance(ms(5000)), 0);
    assert_eq!(session.click(a), ClickOutcome::Rejected(RejectReason::TornDown));
    assert_eq!(session.snapshot(), frozen);
    assert_eq!(calls.get(), 0);
}

/// Test that dropping an unfinished session never calls the collaborator.
#[test]
fn test_drop_unfinished_session() {
    let (mut session, calls) = seeded_session(42);
    let (a, b) = mismatched_pair(&session);
    session.click(a);
    session.click(b);

    drop(session);
    assert_eq!(calls.get(), 0);
}

// =============================================================================
// Fixed Boards
// =============================================================================

/// Test a hand-built board where neighbours pair up.
#[test]
fn test_fixed_board() {
    let board = Board::from_faces(FaceId::all().flat_map(|f| [f, f]).collect()).unwrap();
    let mut session = GameSession::builder().board(board).build().unwrap();

    assert_eq!(
        session.click(idx(22)),
        ClickOutcome::Selected(idx(22))
    );
    assert_eq!(
        session.click(idx(23)),
        ClickOutcome::Matched { first: idx(22), second: idx(23) }
    );
    assert_eq!(session.asset_at(idx(23)), "/game-photos/mine-12.avif");
}
