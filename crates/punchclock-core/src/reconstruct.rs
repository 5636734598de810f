//! Shift reconstruction from the raw punch log.
//!
//! The log is replayed in timestamp order through a three-state machine
//! (idle, working, on break). Every `(state, punch)` pair has an outcome;
//! pairs that make no sense are ignored rather than reported, so a messy
//! log still yields every shift that was properly closed.

use serde::Serialize;
use tracing::{debug, trace};

use crate::interval::worked_spans;
use crate::models::{BreakInterval, ClockStatus, MS_PER_HOUR, PunchEvent, PunchKind, Shift};

/// Replay state between two punches.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplayState {
    Idle,
    Working(Shift),
    /// Shift in progress plus the start of the running break.
    OnBreak(Shift, i64),
}

impl ReplayState {
    fn name(&self) -> &'static str {
        match self {
            ReplayState::Idle => "idle",
            ReplayState::Working(_) => "working",
            ReplayState::OnBreak(..) => "on_break",
        }
    }
}

/// Result of replaying a punch log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Replay {
    /// Closed shifts in chronological order.
    pub shifts: Vec<Shift>,
    /// Shift still in progress at the end of the log. A running break is
    /// included with `end_ms: None`.
    pub open: Option<Shift>,
}

/// Rebuild closed shifts from a punch log.
///
/// Events are sorted by timestamp (stable, so ties keep their log order)
/// before replay. A shift without a clock-out is left out.
///
/// # Examples
///
/// ```
/// use punchclock_core::models::{PunchEvent, PunchKind};
/// use punchclock_core::reconstruct::reconstruct;
///
/// let events = vec![
///     PunchEvent::new("b", PunchKind::ClockOut, 8 * 3_600_000),
///     PunchEvent::new("a", PunchKind::ClockIn, 0),
///     PunchEvent::new("c", PunchKind::ClockIn, 9 * 3_600_000),
/// ];
/// let shifts = reconstruct(&events);
///
/// assert_eq!(shifts.len(), 1);
/// assert_eq!(shifts[0].end_ms, Some(8 * 3_600_000));
/// ```
pub fn reconstruct(events: &[PunchEvent]) -> Vec<Shift> {
    replay(events).shifts
}

/// Replay a punch log, keeping the open shift alongside the closed ones.
pub fn replay(events: &[PunchEvent]) -> Replay {
    let mut ordered: Vec<&PunchEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.timestamp_ms);

    let mut shifts = Vec::new();
    let mut state = ReplayState::Idle;
    for event in ordered {
        state = step(state, event, &mut shifts);
    }

    let open = match state {
        ReplayState::Idle => None,
        ReplayState::Working(shift) => Some(shift),
        ReplayState::OnBreak(mut shift, start_ms) => {
            shift.breaks.push(BreakInterval {
                start_ms,
                end_ms: None,
            });
            Some(shift)
        }
    };

    debug!(
        events = events.len(),
        shifts = shifts.len(),
        open = open.is_some(),
        "replayed punch log"
    );

    Replay { shifts, open }
}

fn step(state: ReplayState, event: &PunchEvent, shifts: &mut Vec<Shift>) -> ReplayState {
    let at = event.timestamp_ms;

    match (state, event.kind) {
        (ReplayState::Idle, PunchKind::ClockIn) => ReplayState::Working(Shift::open(at)),
        (ReplayState::Working(shift), PunchKind::BreakStart) => ReplayState::OnBreak(shift, at),
        (ReplayState::OnBreak(mut shift, start_ms), PunchKind::BreakEnd) => {
            shift.breaks.push(BreakInterval {
                start_ms,
                end_ms: Some(at),
            });
            ReplayState::Working(shift)
        }
        (ReplayState::Working(mut shift), PunchKind::ClockOut) => {
            if at > shift.start_ms {
                shift.end_ms = Some(at);
                shifts.push(shift);
            } else {
                debug!(id = %event.id, at, "dropping zero-length shift");
            }
            ReplayState::Idle
        }
        (state, kind) => {
            trace!(id = %event.id, state = state.name(), %kind, "ignoring punch");
            state
        }
    }
}

/// Live status derived from the punch log and the current time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// Status implied by the most recent punch.
    pub status: ClockStatus,
    pub last_punch: Option<PunchEvent>,
    /// Shift in progress according to the replay, if any.
    pub open_shift: Option<Shift>,
    /// Worked hours of the open shift, treating `now` as its end.
    pub worked_hours_so_far: f64,
}

impl StatusReport {
    pub fn allowed_punches(&self) -> &'static [PunchKind] {
        self.status.allowed_punches()
    }
}

/// Current status for display.
///
/// The status is the kind of the most recent punch (ties resolved to the
/// later log entry). The open shift comes from the replay and is measured
/// up to `now_ms`; it never feeds aggregation.
pub fn current_status(events: &[PunchEvent], now_ms: i64) -> StatusReport {
    let last_punch = events
        .iter()
        .enumerate()
        .max_by_key(|(index, event)| (event.timestamp_ms, *index))
        .map(|(_, event)| event.clone());

    let status = last_punch
        .as_ref()
        .map_or(ClockStatus::Off, |event| ClockStatus::after(event.kind));

    let open_shift = replay(events).open;
    let worked_ms: i64 = open_shift
        .as_ref()
        .map(|shift| {
            worked_spans(shift, now_ms.max(shift.start_ms))
                .iter()
                .fold(0i64, |total, span| total.saturating_add(span.duration_ms()))
        })
        .unwrap_or(0);

    StatusReport {
        status,
        last_punch,
        open_shift,
        worked_hours_so_far: worked_ms as f64 / MS_PER_HOUR as f64,
    }
}
