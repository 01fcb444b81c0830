//! Prep-start suggestion and prep-time feasibility.
//!
//! Feasibility is advisory: callers surface a warning, they never block the
//! order on it.

use super::time::{format_minutes_to_time, parse_time_to_minutes};
use serde::{Deserialize, Serialize};

/// Suggest when kitchen prep should start for a target service time.
///
/// On unparsable `time` the `fallback_minutes` is returned as-is. Otherwise the
/// result is `time - offset_minutes`, clamped at midnight.
pub fn compute_suggested_prep_start(
    time: &str,
    offset_minutes: u32,
    fallback_minutes: Option<u32>,
) -> Option<u32> {
    match parse_time_to_minutes(time) {
        Some(minutes) => Some(minutes.saturating_sub(offset_minutes)),
        None => fallback_minutes,
    }
}

/// Lead time and safety buffer used by feasibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepPolicy {
    /// How long before service prep is suggested to begin.
    pub lead_time_minutes: u32,
    /// Slack that must remain between the end of prep and service.
    pub safety_buffer_minutes: u32,
}

impl Default for PrepPolicy {
    fn default() -> Self {
        Self {
            lead_time_minutes: 30,
            safety_buffer_minutes: 15,
        }
    }
}

/// Outcome of a feasibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepFeasibility {
    pub reservation_minutes: u32,
    pub suggested_start_minutes: u32,
    /// Minutes since midnight the start reference was taken from.
    pub start_reference_minutes: u32,
    /// Last moment prep can start and still leave the safety buffer.
    /// Negative when that moment falls before midnight.
    pub latest_start_minutes: i64,
    /// `latest_start - start_reference`; negative means late.
    pub slack_minutes: i64,
    pub fits: bool,
}

impl PrepFeasibility {
    /// Human-readable warning, present only when the order does not fit.
    pub fn warning(&self) -> Option<String> {
        if self.fits {
            return None;
        }
        Some(format!(
            "Order may not be ready in time: prep should have started by {} for the {} reservation ({} min short)",
            format_minutes_to_time(self.latest_start_minutes),
            format_minutes_to_time(self.reservation_minutes as i64),
            -self.slack_minutes
        ))
    }
}

impl PrepPolicy {
    pub fn new(lead_time_minutes: u32, safety_buffer_minutes: u32) -> Self {
        Self {
            lead_time_minutes,
            safety_buffer_minutes,
        }
    }

    /// Suggested prep start for a reservation time under this policy.
    pub fn suggested_start(&self, reservation_time: &str) -> Option<u32> {
        compute_suggested_prep_start(reservation_time, self.lead_time_minutes, None)
    }

    /// Check whether `estimated_prep_minutes` of work fits before `reservation_time`.
    ///
    /// The start reference is `now_minutes` when known (order creation time),
    /// otherwise the suggested prep start. The order fits iff
    /// `reservation - (prep + buffer) >= start_reference`.
    ///
    /// Returns `None` when the reservation time does not parse.
    pub fn check(
        &self,
        reservation_time: &str,
        estimated_prep_minutes: u32,
        now_minutes: Option<u32>,
    ) -> Option<PrepFeasibility> {
        let reservation_minutes = parse_time_to_minutes(reservation_time)?;
        let suggested_start_minutes = reservation_minutes.saturating_sub(self.lead_time_minutes);
        let start_reference_minutes = now_minutes.unwrap_or(suggested_start_minutes);

        let latest_start_minutes = reservation_minutes as i64
            - (estimated_prep_minutes as i64 + self.safety_buffer_minutes as i64);
        let slack_minutes = latest_start_minutes - start_reference_minutes as i64;

        Some(PrepFeasibility {
            reservation_minutes,
            suggested_start_minutes,
            start_reference_minutes,
            latest_start_minutes,
            slack_minutes,
            fits: slack_minutes >= 0,
        })
    }
}
