//! Follow-up scheduling helpers.
//!
//! A follow-up is overdue iff its calendar date is strictly before today's calendar date, with
//! time of day stripped from both sides. Absent or unparsable dates are never overdue.

use chrono::{Local, NaiveDate};

use crate::ingest::coerce::try_parse_calendar_date;
use crate::types::Lead;

/// Whether `date_str` names a calendar date strictly before today (local).
pub fn is_overdue(date_str: &str) -> bool {
    is_overdue_on(date_str, Local::now().date_naive())
}

/// Deterministic core of [`is_overdue`]: compare against an explicit "today".
pub fn is_overdue_on(date_str: &str, today: NaiveDate) -> bool {
    match try_parse_calendar_date(date_str) {
        Some(date) => date < today,
        None => false,
    }
}

/// A lead set split by follow-up urgency.
///
/// Unparsable/absent follow-up dates land in `upcoming` (they are not overdue, and there is no
/// date to flag them as due).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FollowUpBoard<'a> {
    /// Follow-up date strictly before today.
    pub overdue: Vec<&'a Lead>,
    /// Follow-up date equal to today.
    pub due_today: Vec<&'a Lead>,
    /// Everything else.
    pub upcoming: Vec<&'a Lead>,
}

/// Split leads by follow-up urgency relative to today (local).
pub fn follow_up_board(leads: &[Lead]) -> FollowUpBoard<'_> {
    follow_up_board_on(leads, Local::now().date_naive())
}

/// Deterministic core of [`follow_up_board`].
pub fn follow_up_board_on(leads: &[Lead], today: NaiveDate) -> FollowUpBoard<'_> {
    let mut board = FollowUpBoard::default();
    for lead in leads {
        match try_parse_calendar_date(&lead.next_follow_up) {
            Some(date) if date < today => board.overdue.push(lead),
            Some(date) if date == today => board.due_today.push(lead),
            _ => board.upcoming.push(lead),
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn lead_following_up(date: &str) -> Lead {
        Lead {
            id: "lead-0-0".to_string(),
            client_name: "Acme".to_string(),
            source: "Direct".to_string(),
            category: "Standard".to_string(),
            status: LeadStatus::Warm,
            mrc_value: 0.0,
            date_added: "2024-01-01T00:00:00.000Z".to_string(),
            last_contacted: "2024-01-01T00:00:00.000Z".to_string(),
            next_follow_up: date.to_string(),
            owner: "Unassigned".to_string(),
        }
    }

    #[test]
    fn empty_and_unparsable_dates_are_not_overdue() {
        assert!(!is_overdue_on("", today()));
        assert!(!is_overdue_on("   ", today()));
        assert!(!is_overdue_on("someday", today()));
    }

    #[test]
    fn yesterday_is_overdue_today_and_tomorrow_are_not() {
        assert!(is_overdue_on("2024-03-14", today()));
        assert!(!is_overdue_on("2024-03-15", today()));
        assert!(!is_overdue_on("2024-03-16", today()));
    }

    #[test]
    fn time_of_day_does_not_matter() {
        // Late on the same calendar day is still "today", not overdue.
        assert!(!is_overdue_on("2024-03-15T23:59:00Z", today()));
        // Early on the previous day is still overdue.
        assert!(is_overdue_on("2024-03-14T00:00:01Z", today()));
    }

    #[test]
    fn wall_clock_wrapper_agrees_for_obvious_cases() {
        assert!(!is_overdue(""));
        assert!(is_overdue("2000-01-01"));
        assert!(!is_overdue("2999-12-31"));
    }

    #[test]
    fn board_buckets_by_urgency() {
        let leads = vec![
            lead_following_up("2024-03-10"),
            lead_following_up("2024-03-15"),
            lead_following_up("2024-04-01"),
            lead_following_up(""),
        ];
        let board = follow_up_board_on(&leads, today());
        assert_eq!(board.overdue.len(), 1);
        assert_eq!(board.due_today.len(), 1);
        assert_eq!(board.upcoming.len(), 2);
        assert_eq!(board.overdue[0].next_follow_up, "2024-03-10");
    }
}
