//! Scheduling helper properties: time conversion, prep starts and feasibility.

use restaurant_desk::domain::{
    compute_suggested_prep_start, format_minutes_to_time, is_valid_time_format,
    is_within_business_hours, parse_time_to_minutes, BusinessHours, PrepPolicy, TimeOfDay,
};

#[test]
fn test_parse_and_format_round_trip() {
    assert_eq!(parse_time_to_minutes("9:05"), Some(545));
    assert_eq!(format_minutes_to_time(545), "09:05");
    assert_eq!(parse_time_to_minutes("00:00"), Some(0));
    assert_eq!(parse_time_to_minutes("23:59"), Some(1439));

    for minutes in [0_u32, 59, 60, 545, 1110, 1439] {
        let text = format_minutes_to_time(minutes as i64);
        assert_eq!(parse_time_to_minutes(&text), Some(minutes), "{}", text);
    }
}

#[test]
fn test_parse_rejects_malformed_times() {
    for input in ["25:00", "12:60", "abc", "", "12", "-1:00", "12:00pm"] {
        assert_eq!(parse_time_to_minutes(input), None, "{:?}", input);
        assert!(!is_valid_time_format(input), "{:?}", input);
    }
}

#[test]
fn test_parser_is_looser_than_format_check() {
    // Single-digit minutes parse but are not a canonical time
    assert_eq!(parse_time_to_minutes("12:5"), Some(725));
    assert!(!is_valid_time_format("12:5"));
}

#[test]
fn test_format_clamps_negative_minutes() {
    assert_eq!(format_minutes_to_time(-30), "00:00");
}

#[test]
fn test_suggested_prep_start() {
    assert_eq!(compute_suggested_prep_start("19:00", 30, None), Some(1110));
    assert_eq!(compute_suggested_prep_start("00:10", 30, None), Some(0));
    assert_eq!(compute_suggested_prep_start("bad", 30, None), None);
    assert_eq!(compute_suggested_prep_start("bad", 30, Some(720)), Some(720));
}

#[test]
fn test_business_hours_boundaries() {
    assert!(!is_within_business_hours("05:00", 6, 23));
    assert!(!is_within_business_hours("05:59", 6, 23));
    assert!(is_within_business_hours("06:00", 6, 23));
    assert!(is_within_business_hours("23:00", 6, 23));
    assert!(is_within_business_hours("23:59", 6, 23));

    let hours = BusinessHours::new(11, 22);
    assert!(hours.contains("11:30"));
    assert!(!hours.contains("10:59"));
    assert!(!hours.contains("noon"));
}

#[test]
fn test_time_of_day_value() {
    let time = TimeOfDay::parse("7:45").unwrap();
    assert_eq!(time.minutes(), 465);
    assert_eq!(time.to_string(), "07:45");
    assert!(TimeOfDay::parse("24:00").is_err());
    assert!(TimeOfDay::from_minutes(1440).is_none());
}

#[test]
fn test_end_to_end_feasibility() {
    let policy = PrepPolicy::new(30, 15);
    assert_eq!(policy.suggested_start("19:30"), Some(19 * 60));

    // 19:30 - (45 + 15) = 18:30, before the 19:00 suggested start
    let slow = policy.check("19:30", 45, None).unwrap();
    assert!(!slow.fits);
    assert_eq!(slow.latest_start_minutes, 18 * 60 + 30);
    assert_eq!(slow.slack_minutes, -30);
    assert!(slow.warning().unwrap().contains("30 min short"));

    // 19:30 - (10 + 15) = 19:05, after 19:00
    let quick = policy.check("19:30", 10, None).unwrap();
    assert!(quick.fits);
    assert_eq!(quick.slack_minutes, 5);
    assert_eq!(quick.warning(), None);
}

#[test]
fn test_feasibility_from_order_time() {
    let policy = PrepPolicy::default();

    let early = policy.check("19:30", 45, Some(17 * 60)).unwrap();
    assert!(early.fits);
    assert_eq!(early.start_reference_minutes, 17 * 60);

    let late = policy.check("19:30", 10, Some(19 * 60 + 10)).unwrap();
    assert!(!late.fits);
    assert_eq!(late.slack_minutes, -5);

    assert!(policy.check("half seven", 10, None).is_none());
}

#[test]
fn test_feasibility_monotonic_in_prep_time() {
    let policy = PrepPolicy::default();
    let mut previous_fit = true;
    for prep in 0..=120 {
        let fits = policy.check("19:30", prep, None).unwrap().fits;
        // Once an estimate is too long, every longer one is too
        assert!(previous_fit || !fits, "prep {}", prep);
        previous_fit = fits;
    }
}
