use super::*;
use crate::cli::IconMode;
use chrono::Timelike;
use proptest::prelude::*;

#[test]
fn classifies_provider_condition_texts() {
    let cases = [
        ("Sunny", ConditionCategory::Sunny),
        ("Clear", ConditionCategory::Sunny),
        ("Partly cloudy", ConditionCategory::Cloudy),
        ("Overcast", ConditionCategory::Cloudy),
        ("Heavy rain", ConditionCategory::Rainy),
        ("Patchy light drizzle", ConditionCategory::Rainy),
        ("Blowing snow", ConditionCategory::Snowy),
        ("Blizzard", ConditionCategory::Snowy),
        ("Freezing fog", ConditionCategory::Foggy),
        ("Mist", ConditionCategory::Foggy),
        ("Thundery outbreaks possible", ConditionCategory::Stormy),
        ("Moderate or heavy rain with thunder", ConditionCategory::Stormy),
    ];
    for (text, expected) in cases {
        assert_eq!(classify_condition(text), expected, "{text}");
    }
}

#[test]
fn unmatched_and_empty_text_default_to_cloudy() {
    assert_eq!(classify_condition(""), ConditionCategory::Cloudy);
    assert_eq!(classify_condition("Ice pellets"), ConditionCategory::Cloudy);
}

#[test]
fn storm_keywords_beat_sunny_keywords() {
    assert_eq!(
        classify_condition("Sunny with a chance of storms"),
        ConditionCategory::Stormy
    );
}

#[test]
fn partly_cloudy_flag_matches_refinement_keywords() {
    assert!(is_partly_cloudy("Partly cloudy"));
    assert!(is_partly_cloudy("few clouds"));
    assert!(is_partly_cloudy("Scattered showers"));
    assert!(is_partly_cloudy("BROKEN CLOUDS"));
    assert!(!is_partly_cloudy("Cloudy"));
    assert!(!is_partly_cloudy("Sunny"));
}

#[test]
fn clear_icon_respects_night() {
    assert_eq!(
        condition_icon(ConditionCategory::Sunny, IconMode::Ascii, false),
        "SUN"
    );
    assert_eq!(
        condition_icon(ConditionCategory::Sunny, IconMode::Ascii, true),
        "MON"
    );
    assert_eq!(
        condition_icon(ConditionCategory::Stormy, IconMode::Unicode, true),
        "⚡"
    );
}

#[test]
fn celsius_conversion_rounding() {
    assert_eq!(round_temp(convert_temp(32.0, Units::Celsius)), 0);
    assert_eq!(round_temp(convert_temp(68.0, Units::Celsius)), 20);
    assert_eq!(round_temp(convert_temp(95.0, Units::Fahrenheit)), 95);
}

#[test]
fn local_time_accepts_unpadded_hours() {
    let parsed = parse_local_time("2024-06-03 9:05").expect("unpadded hour");
    assert_eq!((parsed.hour(), parsed.minute()), (9, 5));
    let parsed = parse_local_time("2024-06-03 21:40").expect("padded hour");
    assert_eq!(parsed.hour(), 21);
    assert!(parse_local_time("yesterday").is_none());
}

#[test]
fn noon_on_sets_civil_noon() {
    let date = parse_date("2024-06-03").expect("date");
    let noon = noon_on(date);
    assert_eq!((noon.hour(), noon.minute()), (12, 0));
    assert_eq!(noon.date(), date);
}

proptest! {
    #[test]
    fn storm_or_thunder_always_classifies_stormy(
        prefix in "[a-zA-Z ]{0,12}",
        suffix in "[a-zA-Z ]{0,12}",
        keyword in prop::sample::select(vec!["storm", "Storm", "THUNDER", "thunder", "sToRm"]),
    ) {
        let text = format!("{prefix}{keyword}{suffix}");
        prop_assert_eq!(classify_condition(&text), ConditionCategory::Stormy);
    }

    #[test]
    fn classifier_is_total(text in ".*") {
        let category = classify_condition(&text);
        prop_assert!(ConditionCategory::ALL.contains(&category));
    }
}
