//! Tests for score types.

use super::*;

#[test]
fn test_lexicographic_ordering() {
    let hard_violation = HardMediumSoftScore::of(-1, 0, 1_000);
    let medium_violation = HardMediumSoftScore::of(0, -50, 0);
    let soft_only = HardMediumSoftScore::of(0, 0, -1_000);

    assert!(medium_violation > hard_violation);
    assert!(soft_only > medium_violation);
    assert!(HardMediumSoftScore::of(0, -1, 5) > HardMediumSoftScore::of(0, -1, 4));
}

#[test]
fn test_feasibility() {
    assert!(HardMediumSoftScore::ZERO.is_feasible());
    assert!(HardMediumSoftScore::of(0, -10, -30).is_feasible());
    assert!(!HardMediumSoftScore::of(-1, 0, 0).is_feasible());
}

#[test]
fn test_arithmetic() {
    let a = HardMediumSoftScore::of(-1, -2, 3);
    let b = HardMediumSoftScore::of(0, 1, -5);

    assert_eq!(a + b, HardMediumSoftScore::of(-1, -1, -2));
    assert_eq!(a - b, HardMediumSoftScore::of(-1, -3, 8));
    assert_eq!(-a, HardMediumSoftScore::of(1, 2, -3));
    assert_eq!(a.times(3), HardMediumSoftScore::of(-3, -6, 9));

    let mut total = HardMediumSoftScore::ZERO;
    total += a;
    total += a;
    assert_eq!(total, HardMediumSoftScore::of(-2, -4, 6));
    assert_eq!([a, b].into_iter().sum::<HardMediumSoftScore>(), a + b);
}

#[test]
fn test_levels() {
    let score = HardMediumSoftScore::of(-4, -2, 7);
    assert_eq!(score.to_level_numbers(), vec![-4, -2, 7]);
    assert_eq!(score.level_number(ScoreLevel::Medium), -2);
    assert_eq!(
        HardMediumSoftScore::of_level(ScoreLevel::Soft, -20),
        HardMediumSoftScore::of_soft(-20)
    );
    assert_eq!(HardMediumSoftScore::levels_count(), 3);
}

#[test]
fn test_display_and_parse() {
    let score = HardMediumSoftScore::of(-2, 0, -41);
    assert_eq!(score.to_string(), "-2hard/0medium/-41soft");
    assert_eq!(HardMediumSoftScore::parse("-2hard/0medium/-41soft"), Ok(score));
    assert_eq!(format!("{:?}", score), "HardMediumSoftScore(-2, 0, -41)");
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        HardMediumSoftScore::parse("0hard/0soft"),
        Err(ScoreParseError::MissingLevel { level: "medium", .. })
    ));
    assert!(matches!(
        HardMediumSoftScore::parse("xhard/0medium/0soft"),
        Err(ScoreParseError::InvalidNumber { level: "hard", .. })
    ));
    assert!(matches!(
        HardMediumSoftScore::parse("0hard/0medium/0soft/1extra"),
        Err(ScoreParseError::TrailingInput(_))
    ));
}
