//! Integration tests for version calculation.

use package_release::version::{BumpDirective, BumpType, calculate_next_version};

fn bump(current: &str, bump: &str) -> String {
    let directive = BumpDirective::Bump(bump.parse().unwrap());
    calculate_next_version(Some(current), &directive)
}

#[test]
fn test_positional_bumps_keep_lower_parts() {
    assert_eq!(bump("1.2.3", "major"), "2.2.3");
    assert_eq!(bump("1.2.3", "minor"), "1.3.3");
    assert_eq!(bump("1.2.3", "patch"), "1.2.4");
}

#[test]
fn test_explicit_version_wins_over_type() {
    let directive = BumpDirective::from_args(Some("5.0.0".to_string()), BumpType::Major);

    assert_eq!(calculate_next_version(Some("1.2.3"), &directive), "5.0.0");
}

#[test]
fn test_empty_explicit_version_falls_back_to_type() {
    let directive = BumpDirective::from_args(Some(String::new()), BumpType::Minor);

    assert_eq!(calculate_next_version(Some("1.2.3"), &directive), "1.3.3");
}

#[test]
fn test_prerelease_counter() {
    assert_eq!(bump("1.0.0-alpha.1", "alpha"), "1.0.0-alpha.2");
    assert_eq!(bump("1.0.0-alpha.3", "beta"), "1.0.0-beta.1");
    assert_eq!(bump("1.0.0", "rc"), "1.0.0-rc.1");
}

#[test]
fn test_missing_version_starts_from_zero() {
    let directive = BumpDirective::Bump(BumpType::Patch);

    assert_eq!(calculate_next_version(None, &directive), "0.0.1");
}

#[test]
fn test_cli_type_parsing() {
    assert_eq!("major".parse::<BumpType>().unwrap(), BumpType::Major);
    assert_eq!(
        "beta".parse::<BumpType>().unwrap(),
        BumpType::Prerelease("beta".to_string())
    );
    assert!("".parse::<BumpType>().is_err());
}
