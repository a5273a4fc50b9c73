/// Tests for GlVersion validation

use super::*;

#[test]
fn test_every_release_is_accepted() {
    let releases = [
        110, 120, 121, 130, 140, 150, 200, 210, 300, 310, 320, 330, 400, 410, 420, 430, 440, 450, 460,
    ];
    for v in releases {
        let version = GlVersion::parse(v).unwrap_or_else(|e| panic!("{} rejected: {}", v, e));
        assert_eq!(version.raw(), v);
    }
}

#[test]
fn test_malformed_encoding() {
    assert_eq!(GlVersion::parse(455).unwrap_err().kind(), ErrorKind::GlInvalidVersion);
    assert_eq!(GlVersion::parse(4).unwrap_err().kind(), ErrorKind::GlInvalidVersion);
}

#[test]
fn test_zero_is_null() {
    assert_eq!(GlVersion::parse(0).unwrap_err().kind(), ErrorKind::NullReceived);
}

#[test]
fn test_bounds() {
    assert_eq!(GlVersion::parse(470).unwrap_err().kind(), ErrorKind::GlAboveMax);
    assert_eq!(GlVersion::parse(1000).unwrap_err().kind(), ErrorKind::GlAboveMax);
    assert_eq!(GlVersion::parse(100).unwrap_err().kind(), ErrorKind::GlBelowMin);
    assert_eq!(GlVersion::parse(10).unwrap_err().kind(), ErrorKind::GlBelowMin);
}

#[test]
fn test_gaps_between_releases() {
    for v in [160, 190, 220, 290, 340, 390] {
        assert_eq!(GlVersion::parse(v).unwrap_err().kind(), ErrorKind::GlInvalidVersion, "{}", v);
    }
}

#[test]
fn test_components_and_display() {
    let v = GlVersion::parse(430).unwrap();
    assert_eq!(v.major(), 4);
    assert_eq!(v.minor(), 3);
    assert_eq!(v.to_string(), "4.3");
    assert_eq!(GlVersion::parse(121).unwrap().to_string(), "1.2.1");
}

#[test]
fn test_feature_gates() {
    assert!(GlVersion::parse(450).unwrap().has_dsa());
    assert!(!GlVersion::parse(440).unwrap().has_dsa());
    assert!(GlVersion::parse(430).unwrap().has_debug_output());
    assert!(!GlVersion::parse(420).unwrap().has_debug_output());
}

#[test]
fn test_ordering() {
    assert!(GlVersion::MIN < GlVersion::MAX);
    assert!(GlVersion::parse(330).unwrap() < GlVersion::parse(400).unwrap());
}
