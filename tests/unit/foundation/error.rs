use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TimelineError::usage("x")
            .to_string()
            .contains("usage error:")
    );
    assert!(
        TimelineError::consistency("x")
            .to_string()
            .contains("consistency error:")
    );
    assert!(
        TimelineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TimelineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TimelineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_usage());
}

#[test]
fn kind_predicates_match_variants() {
    assert!(TimelineError::usage("x").is_usage());
    assert!(TimelineError::consistency("x").is_consistency());
    assert!(!TimelineError::validation("x").is_consistency());
}
