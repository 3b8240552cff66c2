use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RaylightError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RaylightError::catalog("x")
            .to_string()
            .contains("catalog error:")
    );
    assert!(
        RaylightError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(RaylightError::host("x").to_string().contains("host error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RaylightError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: RaylightError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, RaylightError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));
}
