use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TexelaError::allocation("x")
            .to_string()
            .contains("allocation failed:")
    );
    assert!(TexelaError::lock("x").to_string().contains("lock failed:"));
    assert!(
        TexelaError::unsupported_frame("x")
            .to_string()
            .contains("unsupported frame kind:")
    );
    assert!(
        TexelaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TexelaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
