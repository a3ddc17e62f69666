use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReflowError::attribute("x")
            .to_string()
            .contains("attribute resolution error:")
    );
    assert!(
        ReflowError::handler("x")
            .to_string()
            .contains("handler error:")
    );
    assert!(
        ReflowError::degenerate("x")
            .to_string()
            .contains("degenerate layout:")
    );
    assert!(
        ReflowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReflowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
