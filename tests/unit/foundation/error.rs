use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphGridError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GlyphGridError::bounds("x").to_string().contains("bounds error:"));
    assert!(GlyphGridError::shape("x").to_string().contains("shape error:"));
    assert!(
        GlyphGridError::category("x")
            .to_string()
            .contains("category error:")
    );
    assert!(
        GlyphGridError::composition("x")
            .to_string()
            .contains("composition error:")
    );
    assert!(
        GlyphGridError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphGridError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
