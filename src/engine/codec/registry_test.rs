use super::registry::{CODEC_REGISTRY, CodecRegistry};
use crate::engine::types::ColumnType;

#[test]
fn registry_covers_every_tag() {
    let registry = CodecRegistry::new();
    assert_eq!(registry.len(), ColumnType::ALL.len());
    for ty in ColumnType::ALL {
        let codec = registry.lookup(ty.tag()).expect("codec registered");
        assert_eq!(codec.column_type(), ty);
        assert_eq!(registry.codec_for(ty).column_type(), ty);
    }
}

#[test]
fn unknown_tags_have_no_codec() {
    assert!(CODEC_REGISTRY.lookup(6).is_none());
    assert!(CODEC_REGISTRY.lookup(u8::MAX).is_none());
}
