use jpeg_metadata::metadata::jpeg::comment::TAG_COMMENT;
use jpeg_metadata::metadata::jpeg::directory::{
    self as jpeg_tags, TAG_COMPONENT_DATA_1, TAG_COMPONENT_DATA_2, TAG_COMPONENT_DATA_3,
    TAG_COMPONENT_DATA_4, TAG_COMPRESSION_TYPE, TAG_DATA_PRECISION, TAG_IMAGE_HEIGHT,
    TAG_IMAGE_WIDTH, TAG_NUMBER_OF_COMPONENTS,
};
use jpeg_metadata::{Directory, DirectoryKind, JpegComponent, MetadataError, TagValue};

fn jpeg_directory() -> Directory {
    Directory::new(DirectoryKind::Jpeg)
}

#[test]
fn unset_tags_are_not_present() {
    let directory = jpeg_directory();
    for tag in [-3, 0, 1, 123, 9999] {
        assert!(!directory.has_tag(tag));
        assert!(matches!(
            directory.get_int(tag),
            Err(MetadataError::TagNotPresent { directory: "Jpeg", tag: t }) if t == tag
        ));
        assert!(matches!(
            directory.get_string(tag),
            Err(MetadataError::TagNotPresent { .. })
        ));
        assert!(matches!(
            directory.get::<JpegComponent>(tag),
            Err(MetadataError::TagNotPresent { .. })
        ));
    }
}

#[test]
fn set_and_get_value() {
    let mut directory = jpeg_directory();
    directory.set_value(123, 8);
    assert_eq!(directory.get_int(123).unwrap(), 8);
    assert_eq!(directory.get::<i32>(123).unwrap(), 8);
    assert!(directory.has_tag(123));

    directory.set_value(124, "text");
    assert_eq!(directory.get_string(124).unwrap(), "text");

    directory.set_value(125, vec![1u8, 2, 3]);
    assert_eq!(directory.get_bytes(125).unwrap(), vec![1, 2, 3]);

    directory.set_value(126, vec![-1i64, 0, 1]);
    assert_eq!(directory.get::<Vec<i64>>(126).unwrap(), vec![-1, 0, 1]);
    assert_eq!(directory.tag_count(), 4);
}

#[test]
fn last_write_wins() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_IMAGE_WIDTH, 100);
    directory.set_value(TAG_IMAGE_WIDTH, 200);
    assert_eq!(directory.get_int(TAG_IMAGE_WIDTH).unwrap(), 200);

    directory.set_value(TAG_IMAGE_WIDTH, "wide");
    assert_eq!(directory.value(TAG_IMAGE_WIDTH), Some(&TagValue::Text("wide".into())));
    assert_eq!(directory.tag_count(), 1);
}

#[test]
fn numeric_coercion_parses_decimal_text() {
    let mut directory = jpeg_directory();
    directory.set_value(1, " 640 ");
    assert_eq!(directory.get_int(1).unwrap(), 640);
    assert_eq!(directory.get::<u32>(1).unwrap(), 640);

    directory.set_value(2, "abc");
    match directory.get_int(2) {
        Err(MetadataError::TypeCoercion { tag, expected, .. }) => {
            assert_eq!(tag, 2);
            assert_eq!(expected, "integer");
        }
        other => panic!("expected coercion error, got {:?}", other),
    }

    directory.set_value(3, -1);
    assert!(matches!(
        directory.get::<u32>(3),
        Err(MetadataError::TypeCoercion { .. })
    ));
}

#[test]
fn incompatible_types_are_reported() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_COMPONENT_DATA_1, JpegComponent::new(1, 0x22, 0));
    assert!(matches!(
        directory.get_int(TAG_COMPONENT_DATA_1),
        Err(MetadataError::TypeCoercion { .. })
    ));
    assert!(matches!(
        directory.get_bytes(TAG_COMPONENT_DATA_1),
        Err(MetadataError::TypeCoercion { .. })
    ));

    directory.set_value(TAG_IMAGE_HEIGHT, 480);
    assert!(matches!(
        directory.get::<JpegComponent>(TAG_IMAGE_HEIGHT),
        Err(MetadataError::TypeCoercion { .. })
    ));
}

#[test]
fn string_accessor_uses_default_form() {
    let mut directory = jpeg_directory();
    directory.set_value(1, 42);
    directory.set_value(2, vec![10u8, 20]);
    directory.set_value(3, vec![7i64, -7]);
    assert_eq!(directory.get_string(1).unwrap(), "42");
    assert_eq!(directory.get_string(2).unwrap(), "10 20");
    assert_eq!(directory.get_string(3).unwrap(), "7 -7");
}

#[test]
fn get_component() {
    let mut directory = jpeg_directory();
    let components = [
        JpegComponent::new(1, 0x22, 0),
        JpegComponent::new(2, 0x11, 1),
        JpegComponent::new(3, 0x11, 1),
        JpegComponent::new(4, 0x11, 2),
    ];
    for (tag, component) in [
        TAG_COMPONENT_DATA_1,
        TAG_COMPONENT_DATA_2,
        TAG_COMPONENT_DATA_3,
        TAG_COMPONENT_DATA_4,
    ]
    .into_iter()
    .zip(components)
    {
        directory.set_value(tag, component);
    }

    // component indexes are zero-based
    for (index, expected) in components.iter().enumerate() {
        assert_eq!(jpeg_tags::component(&directory, index).as_ref(), Some(expected));
    }
    assert_eq!(jpeg_tags::component(&directory, 4), None);
}

#[test]
fn get_image_dimensions() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_IMAGE_WIDTH, 123);
    directory.set_value(TAG_IMAGE_HEIGHT, 456);
    directory.set_value(TAG_NUMBER_OF_COMPONENTS, 3);
    assert_eq!(jpeg_tags::image_width(&directory).unwrap(), 123);
    assert_eq!(jpeg_tags::image_height(&directory).unwrap(), 456);
    assert_eq!(jpeg_tags::number_of_components(&directory).unwrap(), 3);
    assert_eq!(directory.description(TAG_NUMBER_OF_COMPONENTS).unwrap().as_deref(), Some("3"));
}

#[test]
fn image_dimensions_not_added() {
    let mut directory = jpeg_directory();
    assert!(matches!(
        jpeg_tags::image_width(&directory),
        Err(MetadataError::TagNotPresent { tag: TAG_IMAGE_WIDTH, .. })
    ));
    assert!(matches!(
        jpeg_tags::number_of_components(&directory),
        Err(MetadataError::TagNotPresent { .. })
    ));

    directory.set_value(TAG_IMAGE_HEIGHT, -1);
    assert!(matches!(
        jpeg_tags::image_height(&directory),
        Err(MetadataError::TypeCoercion { .. })
    ));
}

#[test]
fn add_error_once_skips_repeated_messages() {
    let mut directory = jpeg_directory();
    assert!(directory.add_error_once("truncated"));
    assert!(!directory.add_error_once("truncated"));
    assert!(directory.add_error_once("other"));
    directory.add_error("truncated");
    assert_eq!(
        directory.errors().collect::<Vec<_>>(),
        vec!["truncated", "other", "truncated"]
    );
}

#[test]
fn component_not_added() {
    let directory = jpeg_directory();
    assert_eq!(jpeg_tags::component(&directory, 1), None);
}

#[test]
fn description_of_plain_integer_is_its_decimal_form() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_NUMBER_OF_COMPONENTS, 3);
    assert_eq!(directory.description(TAG_NUMBER_OF_COMPONENTS).unwrap().as_deref(), Some("3"));

    directory.set_value(123, 123);
    assert_eq!(directory.description(123).unwrap().as_deref(), Some("123"));
}

#[test]
fn description_of_unset_tag_is_absent() {
    let directory = jpeg_directory();
    assert_eq!(directory.description(TAG_IMAGE_WIDTH).unwrap(), None);
    assert_eq!(directory.description(TAG_COMPRESSION_TYPE).unwrap(), None);
    assert_eq!(directory.description(TAG_COMPONENT_DATA_1).unwrap(), None);
    assert_eq!(directory.description(777).unwrap(), None);
}

#[test]
fn jpeg_descriptions() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_IMAGE_WIDTH, 640);
    directory.set_value(TAG_IMAGE_HEIGHT, 480);
    directory.set_value(TAG_DATA_PRECISION, 8);
    directory.set_value(TAG_COMPRESSION_TYPE, 2);
    directory.set_value(TAG_COMPONENT_DATA_1, JpegComponent::new(1, 0x21, 0));
    directory.set_value(TAG_COMPONENT_DATA_2, JpegComponent::new(9, 0x11, 1));

    let describe = |tag| directory.description(tag).unwrap().unwrap();
    assert_eq!(describe(TAG_IMAGE_WIDTH), "640 pixels");
    assert_eq!(describe(TAG_IMAGE_HEIGHT), "480 pixels");
    assert_eq!(describe(TAG_DATA_PRECISION), "8 bits");
    assert_eq!(describe(TAG_COMPRESSION_TYPE), "Progressive, Huffman");
    assert_eq!(
        describe(TAG_COMPONENT_DATA_1),
        "Y component: Quantization table 0, Sampling factors 2 horiz/1 vert"
    );
    assert_eq!(
        describe(TAG_COMPONENT_DATA_2),
        "Unknown (9) component: Quantization table 1, Sampling factors 1 horiz/1 vert"
    );
}

#[test]
fn description_fails_for_unknown_enumerated_code() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_COMPRESSION_TYPE, 4);
    assert!(matches!(
        directory.description(TAG_COMPRESSION_TYPE),
        Err(MetadataError::Description { directory: "Jpeg", tag: TAG_COMPRESSION_TYPE, .. })
    ));

    directory.set_value(TAG_COMPRESSION_TYPE, "baseline");
    assert!(matches!(
        directory.description(TAG_COMPRESSION_TYPE),
        Err(MetadataError::Description { .. })
    ));
    // the raw value is still readable
    assert_eq!(directory.get_string(TAG_COMPRESSION_TYPE).unwrap(), "baseline");
}

#[test]
fn description_fails_for_malformed_component() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_COMPONENT_DATA_3, 17);
    assert!(matches!(
        directory.description(TAG_COMPONENT_DATA_3),
        Err(MetadataError::Description { .. })
    ));
}

#[test]
fn errors_accumulate_without_touching_tags() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_IMAGE_WIDTH, 64);
    assert!(!directory.has_errors());

    directory.add_error("component data truncated");
    assert_eq!(directory.get_int(TAG_IMAGE_WIDTH).unwrap(), 64);
    assert_eq!(directory.errors().count(), 1);
    assert_eq!(directory.error_count(), 1);

    directory.add_error("second problem");
    let errors = directory.errors();
    assert_eq!(
        errors.clone().collect::<Vec<_>>(),
        vec!["component data truncated", "second problem"]
    );
    // the sequence can be walked again
    assert_eq!(errors.count(), 2);
    assert_eq!(directory.errors().count(), 2);
}

#[test]
fn tags_iterate_in_ascending_order() {
    let mut directory = jpeg_directory();
    directory.set_value(TAG_IMAGE_WIDTH, 1);
    directory.set_value(TAG_COMPRESSION_TYPE, 0);
    directory.set_value(TAG_DATA_PRECISION, 8);
    let tags: Vec<i32> = directory.tags().map(|(tag, _)| tag).collect();
    assert_eq!(tags, vec![TAG_COMPRESSION_TYPE, TAG_DATA_PRECISION, TAG_IMAGE_WIDTH]);
}

#[test]
fn names() {
    let jpeg = jpeg_directory();
    assert_eq!(jpeg.name(), "Jpeg");
    assert_eq!(jpeg.kind(), DirectoryKind::Jpeg);
    assert_eq!(jpeg.tag_name(TAG_IMAGE_WIDTH), "Image Width");
    assert_eq!(jpeg.tag_name(TAG_COMPONENT_DATA_4), "Component 4");
    assert_eq!(jpeg.tag_name(0x100), "Unknown tag (0x0100)");

    let comment = Directory::new(DirectoryKind::JpegComment);
    assert_eq!(comment.name(), "JpegComment");
    assert_eq!(comment.tag_name(TAG_COMMENT), "Jpeg Comment");
}

#[test]
fn comment_description_echoes_text() {
    let mut directory = Directory::new(DirectoryKind::JpegComment);
    assert_eq!(directory.description(TAG_COMMENT).unwrap(), None);
    directory.set_value(TAG_COMMENT, "Shot on film");
    assert_eq!(
        directory.description(TAG_COMMENT).unwrap().as_deref(),
        Some("Shot on film")
    );
}
