use fetch_types::FormDataBody;

#[test]
fn test_new_form_is_empty() {
    // Given a freshly constructed FormDataBody
    // When checked for emptiness
    // Then it reports empty
    let form = FormDataBody::new();
    assert!(form.is_empty());
    assert!(form.fields.is_empty());
    assert!(form.files.is_empty());
}

#[test]
fn test_append_field_preserves_order() {
    // Given a form with fields appended in sequence
    // When inspected
    // Then insertion order is preserved
    let mut form = FormDataBody::new();
    form.append_field("first", "1");
    form.append_field("second", "2");
    assert_eq!(
        form.fields,
        vec![
            ("first".to_string(), "1".to_string()),
            ("second".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn test_append_file_records_metadata() {
    // Given a file attached under a field name
    // When inspected
    // Then filename/content-type/bytes all round-trip
    let mut form = FormDataBody::new();
    form.append_file("upload", "report.txt", "text/plain", b"hello".to_vec());
    assert_eq!(form.files.len(), 1);
    let file = &form.files[0];
    assert_eq!(file.field_name, "upload");
    assert_eq!(file.filename, "report.txt");
    assert_eq!(file.content_type, "text/plain");
    assert_eq!(file.data, b"hello");
}

#[test]
fn test_form_with_only_files_is_not_empty() {
    let mut form = FormDataBody::new();
    form.append_file("upload", "a.bin", "application/octet-stream", vec![]);
    assert!(!form.is_empty());
}
