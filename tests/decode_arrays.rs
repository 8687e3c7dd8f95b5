use jsonbind::{
    floats_from_str, integers_from_str, object_from_str, strings_from_str, ArrayElement,
    Decoder, ErrorKind, FieldSpec, Kind,
};
use rstest::rstest;

#[rstest]
fn decodes_a_flat_integer_array() {
    let items = integers_from_str("[1,2,3]").unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[rstest]
fn first_element_allocates_ten_slots() {
    let items = integers_from_str("[1,2,3]").unwrap();
    assert_eq!(items.capacity(), 10);
}

#[rstest]
fn empty_array_allocates_nothing() {
    let items = integers_from_str("[]").unwrap();
    assert!(items.is_empty());
    assert_eq!(items.capacity(), 0);
}

#[rstest]
fn eleventh_element_doubles_capacity() {
    let mut readings: Vec<i32> = Vec::new();
    let mut fields = [FieldSpec::array("readings", &mut readings)];
    object_from_str(
        "{\"readings\":[1,2,3,4,5,6,7,8,9,10,11]}",
        &mut fields,
    )
    .unwrap();
    drop(fields);
    assert_eq!(readings.len(), 11);
    assert_eq!(readings.capacity(), 20);
    assert_eq!(readings[10], 11);
}

#[rstest]
fn decodes_floats_and_admits_integer_shaped_elements() {
    let items = floats_from_str("[1.5,2,0.25]").unwrap();
    assert_eq!(items, vec![1.5, 2.0, 0.25]);
}

#[rstest]
fn decodes_strings_with_escapes() {
    let items = strings_from_str(r#"["a\tb","c\\d",""]"#).unwrap();
    assert_eq!(items, vec!["a\tb".to_string(), "c\\d".into(), "".into()]);
}

#[rstest]
fn decodes_booleans() {
    let items: Vec<bool> = Decoder::new("[true,false,true]").parse_array().unwrap();
    assert_eq!(items, vec![true, false, true]);
}

#[rstest]
fn decodes_nested_arrays() {
    let items: Vec<Vec<i32>> = Decoder::new("[[1,2],[3],[]]").parse_array().unwrap();
    assert_eq!(items, vec![vec![1, 2], vec![3], vec![]]);
}

#[derive(Debug, Default, PartialEq)]
struct Span {
    start: i32,
    end: i32,
}

impl ArrayElement for Span {
    const KINDS: Kind = Kind::OBJECT;

    fn decode(decoder: &mut Decoder<'_>) -> jsonbind::Result<Self> {
        let mut span = Span::default();
        let mut fields = [
            FieldSpec::integer("start", &mut span.start),
            FieldSpec::integer("end", &mut span.end),
        ];
        decoder.parse_object(&mut fields)?;
        drop(fields);
        Ok(span)
    }
}

#[rstest]
fn decodes_arrays_of_objects_through_a_custom_element() {
    let spans: Vec<Span> = Decoder::new(r#"[{"start":0,"end":4},{"start":5,"end":9}]"#)
        .parse_array()
        .unwrap();
    assert_eq!(
        spans,
        vec![Span { start: 0, end: 4 }, Span { start: 5, end: 9 }]
    );
}

#[rstest]
fn negative_and_zero_elements_round_cleanly() {
    let items = integers_from_str("[-7,0,-0]").unwrap();
    assert_eq!(items, vec![-7, 0, 0]);
}

#[rstest]
fn whitespace_between_tokens_is_ignored() {
    let items = integers_from_str("[ 1 ,\n\t2 , 3 ]").unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[rstest]
fn mixed_kind_element_is_semantic() {
    let err = integers_from_str(r#"[1,"x"]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err.message.contains("type mismatch"));
}

#[rstest]
fn fractional_element_in_an_integer_array_is_semantic() {
    let err = integers_from_str("[1.5]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert!(err.message.contains("found float where integer was expected"));
}

#[rstest]
fn null_element_is_semantic() {
    let err = integers_from_str("[1,null]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
}

#[rstest]
#[case("[1,2", "expected ','")]
#[case("[1,]", "unexpected end of array")]
#[case("[1 2]", "expected ','")]
#[case("1,2]", "missing opening '['")]
#[case("[@]", "invalid value")]
fn malformed_arrays_are_structural(#[case] input: &str, #[case] expected: &str) {
    let err = integers_from_str(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Structural, "input: {input}");
    assert!(err.message.contains(expected), "got: {}", err.message);
}

#[rstest]
fn root_array_rejects_trailing_data() {
    let err = integers_from_str("[1] x").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Structural);
    assert!(err.message.contains("expected end of input"));
}

#[rstest]
fn nullable_array_field_is_cleared_by_null() {
    let mut items = vec![9, 9, 9];
    let mut fields = [FieldSpec::array("items", &mut items).nullable()];
    object_from_str(r#"{"items":null}"#, &mut fields).unwrap();
    drop(fields);
    assert!(items.is_empty());
}

#[rstest]
fn array_field_binds_inside_an_object() {
    let mut tags: Vec<String> = Vec::new();
    let mut fields = [FieldSpec::array("tags", &mut tags)];
    object_from_str(r#"{"tags":["red","blue"]}"#, &mut fields).unwrap();
    drop(fields);
    assert_eq!(tags, vec!["red".to_string(), "blue".into()]);
}
