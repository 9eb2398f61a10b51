use exact_parse::{
    DescriptionIndex, EnumError, EnumLike, all_values, description_of, enum_value_by_description,
    parse_or_default,
};
use pretty_assertions::assert_eq;

exact_parse::enum_like! {
    /// Paint colors with display labels.
    pub enum Paint {
        Red => "Red",
        Green => "Green",
        Blue => "Blue",
    }
}

exact_parse::enum_like! {
    pub enum Priority {
        Low => "Can wait",
        Normal,
        High => "Urgent",
    }
}

#[test]
fn resolves_constant_by_description() {
    assert_eq!(enum_value_by_description::<Paint>("Green"), Ok(Paint::Green));
    assert_eq!(enum_value_by_description::<Priority>("Urgent"), Ok(Priority::High));
}

#[test]
fn unknown_description_is_an_explicit_error() {
    assert_eq!(
        enum_value_by_description::<Paint>("Purple"),
        Err(EnumError::NotFound {
            type_name: std::any::type_name::<Paint>(),
            description: "Purple".to_owned(),
        })
    );
}

#[test]
fn parse_or_default_is_case_insensitive_with_fallback() {
    assert_eq!(parse_or_default("green", Paint::Blue), Ok(Paint::Green));
    assert_eq!(parse_or_default("purple", Paint::Blue), Ok(Paint::Blue));
}

#[test]
fn all_values_is_stable_and_restartable() {
    let first: Vec<Paint> = all_values::<Paint>().unwrap().collect();
    let second: Vec<Paint> = all_values::<Paint>().unwrap().collect();
    assert_eq!(first, vec![Paint::Red, Paint::Green, Paint::Blue]);
    assert_eq!(first, second);
    assert_eq!(first.as_slice(), Paint::VARIANTS);
}

#[test]
fn descriptions_read_back() {
    let labels: Vec<&str> = all_values::<Priority>()
        .unwrap()
        .map(|p| description_of(Some(p)))
        .collect();
    assert_eq!(labels, vec!["Can wait", "", "Urgent"]);
    assert_eq!(description_of::<Priority>(None), "");
}

#[test]
fn index_skips_untagged_constants() {
    let index = DescriptionIndex::<Priority>::build().unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("Can wait"), Some(Priority::Low));
    assert_eq!(index.get(""), None);
}

#[test]
fn generated_names_round_trip_through_display() {
    for value in all_values::<Priority>().unwrap() {
        assert_eq!(value.to_string().parse::<Priority>(), Ok(value));
    }
}
