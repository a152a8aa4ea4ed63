//! Tests for `#[derive(Record)]` and `#[derive(Choice)]` output.

use mag::optics::{Choice, Optic, Record};
use rstest::rstest;

// =============================================================================
// Record
// =============================================================================

#[derive(Clone, Debug, PartialEq, Record)]
struct UserProfile {
    first_name: String,
    r#type: u8,
    is_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Record)]
struct Wrapper<T> {
    inner: T,
    label: &'static str,
}

mod nested {
    use mag::optics::Record;

    #[derive(Clone, Debug, PartialEq, Record)]
    pub struct Visible {
        pub shown: i32,
        pub hidden: i32,
    }
}

fn profile() -> UserProfile {
    UserProfile {
        first_name: "Ada".into(),
        r#type: 1,
        is_admin: false,
    }
}

#[rstest]
fn record_field_enum_uses_pascal_case() {
    assert_eq!(
        UserProfile::FIELDS,
        &[
            UserProfileField::FirstName,
            UserProfileField::Type,
            UserProfileField::IsAdmin
        ]
    );
}

#[rstest]
fn record_optics_strip_raw_prefix() {
    let kind = UserProfile::type_optic();
    assert_eq!(kind.get(&profile()), 1);
    assert_eq!(kind.put(profile(), 2).r#type, 2);
}

#[rstest]
fn record_select_and_merge() {
    let partial = profile().select(&[UserProfileField::IsAdmin]);
    assert_eq!(
        partial,
        UserProfilePartial {
            first_name: None,
            r#type: None,
            is_admin: Some(false),
        }
    );

    let promoted = profile().merge(UserProfilePartial {
        is_admin: Some(true),
        ..UserProfilePartial::default()
    });
    assert!(promoted.is_admin);
    assert_eq!(promoted.first_name, "Ada");
}

#[rstest]
fn record_into_partial_fills_every_field() {
    let partial = profile().into_partial();
    assert_eq!(partial.first_name.as_deref(), Some("Ada"));
    assert_eq!(partial.r#type, Some(1));
    assert_eq!(partial.is_admin, Some(false));
}

#[rstest]
fn record_supports_generics() {
    let wrapper = Wrapper {
        inner: vec![1, 2],
        label: "list",
    };
    let inner = Wrapper::<Vec<i32>>::inner_optic();

    assert_eq!(inner.get(&wrapper), vec![1, 2]);
    assert_eq!(inner.put(wrapper.clone(), vec![3]).inner, vec![3]);
    assert_eq!(
        wrapper.select(&[WrapperField::Label]),
        WrapperPartial {
            inner: None,
            label: Some("list"),
        }
    );
}

#[rstest]
fn record_companions_follow_struct_visibility() {
    let partial = nested::Visible { shown: 1, hidden: 2 }.select(&[nested::VisibleField::Shown]);
    assert_eq!(partial.shown, Some(1));
    assert_eq!(partial.hidden, None);
}

// =============================================================================
// Choice
// =============================================================================

#[derive(Clone, Debug, PartialEq, Choice)]
enum Event {
    KeyPress(char),
    Resize { width: u32, height: u32 },
    Focus { window: u8 },
    Quit,
}

#[rstest]
fn choice_case_names_use_snake_case() {
    assert_eq!(Event::key_press_case().tag(), "KeyPress");
    assert_eq!(Event::TAGS, &["KeyPress", "Resize", "Focus", "Quit"]);
}

#[rstest]
fn single_named_field_payload_is_the_field() {
    let focus = Event::focus_case();
    assert_eq!(focus.preview(&Event::Focus { window: 3 }), Some(3));
    assert_eq!(focus.review(4), Event::Focus { window: 4 });
}

#[rstest]
fn multiple_named_fields_payload_is_a_tuple() {
    let resize = Event::resize_case();
    assert_eq!(
        resize.preview(&Event::Resize {
            width: 10,
            height: 20
        }),
        Some((10, 20))
    );
    assert_eq!(resize.preview(&Event::Quit), None);
}

#[rstest]
#[case(Event::KeyPress('q'), "KeyPress")]
#[case(Event::Resize { width: 1, height: 1 }, "Resize")]
#[case(Event::Quit, "Quit")]
fn choice_tag_matches_variant(#[case] event: Event, #[case] expected: &str) {
    assert_eq!(event.tag(), expected);
}
