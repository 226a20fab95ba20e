use super::*;
use shared::domain::{Lifespan, Origin, Size};

fn boxer() -> Dog {
    Dog::new(
        "https://images.dog.ceo/breeds/boxer/n02108089_1.jpg",
        "boxer",
        Size::Large,
        Origin::UnitedStates,
        Lifespan::TenToTwelve,
    )
}

#[test]
fn empty_line_discovers() {
    assert_eq!(parse_command("   "), Ok(Command::Discover));
    assert_eq!(parse_command("D"), Ok(Command::Discover));
}

#[test]
fn ban_accepts_numbers_and_multi_word_values() {
    assert_eq!(
        parse_command("ban 3"),
        Ok(Command::Ban(Target::Index(3)))
    );
    assert_eq!(
        parse_command("ban   United States "),
        Ok(Command::Ban(Target::Value("United States".into())))
    );
}

#[test]
fn zero_is_treated_as_a_value() {
    assert_eq!(
        parse_command("unban 0"),
        Ok(Command::Unban(Target::Value("0".into())))
    );
}

#[test]
fn ban_without_target_is_an_error() {
    assert_eq!(
        parse_command("ban"),
        Err(CommandError::MissingTarget("ban"))
    );
}

#[test]
fn unknown_verb_is_reported() {
    assert_eq!(
        parse_command("fetch"),
        Err(CommandError::Unknown("fetch".into()))
    );
}

#[test]
fn chip_numbers_resolve_against_current_dog() {
    let dog = boxer();
    assert_eq!(
        resolve_ban_target(&Target::Index(1), Some(&dog)),
        Some("boxer".into())
    );
    assert_eq!(
        resolve_ban_target(&Target::Index(3), Some(&dog)),
        Some("United States".into())
    );
    assert_eq!(resolve_ban_target(&Target::Index(5), Some(&dog)), None);
    assert_eq!(resolve_ban_target(&Target::Index(1), None), None);
}

#[test]
fn typed_values_take_canonical_spelling_from_current_dog() {
    let dog = boxer();
    assert_eq!(
        resolve_ban_target(&Target::Value("united states".into()), Some(&dog)),
        Some("United States".into())
    );
    assert_eq!(
        resolve_ban_target(&Target::Value("Germany".into()), Some(&dog)),
        Some("Germany".into())
    );
}

#[test]
fn unban_targets_resolve_against_ban_list() {
    let banned = vec!["Large".to_string(), "Japan".to_string()];
    assert_eq!(
        resolve_unban_target(&Target::Index(2), &banned),
        Some("Japan".into())
    );
    assert_eq!(resolve_unban_target(&Target::Index(3), &banned), None);
    assert_eq!(
        resolve_unban_target(&Target::Value("large".into()), &banned),
        Some("Large".into())
    );
}

#[test]
fn typed_labels_are_canonical_even_when_not_on_screen() {
    let pug = Dog::new(
        "https://images.dog.ceo/breeds/pug/1.jpg",
        "pug",
        Size::Small,
        Origin::Germany,
        Lifespan::TwelveToFifteen,
    );
    assert_eq!(
        resolve_ban_target(&Target::Value("large".into()), Some(&pug)),
        Some("Large".into())
    );
    assert_eq!(
        resolve_ban_target(&Target::Value("15 - 18 YEARS".into()), None),
        Some("15 - 18 years".into())
    );
    assert_eq!(
        resolve_ban_target(&Target::Value("australia".into()), None),
        Some("Australia".into())
    );
}

#[test]
fn unknown_typed_values_are_kept_verbatim() {
    assert_eq!(
        resolve_ban_target(&Target::Value("hound-afghan".into()), None),
        Some("hound-afghan".into())
    );
}
