//! Tests for the user account model.

use super::*;
use crate::domain::patch::{PatchPayload, merge};
use crate::domain::validation::validate;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn stored_user() -> User {
    User::new(
        "gardener@mail.com",
        PasswordHash::from_phc("$argon2id$v=19$stub"),
        19000,
        RoleSet::standard(),
    )
    .with_id(UserId::new(4))
}

fn codes(user: &User, mode: ValidationMode) -> Vec<(String, ViolationCode)> {
    validate(user, mode)
        .into_iter()
        .map(|v| (v.field().to_owned(), v.code()))
        .collect()
}

#[rstest]
fn stored_user_is_valid(stored_user: User) {
    assert!(codes(&stored_user, ValidationMode::Update).is_empty());
}

#[rstest]
fn draft_reports_every_required_field() {
    assert_eq!(
        codes(&User::draft(), ValidationMode::Create),
        vec![
            ("email".to_owned(), ViolationCode::Required),
            ("password".to_owned(), ViolationCode::Required),
            ("postalCode".to_owned(), ViolationCode::Required),
        ]
    );
}

#[rstest]
#[case("not-an-email")]
#[case("two@@mail.com")]
#[case("spaces in@mail.com")]
#[case("missing@tld")]
fn rejects_malformed_email(mut stored_user: User, #[case] email: &str) {
    let payload = PatchPayload::try_from(json!({ "email": email })).expect("object");
    merge(&mut stored_user, &payload).expect("string email");
    assert_eq!(
        codes(&stored_user, ValidationMode::Update),
        vec![("email".to_owned(), ViolationCode::InvalidFormat)]
    );
}

#[rstest]
fn negative_postal_code_is_invalid(mut stored_user: User) {
    let payload = PatchPayload::try_from(json!({ "postalCode": -1 })).expect("object");
    merge(&mut stored_user, &payload).expect("integer");
    assert_eq!(
        codes(&stored_user, ValidationMode::Update),
        vec![("postalCode".to_owned(), ViolationCode::InvalidFormat)]
    );
}

#[rstest]
fn non_empty_password_yields_pending_secret(mut stored_user: User) {
    let payload = PatchPayload::try_from(json!({ "password": "s3cret" })).expect("object");
    let outcome = merge(&mut stored_user, &payload).expect("string password");
    assert_eq!(outcome.touched, 1);
    let secret = outcome.secret.expect("secret pending");
    assert_eq!(secret.expose(), "s3cret");
}

#[rstest]
#[case(json!(""))]
#[case(json!(null))]
fn empty_password_is_a_no_op(mut stored_user: User, #[case] value: Value) {
    let before = stored_user.password_hash().cloned();
    let payload = PatchPayload::try_from(json!({ "password": value })).expect("object");
    let outcome = merge(&mut stored_user, &payload).expect("well typed");
    assert_eq!(outcome.touched, 0);
    assert!(outcome.secret.is_none());
    assert_eq!(stored_user.password_hash().cloned(), before);
}

#[rstest]
fn roles_key_is_not_a_patchable_field(mut stored_user: User) {
    let payload = PatchPayload::try_from(json!({ "roles": ["ROLE_ADMIN"] })).expect("object");
    let outcome = merge(&mut stored_user, &payload).expect("ignored key");
    assert_eq!(outcome.touched, 0);
    assert_eq!(stored_user.roles(), &RoleSet::standard());
}

#[rstest]
fn apply_credential_replaces_hash(mut stored_user: User) {
    stored_user.apply_credential(PasswordHash::from_phc("$argon2id$v=19$fresh"));
    assert_eq!(
        stored_user.password_hash().map(PasswordHash::as_str),
        Some("$argon2id$v=19$fresh")
    );
}

#[rstest]
fn view_omits_the_credential(stored_user: User) {
    let value = serde_json::to_value(UserView::from(&stored_user)).expect("serialise");
    assert_eq!(
        value,
        json!({
            "id": 4,
            "email": "gardener@mail.com",
            "postalCode": 19000,
            "roles": ["ROLE_USER"],
        })
    );
}

#[rstest]
fn debug_output_redacts_hash(stored_user: User) {
    assert!(!format!("{stored_user:?}").contains("argon2id"));
}

#[rstest]
#[case("ROLE_USER", Role::User)]
#[case("ROLE_ADMIN", Role::Admin)]
fn role_tokens_round_trip(#[case] token: &str, #[case] role: Role) {
    assert_eq!(token.parse::<Role>(), Ok(role));
    assert_eq!(role.to_string(), token);
}

#[rstest]
fn unknown_role_tokens_are_rejected() {
    assert_eq!(
        "ROLE_ROOT".parse::<Role>(),
        Err(UnknownRole("ROLE_ROOT".to_owned()))
    );
}
