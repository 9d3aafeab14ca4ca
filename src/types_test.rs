use super::*;
use time::macros::datetime;

// =============================================================
// Role
// =============================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
}

#[test]
fn role_parse_accepts_wire_names_only() {
    assert_eq!(Role::parse("admin"), Some(Role::Admin));
    assert_eq!(Role::parse(" customer "), Some(Role::Customer));
    assert_eq!(Role::parse("Admin"), None);
    assert_eq!(Role::parse("staff"), None);
}

// =============================================================
// UserRecord
// =============================================================

#[test]
fn user_record_loads_page_written_json() {
    let raw = r#"{
        "id": "1717000000000",
        "fullName": "Budi Santoso",
        "email": "budi@example.com",
        "phone": "081234567890",
        "password": "YnVkaTEyMw==",
        "userType": "customer",
        "createdAt": "2024-05-29T16:26:40.000Z",
        "isActive": true
    }"#;
    let user: UserRecord = serde_json::from_str(raw).unwrap();
    assert_eq!(user.full_name, "Budi Santoso");
    assert_eq!(user.role, Role::Customer);
    assert_eq!(user.password_digest, "YnVkaTEyMw==");
    assert_eq!(user.created_at, datetime!(2024-05-29 16:26:40 UTC));
    assert_eq!(user.last_login, None);
    assert!(user.is_active);
}

#[test]
fn user_record_writes_camel_case_keys() {
    let user = UserRecord {
        id: "u1".to_owned(),
        full_name: "Admin".to_owned(),
        email: "a@b.com".to_owned(),
        phone: "0800".to_owned(),
        password_digest: "digest".to_owned(),
        role: Role::Admin,
        created_at: datetime!(2024-01-01 00:00:00 UTC),
        last_login: Some(datetime!(2024-01-02 08:30:00 UTC)),
        is_active: true,
    };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["fullName"], "Admin");
    assert_eq!(value["userType"], "admin");
    assert_eq!(value["password"], "digest");
    assert_eq!(value["isActive"], true);
    assert_eq!(value["lastLogin"], "2024-01-02T08:30:00Z");
}

#[test]
fn user_record_omits_missing_last_login() {
    let user = UserRecord {
        id: "u2".to_owned(),
        full_name: "C".to_owned(),
        email: "c@d.com".to_owned(),
        phone: String::new(),
        password_digest: String::new(),
        role: Role::Customer,
        created_at: datetime!(2024-01-01 00:00:00 UTC),
        last_login: None,
        is_active: false,
    };
    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("lastLogin").is_none());
}

// =============================================================
// RegisterInput
// =============================================================

#[test]
fn register_input_reads_form_payload() {
    let raw = r#"{"fullName":"X","email":"x@y.com","phone":"0811","password":"pw","userType":"admin"}"#;
    let input: RegisterInput = serde_json::from_str(raw).unwrap();
    assert_eq!(input.role, Role::Admin);
    assert_eq!(input.password, "pw");
}

#[test]
fn register_input_rejects_unknown_role() {
    let raw = r#"{"fullName":"X","email":"x@y.com","phone":"0811","password":"pw","userType":"root"}"#;
    assert!(serde_json::from_str::<RegisterInput>(raw).is_err());
}
