use schoolhouse::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_non_plaintext() {
    let hash = hash_password("password123").unwrap();

    assert_ne!(hash, "password123");
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_password_accepts_correct_password() {
    let hash = hash_password("password123").unwrap();

    assert!(verify_password("password123", &hash).unwrap());
}

#[test]
fn test_verify_password_rejects_wrong_password() {
    let hash = hash_password("password123").unwrap();

    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("password123").unwrap();
    let second = hash_password("password123").unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_verify_password_with_garbage_hash_errors() {
    assert!(verify_password("password123", "not-a-bcrypt-hash").is_err());
}
