//! End-to-end tests for accounts, credentials and identity read-repair

mod common;

use common::*;
use syncup_core::user::{Account, AccountRole, CredentialHasher, UserStore};

#[test]
fn test_demo_accounts_authenticate() {
    let env = TestEnv::seeded();
    let admin = env.state.authenticate(ADMIN, ADMIN_PASS).unwrap().unwrap();
    assert_eq!(admin.role, AccountRole::Admin);

    for handle in [JUAN, MARIA, CARLOS, ANA] {
        let account = env.state.authenticate(handle, DEMO_PASS).unwrap();
        assert_eq!(account.map(|a| a.handle), Some(handle.to_string()));
    }

    assert!(env.state.authenticate(JUAN, "wrong").unwrap().is_none());
    assert!(env.state.authenticate("ghost", DEMO_PASS).unwrap().is_none());
}

#[test]
fn test_register_account() {
    let env = TestEnv::seeded();
    let account = env
        .state
        .register_account("  lucia ", "Lucía Torres", "s3cret")
        .unwrap();
    assert_eq!(account.handle, "lucia");
    assert!(account.id > 0);
    assert!(account.has_credentials());

    assert!(env.state.authenticate("lucia", "s3cret").unwrap().is_some());
    assert!(env
        .user_store
        .find_account_by_handle("lucia")
        .unwrap()
        .is_some());

    assert!(env.state.register_account("lucia", "Again", "x").is_err());
    assert!(env.state.register_account("   ", "Blank", "x").is_err());
}

#[test]
fn test_read_repair_of_incomplete_entry() {
    let env = TestEnv::seeded();
    let hash = CredentialHasher::Sha256.hash_new("pablo-pass").unwrap();
    env.user_store
        .save_account(Account::new("pablo", "Pablo Ruiz").with_credential_hash(hash))
        .unwrap();

    // Indexed without credentials, as a partial load would leave it.
    env.state.identities.update(Account::new("pablo", "Pablo Ruiz"));
    assert!(!env.state.identities.peek("pablo").unwrap().has_credentials());
    assert_eq!(env.state.identities.incomplete_handles(), vec!["pablo"]);

    let repaired = env.state.account("pablo").unwrap();
    assert!(repaired.has_credentials());
    assert!(env.state.identities.peek("pablo").unwrap().has_credentials());
    assert!(env.state.identities.incomplete_handles().is_empty());
    assert!(env.state.authenticate("pablo", "pablo-pass").unwrap().is_some());
}

#[test]
fn test_unrepairable_entry_is_kept() {
    let env = TestEnv::seeded();
    env.state.identities.update(Account::new("drifter", "Drifter"));

    let account = env.state.account("drifter").unwrap();
    assert!(!account.has_credentials());
    assert!(env.state.authenticate("drifter", "").unwrap().is_none());
    assert_eq!(env.state.identities.incomplete_handles(), vec!["drifter"]);
}

#[test]
fn test_reconcile_all_repairs_what_it_can() {
    let env = TestEnv::seeded();
    let hash = CredentialHasher::Sha256.hash_new("pw").unwrap();
    env.user_store
        .save_account(Account::new("fixable", "Fixable").with_credential_hash(hash))
        .unwrap();
    env.state.identities.update(Account::new("fixable", "Fixable"));
    env.state.identities.update(Account::new("orphan", "Orphan"));

    assert_eq!(env.state.identities.reconcile_all(), 1);
    assert_eq!(env.state.identities.incomplete_handles(), vec!["orphan"]);
}

#[test]
fn test_unknown_handles() {
    let env = TestEnv::seeded();
    assert!(env.state.account("ghost").is_none());
    assert!(env.state.account("").is_none());
    assert!(env.state.identities.peek("ghost").is_none());
}

#[test]
fn test_update_account_profile() {
    let env = TestEnv::seeded();
    let updated = env
        .state
        .update_account(MARIA, Some("María G."), None)
        .unwrap();
    assert_eq!(updated.display_name, "María G.");
    assert_eq!(
        env.user_store
            .find_account_by_handle(MARIA)
            .unwrap()
            .map(|a| a.display_name),
        Some("María G.".to_string())
    );
    // Password untouched.
    assert!(env.state.authenticate(MARIA, DEMO_PASS).unwrap().is_some());

    env.state
        .update_account(MARIA, None, Some("changed"))
        .unwrap();
    assert!(env.state.authenticate(MARIA, DEMO_PASS).unwrap().is_none());
    assert!(env.state.authenticate(MARIA, "changed").unwrap().is_some());
    assert!(env.state.identities.peek(MARIA).unwrap().has_credentials());
}

#[test]
fn test_delete_account() {
    let env = TestEnv::seeded();
    assert!(env.state.delete_account(JUAN).unwrap());

    assert!(env.state.account(JUAN).is_none());
    assert!(env.user_store.find_account_by_handle(JUAN).unwrap().is_none());
    assert!(env.state.authenticate(JUAN, DEMO_PASS).unwrap().is_none());
    assert!(env.state.favorites_of(JUAN).is_empty());
    assert!(!env.state.delete_account(JUAN).unwrap());
    assert!(env.state.update_account(JUAN, Some("Juan"), None).is_err());

    // The handle is free again.
    env.state.register_account(JUAN, "Juan Nuevo", "pw").unwrap();
    assert!(env.state.favorites_of(JUAN).is_empty());
    assert!(env.state.following(JUAN).is_empty());
}

#[test]
fn test_search_accounts() {
    let env = TestEnv::seeded();
    let handles = |query: &str| -> Vec<String> {
        env.state
            .search_accounts(query)
            .into_iter()
            .map(|a| a.handle)
            .collect()
    };
    assert_eq!(handles("an"), vec![ANA, JUAN]);
    assert_eq!(handles("LÓPEZ"), vec![CARLOS]);
    assert_eq!(handles(" adm "), vec![ADMIN]);
    assert!(handles("").is_empty());
    assert!(handles("zzz").is_empty());
}
