//! End-to-end flows across the auth services and the in-memory store.
//!
//! Covers: register → login → bearer validation, tenant provisioning under
//! concurrency, credential failure uniformity, and storage fault handling.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;

    use chrono::{Duration, Utc};

    use warden_auth::{
        AuthConfig, AuthError, AuthenticationService, CredentialCodec, RegistrationService,
        RoleAssignment, TokenService,
    };
    use warden_core::{
        Email, Permission, PermissionId, RepositoryError, RepositoryResult, Role, RoleId, Tenant,
        TenantId, TenantRepository, TenantStatus, User, UserId, UserProfile, UserRepository,
        UserStatus,
    };

    use crate::memory::InMemoryStore;

    const SECRET: &[u8] = b"integration-test-secret";

    fn config() -> AuthConfig {
        AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::new(SECRET)
        }
    }

    fn codec() -> Arc<CredentialCodec> {
        Arc::new(CredentialCodec::new(4).unwrap())
    }

    fn tokens(config: &AuthConfig) -> TokenService {
        TokenService::new(&config.signing_secret)
    }

    type Registration = RegistrationService<Arc<InMemoryStore>, Arc<InMemoryStore>>;
    type Authentication = AuthenticationService<Arc<InMemoryStore>>;

    struct Harness {
        store: Arc<InMemoryStore>,
        registration: Registration,
        auth: Authentication,
        roles: RoleAssignment<Arc<InMemoryStore>, Arc<InMemoryStore>>,
    }

    fn harness_with(config: AuthConfig) -> Harness {
        let store = Arc::new(InMemoryStore::new());
        let codec = codec();
        Harness {
            registration: RegistrationService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&codec),
                &config,
            ),
            auth: AuthenticationService::new(Arc::clone(&store), codec, tokens(&config)),
            roles: RoleAssignment::new(Arc::clone(&store), Arc::clone(&store)),
            store,
        }
    }

    fn harness() -> Harness {
        harness_with(config())
    }

    fn role(name: &str, codes: &[&str]) -> Role {
        Role {
            id: RoleId::new(),
            name: name.to_string(),
            description: format!("{name} role"),
            permissions: codes
                .iter()
                .map(|code| Permission {
                    id: PermissionId::new(),
                    code: code.to_string(),
                    name: code.to_string(),
                })
                .collect(),
        }
    }

    /// User repository wrapper with switchable faults.
    struct FlakyUsers {
        inner: Arc<InMemoryStore>,
        fail_lookup: AtomicBool,
        fail_update: AtomicBool,
    }

    impl FlakyUsers {
        fn new(inner: Arc<InMemoryStore>) -> Self {
            Self {
                inner,
                fail_lookup: AtomicBool::new(false),
                fail_update: AtomicBool::new(false),
            }
        }
    }

    impl UserRepository for FlakyUsers {
        fn find_by_email(&self, email: &Email) -> RepositoryResult<User> {
            if self.fail_lookup.load(Ordering::SeqCst) {
                return Err(RepositoryError::storage("connection reset"));
            }
            self.inner.find_by_email(email)
        }

        fn find_by_id(&self, id: UserId) -> RepositoryResult<UserProfile> {
            UserRepository::find_by_id(&*self.inner, id)
        }

        fn create(&self, user: &User) -> RepositoryResult<()> {
            UserRepository::create(&*self.inner, user)
        }

        fn update(&self, user: &User) -> RepositoryResult<()> {
            if self.fail_update.load(Ordering::SeqCst) {
                return Err(RepositoryError::storage("write timeout"));
            }
            self.inner.update(user)
        }
    }

    /// Tenant repository whose lookups always fail; counts create attempts.
    struct UnreachableTenants {
        creates: AtomicUsize,
    }

    impl TenantRepository for UnreachableTenants {
        fn find_by_domain(&self, _domain: &str) -> RepositoryResult<Tenant> {
            Err(RepositoryError::storage("tenant table unavailable"))
        }

        fn create(&self, _tenant: &Tenant) -> RepositoryResult<()> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn update_status(&self, _id: TenantId, _status: TenantStatus) -> RepositoryResult<()> {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Register → login → validate
    // ------------------------------------------------------------------

    #[test]
    fn first_registration_provisions_tenant_and_token_round_trips() {
        let h = harness();

        let user = h.registration.register("a@x.com", "pw123", "acme.com").unwrap();
        assert_eq!(h.store.tenant_count(), 1);

        let tenant = h.store.tenant(user.tenant_id).unwrap();
        assert_eq!(tenant.domain, "acme.com");
        assert_eq!(tenant.name, "acme.com");
        assert_eq!(tenant.status, TenantStatus::Provisioning);
        assert!(tenant.subscription_tier.is_empty());

        let login = h.auth.authenticate("a@x.com", "pw123").unwrap();
        assert_eq!(login.user.id, user.id);

        let claims = h.auth.tokens().decode_at(&login.token, Utc::now()).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.tenant_id, tenant.id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 86_400);

        // Provisioning tenants are not blocked.
        let profile = h.auth.validate_bearer(&login.token).unwrap();
        assert_eq!(profile.user.id, user.id);
        assert_eq!(profile.tenant.id, tenant.id);
    }

    #[test]
    fn registration_reuses_existing_tenant() {
        let h = harness();

        let first = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        let second = h.registration.register("b@x.com", "pw", " ACME.com ").unwrap();

        assert_eq!(first.tenant_id, second.tenant_id);
        assert_eq!(h.store.tenant_count(), 1);
    }

    #[test]
    fn registered_user_has_local_defaults() {
        let h = harness();
        let user = h.registration.register("  Mixed@Case.COM ", "pw", "acme.com").unwrap();

        assert_eq!(user.email.as_str(), "mixed@case.com");
        assert_eq!(user.status, UserStatus::Active);
        assert!(user.roles.is_empty());
        assert!(user.provider_user_id.is_empty());
        assert_ne!(user.password_digest.as_str(), "pw");
    }

    // ------------------------------------------------------------------
    // Registration failures
    // ------------------------------------------------------------------

    #[test]
    fn duplicate_email_is_rejected_across_tenants() {
        let h = harness();
        h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        let err = h.registration.register("a@x.com", "other", "globex.com").unwrap_err();
        assert_eq!(err, AuthError::DuplicateUser);

        let err = h.registration.register("A@X.COM", "other", "acme.com").unwrap_err();
        assert_eq!(err, AuthError::DuplicateUser);
        assert_eq!(h.store.user_count(), 1);
    }

    #[test]
    fn duplicate_registration_still_provisions_new_tenant() {
        let h = harness();
        h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        // Tenant resolution runs before the duplicate check.
        let _ = h.registration.register("a@x.com", "pw", "globex.com");
        assert_eq!(h.store.tenant_count(), 2);
    }

    #[test]
    fn malformed_input_is_rejected_before_touching_storage() {
        let h = harness();

        let err = h.registration.register("not-an-email", "pw", "acme.com").unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let err = h.registration.register("a@x.com", "pw", "   ").unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        assert_eq!(h.store.tenant_count(), 0);
        assert_eq!(h.store.user_count(), 0);
    }

    #[test]
    fn local_provider_must_be_allowed() {
        let h = harness_with(AuthConfig {
            allowed_providers: vec!["ldap".to_string()],
            ..config()
        });

        let err = h.registration.register("a@x.com", "pw", "acme.com").unwrap_err();
        assert_eq!(err, AuthError::ProviderNotAllowed("local".to_string()));
        assert_eq!(h.store.tenant_count(), 0);
    }

    #[test]
    fn tenant_lookup_failure_propagates_without_provisioning() {
        let store = Arc::new(InMemoryStore::new());
        let tenants = Arc::new(UnreachableTenants {
            creates: AtomicUsize::new(0),
        });
        let registration = RegistrationService::new(
            Arc::clone(&store),
            Arc::clone(&tenants),
            codec(),
            &config(),
        );

        let err = registration.register("a@x.com", "pw", "acme.com").unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert_eq!(tenants.creates.load(Ordering::SeqCst), 0);
        assert_eq!(store.user_count(), 0);
    }

    // ------------------------------------------------------------------
    // Concurrency
    // ------------------------------------------------------------------

    #[test]
    fn concurrent_first_registrations_share_one_tenant() {
        let h = Arc::new(harness());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let h = Arc::clone(&h);
                thread::spawn(move || {
                    h.registration
                        .register(&format!("user{i}@x.com"), "pw", "acme.com")
                        .unwrap()
                })
            })
            .collect();

        let users: Vec<User> = handles.into_iter().map(|t| t.join().unwrap()).collect();

        assert_eq!(h.store.tenant_count(), 1);
        assert!(users.iter().all(|u| u.tenant_id == users[0].tenant_id));
    }

    #[test]
    fn concurrent_registrations_of_one_email_admit_exactly_one() {
        let h = Arc::new(harness());

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let h = Arc::clone(&h);
                thread::spawn(move || h.registration.register("same@x.com", "pw", "acme.com"))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|t| t.join().unwrap()).collect();
        let ok = results.iter().filter(|r| r.is_ok()).count();

        assert_eq!(ok, 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| *e == AuthError::DuplicateUser)
        );
        assert_eq!(h.store.user_count(), 1);
    }

    // ------------------------------------------------------------------
    // Login failures
    // ------------------------------------------------------------------

    #[test]
    fn wrong_password_and_unknown_email_are_indistinguishable() {
        let h = harness();
        h.registration.register("a@x.com", "pw123", "acme.com").unwrap();

        let wrong_password = h.auth.authenticate("a@x.com", "nope").unwrap_err();
        let unknown_email = h.auth.authenticate("ghost@x.com", "pw123").unwrap_err();
        let malformed = h.auth.authenticate("ghost", "pw123").unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_email, wrong_password);
        assert_eq!(malformed, wrong_password);
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[test]
    fn login_is_case_insensitive_on_email() {
        let h = harness();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        let login = h.auth.authenticate("  A@X.com", "pw").unwrap();
        assert_eq!(login.user.id, user.id);
    }

    #[test]
    fn lookup_storage_failure_reads_as_invalid_credentials() {
        let store = Arc::new(InMemoryStore::new());
        let users = Arc::new(FlakyUsers::new(Arc::clone(&store)));
        let config = config();
        let codec = codec();
        let registration =
            RegistrationService::new(Arc::clone(&users), Arc::clone(&store), Arc::clone(&codec), &config);
        let auth = AuthenticationService::new(Arc::clone(&users), codec, tokens(&config));

        registration.register("a@x.com", "pw", "acme.com").unwrap();
        users.fail_lookup.store(true, Ordering::SeqCst);

        let err = auth.authenticate("a@x.com", "pw").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn corrupt_stored_digest_reads_as_invalid_credentials() {
        let h = harness();
        let mut user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        user.password_digest = warden_core::CredentialDigest::new("not-a-bcrypt-digest");
        h.store.update(&user).unwrap();

        let err = h.auth.authenticate("a@x.com", "pw").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    // ------------------------------------------------------------------
    // last_login handling
    // ------------------------------------------------------------------

    #[test]
    fn registration_stamps_last_login_by_default() {
        let h = harness();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        assert_eq!(user.last_login, Some(user.created_at));
    }

    #[test]
    fn registration_stamp_can_be_disabled() {
        let h = harness_with(AuthConfig {
            stamp_last_login_on_register: false,
            ..config()
        });
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        assert_eq!(user.last_login, None);
    }

    #[test]
    fn login_records_last_login_and_returns_prior_snapshot() {
        let h = harness_with(AuthConfig {
            stamp_last_login_on_register: false,
            ..config()
        });
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        let before = Utc::now();
        let login = h.auth.authenticate("a@x.com", "pw").unwrap();
        assert_eq!(login.user.last_login, None);

        let stored = UserRepository::find_by_id(&*h.store, user.id).unwrap();
        let stamped = stored.user.last_login.unwrap();
        assert!(stamped >= before);
    }

    #[test]
    fn last_login_update_failure_does_not_fail_login() {
        let store = Arc::new(InMemoryStore::new());
        let users = Arc::new(FlakyUsers::new(Arc::clone(&store)));
        let config = AuthConfig {
            stamp_last_login_on_register: false,
            ..config()
        };
        let codec = codec();
        let registration =
            RegistrationService::new(Arc::clone(&users), Arc::clone(&store), Arc::clone(&codec), &config);
        let auth = AuthenticationService::new(Arc::clone(&users), codec, tokens(&config));

        let user = registration.register("a@x.com", "pw", "acme.com").unwrap();
        users.fail_update.store(true, Ordering::SeqCst);

        let login = auth.authenticate("a@x.com", "pw").unwrap();
        assert_eq!(login.user.id, user.id);
        assert!(auth.validate_bearer(&login.token).is_ok());

        let stored = UserRepository::find_by_id(&*store, user.id).unwrap();
        assert_eq!(stored.user.last_login, None);
    }

    // ------------------------------------------------------------------
    // Bearer validation
    // ------------------------------------------------------------------

    #[test]
    fn expired_token_is_rejected() {
        let h = harness();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        let stale = h
            .auth
            .tokens()
            .issue_at(&user, Utc::now() - Duration::hours(25))
            .unwrap();

        assert_eq!(h.auth.validate_bearer(&stale).unwrap_err(), AuthError::TokenExpired);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let h = harness();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        let forged = TokenService::new(b"someone-elses-secret")
            .issue(&user)
            .unwrap();

        assert_eq!(h.auth.validate_bearer(&forged).unwrap_err(), AuthError::TokenSignature);
    }

    #[test]
    fn suspended_user_or_tenant_is_rejected() {
        let h = harness();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        let token = h.auth.authenticate("a@x.com", "pw").unwrap().token;

        h.registration
            .tenants()
            .update_status(user.tenant_id, TenantStatus::Suspended)
            .unwrap();
        assert_eq!(
            h.auth.validate_bearer(&token).unwrap_err(),
            AuthError::TenantOrUserSuspended
        );

        h.registration
            .tenants()
            .update_status(user.tenant_id, TenantStatus::Active)
            .unwrap();
        assert!(h.auth.validate_bearer(&token).is_ok());

        let mut stored = UserRepository::find_by_id(&*h.store, user.id).unwrap().user;
        stored.status = UserStatus::Suspended;
        h.store.update(&stored).unwrap();
        assert_eq!(
            h.auth.validate_bearer(&token).unwrap_err(),
            AuthError::TenantOrUserSuspended
        );
    }

    #[test]
    fn token_for_removed_user_is_rejected() {
        let h = harness();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        let token = h.auth.authenticate("a@x.com", "pw").unwrap().token;

        h.store.remove_user(user.id).unwrap();

        assert_eq!(h.auth.validate_bearer(&token).unwrap_err(), AuthError::UserNotFound);
    }

    #[test]
    fn unknown_tenant_status_update_is_invalid_input() {
        let h = harness();
        let err = h
            .registration
            .tenants()
            .update_status(TenantId::new(), TenantStatus::Active)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    #[test]
    fn role_assignment_is_idempotent_and_visible_through_bearer() {
        let h = harness();
        h.store.insert_role(role("admin", &["*"])).unwrap();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        h.roles.assign_role(user.id, "admin").unwrap();
        h.roles.assign_role(user.id, "admin").unwrap();

        let token = h.auth.authenticate("a@x.com", "pw").unwrap().token;
        let profile = h.auth.validate_bearer(&token).unwrap();

        assert_eq!(profile.user.roles.len(), 1);
        assert_eq!(profile.role_names(), vec!["admin".to_string()]);
        assert!(profile.has_permission("users.delete"));
        assert!(warden_auth::authorize(&profile, "users.delete").is_ok());
    }

    #[test]
    fn role_assignment_rejects_unknown_role_or_user() {
        let h = harness();
        h.store.insert_role(role("viewer", &["users.read"])).unwrap();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();

        assert_eq!(
            h.roles.assign_role(user.id, "auditor").unwrap_err(),
            AuthError::RoleNotFound("auditor".to_string())
        );
        assert_eq!(
            h.roles.assign_role(UserId::new(), "viewer").unwrap_err(),
            AuthError::UserNotFound
        );
    }

    #[test]
    fn limited_role_is_forbidden_outside_its_permissions() {
        let h = harness();
        h.store.insert_role(role("viewer", &["users.read"])).unwrap();
        let user = h.registration.register("a@x.com", "pw", "acme.com").unwrap();
        h.roles.assign_role(user.id, "viewer").unwrap();

        let profile = UserRepository::find_by_id(&*h.store, user.id).unwrap();
        assert!(warden_auth::authorize(&profile, "users.read").is_ok());
        assert!(warden_auth::authorize(&profile, "users.delete").is_err());
        assert!(warden_auth::authorize_in_tenant(&profile, TenantId::new(), "users.read").is_err());
    }
}
