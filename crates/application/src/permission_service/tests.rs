use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use wishboard_core::{AppError, AppResult};
use wishboard_domain::{
    Permission, PermissionSet, Role, RolePermissions, UserIdentity, defaults_for,
};

use super::{AccessDecision, PermissionService};
use crate::RolePermissionRepository;

#[derive(Default)]
struct FakeRolePermissionRepository {
    records: Mutex<BTreeMap<Role, Vec<String>>>,
    writes: Mutex<usize>,
    fail_upserts: bool,
    fail_finds: bool,
}

impl FakeRolePermissionRepository {
    fn with_tokens(role: Role, tokens: &[&str]) -> Self {
        let repository = Self::default();
        let tokens: Vec<String> = tokens.iter().map(|token| (*token).to_owned()).collect();
        repository
            .records
            .try_lock()
            .map(|mut records| {
                records.insert(role, tokens);
            })
            .unwrap_or_default();
        repository
    }

    async fn stored_tokens(&self, role: Role) -> Option<Vec<String>> {
        self.records.lock().await.get(&role).cloned()
    }

    async fn write_count(&self) -> usize {
        *self.writes.lock().await
    }
}

#[async_trait]
impl RolePermissionRepository for FakeRolePermissionRepository {
    async fn find(&self, role: Role) -> AppResult<Option<RolePermissions>> {
        if self.fail_finds {
            return Err(AppError::Persistence("store unavailable".to_owned()));
        }

        Ok(self
            .records
            .lock()
            .await
            .get(&role)
            .map(|tokens| RolePermissions::from_stored_tokens(role, tokens)))
    }

    async fn list_all(&self) -> AppResult<Vec<RolePermissions>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .map(|(role, tokens)| RolePermissions::from_stored_tokens(*role, tokens))
            .collect())
    }

    async fn upsert(&self, role: Role, permissions: &PermissionSet) -> AppResult<()> {
        if self.fail_upserts {
            return Err(AppError::Persistence("store unavailable".to_owned()));
        }

        *self.writes.lock().await += 1;
        self.records
            .lock()
            .await
            .insert(role, permissions.to_storage_tokens());
        Ok(())
    }
}

fn actor(role: Role) -> UserIdentity {
    UserIdentity::new(Uuid::new_v4(), "alice", role)
}

fn service(repository: Arc<FakeRolePermissionRepository>) -> PermissionService {
    PermissionService::new(repository)
}

#[tokio::test]
async fn absent_record_resolves_to_defaults_without_a_write() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository.clone());

    let effective = service.resolve(Role::Member).await;

    assert_eq!(effective.ok(), Some(defaults_for(Role::Member)));
    assert_eq!(repository.write_count().await, 0);
    assert!(repository.stored_tokens(Role::Member).await.is_none());
}

#[tokio::test]
async fn legacy_tokens_are_healed_to_defaults() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Admin,
        &["manage_wishes", "view_dashboard"],
    ));
    let service = service(repository.clone());

    let effective = service.resolve(Role::Admin).await;

    assert_eq!(effective.ok(), Some(defaults_for(Role::Admin)));
    assert_eq!(
        repository.stored_tokens(Role::Admin).await,
        Some(defaults_for(Role::Admin).to_storage_tokens())
    );
}

#[tokio::test]
async fn admin_record_missing_mandatory_subset_is_healed() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Admin,
        &["MANAGE_EVENTS", "VIEW_DASHBOARD"],
    ));
    let service = service(repository.clone());

    let effective = service
        .resolve(Role::Admin)
        .await
        .unwrap_or_else(|_| PermissionSet::new());

    assert!(effective.contains(Permission::ManageRoles));
    assert!(effective.contains(Permission::ManageWishes));
    assert_eq!(repository.write_count().await, 1);
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Admin,
        &["manage_wishes"],
    ));
    let service = service(repository.clone());

    let first = service.resolve(Role::Admin).await;
    let writes_after_heal = repository.write_count().await;
    let second = service.resolve(Role::Admin).await;

    assert_eq!(first.ok(), second.ok());
    assert_eq!(writes_after_heal, 1);
    assert_eq!(repository.write_count().await, 1);
}

#[tokio::test]
async fn failed_heal_write_still_returns_defaults() {
    let repository = Arc::new(FakeRolePermissionRepository {
        records: Mutex::new(BTreeMap::from([(
            Role::Admin,
            vec!["manage_wishes".to_owned()],
        )])),
        fail_upserts: true,
        ..FakeRolePermissionRepository::default()
    });
    let service = service(repository.clone());

    let effective = service.resolve(Role::Admin).await;

    assert_eq!(effective.ok(), Some(defaults_for(Role::Admin)));
    assert_eq!(
        repository.stored_tokens(Role::Admin).await,
        Some(vec!["manage_wishes".to_owned()])
    );
}

#[tokio::test]
async fn canonical_custom_record_is_returned_unchanged() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Member,
        &["SUBMIT_WISHES", "VIEW_CALENDAR"],
    ));
    let service = service(repository.clone());

    let effective = service
        .resolve(Role::Member)
        .await
        .unwrap_or_else(|_| PermissionSet::new());

    assert_eq!(
        effective.to_storage_tokens(),
        vec!["VIEW_CALENDAR", "SUBMIT_WISHES"]
    );
    assert_eq!(repository.write_count().await, 0);
}

#[tokio::test]
async fn anonymous_actor_is_denied_without_store_access() {
    // An unreachable store proves the deny-all fast path does no read.
    let repository = Arc::new(FakeRolePermissionRepository {
        fail_finds: true,
        ..FakeRolePermissionRepository::default()
    });
    let service = service(repository);

    let decision = service.authorize(None, Permission::ManageWishes).await;

    assert_eq!(decision.ok(), Some(AccessDecision::Denied));
}

#[tokio::test]
async fn admin_bypasses_fine_grained_checks() {
    let repository = Arc::new(FakeRolePermissionRepository {
        fail_finds: true,
        ..FakeRolePermissionRepository::default()
    });
    let service = service(repository);

    let decision = service
        .authorize(Some(&actor(Role::Admin)), Permission::ManageSettings)
        .await;

    assert_eq!(decision.ok(), Some(AccessDecision::Allowed));
}

#[tokio::test]
async fn member_is_checked_against_effective_set() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);
    let member = actor(Role::Member);

    let allowed = service
        .authorize(Some(&member), Permission::ViewCalendar)
        .await;
    let denied = service
        .authorize(Some(&member), Permission::ManageUsers)
        .await;

    assert_eq!(allowed.ok(), Some(AccessDecision::Allowed));
    assert_eq!(denied.ok(), Some(AccessDecision::Denied));
}

#[tokio::test]
async fn require_permission_distinguishes_anonymous_from_forbidden() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);

    let anonymous = service
        .require_permission(None, Permission::ManageWishes)
        .await;
    let forbidden = service
        .require_permission(Some(&actor(Role::User)), Permission::ManageWishes)
        .await;

    assert!(matches!(anonymous, Err(AppError::Unauthorized(_))));
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn anonymous_actor_has_no_permissions() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);

    let listed = service.my_permissions(None).await;
    let checked = service.check_permission(None, Permission::SubmitWishes).await;

    assert_eq!(listed.ok(), Some(Vec::new()));
    assert_eq!(checked.ok(), Some(false));
}

#[tokio::test]
async fn my_permissions_returns_ordered_effective_set() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);

    let listed = service
        .my_permissions(Some(&actor(Role::User)))
        .await
        .unwrap_or_default();

    assert_eq!(listed, vec![Permission::SubmitWishes]);
}

#[tokio::test]
async fn ensure_initialized_creates_missing_records_once() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository.clone());

    let first = service.ensure_initialized().await;
    let writes_after_first = repository.write_count().await;
    let second = service.ensure_initialized().await;

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(writes_after_first, Role::all().len());
    assert_eq!(repository.write_count().await, Role::all().len());
}

#[tokio::test]
async fn ensure_initialized_preserves_customized_records() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Member,
        &["SUBMIT_WISHES"],
    ));
    let service = service(repository.clone());

    let result = service.ensure_initialized().await;

    assert!(result.is_ok());
    assert_eq!(
        repository.stored_tokens(Role::Member).await,
        Some(vec!["SUBMIT_WISHES".to_owned()])
    );
}

#[tokio::test]
async fn seed_defaults_replaces_customized_records() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Member,
        &["SUBMIT_WISHES"],
    ));
    let service = service(repository.clone());

    let result = service.seed_defaults().await;

    assert!(result.is_ok());
    assert_eq!(
        repository.stored_tokens(Role::Member).await,
        Some(defaults_for(Role::Member).to_storage_tokens())
    );
}

#[tokio::test]
async fn role_permissions_requires_role_management() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);

    let result = service.role_permissions(&actor(Role::User)).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn role_permissions_lists_every_role_after_initialization() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);

    let records = service
        .role_permissions(&actor(Role::Admin))
        .await
        .unwrap_or_default();

    let roles: Vec<Role> = records.iter().map(|record| record.role).collect();
    assert_eq!(roles, vec![Role::Admin, Role::Member, Role::User]);
}

#[tokio::test]
async fn stripping_role_management_from_admin_is_rejected() {
    let repository = Arc::new(FakeRolePermissionRepository::with_tokens(
        Role::Admin,
        &["MANAGE_ROLES", "MANAGE_WISHES"],
    ));
    let service = service(repository.clone());

    let result = service
        .update_role_permissions(
            &actor(Role::Admin),
            Role::Admin,
            [Permission::ManageWishes].into_iter().collect(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(
        repository.stored_tokens(Role::Admin).await,
        Some(vec!["MANAGE_ROLES".to_owned(), "MANAGE_WISHES".to_owned()])
    );
}

#[tokio::test]
async fn valid_admin_update_round_trips_through_resolve() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository);
    let custom: PermissionSet = [
        Permission::ManageRoles,
        Permission::ManageWishes,
        Permission::ManageEvents,
    ]
    .into_iter()
    .collect();

    let updated = service
        .update_role_permissions(&actor(Role::Admin), Role::Admin, custom.clone())
        .await;
    let resolved = service.resolve(Role::Admin).await;

    assert!(updated.is_ok());
    assert_eq!(resolved.ok(), Some(custom));
}

#[tokio::test]
async fn update_requires_role_management_permission() {
    let repository = Arc::new(FakeRolePermissionRepository::default());
    let service = service(repository.clone());

    let result = service
        .update_role_permissions(
            &actor(Role::Member),
            Role::User,
            [Permission::SubmitWishes].into_iter().collect(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(repository.write_count().await, 0);
}
