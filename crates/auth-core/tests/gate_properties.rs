//! 门禁行为在全部 (角色, 权限) 组合上的性质

use std::sync::Arc;

use hostel_auth_core::{
    AccessGate, Actor, Guarded, Permission, Requirement, Role, RoleTable, SessionStore,
    default_permissions, require_permission, require_role,
};
use hostel_errors::{AppError, AppResult};

fn gate(actor: Option<Actor>, table: RoleTable) -> AccessGate {
    AccessGate::new(Arc::new(actor), Arc::new(table))
}

fn all_requirements() -> Vec<Requirement> {
    Permission::ALL
        .into_iter()
        .map(Requirement::from)
        .chain(Role::ALL.into_iter().map(Requirement::from))
        .collect()
}

#[test]
fn has_permission_matches_table_membership() {
    for role in Role::ALL {
        let gate = gate(Some(Actor::with_role("T", role)), RoleTable::builtin());
        let granted = default_permissions(role);

        for permission in Permission::ALL {
            assert_eq!(
                gate.has_permission(permission),
                granted.contains(&permission),
                "{} / {}",
                role,
                permission
            );
        }
    }
}

#[test]
fn anonymous_never_passes() {
    let gate = gate(None, RoleTable::builtin());

    for requirement in all_requirements() {
        assert!(!gate.check(requirement), "{}", requirement);
    }
}

#[test]
fn unmapped_roles_get_nothing() {
    for missing in Role::ALL {
        let table = RoleTable::from_entries(
            Role::ALL
                .into_iter()
                .filter(|role| *role != missing)
                .map(|role| (role, default_permissions(role).iter().copied())),
        );
        assert_eq!(table.missing_roles(), vec![missing]);

        let gate = gate(Some(Actor::with_role("T", missing)), table);
        for permission in Permission::ALL {
            assert!(!gate.has_permission(permission), "{} / {}", missing, permission);
        }
    }
}

#[test]
fn has_role_is_equality() {
    for actual in Role::ALL {
        let gate = gate(Some(Actor::with_role("T", actual)), RoleTable::builtin());
        for asked in Role::ALL {
            assert_eq!(gate.has_role(asked), actual == asked);
        }
    }
}

#[test]
fn role_tags_parse_exactly() {
    for role in Role::ALL {
        let upper = role.as_str().to_uppercase();
        assert!(upper.parse::<Role>().is_err());
        assert!(role.as_str()[1..].parse::<Role>().is_err());
    }
}

#[test]
fn checks_are_idempotent() {
    let session = Arc::new(SessionStore::new());
    let gate = AccessGate::with_builtin_table(session.clone());
    session.login(Actor::with_role("T", Role::Warden));

    for requirement in all_requirements() {
        assert_eq!(gate.check(requirement), gate.check(requirement));
    }
}

#[test]
fn guard_selects_by_check() {
    let actors = std::iter::once(None).chain(Role::ALL.into_iter().map(Some));

    for role in actors {
        let gate = gate(role.map(|role| Actor::with_role("T", role)), RoleTable::builtin());

        for requirement in all_requirements() {
            let allowed = gate.check(requirement);

            let with_fallback = gate.guard(requirement, "content", Some("fallback"));
            let without_fallback = gate.guard(requirement, "content", None);

            if allowed {
                assert_eq!(with_fallback, Guarded::Content("content"));
                assert_eq!(without_fallback, Guarded::Content("content"));
            } else {
                assert_eq!(with_fallback, Guarded::Fallback("fallback"));
                assert_eq!(without_fallback, Guarded::Denied);
            }
        }
    }
}

#[test]
fn settings_page_renders_denied_for_warden() {
    let gate = gate(Some(Actor::with_role("W", Role::Warden)), RoleTable::builtin());

    let page = gate.guard(Permission::ManageSettings, "<SettingsPage/>", Some("<DeniedPage/>"));
    assert_eq!(page.unwrap_or("<AccessDenied/>"), "<DeniedPage/>");
}

fn delete_user(gate: &AccessGate) -> AppResult<&'static str> {
    let view = gate.snapshot();
    require_permission!(view, Permission::ManageUsers);
    Ok("deleted")
}

fn open_admin_panel(gate: &AccessGate) -> AppResult<&'static str> {
    let view = gate.snapshot();
    require_role!(view, Role::Admin);
    Ok("panel")
}

#[test]
fn require_macros_return_forbidden() {
    let admin = gate(Some(Actor::with_role("A", Role::Admin)), RoleTable::builtin());
    let student = gate(Some(Actor::with_role("S", Role::Student)), RoleTable::builtin());

    assert_eq!(delete_user(&admin).unwrap(), "deleted");
    assert_eq!(open_admin_panel(&admin).unwrap(), "panel");

    match delete_user(&student) {
        Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Missing permission: manage_users"),
        other => panic!("unexpected result: {:?}", other),
    }
    match open_admin_panel(&student) {
        Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Missing role: admin"),
        other => panic!("unexpected result: {:?}", other),
    }
}
