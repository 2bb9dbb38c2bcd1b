//! Authentication and authorization tests
//!
//! Tests for the role model, token claim discipline, and the authorization
//! gate applied to stock-mutating operations.

use proptest::prelude::*;
use shared::types::Role;

/// Mirror of the claim checks applied by the request middleware
#[derive(Debug, Clone)]
struct TokenModel {
    role: String,
    token_type: String,
    exp: i64,
}

#[derive(Debug, PartialEq)]
enum TokenError {
    Expired,
    WrongType,
    UnknownRole,
}

fn accept_for_api(token: &TokenModel, now: i64) -> Result<Role, TokenError> {
    if token.exp <= now {
        return Err(TokenError::Expired);
    }
    if token.token_type != "access" {
        return Err(TokenError::WrongType);
    }
    Role::parse(&token.role).ok_or(TokenError::UnknownRole)
}

/// Roles allowed to create intakes and outbound orders
fn may_mutate_stock(role: Role) -> bool {
    matches!(role, Role::Admin | Role::WarehouseStaff)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn access_token(role: &str) -> TokenModel {
        TokenModel {
            role: role.to_string(),
            token_type: "access".to_string(),
            exp: 2_000,
        }
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in [Role::Admin, Role::Manager, Role::WarehouseStaff] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    /// Role names are exact; no case folding
    #[test]
    fn test_unknown_and_miscased_roles_rejected() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("warehouse staff"), None);
        assert_eq!(Role::parse("Superuser"), None);
    }

    #[test]
    fn test_valid_access_token_accepted() {
        let token = access_token("Warehouse Staff");
        assert_eq!(accept_for_api(&token, 1_000), Ok(Role::WarehouseStaff));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = access_token("Admin");
        assert_eq!(accept_for_api(&token, 3_000), Err(TokenError::Expired));
    }

    /// Refresh tokens are only accepted by the refresh endpoint
    #[test]
    fn test_refresh_token_rejected_for_api_access() {
        let mut token = access_token("Admin");
        token.token_type = "refresh".to_string();
        assert_eq!(accept_for_api(&token, 1_000), Err(TokenError::WrongType));
    }

    #[test]
    fn test_token_with_unknown_role_rejected() {
        let token = access_token("Intern");
        assert_eq!(accept_for_api(&token, 1_000), Err(TokenError::UnknownRole));
    }

    /// Managers read but do not move stock
    #[test]
    fn test_stock_mutation_gate() {
        assert!(may_mutate_stock(Role::Admin));
        assert!(may_mutate_stock(Role::WarehouseStaff));
        assert!(!may_mutate_stock(Role::Manager));
    }

    /// Expiry check precedes the type check, so an expired refresh token
    /// reports Expired
    #[test]
    fn test_expiry_checked_before_type() {
        let token = TokenModel {
            role: "Admin".to_string(),
            token_type: "refresh".to_string(),
            exp: 500,
        };
        assert_eq!(accept_for_api(&token, 1_000), Err(TokenError::Expired));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::Manager),
        Just(Role::WarehouseStaff),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Serialized role names always parse back to the same variant
    #[test]
    fn prop_role_round_trip(role in role_strategy()) {
        prop_assert_eq!(Role::parse(role.as_str()), Some(role));
    }

    /// A token is accepted iff unexpired, access-typed, and known-roled
    #[test]
    fn prop_acceptance_requires_all_checks(
        role in role_strategy(),
        exp in 0i64..10_000,
        now in 0i64..10_000,
        is_access in any::<bool>(),
    ) {
        let token = TokenModel {
            role: role.as_str().to_string(),
            token_type: if is_access { "access" } else { "refresh" }.to_string(),
            exp,
        };

        let result = accept_for_api(&token, now);
        if exp > now && is_access {
            prop_assert_eq!(result, Ok(role));
        } else {
            prop_assert!(result.is_err());
        }
    }
}
