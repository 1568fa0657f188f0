use bazaar_core::UserId;

use crate::AdminGrant;

/// Whose resources an operation may touch.
///
/// Owner-scoped operations must constrain on both the resource id and the
/// owner; a miss is reported exactly like a nonexistent resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OwnershipScope {
    /// Only resources owned by this user.
    Owner(UserId),

    /// Any resource. Requires a grant from the admin gate.
    Elevated(AdminGrant),
}

impl OwnershipScope {
    pub fn owner(user_id: UserId) -> Self {
        Self::Owner(user_id)
    }

    pub fn elevated(grant: AdminGrant) -> Self {
        Self::Elevated(grant)
    }

    /// Owner constraint to apply to a query, if any.
    pub fn owner_filter(&self) -> Option<UserId> {
        match self {
            Self::Owner(user_id) => Some(*user_id),
            Self::Elevated(_) => None,
        }
    }

    /// Whether a resource owned by `owner` is visible in this scope.
    pub fn permits(&self, owner: UserId) -> bool {
        self.owner_filter().is_none_or(|user_id| user_id == owner)
    }
}
