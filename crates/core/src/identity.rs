//! Caller identity and ownership scoping.
//!
//! The upstream boundary authenticates requests and resolves each one to a
//! [`Caller`] before invoking a service; anonymous requests never get this
//! far. Role enforcement for administrative listings also happens upstream -
//! what this layer owns is row-level scoping: which Orders and OrderItems a
//! given caller may see or act on.

/// Identity of the caller of a service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// Administrative caller; passes every ownership check.
    Admin { id: String },
    /// Storefront customer; limited to rows owned by this id.
    Customer { id: String },
}

impl Caller {
    pub fn admin(id: impl Into<String>) -> Self {
        Caller::Admin { id: id.into() }
    }

    pub fn customer(id: impl Into<String>) -> Self {
        Caller::Customer { id: id.into() }
    }

    /// The caller's own customer/user id.
    pub fn id(&self) -> &str {
        match self {
            Caller::Admin { id } | Caller::Customer { id } => id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin { .. })
    }

    /// Single-row ownership check against the row's owning customer id.
    ///
    /// A failed check must be answered exactly like a missing row, so a
    /// caller cannot probe which ids exist.
    pub fn may_access(&self, owner_id: &str) -> bool {
        match self {
            Caller::Admin { .. } => true,
            Caller::Customer { id } => id == owner_id,
        }
    }

    /// Pre-narrowing filter for listings: `None` means unrestricted,
    /// `Some(id)` restricts the query itself to rows owned by `id`.
    /// Listings never fetch rows only to discard them afterwards.
    pub fn owner_filter(&self) -> Option<&str> {
        match self {
            Caller::Admin { .. } => None,
            Caller::Customer { id } => Some(id),
        }
    }
}
