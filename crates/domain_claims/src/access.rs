//! Caller capabilities and the claim access gate
//!
//! A caller is either an administrator with full access, or an anonymous
//! customer. Anonymous callers may look claims up by order number and email;
//! the claims such a lookup returns are granted to the caller's session and
//! may then be fetched by id.

use std::collections::HashSet;

use core_kernel::ClaimId;
use crate::error::ClaimError;

/// Claims an anonymous caller has proven ownership of
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymousSession {
    granted: HashSet<ClaimId>,
}

impl AnonymousSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from previously granted claim ids
    pub fn with_grants(ids: impl IntoIterator<Item = ClaimId>) -> Self {
        Self {
            granted: ids.into_iter().collect(),
        }
    }

    pub fn grant(&mut self, id: ClaimId) {
        self.granted.insert(id);
    }

    pub fn is_granted(&self, id: ClaimId) -> bool {
        self.granted.contains(&id)
    }

    /// Granted ids in a stable order
    pub fn granted(&self) -> Vec<ClaimId> {
        let mut ids: Vec<_> = self.granted.iter().copied().collect();
        ids.sort();
        ids
    }
}

/// Who is asking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// Authenticated administrator
    Admin { subject: String },
    /// Customer without an account
    Anonymous(AnonymousSession),
}

impl Caller {
    pub fn admin(subject: impl Into<String>) -> Self {
        Caller::Admin {
            subject: subject.into(),
        }
    }

    /// Anonymous caller without any grants
    pub fn anonymous() -> Self {
        Caller::Anonymous(AnonymousSession::new())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin { .. })
    }

    /// Name used in logs
    pub fn subject(&self) -> &str {
        match self {
            Caller::Admin { subject } => subject,
            Caller::Anonymous(_) => "anonymous",
        }
    }

    pub fn session(&self) -> Option<&AnonymousSession> {
        match self {
            Caller::Anonymous(session) => Some(session),
            Caller::Admin { .. } => None,
        }
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut AnonymousSession> {
        match self {
            Caller::Anonymous(session) => Some(session),
            Caller::Admin { .. } => None,
        }
    }
}

/// Authorization checks in front of every claim operation
pub struct ClaimAccessGate;

impl ClaimAccessGate {
    /// Only administrators may list and filter the claim collection
    pub fn authorize_listing(caller: &Caller) -> Result<(), ClaimError> {
        match caller {
            Caller::Admin { .. } => Ok(()),
            Caller::Anonymous(_) => Err(ClaimError::forbidden("listing claims requires an administrator")),
        }
    }

    /// Only administrators may change a claim
    pub fn authorize_mutation(caller: &Caller, claim_id: ClaimId) -> Result<(), ClaimError> {
        match caller {
            Caller::Admin { .. } => Ok(()),
            Caller::Anonymous(_) => Err(ClaimError::forbidden(format!(
                "changing claim {} requires an administrator",
                claim_id
            ))),
        }
    }

    /// Anyone may look claims up by order number and email
    pub fn authorize_lookup(
        _caller: &Caller,
        _order_number: &str,
        _email: &str,
    ) -> Result<(), ClaimError> {
        Ok(())
    }

    /// Administrators, or anonymous callers whose lookup returned the claim
    pub fn authorize_fetch(caller: &Caller, claim_id: ClaimId) -> Result<(), ClaimError> {
        match caller {
            Caller::Admin { .. } => Ok(()),
            Caller::Anonymous(session) if session.is_granted(claim_id) => Ok(()),
            Caller::Anonymous(_) => Err(ClaimError::forbidden(format!(
                "claim {} was not returned by a lookup in this session",
                claim_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_full_access() {
        let admin = Caller::admin("ops@example.com");
        let id = ClaimId::new();
        assert!(ClaimAccessGate::authorize_listing(&admin).is_ok());
        assert!(ClaimAccessGate::authorize_mutation(&admin, id).is_ok());
        assert!(ClaimAccessGate::authorize_fetch(&admin, id).is_ok());
    }

    #[test]
    fn test_anonymous_cannot_list_or_mutate() {
        let anonymous = Caller::anonymous();
        assert!(matches!(
            ClaimAccessGate::authorize_listing(&anonymous),
            Err(ClaimError::Forbidden(_))
        ));
        assert!(matches!(
            ClaimAccessGate::authorize_mutation(&anonymous, ClaimId::new()),
            Err(ClaimError::Forbidden(_))
        ));
    }

    #[test]
    fn test_anyone_may_look_up() {
        assert!(ClaimAccessGate::authorize_lookup(&Caller::anonymous(), "A1", "x@y.com").is_ok());
    }

    #[test]
    fn test_anonymous_fetch_requires_grant() {
        let id = ClaimId::new();
        let mut caller = Caller::anonymous();
        assert!(ClaimAccessGate::authorize_fetch(&caller, id).is_err());

        caller.session_mut().unwrap().grant(id);
        assert!(ClaimAccessGate::authorize_fetch(&caller, id).is_ok());
        assert!(ClaimAccessGate::authorize_fetch(&caller, ClaimId::new()).is_err());
    }

    #[test]
    fn test_grants_are_sorted() {
        let a = ClaimId::new_v7();
        let b = ClaimId::new_v7();
        let session = AnonymousSession::with_grants([b, a]);
        assert_eq!(session.granted(), vec![a.min(b), a.max(b)]);
    }
}
