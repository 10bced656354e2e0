//! The static admin allow-list.
//!
//! Admin rights are a deploy-time decision: a comma-separated list of provider user ids, usually taken straight
//! from the environment. There are no roles and no runtime grants.
use std::collections::HashSet;

use log::*;

use crate::catalog_types::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    admins: HashSet<UserId>,
}

impl AdminAllowList {
    /// Parse a comma-separated list of user ids. Entries are trimmed and blanks are skipped.
    pub fn from_csv(csv: &str) -> Self {
        let admins: HashSet<UserId> =
            csv.split(',').map(str::trim).filter(|s| !s.is_empty()).map(UserId::from).collect();
        if admins.is_empty() {
            warn!("🔐️ The admin allow-list is empty. No user will have admin rights.");
        } else {
            info!("🔐️ {} user(s) on the admin allow-list.", admins.len());
        }
        Self { admins }
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.admins.contains(user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}
