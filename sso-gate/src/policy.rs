//! Allow-list access policy applied after successful validation.

use session_client::PlatformIdentity;

use crate::config::GateConfig;

/// Optional allow-lists over organization ids and usernames.
///
/// An absent list means no restriction on that dimension; a present list is
/// checked by membership. Both present lists must admit the identity.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    valid_orgs: Option<Vec<String>>,
    valid_emails: Option<Vec<String>>,
}

impl AccessPolicy {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            valid_orgs: config.valid_orgs.clone(),
            valid_emails: config.valid_emails.clone(),
        }
    }

    pub fn allows(&self, identity: &PlatformIdentity) -> bool {
        if let Some(ref orgs) = self.valid_orgs {
            if !orgs.contains(&identity.org_id) {
                return false;
            }
        }

        if let Some(ref emails) = self.valid_emails {
            if !emails.contains(&identity.username) {
                return false;
            }
        }

        true
    }
}
