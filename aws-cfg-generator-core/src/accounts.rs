//! Account id to account name lookup, built from AWS Organizations.
//!
//! Organizations access is optional: a caller without `organizations:ListAccounts`
//! still gets profiles, they are just named after account ids. Listing errors are
//! therefore recorded on the directory and logged instead of failing the run.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::aws::{AwsError, OrganizationsApi};

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: BTreeMap<String, String>,
    listing_error: Option<AwsError>,
}

impl AccountDirectory {
    /// Page through `ListAccounts` until no continuation token is returned.
    ///
    /// A failing page stops the listing; accounts from earlier pages are kept.
    pub async fn fetch(organizations: &dyn OrganizationsApi) -> Self {
        let mut directory = Self::default();
        let mut next_token = None;

        loop {
            let page = match organizations.list_accounts(next_token.take()).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "could not list organization member accounts, continuing with {} known accounts: {}",
                        directory.accounts.len(),
                        e
                    );
                    directory.listing_error = Some(e);
                    break;
                }
            };

            debug!("found {} member accounts", page.accounts.len());
            for (id, name) in page.accounts {
                debug!("found organization member account {} ({})", id, name);
                directory.accounts.insert(id, name);
            }

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        directory
    }

    pub fn name(&self, account_id: &str) -> Option<&str> {
        self.accounts.get(account_id).map(String::as_str)
    }

    /// Account ids in ascending order
    pub fn account_ids(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// `false` when the listing stopped on an error
    pub fn is_complete(&self) -> bool {
        self.listing_error.is_none()
    }

    pub fn listing_error(&self) -> Option<&AwsError> {
        self.listing_error.as_ref()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AccountDirectory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            accounts: iter
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
            listing_error: None,
        }
    }
}
