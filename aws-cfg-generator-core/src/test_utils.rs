//! In-memory stand-ins for the AWS APIs used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::aws::{AccountPage, AwsError, AwsResult, IamApi, OrganizationsApi, StsApi};

/// Wrap a role list into an allow-assume-role policy document, percent-encoded like IAM does.
pub(crate) fn assume_role_policy(roles: &[&str]) -> String {
    let json = serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Action": "sts:AssumeRole",
            "Resource": roles,
        }]
    });
    utf8_percent_encode(&json.to_string(), NON_ALPHANUMERIC).to_string()
}

#[derive(Default)]
pub(crate) struct FakeIam {
    groups: HashMap<String, Vec<String>>,
    inline: HashMap<String, Vec<(String, String)>>,
    attached: HashMap<String, Vec<(String, String)>>,
    failing_policy: Option<String>,
}

impl FakeIam {
    pub(crate) fn with_group(mut self, user: &str, group: &str) -> Self {
        self.groups
            .entry(user.to_string())
            .or_default()
            .push(group.to_string());
        self
    }

    pub(crate) fn with_inline_policy(mut self, group: &str, name: &str, document: String) -> Self {
        self.inline
            .entry(group.to_string())
            .or_default()
            .push((name.to_string(), document));
        self
    }

    pub(crate) fn with_attached_policy(mut self, group: &str, arn: &str, document: String) -> Self {
        self.attached
            .entry(group.to_string())
            .or_default()
            .push((arn.to_string(), document));
        self
    }

    /// Make fetching the given attached policy fail
    pub(crate) fn failing_on(mut self, policy_arn: &str) -> Self {
        self.failing_policy = Some(policy_arn.to_string());
        self
    }
}

#[async_trait]
impl IamApi for FakeIam {
    async fn list_groups_for_user(&self, user_name: &str) -> AwsResult<Vec<String>> {
        Ok(self.groups.get(user_name).cloned().unwrap_or_default())
    }

    async fn list_group_policies(&self, group_name: &str) -> AwsResult<Vec<String>> {
        Ok(self
            .inline
            .get(group_name)
            .map(|policies| policies.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_group_policy(&self, group_name: &str, policy_name: &str) -> AwsResult<String> {
        self.inline
            .get(group_name)
            .and_then(|policies| policies.iter().find(|(name, _)| name == policy_name))
            .map(|(_, document)| document.clone())
            .ok_or_else(|| AwsError::IamError(format!("NoSuchEntity: {policy_name}")))
    }

    async fn list_attached_group_policies(&self, group_name: &str) -> AwsResult<Vec<String>> {
        Ok(self
            .attached
            .get(group_name)
            .map(|policies| policies.iter().map(|(arn, _)| arn.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_default_policy_document(&self, policy_arn: &str) -> AwsResult<String> {
        if self.failing_policy.as_deref() == Some(policy_arn) {
            return Err(AwsError::IamError(format!("AccessDenied: {policy_arn}")));
        }
        self.attached
            .values()
            .flatten()
            .find(|(arn, _)| arn == policy_arn)
            .map(|(_, document)| document.clone())
            .ok_or_else(|| AwsError::IamError(format!("NoSuchEntity: {policy_arn}")))
    }
}

pub(crate) struct FakeSts {
    pub(crate) caller_arn: String,
}

#[async_trait]
impl StsApi for FakeSts {
    async fn caller_arn(&self) -> AwsResult<String> {
        Ok(self.caller_arn.clone())
    }
}

/// Hands out the configured pages in order and records the tokens it was called with
pub(crate) struct FakeOrganizations {
    pages: Mutex<VecDeque<AwsResult<AccountPage>>>,
    tokens: Mutex<Vec<Option<String>>>,
}

impl FakeOrganizations {
    pub(crate) fn new(pages: Vec<AwsResult<AccountPage>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn received_tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().expect("tokens lock").clone()
    }
}

#[async_trait]
impl OrganizationsApi for FakeOrganizations {
    async fn list_accounts(&self, next_token: Option<String>) -> AwsResult<AccountPage> {
        self.tokens.lock().expect("tokens lock").push(next_token);
        self.pages
            .lock()
            .expect("pages lock")
            .pop_front()
            .unwrap_or_else(|| Ok(AccountPage::default()))
    }
}
