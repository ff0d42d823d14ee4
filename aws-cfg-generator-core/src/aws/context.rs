//! The set of AWS clients a run needs, built once from the default provider chain.

use aws_sdk_iam::Client as IamClient;
use aws_sdk_organizations::Client as OrganizationsClient;
use aws_sdk_sts::Client as StsClient;

use crate::aws::iam_client::AwsIamClient;
use crate::aws::organizations::AwsOrganizationsClient;
use crate::aws::sts::AwsStsClient;
use crate::aws::{IamApi, OrganizationsApi, StsApi};

pub struct AwsContext {
    iam: AwsIamClient,
    sts: AwsStsClient,
    organizations: AwsOrganizationsClient,
}

impl AwsContext {
    /// Load AWS configuration using the standard credential provider chain
    /// and create the IAM, STS and Organizations clients from it.
    pub async fn load() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        Self {
            iam: AwsIamClient::new(IamClient::new(&config)),
            sts: AwsStsClient::new(StsClient::new(&config)),
            organizations: AwsOrganizationsClient::new(OrganizationsClient::new(&config)),
        }
    }

    pub fn iam(&self) -> &dyn IamApi {
        &self.iam
    }

    pub fn sts(&self) -> &dyn StsApi {
        &self.sts
    }

    pub fn organizations(&self) -> &dyn OrganizationsApi {
        &self.organizations
    }
}
