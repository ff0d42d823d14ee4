//! IAM ARN parsing for role ARNs and the caller's user ARN.

use std::sync::OnceLock;

use regex::Regex;

use crate::aws::{AwsError, AwsResult};

fn role_arn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^arn:(aws[a-z-]*):iam::(\d+):role/(.+)$").expect("valid role ARN regex")
    })
}

/// A syntactically valid IAM role ARN, split into the parts profiles are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleArn {
    pub partition: String,
    pub account_id: String,
    /// Everything after the leading `role/`, including any role path
    pub role_name: String,
}

impl RoleArn {
    /// Parse a role ARN. Returns `None` for anything that is not an IAM role ARN
    /// with a concrete account id, e.g. `*` or `arn:aws:iam::*:role/admin`.
    pub fn parse(arn: &str) -> Option<Self> {
        let captures = role_arn_pattern().captures(arn)?;
        Some(Self {
            partition: captures[1].to_string(),
            account_id: captures[2].to_string(),
            role_name: captures[3].to_string(),
        })
    }

    /// Build the ARN of `role_name` in `account_id` in the standard partition.
    pub fn format(account_id: &str, role_name: &str) -> String {
        format!("arn:aws:iam::{account_id}:role/{role_name}")
    }
}

/// Extract the IAM user name from the caller ARN returned by STS.
///
/// Only IAM users have groups, so any other principal type is rejected.
pub fn user_name_from_arn(caller_arn: &str) -> AwsResult<String> {
    let parts: Vec<&str> = caller_arn.splitn(6, ':').collect();
    if parts.len() != 6 || parts[0] != "arn" {
        return Err(AwsError::PrincipalError(format!(
            "'{caller_arn}' is not a valid ARN"
        )));
    }

    let resource = parts[5];
    match resource.strip_prefix("user/") {
        Some(path) if parts[2] == "iam" => path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::PrincipalError(format!("'{caller_arn}' does not name a user"))
            }),
        _ => Err(AwsError::PrincipalError(format!(
            "caller '{caller_arn}' is not an IAM user; group memberships can only be listed for users"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_arn() {
        let arn = RoleArn::parse("arn:aws:iam::123456789012:role/my-role").expect("valid arn");
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.account_id, "123456789012");
        assert_eq!(arn.role_name, "my-role");
    }

    #[test]
    fn test_parse_role_arn_keeps_path() {
        let arn =
            RoleArn::parse("arn:aws-cn:iam::12345:role/service/deployer").expect("valid arn");
        assert_eq!(arn.partition, "aws-cn");
        assert_eq!(arn.role_name, "service/deployer");
    }

    #[test]
    fn test_parse_rejects_non_role_arns() {
        for arn in [
            "*",
            "foobar",
            "arn:aws:iam::*:role/admin",
            "arn:aws:iam::12345:user/alice",
            "arn:aws:s3:::my-bucket",
            "arn:aws:iam::12345:role/",
            "arn:aws:sts::12345:assumed-role/admin/session",
        ] {
            assert_eq!(RoleArn::parse(arn), None, "{arn} should be rejected");
        }
    }

    #[test]
    fn test_format_round_trips() {
        let arn = RoleArn::format("12345", "my-role");
        assert_eq!(arn, "arn:aws:iam::12345:role/my-role");
        assert!(RoleArn::parse(&arn).is_some());
    }

    #[test]
    fn test_user_name_from_arn() {
        assert_eq!(
            user_name_from_arn("arn:aws:iam::123456789012:user/alice").expect("user"),
            "alice"
        );
        assert_eq!(
            user_name_from_arn("arn:aws:iam::123456789012:user/engineering/bob").expect("user"),
            "bob"
        );
    }

    #[test]
    fn test_user_name_from_arn_rejects_other_principals() {
        assert!(matches!(
            user_name_from_arn("arn:aws:sts::123456789012:assumed-role/admin/session"),
            Err(AwsError::PrincipalError(_))
        ));
        assert!(matches!(
            user_name_from_arn("not-an-arn"),
            Err(AwsError::PrincipalError(_))
        ));
    }
}
