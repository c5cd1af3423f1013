//! Amazon Resource Names.
//!
//! Only the structure is checked here: `arn:<partition>:<service>:<region>:<account>:<resource>`.
//! Whether the bucket, role or agent actually exists is the provisioning
//! engine's concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ArnError;

/// Services whose ARNs name an S3 bucket or an Outposts access point.
const S3_BUCKET_SERVICES: &[&str] = &["s3", "s3-outposts"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Arn {
    raw: String,
    // byte offsets of the five separators
    colons: [usize; 5],
}

impl Arn {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ArnError> {
        let raw = raw.into();
        if !raw.starts_with("arn:") {
            return Err(ArnError::MissingPrefix(raw));
        }

        let mut colons = [0usize; 5];
        let mut found = 0;
        for (idx, ch) in raw.char_indices() {
            if ch == ':' {
                colons[found] = idx;
                found += 1;
                if found == colons.len() {
                    break;
                }
            }
        }
        if found < colons.len() {
            return Err(ArnError::TooFewParts(raw));
        }

        let arn = Self { raw, colons };
        for (part, value) in [
            ("partition", arn.partition()),
            ("service", arn.service()),
            ("resource", arn.resource()),
        ] {
            if value.is_empty() {
                return Err(ArnError::EmptyPart {
                    arn: arn.raw.clone(),
                    part,
                });
            }
        }
        Ok(arn)
    }

    /// S3 bucket ARN, e.g. `arn:aws:s3:::my-bucket`, or an Outposts
    /// access point ARN (`arn:aws:s3-outposts:...`).
    pub fn s3_bucket(raw: impl Into<String>) -> Result<Self, ArnError> {
        let arn = Self::parse(raw)?;
        arn.ensure_s3_bucket()?;
        Ok(arn)
    }

    /// IAM role ARN, e.g. `arn:aws:iam::123456789012:role/MyRole`.
    pub fn iam_role(raw: impl Into<String>) -> Result<Self, ArnError> {
        Self::parse(raw)?.expect_service("iam")
    }

    /// DataSync agent ARN.
    pub fn datasync_agent(raw: impl Into<String>) -> Result<Self, ArnError> {
        Self::parse(raw)?.expect_service("datasync")
    }

    pub fn expect_service(self, expected: &'static str) -> Result<Self, ArnError> {
        self.ensure_service(expected)?;
        Ok(self)
    }

    pub fn ensure_service(&self, expected: &'static str) -> Result<(), ArnError> {
        if self.service() == expected {
            Ok(())
        } else {
            Err(ArnError::WrongService {
                arn: self.raw.clone(),
                expected,
                actual: self.service().to_string(),
            })
        }
    }

    pub fn ensure_s3_bucket(&self) -> Result<(), ArnError> {
        if S3_BUCKET_SERVICES.contains(&self.service()) {
            Ok(())
        } else {
            Err(ArnError::WrongService {
                arn: self.raw.clone(),
                expected: "s3 or s3-outposts",
                actual: self.service().to_string(),
            })
        }
    }

    fn segment(&self, index: usize) -> &str {
        let start = if index == 0 { 0 } else { self.colons[index - 1] + 1 };
        let end = self.colons.get(index).copied().unwrap_or(self.raw.len());
        &self.raw[start..end]
    }

    pub fn partition(&self) -> &str {
        self.segment(1)
    }

    pub fn service(&self) -> &str {
        self.segment(2)
    }

    pub fn region(&self) -> &str {
        self.segment(3)
    }

    pub fn account(&self) -> &str {
        self.segment(4)
    }

    pub fn resource(&self) -> &str {
        self.segment(5)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Arn {
    type Error = ArnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Arn> for String {
    fn from(arn: Arn) -> Self {
        arn.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_bucket_arn_with_empty_region_and_account() {
        let arn = Arn::s3_bucket("arn:aws:s3:::example-source-bucket").unwrap();
        assert_eq!(arn.partition(), "aws");
        assert_eq!(arn.service(), "s3");
        assert_eq!(arn.region(), "");
        assert_eq!(arn.account(), "");
        assert_eq!(arn.resource(), "example-source-bucket");
    }

    #[test]
    fn resource_keeps_embedded_colons() {
        let arn = Arn::parse("arn:aws:logs:us-east-1:123456789012:log-group:/aws/datasync:*")
            .unwrap();
        assert_eq!(arn.region(), "us-east-1");
        assert_eq!(arn.resource(), "log-group:/aws/datasync:*");
    }

    #[test]
    fn role_and_agent_constructors_check_the_service() {
        assert!(Arn::iam_role("arn:aws:iam::123456789012:role/DataSyncAccessRole").is_ok());
        assert!(Arn::datasync_agent("arn:aws:datasync:region:account:agent/agent-id").is_ok());

        let err = Arn::iam_role("arn:aws:s3:::bucket").unwrap_err();
        assert_eq!(
            err,
            ArnError::WrongService {
                arn: "arn:aws:s3:::bucket".to_string(),
                expected: "iam",
                actual: "s3".to_string(),
            }
        );
    }

    #[test]
    fn s3_bucket_accepts_outposts_access_points() {
        let arn = Arn::s3_bucket(
            "arn:aws:s3-outposts:us-east-1:123456789012:outpost/op-01234567890123456/accesspoint/ap",
        )
        .unwrap();
        assert_eq!(arn.service(), "s3-outposts");
        assert_eq!(arn.region(), "us-east-1");

        let err = Arn::s3_bucket("arn:aws:s3-express:::bucket").unwrap_err();
        assert!(matches!(err, ArnError::WrongService { expected: "s3 or s3-outposts", .. }));
    }

    #[rstest]
    #[case::no_prefix("s3:::bucket")]
    #[case::too_short("arn:aws:s3::bucket")]
    #[case::empty_service("arn:aws::::bucket")]
    #[case::empty_resource("arn:aws:s3:::")]
    fn rejects_malformed(#[case] raw: &str) {
        assert!(Arn::parse(raw).is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let arn = Arn::s3_bucket("arn:aws:s3:::bucket").unwrap();
        assert_eq!(serde_json::to_string(&arn).unwrap(), "\"arn:aws:s3:::bucket\"");

        let err = serde_json::from_str::<Arn>("\"not-an-arn\"").unwrap_err();
        assert!(err.to_string().contains("must start with 'arn:'"));
    }
}
