use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Header of the user+IP report
pub const USER_IP_HEADER: [&str; 4] = ["User", "IP", "Failed Attempts", "Suspicious"];

/// Header of the IP report
pub const IP_HEADER: [&str; 4] = ["IP", "Unique Users Targeted", "Users", "Suspicious"];

/// Separator between user names in the `Users` column
pub const USER_LIST_DELIMITER: &str = ";";

/// One (user, ip) pair with its failure count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIpRow {
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Failed Attempts")]
    pub failed_attempts: usize,
    #[serde(
        rename = "Suspicious",
        serialize_with = "yes_no::serialize",
        deserialize_with = "yes_no::deserialize"
    )]
    pub suspicious: bool,
}

/// One IP with the distinct users it failed against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRow {
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Unique Users Targeted")]
    pub unique_user_count: usize,
    /// Sorted users joined with `;`
    #[serde(rename = "Users")]
    pub users: String,
    #[serde(
        rename = "Suspicious",
        serialize_with = "yes_no::serialize",
        deserialize_with = "yes_no::deserialize"
    )]
    pub suspicious: bool,
}

/// `YES`/`NO` encoding of the suspicious flag
pub mod yes_no {
    use super::*;

    pub const YES: &str = "YES";
    pub const NO: &str = "NO";

    pub fn as_str(flag: bool) -> &'static str {
        if flag {
            YES
        } else {
            NO
        }
    }

    pub fn serialize<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(as_str(*flag))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            YES => Ok(true),
            NO => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected YES or NO, found {other:?}"
            ))),
        }
    }
}
