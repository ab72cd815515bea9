use crate::types::errors::PayloadError;
use crate::types::UserId;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PAYLOAD_PREFIX: &str = "USER_ID";
const PAYLOAD_SEPARATOR: char = '|';

/// A single lookup request.
///
/// Requests arrive either as a bare identifier or as the `USER_ID|<id>` string
/// encoded into the printed QR codes handed out to users.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScanPayload {
    user_id: UserId
}

impl ScanPayload {
    pub fn into_user_id(self) -> UserId {
        self.user_id
    }
}

impl Display for ScanPayload {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}{}", PAYLOAD_PREFIX, PAYLOAD_SEPARATOR, self.user_id)
    }
}

impl FromStr for ScanPayload {
    type Err = PayloadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let user_id = match value.split_once(PAYLOAD_SEPARATOR) {
            None => value,
            Some((prefix, user_id)) => {
                if user_id.contains(PAYLOAD_SEPARATOR) {
                    return Err(PayloadError::InvalidFormat(value.to_string()));
                }

                if prefix.trim() != PAYLOAD_PREFIX {
                    return Err(PayloadError::InvalidPrefix(prefix.to_string()));
                }

                user_id.trim()
            }
        };

        if user_id.is_empty() {
            return Err(PayloadError::EmptyUserId);
        }

        Ok(ScanPayload { user_id: user_id.to_string() })
    }
}
