//! Mock gateway identity for integration tests.
//!
//! Services behind the gateway receive an `x-hsi-user-id` header. In tests,
//! `MockAuth` produces that header directly so no real gateway is needed.

use http::{HeaderName, HeaderValue};

use hsi_auth_types::identity::USER_ID_HEADER;

/// Identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: i32,
}

impl MockAuth {
    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }

    /// The header pair the gateway would inject.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from(self.user_id),
        )
    }
}
