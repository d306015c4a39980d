pub mod extract;
pub mod guard;
pub mod identity;
pub mod response;

pub use extract::{CurrentUser, ValidJson, ValidQuery};
pub use guard::{disallow_modify, request_timeout};
pub use identity::gateway_identity;
pub use response::{unified_resp, ApiResponse, ApiResult};
