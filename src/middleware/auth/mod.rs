pub mod credentials;
pub mod gate;
pub mod policy;

pub use credentials::basic_auth_password;
pub use policy::{Decision, authorize, is_releases_path};
