pub mod errors;
pub mod models;
pub mod policy;

pub use models::AccessRule;
pub use models::Decision;
pub use models::PathPattern;
pub use models::Requirement;
pub use models::UnmatchedPathPolicy;
pub use policy::AccessPolicy;
