pub mod bearer;
pub mod current_claims;
pub mod json_or_form;

pub use bearer::bearer_token;
pub use current_claims::CurrentClaims;
pub use json_or_form::JsonOrForm;
