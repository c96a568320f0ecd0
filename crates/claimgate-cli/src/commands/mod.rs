pub mod claimant_id;
pub mod extract;
pub mod resolve;
pub mod token;
