pub mod matches;
pub mod outreach;
pub mod preferences;
pub mod upload;
