pub mod fixtures;
pub mod helpers;
pub mod leagues;
pub mod predictions;
pub mod users;
