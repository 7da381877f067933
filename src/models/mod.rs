pub mod avatar_grid;
pub mod links;
pub mod progress;
pub mod proposal;
pub mod transaction;
pub mod vote_page;
pub mod voters;
