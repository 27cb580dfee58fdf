mod token_store;
mod user_data_repo;

pub use token_store::{FileTokenStore, TOKEN_FILE_NAME};
pub use user_data_repo::HttpUserDataRepository;
