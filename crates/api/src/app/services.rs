use std::sync::Arc;

use deskbook_auth::TokenService;
use deskbook_directory::Directory;

/// Handler-visible state: the use-case layer plus the token signer.
#[derive(Clone)]
pub struct AppServices {
    pub directory: Arc<Directory>,
    pub tokens: TokenService,
}
