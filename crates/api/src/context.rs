use deskbook_store::UserRow;

/// The authenticated account for a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRow);
