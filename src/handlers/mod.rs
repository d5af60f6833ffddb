// Route handlers. Public: /health, /auth/*, GET /companies*, GET /jobs*.
// Admin: mutations on companies and jobs, /users listing and creation.
// Admin or same user: /users/:username.
pub mod auth;
pub mod companies;
pub mod extract;
pub mod health;
pub mod jobs;
pub mod users;
mod validate;
