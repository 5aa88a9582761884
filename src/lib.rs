//! # Entrada
//!
//! `entrada` is a small login/signup application core. It ships two halves:
//!
//! - **Server** ([`api`]): an axum HTTP service exposing user creation
//!   (`POST /users`), a credential check (`GET /users`), and a database
//!   liveness probe (`GET /health`), backed by a Postgres `users` table with
//!   a unique email index.
//! - **Client** ([`form`]): the validation engine and submission state
//!   machine shared by the login and signup forms, plus a reqwest client for
//!   the API above.
//!
//! ## Credentials
//!
//! Passwords are hashed with Argon2id before storage and verified server
//! side; the `createUser`/`findUserByCredentials` contract never exposes the
//! stored hash. Unknown email and wrong password are indistinguishable to
//! callers so accounts cannot be enumerated.

pub mod api;
pub mod cli;
mod email;
pub mod form;
