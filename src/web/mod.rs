//! Web server exposing the catalog queries over HTTP.
//!
//! This module packages the hierarchy operations as a small stateless query
//! service using Axum. Every request recomputes from the snapshot loaded at
//! startup - no derived index is maintained between requests.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! dx-catalog serve
//!
//! # Custom port and auto-open browser
//! dx-catalog serve --port 3000 --open
//!
//! # Serve a custom catalog file
//! dx-catalog serve --catalog my_codes.json
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check with entry count
//! - `GET /api/hierarchy` - Flattened, depth-annotated display order
//! - `GET /api/breadcrumb?code=` - Root-to-entry trail for a code
//! - `GET /api/parents?code=` - Parent candidates (code optional)
//! - `GET /api/entries?q=` - Substring search over code and name

pub mod server;
