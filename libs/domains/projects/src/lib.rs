//! Projects Domain
//!
//! Complete domain implementation for managing projects over MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response-mode negotiation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB + in-memory impls)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, input DTO, field-name mapping
//! └─────────────┘
//! ```
//!
//! Stored documents keep historical Croatian field names; the HTTP
//! surface exposes English ones. See [`fields`] for the mapping.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{
//!     handlers,
//!     mongodb::MongoProjectRepository,
//!     service::ProjectService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoProjectRepository::new(db);
//! let service = ProjectService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fields;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProjectError, ProjectResult};
pub use handlers::ApiDoc;
pub use memory::MemoryProjectRepository;
pub use models::{Project, ProjectInput};
pub use mongodb::MongoProjectRepository;
pub use repository::ProjectRepository;
pub use service::ProjectService;
