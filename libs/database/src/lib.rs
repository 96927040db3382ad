//! MongoDB connectivity for the projects API.
//!
//! Provides connection setup with retry, configuration, and health
//! checks on top of the official `mongodb` driver.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("projects");
//! let collection = db.collection::<Document>("projects");
//! ```

pub mod common;
pub mod mongodb;
