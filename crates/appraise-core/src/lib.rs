//! appraise-core: house feature form, feature encoding, and price prediction.
//!
//! The crate turns a filled-in house feature form into the single feature row
//! a trained regression model expects, then asks the model for a price.
//!
//! # Pipeline
//!
//! 1. [`FormSchema`] describes the numeric inputs (bounded integers) and the
//!    categorical selectors (fixed option lists).
//! 2. [`RawInput`] holds one submission: clamped numbers and one selected
//!    option per selector.
//! 3. [`FeatureEncoder`] one-hot encodes the selections and aligns the row
//!    with a [`FeatureSchema`] (zero-filling expected columns it cannot derive).
//! 4. A [`Predictor`] loaded once from a model artifact produces the value.
//!
//! [`Appraiser`] wires these together for the front ends.

pub mod appraiser;
pub mod config;
pub mod display;
pub mod encoder;
pub mod error;
pub mod form;
pub mod input;
pub mod model;
pub mod schema;

pub use appraiser::*;
pub use config::*;
pub use display::*;
pub use encoder::*;
pub use error::{AppraiseError, Result};
pub use form::*;
pub use input::*;
pub use model::*;
pub use schema::*;
