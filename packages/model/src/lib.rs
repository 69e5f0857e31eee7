//! # Vinyl Page Model
//!
//! Document model for marketing pages built with the Vinyl page builder.
//!
//! A page is an ordered list of typed sections. This crate only describes
//! the data; every invariant on it (contiguous `order`, unique section ids,
//! edit-mode bookkeeping) is enforced by the store in `vinyl-editor`.
//!
//! ```text
//! PageContent
//!  ├─ id, title, slug, description
//!  ├─ isPublished / isDraft
//!  ├─ createdAt / updatedAt / lastModified
//!  └─ sections: [PageSection]
//!       ├─ id, order (1-based), isVisible
//!       └─ type + config  (SectionConfig, Unknown fallback)
//! ```

pub mod clock;
pub mod error;
pub mod ids;
pub mod page;
pub mod result;
pub mod section;
pub mod validation;

pub use clock::*;
pub use error::*;
pub use ids::*;
pub use page::*;
pub use result::*;
pub use section::*;
pub use validation::*;
