//! Extractors handlers use instead of raw `Path` and `Json`.
//!
//! Both reject with [`crate::errors::AppError`], so bad input turns
//! into the standard error envelope without per-handler code.

pub mod object_id_path;
pub mod validated_json;

pub use object_id_path::ObjectIdPath;
pub use validated_json::ValidatedJson;
