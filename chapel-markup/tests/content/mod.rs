//! Content record tests: JSON in, validation, rendered fields out.

mod records;
