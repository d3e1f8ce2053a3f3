mod field_matcher_tests;
mod property_tests;
mod type_ref_tests;
pub(crate) mod utils;
