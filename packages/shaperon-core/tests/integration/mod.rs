//! Integration test suite.
//!
//! 1. Attribute tables written to and read from files
//! 2. Shape and index files written side by side
//! 3. Full workflow: features with attributes, geometry and a rebuilt index

pub mod dbase_table_tests;
pub mod end_to_end_tests;
pub mod helpers;
pub mod shape_file_tests;
