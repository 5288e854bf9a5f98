mod group_tests;
mod parse_tests;
