mod index_property_tests;
mod tree_property_tests;
