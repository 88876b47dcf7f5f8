pub mod cli;
pub mod quantity;
pub mod normalizer;
pub mod ingredient_parser;
pub mod aisle_classifier;
pub mod consolidator;
pub mod pantry;
pub mod shopping_list;
pub mod grocery_planner;
pub mod chat_commands;
