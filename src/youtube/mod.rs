pub mod links;
pub mod resolver;
