pub mod catalog_queries;
pub mod recommender;
pub mod similarity;
pub mod title_index;
pub mod vectorizer;

pub use recommender::Recommender;
