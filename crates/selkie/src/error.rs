pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("opposed layout requires two readings on every item, missing on: {item_id}")]
    MissingReadings { item_id: String },

    #[error("item {item_id} has a non-finite {field}")]
    NonFinite {
        item_id: String,
        field: &'static str,
    },

    #[error("item {item_id} has a negative frequency")]
    NegativeFrequency { item_id: String },
}
