pub mod errors;
pub mod models;
pub mod utils;

pub use errors::LexiflowError;
pub use models::{
    Category,
    Question,
    ReviewItem,
    ReviewOutcome,
    ReviewRecord,
    Settings,
    Word,
};
