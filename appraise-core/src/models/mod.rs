//! Domain types shared across the client

mod attachment;
mod response;
mod test;

pub use attachment::Attachment;
pub use response::{AnswerValue, Response};
pub use test::{Question, QuestionKind, Test, TestSummary};
