pub mod grade;
pub mod message;

pub use grade::Grade;
pub use message::{
    ErrorDetail, ErrorKind, MessageContent, MessageGroup, MessageHeader, ReviewResult,
    ReviewStatus, ReviewSummary, EXTRA_MARKER, MISSING_MARKER,
};
