pub mod comparator;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod scorer;

pub use comparator::MessageComparator;
pub use parser::{MessageParser, ReferenceParser};
pub use report::{ReportFormat, ReportGenerator};
pub use scorer::{ScoreBreakdown, Scorer};
