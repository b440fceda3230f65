pub mod recognition;

pub use recognition::{PlainTextRecognizer, RecognitionEngine};
