use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Invalid local address '{value}': {source}")]
    InvalidLocalAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("Ordering: `{value}` is invalid. Use sequential or random.")]
    InvalidOrdering { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Rate: or Concurrency Level: can't be zero")]
    RateAndConcurrencyZero,
    #[error("Rate: is conflict with Concurrency Level:")]
    RateConcurrencyConflict,
    #[error("Duration: can't be zero")]
    RateRequiresDuration,
    #[error("Number: can't be zero")]
    ConcurrencyRequiresNumber,
    #[error("Targets file: is empty")]
    TargetsEmpty,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
