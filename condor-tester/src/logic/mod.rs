pub mod fixture;
pub mod reports;
pub mod tester;

pub use fixture::Fixture;
pub use tester::*;
