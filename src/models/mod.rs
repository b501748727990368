pub mod company;
pub mod timer;

pub use company::Company;
pub use timer::Timer;
