//! Application layer - the account and hero service contracts.

mod account;
mod hero;

pub use account::AccountService;
pub use hero::HeroService;
