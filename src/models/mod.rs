pub mod user;
pub mod holding;
pub mod trade;
pub mod journal;
pub mod email;

pub use user::{LoginUser, NewUser, ResetPassword, User};
pub use holding::{Holding, NewHolding, UpdateHolding};
pub use trade::{NewTrade, Trade, DAY_TRADE};
pub use journal::{Journal, NewJournal};
pub use email::{OtpRequest, SendOtpQuery, UseCase, VerifyOtpQuery};
