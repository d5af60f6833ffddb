pub mod company;
pub mod job;
pub mod user;

pub use company::{Company, CompanyDetail, CompanyFilter, CompanyUpdate, NewCompany};
pub use job::{Job, JobDetail, JobFilter, JobUpdate, NewJob};
pub use user::{NewUser, User, UserUpdate};

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
