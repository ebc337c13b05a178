//! Extension traits

mod depot;
mod result;
mod user;

pub(crate) use depot::StateExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use user::CurrentUserExt as _;
