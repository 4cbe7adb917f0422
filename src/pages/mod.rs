mod auth;
mod categories;
mod events;
mod home;

pub(crate) use auth::{LoginPage, RegisterPage};
pub(crate) use categories::CategoriesPage;
pub(crate) use events::EventsPage;
pub(crate) use home::HomePage;
